//! Program catalog and the selection validator layered on top of it.

pub mod catalog;
pub mod domain;
pub mod router;
pub mod validator;

pub use catalog::ProgramCatalog;
pub use domain::{CategoryEntry, Program, ProgramCategory};
pub use router::catalog_router;
pub use validator::{ProgramSelection, ProgramSelectionValidator};
