//! Administrative credit reporting.

pub mod export;
pub mod router;
pub mod service;
pub mod summary;

pub use export::{to_csv, ReportExportError};
pub use router::report_router;
pub use service::{ReportError, ReportService};
pub use summary::{CreditReport, CreditReportRow, CreditReportTotals};
