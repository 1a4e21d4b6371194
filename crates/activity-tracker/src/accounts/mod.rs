//! Accounts: registration, profile validation, and admin management.

pub mod domain;
pub mod registration;
pub mod repository;
pub mod router;
pub mod service;


pub use domain::{
    ProfileUpdate, Registration, StudentQuery, UserId, UserRecord, UserRemovalSummary, UserRole,
};
pub use registration::{AcademicProfile, ProfileGuard};
pub use repository::UserRepository;
pub use router::account_router;
pub use service::{AccountService, AccountServiceError};
