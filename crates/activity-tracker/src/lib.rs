//! Student activity tracking core.
//!
//! Students submit extracurricular activities with proof documents, faculty review them and
//! award credits, administrators manage accounts and pull credit reports. The program catalog,
//! selection validator, access scope policy and review workflow are pure; the services wrap
//! them around injected repositories and the routers expose the services over HTTP.

pub mod access;
pub mod accounts;
pub mod activities;
pub mod config;
pub mod error;
pub mod identity;
pub mod programs;
pub mod reports;
pub mod storage;
pub mod telemetry;
pub mod validation;
