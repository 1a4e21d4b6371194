use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use activity_tracker::accounts::{AccountService, ProfileGuard};
use activity_tracker::activities::ActivityService;
use activity_tracker::config::ReviewConfig;
use activity_tracker::programs::{ProgramCatalog, ProgramSelectionValidator};
use activity_tracker::reports::ReportService;
use activity_tracker::storage::{InMemoryActivityRepository, InMemoryUserRepository};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type Accounts = AccountService<InMemoryUserRepository, InMemoryActivityRepository>;
pub(crate) type Activities = ActivityService<InMemoryActivityRepository, InMemoryUserRepository>;
pub(crate) type Reports = ReportService<InMemoryUserRepository, InMemoryActivityRepository>;

/// Services wired over one shared set of in-memory repositories.
#[derive(Clone)]
pub(crate) struct Services {
    pub(crate) catalog: Arc<ProgramCatalog>,
    pub(crate) users: Arc<InMemoryUserRepository>,
    pub(crate) accounts: Arc<Accounts>,
    pub(crate) activities: Arc<Activities>,
    pub(crate) reports: Arc<Reports>,
}

impl Services {
    pub(crate) fn in_memory(review: ReviewConfig) -> Self {
        let catalog = Arc::new(ProgramCatalog::standard());
        let users = Arc::new(InMemoryUserRepository::default());
        let activities = Arc::new(InMemoryActivityRepository::default());
        let guard = ProfileGuard::new(ProgramSelectionValidator::new(catalog.clone()));

        Self {
            catalog,
            accounts: Arc::new(AccountService::new(
                users.clone(),
                activities.clone(),
                guard,
            )),
            activities: Arc::new(ActivityService::new(
                activities.clone(),
                users.clone(),
                review,
            )),
            reports: Arc::new(ReportService::new(users.clone(), activities)),
            users,
        }
    }
}
