use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use super::export::{to_csv, ReportExportError};
use super::summary::CreditReport;
use crate::access::{
    ensure_allowed, resolve_actor, AccessError, AccessOperation, AccessScopePolicy, Actor,
};
use crate::accounts::{UserId, UserRepository};
use crate::activities::{ActivityQuery, ActivityRepository};
use crate::storage::RepositoryError;

/// Admin-only reporting over the account and activity stores.
pub struct ReportService<U, A> {
    users: Arc<U>,
    activities: Arc<A>,
}

impl<U, A> ReportService<U, A>
where
    U: UserRepository + 'static,
    A: ActivityRepository + 'static,
{
    pub fn new(users: Arc<U>, activities: Arc<A>) -> Self {
        Self { users, activities }
    }

    pub fn credit_report(&self, actor_id: &UserId) -> Result<CreditReport, ReportError> {
        let actor = resolve_actor::<_, ReportError>(self.users.as_ref(), actor_id)?;
        let scope =
            AccessScopePolicy::scope_for(&Actor::from(&actor), AccessOperation::ViewReports);
        ensure_allowed(&scope, AccessOperation::ViewReports)?;

        let users = self.users.all()?;
        let activities = self.activities.list(&ActivityQuery::all())?;
        let report = CreditReport::build(&users, &activities, Utc::now());
        info!(
            admin = %actor.id,
            students = report.totals.students,
            credits = report.totals.total_credits,
            "credit report generated"
        );
        Ok(report)
    }

    pub fn credit_report_csv(&self, actor_id: &UserId) -> Result<String, ReportError> {
        let report = self.credit_report(actor_id)?;
        Ok(to_csv(&report)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error(transparent)]
    Access(#[from] AccessError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error(transparent)]
    Export(#[from] ReportExportError),
}
