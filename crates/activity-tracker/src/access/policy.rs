use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::accounts::{UserId, UserRecord, UserRole};
use crate::programs::ProgramCategory;

/// Operations gated by the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AccessOperation {
    ViewStudents,
    ViewActivities,
    ApproveActivity,
    SubmitActivity,
    ManageUsers,
    ViewReports,
}

impl AccessOperation {
    pub const fn label(self) -> &'static str {
        match self {
            AccessOperation::ViewStudents => "view-students",
            AccessOperation::ViewActivities => "view-activities",
            AccessOperation::ApproveActivity => "approve-activity",
            AccessOperation::SubmitActivity => "submit-activity",
            AccessOperation::ManageUsers => "manage-users",
            AccessOperation::ViewReports => "view-reports",
        }
    }
}

/// The acting account, reduced to what the policy looks at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: UserId,
    pub role: UserRole,
    pub program_category: Option<ProgramCategory>,
}

impl From<&UserRecord> for Actor {
    fn from(record: &UserRecord) -> Self {
        Self {
            id: record.id.clone(),
            role: record.role,
            program_category: record.program_category,
        }
    }
}

/// Which students' records an actor may act upon for one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessScope {
    Unrestricted,
    Category(ProgramCategory),
    OwnRecords(UserId),
    Denied,
}

impl AccessScope {
    pub fn is_denied(&self) -> bool {
        matches!(self, AccessScope::Denied)
    }

    pub fn permits_student(&self, student: &UserRecord) -> bool {
        match self {
            AccessScope::Unrestricted => true,
            AccessScope::Category(category) => {
                student.is_student() && student.program_category == Some(*category)
            }
            AccessScope::OwnRecords(id) => student.id == *id,
            AccessScope::Denied => false,
        }
    }

    /// Builds the owner filter for activity queries. `students` is only consulted for
    /// category scopes; a category that matches nobody yields a filter that matches nothing.
    pub fn activity_filter<'a, I>(&self, students: I) -> ActivityFilter
    where
        I: IntoIterator<Item = &'a UserRecord>,
    {
        match self {
            AccessScope::Unrestricted => ActivityFilter::All,
            AccessScope::Category(_) => ActivityFilter::OwnedBy(
                students
                    .into_iter()
                    .filter(|student| self.permits_student(student))
                    .map(|student| student.id.clone())
                    .collect(),
            ),
            AccessScope::OwnRecords(id) => ActivityFilter::OwnedBy(BTreeSet::from([id.clone()])),
            AccessScope::Denied => ActivityFilter::OwnedBy(BTreeSet::new()),
        }
    }
}

/// Owner constraint applied to activity queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityFilter {
    All,
    OwnedBy(BTreeSet<UserId>),
}

impl ActivityFilter {
    pub fn permits(&self, owner: &UserId) -> bool {
        match self {
            ActivityFilter::All => true,
            ActivityFilter::OwnedBy(owners) => owners.contains(owner),
        }
    }

    pub fn is_unsatisfiable(&self) -> bool {
        matches!(self, ActivityFilter::OwnedBy(owners) if owners.is_empty())
    }
}

/// Stateless policy: faculty view every student but act only within their category.
pub struct AccessScopePolicy;

impl AccessScopePolicy {
    pub fn scope_for(actor: &Actor, operation: AccessOperation) -> AccessScope {
        match actor.role {
            UserRole::Admin => AccessScope::Unrestricted,
            UserRole::Faculty => faculty_scope(actor, operation),
            UserRole::Student => student_scope(actor, operation),
        }
    }
}

fn faculty_scope(actor: &Actor, operation: AccessOperation) -> AccessScope {
    match operation {
        AccessOperation::ViewStudents => AccessScope::Unrestricted,
        AccessOperation::ViewActivities | AccessOperation::ApproveActivity => {
            match actor.program_category {
                Some(category) => AccessScope::Category(category),
                None => {
                    // Accounts created before categories were mandatory keep full access.
                    warn!(
                        faculty = %actor.id.0,
                        operation = operation.label(),
                        "faculty account has no program category; applying unrestricted scope"
                    );
                    AccessScope::Unrestricted
                }
            }
        }
        AccessOperation::SubmitActivity
        | AccessOperation::ManageUsers
        | AccessOperation::ViewReports => AccessScope::Denied,
    }
}

fn student_scope(actor: &Actor, operation: AccessOperation) -> AccessScope {
    match operation {
        AccessOperation::ViewActivities | AccessOperation::SubmitActivity => {
            AccessScope::OwnRecords(actor.id.clone())
        }
        AccessOperation::ViewStudents
        | AccessOperation::ApproveActivity
        | AccessOperation::ManageUsers
        | AccessOperation::ViewReports => AccessScope::Denied,
    }
}
