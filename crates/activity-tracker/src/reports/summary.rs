use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::accounts::{UserId, UserRecord};
use crate::activities::{ActivityRecord, ActivityStatus};
use crate::programs::ProgramCategory;

/// One student's activity tally.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditReportRow {
    pub student_id: UserId,
    pub name: String,
    pub email: String,
    pub program_category: Option<ProgramCategory>,
    pub program: Option<String>,
    pub approved: usize,
    pub pending: usize,
    pub rejected: usize,
    pub total_credits: f64,
}

impl CreditReportRow {
    fn empty(student: &UserRecord) -> Self {
        Self {
            student_id: student.id.clone(),
            name: student.name.clone(),
            email: student.email.clone(),
            program_category: student.program_category,
            program: student.program.clone(),
            approved: 0,
            pending: 0,
            rejected: 0,
            total_credits: 0.0,
        }
    }

    fn record(&mut self, activity: &ActivityRecord) {
        match activity.status {
            ActivityStatus::Pending => self.pending += 1,
            ActivityStatus::Approved => {
                self.approved += 1;
                self.total_credits += activity.credits;
            }
            ActivityStatus::Rejected => self.rejected += 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditReportTotals {
    pub students: usize,
    pub approved: usize,
    pub pending: usize,
    pub rejected: usize,
    pub total_credits: f64,
}

/// Per-student credit summary, grouped by category (catalog order) then name.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreditReport {
    pub generated_at: DateTime<Utc>,
    pub rows: Vec<CreditReportRow>,
    pub totals: CreditReportTotals,
}

impl CreditReport {
    /// Non-student accounts are skipped. Activities whose owner is not among `users` are
    /// ignored.
    pub fn build(
        users: &[UserRecord],
        activities: &[ActivityRecord],
        generated_at: DateTime<Utc>,
    ) -> Self {
        let mut rows: HashMap<&UserId, CreditReportRow> = users
            .iter()
            .filter(|user| user.is_student())
            .map(|student| (&student.id, CreditReportRow::empty(student)))
            .collect();

        for activity in activities {
            if let Some(row) = rows.get_mut(&activity.student_id) {
                row.record(activity);
            }
        }

        let mut rows: Vec<_> = rows.into_values().collect();
        rows.sort_by(|a, b| {
            category_rank(a.program_category)
                .cmp(&category_rank(b.program_category))
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.student_id.cmp(&b.student_id))
        });

        let totals = rows.iter().fold(
            CreditReportTotals::default(),
            |mut totals, row| {
                totals.students += 1;
                totals.approved += row.approved;
                totals.pending += row.pending;
                totals.rejected += row.rejected;
                totals.total_credits += row.total_credits;
                totals
            },
        );

        Self {
            generated_at,
            rows,
            totals,
        }
    }
}

fn category_rank(category: Option<ProgramCategory>) -> usize {
    let ordered = ProgramCategory::ordered();
    category
        .and_then(|category| ordered.iter().position(|candidate| *candidate == category))
        .unwrap_or(ordered.len())
}
