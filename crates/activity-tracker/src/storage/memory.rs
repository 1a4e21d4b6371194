use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::RepositoryError;
use crate::accounts::{UserId, UserRecord, UserRepository};
use crate::activities::repository::{ActivityQuery, ActivityRepository};
use crate::activities::review::{plan_user_removal, UserRemovalPlan};
use crate::activities::{ActivityId, ActivityRecord, ActivityStatus};

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable("repository mutex poisoned".to_string()))
}

#[derive(Default, Clone)]
pub struct InMemoryUserRepository {
    records: Arc<Mutex<HashMap<UserId, UserRecord>>>,
}

impl UserRepository for InMemoryUserRepository {
    fn insert(&self, record: UserRecord) -> Result<UserRecord, RepositoryError> {
        let mut guard = lock(&self.records)?;
        let email_taken = guard
            .values()
            .any(|existing| existing.email.eq_ignore_ascii_case(&record.email));
        if email_taken || guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: UserRecord) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.records)?;
        match guard.get_mut(&record.id) {
            Some(slot) => {
                *slot = record;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &UserId) -> Result<Option<UserRecord>, RepositoryError> {
        Ok(lock(&self.records)?.get(id).cloned())
    }

    fn students(&self) -> Result<Vec<UserRecord>, RepositoryError> {
        let mut students: Vec<_> = lock(&self.records)?
            .values()
            .filter(|record| record.is_student())
            .cloned()
            .collect();
        students.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(students)
    }

    fn all(&self) -> Result<Vec<UserRecord>, RepositoryError> {
        let mut users: Vec<_> = lock(&self.records)?.values().cloned().collect();
        users.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(users)
    }

    fn remove(&self, id: &UserId) -> Result<UserRecord, RepositoryError> {
        lock(&self.records)?
            .remove(id)
            .ok_or(RepositoryError::NotFound)
    }
}

#[derive(Default, Clone)]
pub struct InMemoryActivityRepository {
    records: Arc<Mutex<HashMap<ActivityId, ActivityRecord>>>,
}

impl ActivityRepository for InMemoryActivityRepository {
    fn insert(&self, record: ActivityRecord) -> Result<ActivityRecord, RepositoryError> {
        let mut guard = lock(&self.records)?;
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update_pending(&self, record: ActivityRecord) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.records)?;
        match guard.get_mut(&record.id) {
            Some(slot) if slot.status == ActivityStatus::Pending => {
                *slot = record;
                Ok(())
            }
            Some(_) => Err(RepositoryError::Conflict),
            None => Err(RepositoryError::NotFound),
        }
    }

    fn fetch(&self, id: &ActivityId) -> Result<Option<ActivityRecord>, RepositoryError> {
        Ok(lock(&self.records)?.get(id).cloned())
    }

    fn list(&self, query: &ActivityQuery) -> Result<Vec<ActivityRecord>, RepositoryError> {
        if query.owners.is_unsatisfiable() {
            return Ok(Vec::new());
        }
        let mut matches: Vec<_> = lock(&self.records)?
            .values()
            .filter(|record| query.matches(record))
            .cloned()
            .collect();
        matches.sort_by(|a, b| {
            b.submitted_at
                .cmp(&a.submitted_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(matches)
    }

    fn remove_pending(&self, id: &ActivityId) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.records)?;
        match guard.get(id).map(|record| record.status) {
            Some(ActivityStatus::Pending) => {
                guard.remove(id);
                Ok(())
            }
            Some(_) => Err(RepositoryError::Conflict),
            None => Err(RepositoryError::NotFound),
        }
    }

    fn apply_user_removal(&self, user: &UserRecord) -> Result<UserRemovalPlan, RepositoryError> {
        let mut guard = lock(&self.records)?;
        let owned: Vec<_> = guard
            .values()
            .filter(|record| record.student_id == user.id)
            .cloned()
            .collect();
        let reviewed: Vec<_> = guard
            .values()
            .filter(|record| record.approved_by.as_ref() == Some(&user.id))
            .cloned()
            .collect();
        let plan = plan_user_removal(user, &owned, &reviewed);

        for id in &plan.removed {
            guard.remove(id);
        }
        for record in &plan.detached {
            guard.insert(record.id.clone(), record.clone());
        }
        Ok(plan)
    }
}
