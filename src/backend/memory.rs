//! In-process backend for tests and local demos.

use async_trait::async_trait;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{Backend, DateRange};
use crate::auth::UserContext;
use crate::error::BackendError;
use crate::records::{CheckIn, CheckInDraft, Meal, Supplement};

#[derive(Default)]
struct Tables {
    check_ins: Vec<(Uuid, CheckIn)>,
    meals: Vec<(Uuid, Meal)>,
    supplements: Vec<(Uuid, Supplement)>,
}

#[derive(Default)]
pub struct MemoryBackend {
    tables: RwLock<Tables>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_check_in(&self, user_id: Uuid, check_in: CheckIn) {
        let mut t = self.tables.write().await;
        t.check_ins
            .retain(|(owner, ci)| !(*owner == user_id && ci.date == check_in.date));
        t.check_ins.push((user_id, check_in));
    }

    pub async fn insert_meal(&self, user_id: Uuid, meal: Meal) {
        self.tables.write().await.meals.push((user_id, meal));
    }

    pub async fn insert_supplement(&self, user_id: Uuid, supplement: Supplement) {
        self.tables.write().await.supplements.push((user_id, supplement));
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn fetch_check_ins(
        &self,
        user: &UserContext,
        range: DateRange,
    ) -> Result<Vec<CheckIn>, BackendError> {
        let t = self.tables.read().await;
        let mut out: Vec<CheckIn> = t
            .check_ins
            .iter()
            .filter(|(owner, ci)| *owner == user.user_id && range.contains(ci.date))
            .map(|(_, ci)| ci.clone())
            .collect();
        out.sort_by_key(|ci| ci.date);
        Ok(out)
    }

    async fn fetch_meals(
        &self,
        user: &UserContext,
        range: DateRange,
    ) -> Result<Vec<Meal>, BackendError> {
        let (from, to) = range.instants(user.utc_offset);
        let t = self.tables.read().await;
        let mut out: Vec<Meal> = t
            .meals
            .iter()
            .filter(|(owner, m)| *owner == user.user_id && m.logged_at >= from && m.logged_at < to)
            .map(|(_, m)| m.clone())
            .collect();
        out.sort_by_key(|m| m.logged_at);
        Ok(out)
    }

    async fn fetch_supplements(&self, user: &UserContext) -> Result<Vec<Supplement>, BackendError> {
        let t = self.tables.read().await;
        Ok(t.supplements
            .iter()
            .filter(|(owner, _)| *owner == user.user_id)
            .map(|(_, s)| s.clone())
            .collect())
    }

    async fn save_check_in(
        &self,
        user: &UserContext,
        draft: CheckInDraft,
    ) -> Result<CheckIn, BackendError> {
        let mut t = self.tables.write().await;
        let existing = t
            .check_ins
            .iter()
            .position(|(owner, ci)| *owner == user.user_id && ci.date == draft.date);

        let saved = match existing {
            Some(i) => {
                let ci = &mut t.check_ins[i].1;
                ci.energy = draft.energy;
                ci.gut = draft.gut;
                ci.mood = draft.mood;
                ci.symptoms = draft.symptoms;
                ci.notes = draft.notes;
                ci.clone()
            }
            None => {
                let ci = CheckIn {
                    date: draft.date,
                    energy: draft.energy,
                    gut: draft.gut,
                    mood: draft.mood,
                    symptoms: draft.symptoms,
                    notes: draft.notes,
                    logged_at: OffsetDateTime::now_utc(),
                };
                t.check_ins.push((user.user_id, ci.clone()));
                ci
            }
        };
        Ok(saved)
    }
}
