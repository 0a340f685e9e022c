//! Backend over the hosted Postgres schema.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, warn};

use super::repo_types::{CheckInRow, MealRow, SupplementRow};
use super::{Backend, DateRange};
use crate::auth::UserContext;
use crate::error::BackendError;
use crate::records::{CheckIn, CheckInDraft, Meal, Supplement};

#[derive(Clone)]
pub struct PgBackend {
    db: PgPool,
}

impl PgBackend {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

const CHECK_IN_COLUMNS: &str = "check_in_date, energy, gut, mood, \
     COALESCE(symptoms, '{}') AS symptoms, notes, created_at";

#[async_trait]
impl Backend for PgBackend {
    async fn fetch_check_ins(
        &self,
        user: &UserContext,
        range: DateRange,
    ) -> Result<Vec<CheckIn>, BackendError> {
        let sql = format!(
            "SELECT {CHECK_IN_COLUMNS} FROM check_ins \
             WHERE user_id = $1 AND check_in_date BETWEEN $2 AND $3 \
             ORDER BY check_in_date ASC"
        );
        let rows = sqlx::query_as::<_, CheckInRow>(&sql)
            .bind(user.user_id)
            .bind(range.start)
            .bind(range.end)
            .fetch_all(&self.db)
            .await?;
        debug!(user_id = %user.user_id, rows = rows.len(), "check-ins fetched");
        Ok(rows.into_iter().map(CheckIn::from).collect())
    }

    async fn fetch_meals(
        &self,
        user: &UserContext,
        range: DateRange,
    ) -> Result<Vec<Meal>, BackendError> {
        let (from, to) = range.instants(user.utc_offset);
        let rows = sqlx::query_as::<_, MealRow>(
            r#"
            SELECT meal_type, description,
                   calories::float8 AS calories, protein::float8 AS protein,
                   carbs::float8 AS carbs, fat::float8 AS fat,
                   fiber::float8 AS fiber, sugar::float8 AS sugar,
                   gut_score::float8 AS gut_score,
                   ai_analysis, COALESCE(ai_tips, '{}') AS ai_tips, logged_at
            FROM meals
            WHERE user_id = $1 AND logged_at >= $2 AND logged_at < $3
            ORDER BY logged_at ASC
            "#,
        )
        .bind(user.user_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.db)
        .await?;

        let mut meals = Vec::with_capacity(rows.len());
        for row in rows {
            match Meal::try_from(row) {
                Ok(meal) => meals.push(meal),
                Err(e) => warn!(user_id = %user.user_id, error = %e, "skipping meal row"),
            }
        }
        debug!(user_id = %user.user_id, rows = meals.len(), "meals fetched");
        Ok(meals)
    }

    async fn fetch_supplements(&self, user: &UserContext) -> Result<Vec<Supplement>, BackendError> {
        let rows = sqlx::query_as::<_, SupplementRow>(
            r#"
            SELECT name, dosage, active, 'supplement' AS kind
            FROM supplements WHERE user_id = $1
            UNION ALL
            SELECT name, dosage, active, 'medication' AS kind
            FROM medications WHERE user_id = $1
            "#,
        )
        .bind(user.user_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows.into_iter().map(Supplement::from).collect())
    }

    async fn save_check_in(
        &self,
        user: &UserContext,
        draft: CheckInDraft,
    ) -> Result<CheckIn, BackendError> {
        let sql = format!(
            "INSERT INTO check_ins (user_id, check_in_date, energy, gut, mood, symptoms, notes) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             ON CONFLICT (user_id, check_in_date) DO UPDATE SET \
                 energy = EXCLUDED.energy, gut = EXCLUDED.gut, mood = EXCLUDED.mood, \
                 symptoms = EXCLUDED.symptoms, notes = EXCLUDED.notes \
             RETURNING {CHECK_IN_COLUMNS}"
        );
        let row = sqlx::query_as::<_, CheckInRow>(&sql)
            .bind(user.user_id)
            .bind(draft.date)
            .bind(draft.energy)
            .bind(draft.gut)
            .bind(draft.mood)
            .bind(&draft.symptoms)
            .bind(&draft.notes)
            .fetch_one(&self.db)
            .await?;
        debug!(user_id = %user.user_id, date = %draft.date, "check-in saved");
        Ok(row.into())
    }
}
