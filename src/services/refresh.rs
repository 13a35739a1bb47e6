use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::error::AppError;
use crate::models::Recommendation;
use crate::planner;
use crate::repository;

/// Keeps the recommendation list consistent with the stored timetable,
/// assignments and preferences.
///
/// Mutating handlers call `schedule_refresh`, which starts a short delayed
/// recompute and aborts any recompute still waiting. A burst of edits
/// therefore collapses into a single pass over the final state.
pub struct RecommendationRefresher {
    db: SqlitePool,
    delay: Duration,
    cache: RwLock<Vec<Recommendation>>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl RecommendationRefresher {
    pub fn new(db: SqlitePool, delay_ms: u64) -> Arc<Self> {
        Arc::new(Self {
            db,
            delay: Duration::from_millis(delay_ms),
            cache: RwLock::new(Vec::new()),
            pending: Mutex::new(None),
        })
    }

    /// The most recently computed recommendation list.
    pub async fn current(&self) -> Vec<Recommendation> {
        self.cache.read().await.clone()
    }

    /// Queue a debounced recompute, superseding any pending one.
    pub async fn schedule_refresh(self: &Arc<Self>) {
        let mut pending = self.pending.lock().await;
        if let Some(handle) = pending.take() {
            handle.abort();
        }

        let refresher = Arc::clone(self);
        let delay = self.delay;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(e) = refresher.refresh_now().await {
                warn!("recommendation refresh failed: {e}");
            }
        }));
    }

    /// Recompute immediately from a fresh snapshot and swap the cache.
    pub async fn refresh_now(&self) -> Result<Vec<Recommendation>, AppError> {
        let schedule = repository::fetch_current_schedule(&self.db).await?;
        let assignments = repository::fetch_assignments(&self.db).await?;
        let preferences = repository::fetch_preferences(&self.db).await?;

        let recommendations =
            planner::generate_recommendations(&schedule, &assignments, preferences.as_ref());
        info!(
            "recomputed {} recommendations from {} class slots and {} assignments",
            recommendations.len(),
            schedule.len(),
            assignments.len()
        );

        *self.cache.write().await = recommendations.clone();
        Ok(recommendations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AssignmentKind, NewAssignmentRequest, Priority};

    async fn setup_test_db() -> SqlitePool {
        let pool = SqlitePool::connect("sqlite::memory:")
            .await
            .expect("Failed to create test db");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");
        pool
    }

    async fn seed(pool: &SqlitePool) {
        repository::replace_schedule(
            pool,
            "default",
            &[crate::models::TimeSlot::open("Mon", "08:00", "08:30")],
        )
        .await
        .expect("replace failed");

        repository::insert_assignment(
            pool,
            NewAssignmentRequest {
                title: "Sorting homework".to_string(),
                due_date: "2026-03-01".to_string(),
                estimated_time: 60,
                priority: Priority::High,
                kind: AssignmentKind::School,
                progress: None,
                added_to_ai: true,
                memo: String::new(),
                repeat_rule: None,
                reminder: None,
            },
        )
        .await
        .expect("insert failed");
    }

    #[tokio::test]
    async fn refresh_now_populates_the_cache() {
        let pool = setup_test_db().await;
        seed(&pool).await;

        let refresher = RecommendationRefresher::new(pool, 10);
        assert!(refresher.current().await.is_empty());

        let recs = refresher.refresh_now().await.expect("refresh failed");
        assert!(!recs.is_empty());
        assert_eq!(refresher.current().await, recs);
    }

    #[tokio::test]
    async fn rapid_schedules_coalesce_into_one_pass() {
        let pool = setup_test_db().await;
        seed(&pool).await;

        let refresher = RecommendationRefresher::new(pool, 20);
        for _ in 0..5 {
            refresher.schedule_refresh().await;
        }
        assert!(refresher.current().await.is_empty());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!refresher.current().await.is_empty());
    }
}
