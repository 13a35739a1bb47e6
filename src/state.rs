use std::sync::Arc;

use sqlx::SqlitePool;

use crate::services::RecommendationRefresher;

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub refresher: Arc<RecommendationRefresher>,
}
