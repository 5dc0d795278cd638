use sqlx::sqlite::SqlitePool;
use tokio::sync::broadcast;

use crate::db::{self, StoreError};
use crate::error::{ApiError, ScoreError};
use crate::models::Team;

const UPDATE_CHANNEL_CAPACITY: usize = 16;

/// Shared handler state: the pool plus a channel that pushes the full team
/// list after every successful write.
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    updates: broadcast::Sender<Vec<Team>>,
}

impl AppState {
    pub fn new(pool: SqlitePool) -> Self {
        let (updates, _) = broadcast::channel(UPDATE_CHANNEL_CAPACITY);
        Self { pool, updates }
    }

    /// Each message replaces the subscriber's whole working set.
    pub fn subscribe(&self) -> broadcast::Receiver<Vec<Team>> {
        self.updates.subscribe()
    }

    pub async fn load_all_teams(&self) -> Result<Vec<Team>, StoreError> {
        db::load_all_teams(&self.pool).await
    }

    pub async fn team(&self, team_id: &str) -> Result<Team, ApiError> {
        db::load_team(&self.pool, team_id)
            .await?
            .ok_or_else(|| ScoreError::TeamNotFound(team_id.to_string()).into())
    }

    pub async fn save_team(&self, team: &Team) -> Result<(), StoreError> {
        db::save_team(&self.pool, team).await?;
        self.publish().await;
        Ok(())
    }

    pub async fn delete_team(&self, team_id: &str) -> Result<bool, StoreError> {
        let deleted = db::delete_team(&self.pool, team_id).await?;
        if deleted {
            self.publish().await;
        }
        Ok(deleted)
    }

    async fn publish(&self) {
        if self.updates.receiver_count() == 0 {
            return;
        }
        match self.load_all_teams().await {
            Ok(teams) => {
                // A send only fails when every receiver has gone away.
                let _ = self.updates.send(teams);
            }
            Err(err) => tracing::warn!(error = %err, "could not publish team update"),
        }
    }
}
