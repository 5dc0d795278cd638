use sqlx::sqlite::SqlitePool;
use thiserror::Error;

use crate::models::Team;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("team document {team_id} is unreadable: {source}")]
    Corrupt {
        team_id: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("team document could not be encoded: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Team documents are stored whole; one row per team.
#[derive(Debug, sqlx::FromRow)]
pub struct TeamRow {
    pub team_id: String,
    pub document: String,
}

impl TeamRow {
    pub fn to_team(&self) -> Result<Team, StoreError> {
        serde_json::from_str(&self.document).map_err(|source| StoreError::Corrupt {
            team_id: self.team_id.clone(),
            source,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub struct ImageRow {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

pub async fn init_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS teams (
               team_id    TEXT PRIMARY KEY,
               name       TEXT NOT NULL,
               document   TEXT NOT NULL,
               updated_at TEXT NOT NULL
           )"#
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS images (
               path         TEXT PRIMARY KEY,
               content_type TEXT NOT NULL,
               bytes        BLOB NOT NULL
           )"#
    )
    .execute(pool)
    .await?;

    Ok(())
}

// Team queries
pub async fn load_all_teams(pool: &SqlitePool) -> Result<Vec<Team>, StoreError> {
    let rows = sqlx::query_as::<_, TeamRow>(
        r#"SELECT team_id, document FROM teams ORDER BY name"#
    )
    .fetch_all(pool)
    .await?;

    rows.iter().map(TeamRow::to_team).collect()
}

pub async fn load_team(pool: &SqlitePool, team_id: &str) -> Result<Option<Team>, StoreError> {
    let row = sqlx::query_as::<_, TeamRow>(
        r#"SELECT team_id, document FROM teams WHERE team_id = ?"#
    )
    .bind(team_id)
    .fetch_optional(pool)
    .await?;

    row.as_ref().map(TeamRow::to_team).transpose()
}

/// Writes the whole team document in one statement, so a reader sees either
/// the old team or the new one.
pub async fn save_team(pool: &SqlitePool, team: &Team) -> Result<(), StoreError> {
    let document = serde_json::to_string(team).map_err(StoreError::Encode)?;
    let updated_at = chrono::Utc::now().to_rfc3339();

    sqlx::query(
        r#"INSERT INTO teams (team_id, name, document, updated_at)
           VALUES (?, ?, ?, ?)
           ON CONFLICT(team_id) DO UPDATE SET
               name = excluded.name,
               document = excluded.document,
               updated_at = excluded.updated_at"#
    )
    .bind(&team.id)
    .bind(&team.name)
    .bind(&document)
    .bind(&updated_at)
    .execute(pool)
    .await?;

    tracing::debug!(team = %team.id, bytes = document.len(), "team saved");
    Ok(())
}

/// Returns whether a team was actually removed.
pub async fn delete_team(pool: &SqlitePool, team_id: &str) -> Result<bool, sqlx::Error> {
    let result = sqlx::query(r#"DELETE FROM teams WHERE team_id = ?"#)
        .bind(team_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

// Image queries

/// Stores image bytes under `path` and returns the reference to keep on the
/// player.
pub async fn store_image(
    pool: &SqlitePool,
    path: &str,
    content_type: &str,
    bytes: &[u8],
) -> Result<String, sqlx::Error> {
    sqlx::query(
        r#"INSERT INTO images (path, content_type, bytes)
           VALUES (?, ?, ?)
           ON CONFLICT(path) DO UPDATE SET
               content_type = excluded.content_type,
               bytes = excluded.bytes"#
    )
    .bind(path)
    .bind(content_type)
    .bind(bytes)
    .execute(pool)
    .await?;

    Ok(format!("/api/images/{path}"))
}

pub async fn load_image(pool: &SqlitePool, path: &str) -> Result<Option<ImageRow>, sqlx::Error> {
    sqlx::query_as::<_, ImageRow>(
        r#"SELECT content_type, bytes FROM images WHERE path = ?"#
    )
    .bind(path)
    .fetch_optional(pool)
    .await
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory sqlite");
    init_schema(&pool).await.expect("schema");
    pool
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlayerForm;

    #[tokio::test]
    async fn save_then_load_round_trips_the_team() {
        let pool = test_pool().await;
        let mut team = Team::new("Tigers").unwrap();
        team.add_player(&PlayerForm { name: "Abe".into(), number: Some(23), is_pitcher: true })
            .unwrap();
        save_team(&pool, &team).await.unwrap();

        let loaded = load_team(&pool, &team.id).await.unwrap().unwrap();
        assert_eq!(loaded.name, "Tigers");
        assert_eq!(loaded.players, team.players);

        team.rename("Tigers B").unwrap();
        save_team(&pool, &team).await.unwrap();
        let all = load_all_teams(&pool).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].name, "Tigers B");
    }

    #[tokio::test]
    async fn delete_reports_whether_anything_went() {
        let pool = test_pool().await;
        let team = Team::new("Tigers").unwrap();
        save_team(&pool, &team).await.unwrap();

        assert!(delete_team(&pool, &team.id).await.unwrap());
        assert!(!delete_team(&pool, &team.id).await.unwrap());
        assert!(load_team(&pool, &team.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn corrupt_document_is_reported() {
        let pool = test_pool().await;
        sqlx::query("INSERT INTO teams (team_id, name, document, updated_at) VALUES ('x', 'X', '{', '')")
            .execute(&pool)
            .await
            .unwrap();
        let err = load_team(&pool, "x").await.unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { ref team_id, .. } if team_id == "x"));
    }

    #[tokio::test]
    async fn images_are_served_back_by_reference() {
        let pool = test_pool().await;
        let reference = store_image(&pool, "t1/abe.jpg", "image/jpeg", &[1, 2, 3]).await.unwrap();
        assert_eq!(reference, "/api/images/t1/abe.jpg");

        let image = load_image(&pool, "t1/abe.jpg").await.unwrap().unwrap();
        assert_eq!(image.bytes, vec![1, 2, 3]);
        assert_eq!(image.content_type, "image/jpeg");
        assert!(load_image(&pool, "missing").await.unwrap().is_none());
    }
}
