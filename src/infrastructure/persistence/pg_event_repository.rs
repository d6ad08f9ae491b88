//! PostgreSQL implementation of the event store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Click, NewClick, NewVisit, Visit};
use crate::domain::repositories::EventRepository;
use crate::error::AppError;

#[derive(sqlx::FromRow)]
struct ClickRow {
    id: i64,
    button_id: String,
    username: String,
    clicked_at: DateTime<Utc>,
}

impl From<ClickRow> for Click {
    fn from(r: ClickRow) -> Self {
        Click::new(r.id, r.button_id, r.username, r.clicked_at)
    }
}

#[derive(sqlx::FromRow)]
struct VisitRow {
    id: i64,
    endpoint: String,
    visited_at: DateTime<Utc>,
}

impl From<VisitRow> for Visit {
    fn from(r: VisitRow) -> Self {
        Visit::new(r.id, r.endpoint, r.visited_at)
    }
}

/// PostgreSQL repository for click and visit records.
///
/// Writes are single-row inserts; reads use the `(timestamp DESC, id DESC)`
/// indexes created by the migrations.
pub struct PgEventRepository {
    pool: Arc<PgPool>,
}

impl PgEventRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventRepository for PgEventRepository {
    async fn append_click(&self, new_click: NewClick) -> Result<Click, AppError> {
        if !new_click.has_button_id() {
            return Err(AppError::bad_request(
                "buttonId is required",
                json!({ "field": "buttonId" }),
            ));
        }

        let row = sqlx::query_as::<_, ClickRow>(
            r#"
            INSERT INTO button_clicks (button_id, username, clicked_at)
            VALUES ($1, $2, COALESCE($3, NOW()))
            RETURNING id, button_id, username, clicked_at
            "#,
        )
        .bind(&new_click.button_id)
        .bind(&new_click.username)
        .bind(new_click.timestamp)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn append_visit(&self, new_visit: NewVisit) -> Result<Visit, AppError> {
        let row = sqlx::query_as::<_, VisitRow>(
            r#"
            INSERT INTO page_visits (endpoint)
            VALUES ($1)
            RETURNING id, endpoint, visited_at
            "#,
        )
        .bind(&new_visit.endpoint)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn recent_clicks(&self, limit: i64) -> Result<Vec<Click>, AppError> {
        let rows = sqlx::query_as::<_, ClickRow>(
            r#"
            SELECT id, button_id, username, clicked_at
            FROM button_clicks
            ORDER BY clicked_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit.max(0))
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Click::from).collect())
    }

    async fn recent_visits(&self, limit: i64) -> Result<Vec<Visit>, AppError> {
        let rows = sqlx::query_as::<_, VisitRow>(
            r#"
            SELECT id, endpoint, visited_at
            FROM page_visits
            ORDER BY visited_at DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(limit.max(0))
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Visit::from).collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;
        Ok(())
    }
}
