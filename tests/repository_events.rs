use analytics_tracker::domain::entities::{NewClick, NewVisit};
use analytics_tracker::domain::repositories::EventRepository;
use analytics_tracker::error::AppError;
use analytics_tracker::infrastructure::persistence::PgEventRepository;
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use std::sync::Arc;

fn ts(s: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
}

fn new_click(button_id: &str, timestamp: Option<DateTime<Utc>>) -> NewClick {
    NewClick {
        button_id: button_id.to_string(),
        username: "guest".to_string(),
        timestamp,
    }
}

#[sqlx::test]
async fn test_append_click_with_timestamp(pool: PgPool) {
    let repo = PgEventRepository::new(Arc::new(pool));

    let click = repo
        .append_click(new_click("export-data-btn", Some(ts("2026-03-01T10:00:00Z"))))
        .await
        .unwrap();

    assert!(click.id > 0);
    assert_eq!(click.button_id, "export-data-btn");
    assert_eq!(click.username, "guest");
    assert_eq!(click.timestamp, ts("2026-03-01T10:00:00Z"));
}

#[sqlx::test]
async fn test_append_click_without_timestamp_uses_now(pool: PgPool) {
    let repo = PgEventRepository::new(Arc::new(pool));

    let before = Utc::now() - Duration::seconds(5);
    let click = repo.append_click(new_click("b", None)).await.unwrap();
    let after = Utc::now() + Duration::seconds(5);

    assert!(click.timestamp >= before && click.timestamp <= after);
}

#[sqlx::test]
async fn test_append_click_keeps_values_verbatim(pool: PgPool) {
    let repo = PgEventRepository::new(Arc::new(pool));

    repo.append_click(NewClick {
        button_id: " export-data-btn ".to_string(),
        username: " alice ".to_string(),
        timestamp: None,
    })
    .await
    .unwrap();

    let clicks = repo.recent_clicks(1).await.unwrap();

    assert_eq!(clicks[0].button_id, " export-data-btn ");
    assert_eq!(clicks[0].username, " alice ");
}

#[sqlx::test]
async fn test_blank_button_id_rejected(pool: PgPool) {
    let repo = PgEventRepository::new(Arc::new(pool));

    let result = repo.append_click(new_click("   ", None)).await;

    assert!(matches!(result, Err(AppError::Validation { .. })));
    assert!(repo.recent_clicks(10).await.unwrap().is_empty());
}

#[sqlx::test]
async fn test_blank_button_id_violates_check(pool: PgPool) {
    let result = sqlx::query("INSERT INTO button_clicks (button_id, username) VALUES ($1, $2)")
        .bind("  ")
        .bind("guest")
        .execute(&pool)
        .await;

    assert!(result.is_err());
}

#[sqlx::test]
async fn test_recent_clicks_newest_first_and_capped(pool: PgPool) {
    let repo = PgEventRepository::new(Arc::new(pool));
    let start = ts("2026-03-01T00:00:00Z");

    for i in 0..5 {
        repo.append_click(new_click(
            &format!("b-{}", i),
            Some(start + Duration::minutes(i)),
        ))
        .await
        .unwrap();
    }

    let clicks = repo.recent_clicks(3).await.unwrap();

    let ids: Vec<&str> = clicks.iter().map(|c| c.button_id.as_str()).collect();
    assert_eq!(ids, vec!["b-4", "b-3", "b-2"]);
}

#[sqlx::test]
async fn test_recent_clicks_order_ignores_insert_order(pool: PgPool) {
    let repo = PgEventRepository::new(Arc::new(pool));

    repo.append_click(new_click("later", Some(ts("2026-03-02T00:00:00Z"))))
        .await
        .unwrap();
    repo.append_click(new_click("earlier", Some(ts("2026-03-01T00:00:00Z"))))
        .await
        .unwrap();

    let clicks = repo.recent_clicks(10).await.unwrap();

    assert_eq!(clicks[0].button_id, "later");
    assert_eq!(clicks[1].button_id, "earlier");
}

#[sqlx::test]
async fn test_equal_timestamps_tie_break_by_id(pool: PgPool) {
    let repo = PgEventRepository::new(Arc::new(pool));
    let at = Some(ts("2026-03-01T12:00:00Z"));

    let first = repo.append_click(new_click("first", at)).await.unwrap();
    let second = repo.append_click(new_click("second", at)).await.unwrap();

    let clicks = repo.recent_clicks(10).await.unwrap();

    assert!(second.id > first.id);
    assert_eq!(clicks[0].id, second.id);
    assert_eq!(clicks[1].id, first.id);
}

#[sqlx::test]
async fn test_visits_append_and_list(pool: PgPool) {
    let repo = PgEventRepository::new(Arc::new(pool));

    let first = repo.append_visit(NewVisit::new("/hello")).await.unwrap();
    let second = repo.append_visit(NewVisit::new("/about")).await.unwrap();

    let visits = repo.recent_visits(1).await.unwrap();

    assert!(second.id > first.id);
    assert_eq!(visits.len(), 1);
    assert_eq!(visits[0].endpoint, "/about");
}

#[sqlx::test]
async fn test_ping(pool: PgPool) {
    let repo = PgEventRepository::new(Arc::new(pool));

    assert!(repo.ping().await.is_ok());
}
