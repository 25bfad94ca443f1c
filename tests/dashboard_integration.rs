//! End-to-end checks against an in-process mock of the dashboard backend.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use perfdash::api::TicketFilter;
use perfdash::dashboard::view::{
    CREATED_VS_RESOLVED, FORECASTED_VELOCITY, RESOLVED_TICKETS, TOTAL_TICKETS, WEEKLY_THROUGHPUT,
};
use perfdash::{
    mount, render, ApiClient, DashboardApi, DashboardError, DateLabeler, Endpoint, FetchError,
    Slot, TeardownPolicy, ViewStore,
};
use serde_json::{json, Value};

async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/api")
}

async fn tickets(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    if params.is_empty() {
        return Json(json!([
            {"key": "PROJ1-1", "project": "PROJ1", "assignee": "Alice", "status": "Done"},
            {"key": "SUPPORT-2", "project": "SUPPORT", "assignee": "Bob", "status": "To Do"}
        ]));
    }
    Json(json!([params]))
}

async fn metrics() -> Json<Value> {
    Json(json!({
        "created_per_day": [
            {"created_at": "2024-01-01T00:00:00", "count": 3},
            {"created_at": "2024-01-02T00:00:00", "count": 5}
        ],
        "resolved_per_day": [
            {"resolved_at": "2024-01-01T00:00:00", "count": 2},
            {"resolved_at": "2024-01-02T00:00:00", "count": 4}
        ],
        "total_tickets": 10
    }))
}

async fn forecast() -> Json<Value> {
    Json(json!({
        "next_4_weeks_velocity_forecast": [5, 6, 7, 8],
        "historical_weekly_throughput": [
            {"resolved_at": "2024-01-07T00:00:00", "count": 12}
        ]
    }))
}

fn healthy_backend() -> Router {
    Router::new()
        .route("/api/tickets", get(tickets))
        .route("/api/metrics", get(metrics))
        .route("/api/forecast", get(forecast))
}

#[tokio::test]
async fn test_full_dashboard_loads() {
    let base = spawn_backend(healthy_backend()).await;
    let api = Arc::new(ApiClient::new(base).unwrap());
    let store = Arc::new(ViewStore::new());
    let labeler = DateLabeler::utc();

    let mut mounted = mount(api, Arc::clone(&store), labeler.clone(), TeardownPolicy::Cancel);
    mounted.settled().await;

    let state = store.snapshot().await;
    assert!(state.is_settled());
    assert_eq!(state.tickets.loaded().map(Vec::len), Some(2));

    let view = render(&state, &labeler);
    assert_eq!(view.card(TOTAL_TICKETS).unwrap().value, "10");
    assert_eq!(view.card(RESOLVED_TICKETS).unwrap().value, "6");
    assert_eq!(view.card(FORECASTED_VELOCITY).unwrap().value, "5, 6, 7, 8");

    let created = view.chart(CREATED_VS_RESOLVED).unwrap().chart.data();
    let labels: Vec<&str> = created.points.iter().map(|p| p.x.as_str()).collect();
    assert_eq!(labels, vec!["1/1/2024", "1/2/2024"]);

    let throughput = view.chart(WEEKLY_THROUGHPUT).unwrap().chart.data();
    assert_eq!(throughput.points[0].x, "1/7/2024");
    assert_eq!(throughput.points[0].value, 12);
}

#[tokio::test]
async fn test_failures_stay_in_their_slot() {
    let router = Router::new()
        .route("/api/tickets", get(tickets))
        .route(
            "/api/metrics",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route("/api/forecast", get(|| async { "{not json" }));
    let base = spawn_backend(router).await;
    let api = Arc::new(ApiClient::new(base).unwrap());
    let store = Arc::new(ViewStore::new());
    let labeler = DateLabeler::utc();

    let mut mounted = mount(api, Arc::clone(&store), labeler.clone(), TeardownPolicy::Cancel);
    mounted.settled().await;

    let state = store.snapshot().await;
    assert!(state.tickets.is_loaded());
    assert!(matches!(state.metrics, Slot::Failed(_)));
    assert!(matches!(state.forecast, Slot::Failed(_)));

    let view = render(&state, &labeler);
    assert!(view.card(TOTAL_TICKETS).unwrap().is_placeholder());
    assert!(view.card(FORECASTED_VELOCITY).unwrap().is_placeholder());
    assert!(view.charts.is_empty());
}

#[tokio::test]
async fn test_error_kinds() {
    let router = Router::new()
        .route("/api/metrics", get(|| async { StatusCode::NOT_FOUND }))
        .route("/api/forecast", get(|| async { "[1, 2" }));
    let base = spawn_backend(router).await;
    let client = ApiClient::new(base).unwrap();

    let err = client.fetch_metrics().await.unwrap_err();
    match err {
        DashboardError::Fetch {
            endpoint,
            source: FetchError::Status { status },
        } => {
            assert_eq!(endpoint, Endpoint::Metrics);
            assert_eq!(status.as_u16(), 404);
        }
        other => panic!("unexpected error: {other}"),
    }

    let err = client.fetch_forecast().await.unwrap_err();
    assert!(matches!(
        err,
        DashboardError::Fetch {
            endpoint: Endpoint::Forecast,
            source: FetchError::Decode(_),
        }
    ));
}

#[tokio::test]
async fn test_filtered_tickets_send_only_set_params() {
    let base = spawn_backend(healthy_backend()).await;
    let client = ApiClient::new(base).unwrap();

    let filter = TicketFilter::default().project("SUPPORT");
    let echoed = client.fetch_tickets_filtered(&filter).await.unwrap();
    assert_eq!(echoed.len(), 1);
    assert_eq!(echoed[0].0, json!({"project": "SUPPORT"}));

    let all = client
        .fetch_tickets_filtered(&TicketFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].key(), Some("PROJ1-1"));
}
