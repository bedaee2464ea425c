//! End-to-end client tests against an in-process stub API.
//!
//! The stub speaks the backend's wire shapes (paginated envelope, 204
//! deletes, `{message}` errors) over a real socket, so these tests exercise
//! the reqwest transport, the normalizer and the list state together.

use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::get;
use axum::Router;
use serde_json::{Value, json};

use aula_client::{ListState, PageRequest, ResourceClient, ReqwestTransport, SearchMode};

#[derive(Clone)]
struct StubState {
    groups: Arc<Mutex<Vec<Value>>>,
}

#[derive(serde::Deserialize)]
struct StubQuery {
    page: Option<i64>,
    per_page: Option<i64>,
    search: Option<String>,
}

async fn list_groups(
    State(state): State<StubState>,
    Query(query): Query<StubQuery>,
) -> Json<Value> {
    let groups = state.groups.lock().unwrap();
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query.per_page.unwrap_or(10).max(1);

    let filtered: Vec<Value> = groups
        .iter()
        .filter(|g| match query.search.as_deref() {
            Some(term) if !term.is_empty() => g["nombre"]
                .as_str()
                .map(|n| n.to_lowercase().contains(&term.to_lowercase()))
                .unwrap_or(false),
            _ => true,
        })
        .cloned()
        .collect();

    let total = filtered.len() as i64;
    let start = ((page - 1) * per_page) as usize;
    let items: Vec<Value> = filtered
        .into_iter()
        .skip(start)
        .take(per_page as usize)
        .collect();

    Json(json!({
        "data": items,
        "total": total,
        "per_page": per_page,
        "current_page": page,
        "last_page": if total == 0 { 1 } else { (total + per_page - 1) / per_page },
    }))
}

async fn delete_group(
    State(state): State<StubState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    let mut groups = state.groups.lock().unwrap();
    let before = groups.len();
    groups.retain(|g| g["id"] != json!(id));
    if groups.len() < before {
        StatusCode::NO_CONTENT.into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({"message": "Group not found"})),
        )
            .into_response()
    }
}

/// Spawn the stub on an ephemeral port and return its base URL.
async fn spawn_stub(groups: Vec<Value>) -> (String, StubState) {
    let state = StubState {
        groups: Arc::new(Mutex::new(groups)),
    };
    let app = Router::new()
        .route("/api/grupos", get(list_groups))
        .route("/api/grupos/{id}", axum::routing::delete(delete_group))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/api"), state)
}

fn seed_groups(count: usize) -> Vec<Value> {
    (1..=count)
        .map(|i| json!({"id": format!("g{i}"), "nombre": format!("Grupo {i:02}")}))
        .collect()
}

fn client(base_url: &str) -> ResourceClient {
    ResourceClient::new(
        Arc::new(ReqwestTransport::new(base_url.to_string())),
        "/grupos",
    )
}

#[tokio::test]
async fn identical_requests_yield_identical_pages() {
    let (base_url, _state) = spawn_stub(seed_groups(25)).await;
    let client = client(&base_url);

    let request = PageRequest {
        page: 2,
        per_page: 10,
        ..Default::default()
    };
    let first = client.list::<Value>(&request).await.unwrap();
    let second = client.list::<Value>(&request).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(first.current_page, 2);
    assert_eq!(first.total_items, 25);
    assert_eq!(first.total_pages, 3);
    assert_eq!(first.items.len(), 10);
}

#[tokio::test]
async fn refresh_after_delete_requests_the_same_page() {
    // 21 records, page size 10: page 3 holds one record
    let (base_url, _state) = spawn_stub(seed_groups(21)).await;
    let mut list = ListState::<Value>::new(client(&base_url), SearchMode::Server);

    list.set_page(2).await;
    assert_eq!(list.current_page(), 2);
    assert_eq!(list.total_items(), 21);

    // Delete one record shown on page 2, then refresh
    let victim = list.items()[4]["id"].as_str().unwrap().to_string();
    client(&base_url).delete(&victim).await.unwrap();
    list.refresh().await;

    // Still on page 2, with the collection now one smaller
    assert_eq!(list.current_page(), 2);
    assert_eq!(list.total_items(), 20);
    assert_eq!(list.total_pages(), 2);
    assert!(list.items().iter().all(|g| g["id"] != json!(victim)));
}

#[tokio::test]
async fn out_of_range_page_comes_back_empty_with_real_totals() {
    let (base_url, _state) = spawn_stub(seed_groups(5)).await;
    let client = client(&base_url);

    let request = PageRequest {
        page: 9,
        per_page: 10,
        ..Default::default()
    };
    let page = client.list::<Value>(&request).await.unwrap();
    assert!(page.items.is_empty());
    assert_eq!(page.current_page, 9);
    assert_eq!(page.total_items, 5);
    assert_eq!(page.total_pages, 1);
}

#[tokio::test]
async fn bulk_delete_reports_the_failing_subset() {
    let (base_url, _state) = spawn_stub(seed_groups(3)).await;
    let client = client(&base_url);

    let ids = vec![
        "g1".to_string(),
        "missing".to_string(),
        "g3".to_string(),
    ];
    let outcome = client.bulk_delete(&ids).await;

    assert_eq!(outcome.succeeded.len(), 2);
    assert_eq!(outcome.failed.len(), 1);
    assert_eq!(outcome.failed[0].0, "missing");

    // The survivors reflect the two successful deletes
    let page = client.list::<Value>(&PageRequest::default()).await.unwrap();
    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0]["id"], "g2");
}

#[tokio::test]
async fn server_side_search_narrows_the_collection() {
    let groups = vec![
        json!({"id": "a", "nombre": "10A"}),
        json!({"id": "b", "nombre": "10B"}),
        json!({"id": "c", "nombre": "11A"}),
    ];
    let (base_url, _state) = spawn_stub(groups).await;
    let mut list = ListState::<Value>::new(client(&base_url), SearchMode::Server);

    list.load().await;
    assert_eq!(list.total_items(), 3);

    list.set_search("10").await;
    assert_eq!(list.total_items(), 2);
    assert_eq!(list.current_page(), 1);
}
