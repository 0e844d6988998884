use super::*;
use axum::{
    extract::{Query, State},
    http::{header, StatusCode as HttpStatus},
    routing::get,
    Router,
};
use std::{collections::HashMap, sync::Arc};
use tokio::{net::TcpListener, sync::Mutex};

type RecordedQueries = Arc<Mutex<Vec<HashMap<String, String>>>>;

#[derive(Clone)]
struct ServerState {
    status: HttpStatus,
    body: &'static str,
    queries: RecordedQueries,
}

async fn handle_list_companies(
    State(state): State<ServerState>,
    Query(query): Query<HashMap<String, String>>,
) -> (HttpStatus, [(header::HeaderName, &'static str); 1], &'static str) {
    state.queries.lock().await.push(query);
    (
        state.status,
        [(header::CONTENT_TYPE, "application/json")],
        state.body,
    )
}

async fn spawn_companies_server(
    status: HttpStatus,
    body: &'static str,
) -> (String, RecordedQueries) {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let queries: RecordedQueries = Arc::new(Mutex::new(Vec::new()));
    let state = ServerState {
        status,
        body,
        queries: queries.clone(),
    };
    let app = Router::new()
        .route("/api/companies", get(handle_list_companies))
        .with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (format!("http://{addr}"), queries)
}

const ONE_COMPANY: &str = r#"{"companies":[{"id":"c1","name":"Acme Catering","slug":"acme","is_active":true,"created_at":"2024-01-01T00:00:00Z"}]}"#;

#[tokio::test]
async fn requests_catering_type_with_fixed_page_limit() {
    let (server_url, queries) = spawn_companies_server(HttpStatus::OK, ONE_COMPANY).await;
    let directory = HttpCompanyDirectory::new(server_url);

    let companies = load_catering_companies(&directory).await.expect("load");

    assert_eq!(companies.len(), 1);
    assert_eq!(companies[0].name, "Acme Catering");

    let queries = queries.lock().await;
    assert_eq!(queries.len(), 1, "exactly one request per load");
    assert_eq!(queries[0].get("type").map(String::as_str), Some("catering"));
    assert_eq!(queries[0].get("limit").map(String::as_str), Some("100"));
    assert_eq!(queries[0].len(), 2);
}

#[tokio::test]
async fn tolerates_trailing_slash_in_backend_url() {
    let (server_url, _queries) = spawn_companies_server(HttpStatus::OK, ONE_COMPANY).await;
    let directory = HttpCompanyDirectory::new(format!("{server_url}/"));

    let companies = directory
        .list_companies(&CompanyQuery::catering())
        .await
        .expect("load");
    assert_eq!(companies.len(), 1);
}

#[tokio::test]
async fn missing_companies_field_loads_as_empty_list() {
    let (server_url, _queries) = spawn_companies_server(HttpStatus::OK, "{}").await;
    let directory = HttpCompanyDirectory::new(server_url);

    let companies = load_catering_companies(&directory).await.expect("load");
    assert!(companies.is_empty());
}

#[tokio::test]
async fn server_detail_is_preferred_in_failure_message() {
    let (server_url, _queries) =
        spawn_companies_server(HttpStatus::FORBIDDEN, r#"{"detail":"Not authenticated"}"#).await;
    let directory = HttpCompanyDirectory::new(server_url);

    let err = directory
        .list_companies(&CompanyQuery::catering())
        .await
        .expect_err("forbidden");
    assert!(matches!(
        &err,
        LoadError::Status { status, detail: Some(_) } if *status == StatusCode::FORBIDDEN
    ));
    assert_eq!(
        load_failure_message(&err),
        "Failed to load catering companies: Not authenticated"
    );
}

#[tokio::test]
async fn status_without_detail_falls_back_to_raw_failure() {
    let (server_url, _queries) =
        spawn_companies_server(HttpStatus::INTERNAL_SERVER_ERROR, "").await;
    let directory = HttpCompanyDirectory::new(server_url);

    let message = load_catering_companies(&directory)
        .await
        .expect_err("server error");
    assert_eq!(
        message,
        "Failed to load catering companies: request failed with status code 500"
    );
}

#[tokio::test]
async fn malformed_body_collapses_into_load_failure() {
    let (server_url, _queries) = spawn_companies_server(HttpStatus::OK, "not json").await;
    let directory = HttpCompanyDirectory::new(server_url);

    let message = load_catering_companies(&directory)
        .await
        .expect_err("malformed");
    assert!(message.starts_with(LOAD_FAILURE_PREFIX));
    assert!(message.contains("malformed companies response"));
}

#[tokio::test]
async fn unreachable_backend_collapses_into_load_failure() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let directory = HttpCompanyDirectory::new(format!("http://{addr}"));
    let err = directory
        .list_companies(&CompanyQuery::catering())
        .await
        .expect_err("connection refused");
    assert!(matches!(err, LoadError::Transport(_)));
    assert!(load_failure_message(&err).starts_with("Failed to load catering companies: "));
}
