use axum::{extract::Query, routing::get, Router};
use client_core::{
    load_catering_companies, CompanyCard, CompanyViewState, HttpCompanyDirectory, LoadOutcome,
    ViewPhase,
};
use shared::domain::{CompanyId, ContextId};
use std::collections::HashMap;
use tokio::net::TcpListener;

async fn list_companies(Query(query): Query<HashMap<String, String>>) -> String {
    if query.get("type").map(String::as_str) != Some("catering")
        || query.get("limit").map(String::as_str) != Some("100")
    {
        return r#"{"companies":[]}"#.to_string();
    }
    r#"{"companies":[
        {"id":"c1","name":"Acme Catering","slug":"acme","is_active":true,"created_at":"2024-01-01T00:00:00Z","address":{"text":"Istanbul"},"counts":{"individual":3,"corporate":5}},
        {"id":"c2","name":"Blue Plate","slug":"blue-plate","phone":"555-0100","is_active":false,"created_at":"2023-06-15T08:00:00Z","address":"Ankara"}
    ]}"#
    .to_string()
}

async fn spawn_backend() -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new().route("/api/companies", get(list_companies));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn context_load_search_and_detail_acceptance() {
    let backend_url = spawn_backend().await;
    let directory = HttpCompanyDirectory::new(backend_url);
    let mut state = CompanyViewState::new();

    let ticket = state
        .sync_context(&ContextId::new("org-1"))
        .expect("first mount triggers a load");
    assert_eq!(state.phase(), ViewPhase::Loading);

    let result = load_catering_companies(&directory).await;
    assert_eq!(state.complete_load(&ticket, result), LoadOutcome::Applied);
    assert_eq!(state.phase(), ViewPhase::HasResults);

    let cards: Vec<CompanyCard> = state
        .visible_companies()
        .into_iter()
        .map(CompanyCard::from_company)
        .collect();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].title, "Acme Catering");
    assert_eq!(cards[0].handle, "@acme");
    assert_eq!(cards[0].status_label(), "Active");
    assert_eq!(cards[0].created_on, "1.01.2024");
    assert_eq!(cards[0].address.as_deref(), Some("Istanbul"));
    assert_eq!(cards[0].total_count(), Some(8));
    assert_eq!(cards[1].address.as_deref(), Some("Ankara"));
    assert_eq!(cards[1].status_label(), "Inactive");
    assert!(cards[1].total_count().is_none());

    state.set_search("BLUE");
    assert_eq!(state.visible_companies().len(), 1);
    state.set_search("no such supplier");
    assert_eq!(state.phase(), ViewPhase::EmptyNoMatch);

    assert!(state.open_details(&CompanyId::new("c2")));
    let detail = state
        .dialog_company()
        .map(CompanyCard::from_company)
        .expect("dialog company");
    assert_eq!(detail.phone.as_deref(), Some("555-0100"));
    state.close_details();
    assert!(state.dialog_company().is_none());

    assert!(state.sync_context(&ContextId::new("org-1")).is_none());
}

#[tokio::test]
async fn unreachable_backend_keeps_stale_list_with_error_banner() {
    let backend_url = spawn_backend().await;
    let mut state = CompanyViewState::new();

    let ticket = state.sync_context(&ContextId::new("org-1")).expect("load");
    let loaded = load_catering_companies(&HttpCompanyDirectory::new(backend_url)).await;
    state.complete_load(&ticket, loaded);

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let dead_addr = listener.local_addr().expect("addr");
    drop(listener);

    let ticket = state.sync_context(&ContextId::new("org-2")).expect("reload");
    let failed =
        load_catering_companies(&HttpCompanyDirectory::new(format!("http://{dead_addr}"))).await;
    state.complete_load(&ticket, failed);

    assert!(!state.is_loading());
    assert!(state
        .error()
        .is_some_and(|message| message.starts_with("Failed to load catering companies: ")));
    assert_eq!(state.companies().len(), 2);
    assert_eq!(state.phase(), ViewPhase::HasResults);
}
