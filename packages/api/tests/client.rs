//! Drives ApiClient against an in-process HTTP server.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use api::{
    ApiClient, ApiError, AuthApi, NewDecision, NewOption, OptionPatch, Rating, Role, SessionStore,
};
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, patch, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use store::keys::ACCESS_TOKEN;
use store::{KeyValueStore, MemoryStore};

const GOOD_TOKEN: &str = "good-token";

#[derive(Clone, Default)]
struct Hits {
    create_decision: Arc<AtomicUsize>,
    create_option: Arc<AtomicUsize>,
    update_option: Arc<AtomicUsize>,
    logout: Arc<AtomicUsize>,
    role_body: Arc<Mutex<Option<Value>>>,
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

fn unauthorized() -> (StatusCode, Json<Value>) {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "detail": "Invalid or expired token" })),
    )
}

async fn login(Json(body): Json<Value>) -> impl IntoResponse {
    if body["password"] == "pw" {
        (
            StatusCode::OK,
            Json(json!({
                "access_token": GOOD_TOKEN,
                "refresh_token": "refresh",
                "user_id": "u1",
                "email": body["email"],
                "role": "customer",
            })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Invalid email or password" })),
        )
    }
}

async fn me(headers: HeaderMap) -> impl IntoResponse {
    match bearer(&headers) {
        Some(GOOD_TOKEN) => (
            StatusCode::OK,
            Json(json!({ "id": "u1", "email": "a@b.com", "role": "customer" })),
        ),
        _ => unauthorized(),
    }
}

async fn logout(State(hits): State<Hits>) -> impl IntoResponse {
    hits.logout.fetch_add(1, Ordering::SeqCst);
    StatusCode::SERVICE_UNAVAILABLE
}

async fn list_decisions(headers: HeaderMap) -> impl IntoResponse {
    if headers.contains_key("authorization") {
        (
            StatusCode::OK,
            Json(json!([
                { "id": "d1", "title": "New laptop", "description": null },
                { "id": "d2", "title": "Holiday", "description": "Summer",
                  "options": [{ "id": "o1", "decision_id": "d2", "option_text": "Coast", "rating": 4 }] },
            ])),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "detail": "Not authenticated" })),
        )
    }
}

async fn create_decision(State(hits): State<Hits>, Json(body): Json<Value>) -> impl IntoResponse {
    hits.create_decision.fetch_add(1, Ordering::SeqCst);
    Json(json!({ "id": "d3", "title": body["title"], "description": body["description"] }))
}

async fn get_decision(Path(id): Path<String>) -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "detail": format!("Decision {id} not found") })),
    )
}

async fn create_option(State(hits): State<Hits>, Json(body): Json<Value>) -> impl IntoResponse {
    hits.create_option.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "id": "o2",
        "decision_id": body["decision_id"],
        "option_text": body["option_text"],
        "rating": body["rating"],
    }))
}

async fn update_option(
    State(hits): State<Hits>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    hits.update_option.fetch_add(1, Ordering::SeqCst);
    Json(json!({
        "id": id,
        "decision_id": "d1",
        "option_text": body["option_text"],
        "rating": body["rating"],
    }))
}

async fn set_role(
    State(hits): State<Hits>,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let role = body["role"].clone();
    *hits.role_body.lock().unwrap() = Some(body);
    Json(json!({ "id": id, "email": "p@b.com", "role": role }))
}

async fn delete_option() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn dashboard() -> impl IntoResponse {
    (
        StatusCode::FORBIDDEN,
        Json(json!({ "detail": "Admin access required" })),
    )
}

async fn users() -> &'static str {
    "this is not json"
}

async fn spawn_server() -> (String, Hits) {
    let hits = Hits::default();
    let router = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        .route("/auth/logout", post(logout))
        .route("/decisions", get(list_decisions).post(create_decision))
        .route("/decisions/{id}", get(get_decision))
        .route("/options", post(create_option))
        .route("/options/{id}", patch(update_option).delete(delete_option))
        .route("/admin/users/{id}/role", patch(set_role))
        .route("/admin/dashboard", get(dashboard))
        .route("/admin/users", get(users))
        .with_state(hits.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    (format!("http://{addr}"), hits)
}

#[tokio::test]
async fn test_bearer_header_attached_only_when_token_present() {
    let (base, _) = spawn_server().await;
    let client = ApiClient::new(base);

    let err = client.list_decisions().await.unwrap_err();
    assert!(err.is_unauthorized());
    assert_eq!(err.message(), Some("Not authenticated"));

    client.set_access_token(Some(GOOD_TOKEN.into()));
    let decisions = client.list_decisions().await.unwrap();
    assert_eq!(decisions.len(), 2);
    assert!(decisions[0].options.is_empty());
    assert_eq!(decisions[1].options[0].rating.map(|r| r.get()), Some(4));
}

#[tokio::test]
async fn test_empty_title_never_sent() {
    let (base, hits) = spawn_server().await;
    let client = ApiClient::new(base);
    client.set_access_token(Some(GOOD_TOKEN.into()));

    let err = client
        .create_decision(&NewDecision::new("   ", "no title"))
        .await
        .unwrap_err();
    assert_eq!(err.message(), Some("Title is required"));
    assert_eq!(hits.create_decision.load(Ordering::SeqCst), 0);

    let created = client
        .create_decision(&NewDecision::new("Change jobs", ""))
        .await
        .unwrap();
    assert_eq!(created.title, "Change jobs");
    assert_eq!(hits.create_decision.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_blank_option_text_never_sent() {
    let (base, hits) = spawn_server().await;
    let client = ApiClient::new(base);
    client.set_access_token(Some(GOOD_TOKEN.into()));

    let blank = NewOption {
        decision_id: "d1".into(),
        option_text: "  ".into(),
        rating: Rating::new(3),
    };
    let err = client.create_option(&blank).await.unwrap_err();
    assert!(matches!(err, ApiError::Validation { .. }));
    assert_eq!(err.message(), Some("Option text is required"));
    assert_eq!(hits.create_option.load(Ordering::SeqCst), 0);

    let blank_patch = OptionPatch {
        option_text: String::new(),
        rating: None,
    };
    let err = client.update_option("o1", &blank_patch).await.unwrap_err();
    assert_eq!(err.message(), Some("Option text is required"));
    assert_eq!(hits.update_option.load(Ordering::SeqCst), 0);

    let created = client
        .create_option(&NewOption {
            option_text: "Coast".into(),
            ..blank
        })
        .await
        .unwrap();
    assert_eq!(created.option_text, "Coast");
    assert_eq!(created.rating, Rating::new(3));
    assert_eq!(hits.create_option.load(Ordering::SeqCst), 1);

    let updated = client
        .update_option(
            "o1",
            &OptionPatch {
                option_text: "Mountains".into(),
                rating: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.option_text, "Mountains");
    assert_eq!(updated.rating, None);
    assert_eq!(hits.update_option.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_set_user_role_sends_role_body() {
    let (base, hits) = spawn_server().await;
    let client = ApiClient::new(base);
    client.set_access_token(Some(GOOD_TOKEN.into()));

    let updated = client.set_user_role("u7", Role::Admin).await.unwrap();
    assert_eq!(updated.id, "u7");
    assert_eq!(updated.role, Role::Admin);
    assert_eq!(
        hits.role_body.lock().unwrap().clone(),
        Some(json!({ "role": "admin" }))
    );
}

#[tokio::test]
async fn test_error_statuses_mapped() {
    let (base, _) = spawn_server().await;
    let client = ApiClient::new(base);
    client.set_access_token(Some(GOOD_TOKEN.into()));

    let err = client.get_decision("missing").await.unwrap_err();
    assert!(matches!(err, ApiError::NotFound { .. }));
    assert_eq!(err.user_message("Failed"), "Decision missing not found");

    let err = client.dashboard_stats().await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized { status: 403, .. }));

    let err = client.list_users().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));

    client.delete_option("o1").await.unwrap();
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let client = ApiClient::new("http://127.0.0.1:1");
    let err = client.me().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
    assert_eq!(err.user_message("Login failed"), "Login failed");
}

#[tokio::test]
async fn test_session_round_trip_over_http() {
    let (base, hits) = spawn_server().await;
    let storage = MemoryStore::new();
    let client = ApiClient::new(base);
    let sessions = SessionStore::new(storage.clone(), client.clone());

    let err = sessions.login("a@b.com", "nope").await.unwrap_err();
    assert_eq!(err, "Invalid email or password");

    let session = sessions.login("a@b.com", "pw").await.unwrap();
    assert_eq!(session.role(), Role::Customer);
    assert_eq!(client.access_token().as_deref(), Some(GOOD_TOKEN));

    // A fresh process restores from storage.
    let fresh_client = ApiClient::new(client.base_url());
    let restored = SessionStore::new(storage.clone(), fresh_client.clone())
        .restore()
        .await
        .unwrap();
    assert_eq!(restored.email(), "a@b.com");
    assert_eq!(fresh_client.access_token().as_deref(), Some(GOOD_TOKEN));

    // The logout endpoint fails but local state is cleared anyway.
    sessions.logout().await;
    assert_eq!(hits.logout.load(Ordering::SeqCst), 1);
    assert!(sessions.session().is_none());
    assert!(storage.get(ACCESS_TOKEN).await.is_none());
    assert!(client.access_token().is_none());
}

#[tokio::test]
async fn test_restore_with_rejected_token_clears_storage() {
    let (base, _) = spawn_server().await;
    let storage = MemoryStore::new();
    storage.set_all(&[(ACCESS_TOKEN, "stale")]).await;
    let sessions = SessionStore::new(storage.clone(), ApiClient::new(base));

    assert!(sessions.restore().await.is_none());
    assert!(storage.is_empty());
}
