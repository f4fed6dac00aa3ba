//! Login, logout and registration flows, and session persistence on disk.

use std::sync::Arc;

use serde_json::{json, Value};
use skybook_core::api::{orders, ApiClient, ApiError};
use skybook_core::auth::{self, FileStore, SessionState};
use skybook_core::models::{ApiResponse, Credentials, OrderPage, User};
use skybook_core::router::{self, Resolution, Route};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn login_reply() -> Value {
    json!({
        "success": true,
        "data": {
            "token": "jwt-token",
            "userInfo": { "id": 1001, "username": "alice", "realName": "Alice Wang" }
        }
    })
}

#[tokio::test]
async fn test_sign_in_stores_token_and_user() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/users/login"))
        .and(body_json(json!({ "username": "alice", "password": "secret1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_reply()))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/orders/user"))
        .and(header("authorization", "Bearer jwt-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "orders": [], "total": 0, "currentPage": 0, "pageSize": 10, "totalPages": 0 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(format!("{}/api", server.uri())).unwrap();
    assert_eq!(client.session().state().unwrap(), SessionState::Anonymous);

    let result = auth::sign_in(&client, &Credentials::new("alice", "secret1"))
        .await
        .unwrap();
    assert_eq!(result.user_info.username, "alice");

    let session = client.session();
    assert_eq!(session.state().unwrap(), SessionState::Authenticated);
    assert_eq!(session.token().unwrap().as_deref(), Some("jwt-token"));
    assert_eq!(session.user::<User>().unwrap().map(|u| u.id), Some(1001));

    let page: ApiResponse<OrderPage> = orders::fetch_user_orders(&client, 0, 10).await.unwrap();
    assert!(page.into_data().unwrap().orders.is_empty());
}

#[tokio::test]
async fn test_rejected_login_leaves_session_empty() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/users/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "用户名或密码错误"
        })))
        .mount(&server)
        .await;

    let client = ApiClient::new(format!("{}/api", server.uri())).unwrap();
    let err = auth::sign_in(&client, &Credentials::new("alice", "wrong1"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Rejected(ref m) if m == "用户名或密码错误"));
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn test_sign_out_clears_session() {
    let client = ApiClient::new("http://localhost:3000/api").unwrap();
    client
        .session()
        .establish("abc", &json!({ "id": 1, "username": "alice" }))
        .unwrap();

    auth::sign_out(&client).unwrap();
    assert!(!client.session().is_authenticated());
    assert_eq!(client.session().user::<Value>().unwrap(), None);
}

#[tokio::test]
async fn test_sign_up_validates_before_sending() {
    let server = MockServer::start().await;
    let client = ApiClient::new(format!("{}/api", server.uri())).unwrap();

    let short_name = auth::sign_up(&client, &Credentials::new("al", "secret1")).await;
    assert!(matches!(short_name, Err(ApiError::Validation(_))));

    let short_password = auth::sign_up(&client, &Credentials::new("alice", "123")).await;
    assert!(matches!(short_password, Err(ApiError::Validation(_))));

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_sign_up_registers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/users/register"))
        .and(body_json(json!({ "username": "new_user", "password": "secret1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "userId": 77, "username": "new_user" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = ApiClient::new(format!("{}/api", server.uri())).unwrap();
    let result = auth::sign_up(&client, &Credentials::new("new_user", "secret1"))
        .await
        .unwrap();
    assert_eq!(result.user_id, Some(77));
    // registering does not log in
    assert!(!client.session().is_authenticated());
}

#[tokio::test]
async fn test_file_backed_session_survives_restart() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/users/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(login_reply()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/users/1001"))
        .and(header("authorization", "Bearer jwt-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let base = format!("{}/api", server.uri());

    let first = ApiClient::builder(base.clone())
        .store(Arc::new(FileStore::new(dir.path())))
        .build()
        .unwrap();
    auth::sign_in(&first, &Credentials::new("alice", "secret1"))
        .await
        .unwrap();
    drop(first);

    let second = ApiClient::builder(base)
        .store(Arc::new(FileStore::new(dir.path())))
        .build()
        .unwrap();
    assert_eq!(
        router::resolve("/dashboard", second.session()),
        Resolution::Render(Route::Dashboard)
    );
    let _: Value = skybook_core::api::users::get_user_info(&second, 1001)
        .await
        .unwrap();
}
