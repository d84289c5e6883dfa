mod common;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use syncode_relay::config::Config;
use syncode_relay::routes::create_app;
use syncode_relay::state::AppState;
use tokio::net::TcpListener;
use tower::ServiceExt;

async fn call(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn app(config: Config) -> Router {
    create_app(Arc::new(AppState::new(config).unwrap()))
}

fn run_request(body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/run")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Minimal stand-in for the Piston API
async fn spawn_piston() -> SocketAddr {
    async fn runtimes() -> Json<Value> {
        Json(json!([
            {"language": "python", "version": "3.10.0", "aliases": ["py", "python3"]},
            {"language": "c++", "version": "10.2.0", "aliases": ["cpp", "g++"]}
        ]))
    }

    async fn execute(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
        let code = body["files"][0]["content"].as_str().unwrap_or_default().to_string();
        if code.contains("fail") {
            return (StatusCode::BAD_REQUEST, Json(json!({"message": "compile error"})));
        }
        (
            StatusCode::OK,
            Json(json!({
                "language": body["language"],
                "version": body["version"],
                "run": {"output": format!("ran: {}", code)}
            })),
        )
    }

    let stub = Router::new()
        .route("/runtimes", get(runtimes))
        .route("/execute", post(execute));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, stub).await.unwrap();
    });
    addr
}

fn piston_config(addr: SocketAddr) -> Config {
    Config {
        piston_url: format!("http://{}", addr),
        ..common::config()
    }
}

#[tokio::test]
async fn health_and_ready() {
    let (status, body) = call(
        app(common::config()),
        Request::builder().uri("/api/health").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    let (status, _) = call(
        app(common::config()),
        Request::builder().uri("/api/ready").body(Body::empty()).unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn diagnostics_requires_admin() {
    let request = |token: Option<String>| {
        let mut builder = Request::builder().uri("/api/v1/diagnostics");
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    };

    let (status, _) = call(app(common::config()), request(None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = call(app(common::config()), request(Some("garbage".to_string()))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = call(app(common::config()), request(Some(common::token("u1", "user")))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 403);

    let (status, body) = call(app(common::config()), request(Some(common::token("root", "admin")))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["n_conn"], 0);
    assert_eq!(body["n_sessions"], 0);
}

#[tokio::test]
async fn diagnostics_without_secret_is_server_error() {
    let config = Config {
        auth_jwt_secret: None,
        ..Config::default()
    };
    let request = Request::builder()
        .uri("/api/v1/diagnostics")
        .header(header::AUTHORIZATION, format!("Bearer {}", common::token("root", "admin")))
        .body(Body::empty())
        .unwrap();
    let (status, _) = call(app(config), request).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn run_rejects_empty_code() {
    let (status, body) = call(app(common::config()), run_request(json!({"language": "python", "code": "   "}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Code cannot be empty");

    let (status, _) = call(app(common::config()), run_request(json!({"language": "python"}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Empty code is reported before a missing language
    let (status, body) = call(app(common::config()), run_request(json!({"code": ""}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Code cannot be empty");

    let (status, body) = call(app(common::config()), run_request(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
}

#[tokio::test]
async fn run_without_language_has_no_runtime() {
    let piston = spawn_piston().await;
    let (status, body) = call(app(piston_config(piston)), run_request(json!({"code": "print(1)"}))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Could not find valid runtime version");
}

#[tokio::test]
async fn run_passes_through_to_piston() {
    let piston = spawn_piston().await;
    let app = app(piston_config(piston));

    let (status, body) = call(app.clone(), run_request(json!({"language": "cpp", "code": "int main(){}"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["language"], "cpp");
    assert_eq!(body["version"], "10.2.0");
    assert_eq!(body["run"]["output"], "ran: int main(){}");

    let (status, body) = call(app, run_request(json!({"language": "python", "code": "print(1)"}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["version"], "3.10.0");
}

#[tokio::test]
async fn run_unknown_language() {
    let piston = spawn_piston().await;
    let (status, body) = call(
        app(piston_config(piston)),
        run_request(json!({"language": "cobol", "code": "DISPLAY 'HI'"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Could not find valid runtime version");
}

#[tokio::test]
async fn run_reports_upstream_failure() {
    let piston = spawn_piston().await;
    let (status, body) = call(
        app(piston_config(piston)),
        run_request(json!({"language": "python", "code": "fail()"})),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], 500);
    assert_eq!(body["error"], json!({"message": "compile error"}));
}
