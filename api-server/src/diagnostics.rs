//! Endpoints for checking the API is up and for inspecting what the server
//! receives from clients.

use axum::{
    body::Bytes,
    extract::{Path, Query},
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::{json, Map, Value};
use std::collections::HashMap;

pub const WELCOME: &str = "Welcome to 3ESE API!";

pub fn routes<S: Clone + Send + Sync + 'static>() -> Router<S> {
    Router::new()
        .route("/", get(hello_world))
        .route("/api/welcome/", get(welcome))
        .route("/api/welcome/{index}", get(welcome_index))
        .route("/api/request/", get(echo_request).post(echo_request))
        .route(
            "/api/request/{path}",
            get(echo_request_path).post(echo_request_path),
        )
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" })))
}

async fn hello_world() -> Json<Value> {
    Json(json!({ "message": "Hello, World!" }))
}

async fn welcome() -> Json<Value> {
    Json(json!({ "phrase": WELCOME }))
}

async fn welcome_index(Path(index): Path<i64>) -> Response {
    let character = usize::try_from(index)
        .ok()
        .and_then(|i| WELCOME.chars().nth(i));

    match character {
        Some(c) => Json(json!({ "index": index, "value": c.to_string() })).into_response(),
        None => not_found().await.into_response(),
    }
}

async fn echo_request(
    method: Method,
    uri: Uri,
    Query(args): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> Json<Value> {
    Json(describe_request(method, uri, None, args, headers, body))
}

async fn echo_request_path(
    method: Method,
    uri: Uri,
    Path(path): Path<String>,
    Query(args): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: Bytes,
) -> Json<Value> {
    Json(describe_request(method, uri, Some(path), args, headers, body))
}

fn describe_request(
    method: Method,
    uri: Uri,
    path: Option<String>,
    args: HashMap<String, String>,
    headers: HeaderMap,
    body: Bytes,
) -> Value {
    let url = match headers.get(header::HOST).and_then(|h| h.to_str().ok()) {
        Some(host) if uri.authority().is_none() => format!("http://{host}{uri}"),
        _ => uri.to_string(),
    };

    let headers: Map<String, Value> = headers
        .iter()
        .map(|(name, value)| {
            (
                name.as_str().to_owned(),
                Value::from(String::from_utf8_lossy(value.as_bytes()).into_owned()),
            )
        })
        .collect();

    let mut description = json!({
        "method": method.as_str(),
        "url": url,
        "path": path,
        "args": args,
        "headers": headers,
    });

    if method == Method::POST {
        // Bodies that are not JSON are reported as null
        let data = serde_json::from_slice::<Value>(&body).unwrap_or(Value::Null);
        description["POST"] = json!({ "data": data });
    }

    description
}
