//! Plain HTTP front door
//!
//! - `GET /objects` - list handler
//! - `PUT /objects` - put handler, key in the `keyName` header
//!
//! Requests are converted into trigger events and the envelope is unwrapped
//! into a real HTTP response.

use axum::{
    extract::State,
    http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::gateway::{InboundRequest, ResponseEnvelope, KEY_HEADER};
use crate::models::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/objects", get(list_objects).put(put_object))
        .with_state(state)
}

async fn list_objects(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> Response {
    let request = inbound_from_http(&method, &uri, &headers, None);
    state
        .list_handler
        .handle(&request, &invocation_context("list"))
        .await
        .into_response()
}

async fn put_object(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let request = inbound_from_http(&method, &uri, &headers, Some(body));
    state
        .put_handler
        .handle(&request, &invocation_context("put"))
        .await
        .into_response()
}

/// Convert an HTTP request into a trigger event.
///
/// Header names arrive lower-cased; the key header gets its exact spelling
/// back so the put handler's exact-match lookup finds it. Repeated headers
/// are joined with `", "`.
pub fn inbound_from_http(
    method: &Method,
    uri: &Uri,
    headers: &HeaderMap,
    body: Option<String>,
) -> InboundRequest {
    let mut request = InboundRequest::new()
        .with_field("httpMethod", json!(method.as_str()))
        .with_field("path", json!(uri.path()));
    if let Some(query) = uri.query() {
        request = request.with_field("rawQueryString", json!(query));
    }

    for (name, value) in headers {
        let Ok(value) = value.to_str() else {
            continue;
        };
        let name = if name.as_str().eq_ignore_ascii_case(KEY_HEADER) {
            KEY_HEADER
        } else {
            name.as_str()
        };
        request
            .headers
            .entry(name.to_string())
            .and_modify(|joined| {
                joined.push_str(", ");
                joined.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }

    request.body = body;
    request
}

fn invocation_context(function: &str) -> Value {
    json!({
        "awsRequestId": Uuid::new_v4().to_string(),
        "functionName": function,
    })
}

impl IntoResponse for ResponseEnvelope {
    fn into_response(self) -> Response {
        let status = self
            .status_code
            .parse::<u16>()
            .ok()
            .and_then(|code| StatusCode::from_u16(code).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut response = (status, self.body).into_response();
        for (name, value) in &self.headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            ) {
                response.headers_mut().insert(name, value);
            }
        }
        response
    }
}
