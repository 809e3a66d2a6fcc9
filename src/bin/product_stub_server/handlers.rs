use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use super::*;

pub(super) async fn healthz() -> Json<serde_json::Value> {
    Json(serde_json::json!({"status": "ok"}))
}

pub(super) async fn list_calls(State(state): State<Arc<AppState>>) -> Json<Vec<CallRecord>> {
    Json(state.calls.read().await.clone())
}

async fn record(
    state: &AppState,
    service: &str,
    action: &str,
    product_id: Option<String>,
    view_id: Option<String>,
) {
    state.calls.write().await.push(CallRecord {
        service: service.to_string(),
        action: action.to_string(),
        product_id,
        view_id,
    });
}

fn failure(what: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(serde_json::json!({"error": format!("{} failed", what)})),
    )
        .into_response()
}

pub(super) async fn deactivate_all(State(state): State<Arc<AppState>>) -> Response {
    record(&state, "product", "deactivate", None, None).await;
    if state.fail.deactivate {
        return failure("deactivate");
    }
    (StatusCode::OK, "all products deactivated").into_response()
}

pub(super) async fn activate_product(
    State(state): State<Arc<AppState>>,
    Path(product_id): Path<String>,
) -> Response {
    record(&state, "product", "activate", Some(product_id.clone()), None).await;
    if state.fail.activate {
        return failure("activate");
    }
    Json(serde_json::json!({"product_id": product_id, "active": true})).into_response()
}

pub(super) async fn set_capture_product(
    State(state): State<Arc<AppState>>,
    Path((product_id, view_id)): Path<(String, String)>,
) -> Response {
    record(
        &state,
        "capture",
        "set-product-id",
        Some(product_id.clone()),
        Some(view_id.clone()),
    )
    .await;
    if state.fail.capture {
        return failure("capture");
    }
    Json(serde_json::json!({"product_id": product_id, "view_id": view_id})).into_response()
}
