use std::collections::HashMap;

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::{debug, warn};

use treesync_core::{check, check_children, fetch, get_parents, since, TreeSyncError};

use crate::response::{error_from, error_response, success_response};
use crate::state::AppState;

fn pks_from(params: &[(String, String)]) -> Vec<u64> {
    params
        .iter()
        .filter(|(key, _)| key == "pk")
        .filter_map(|(_, value)| value.parse::<u64>().ok())
        .collect()
}

fn query_type_from(params: &[(String, String)]) -> String {
    params
        .iter()
        .find(|(key, _)| key == "type")
        .map_or_else(|| "check".to_owned(), |(_, value)| value.clone())
}

fn respond_err(err: &TreeSyncError) -> Response {
    error_from(err).into_response()
}

/// `GET /api/sync/node?type=<kind>&pk=<pk>&pk=<pk>…`
pub async fn node_handler(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Response {
    let kind = query_type_from(&params);
    let pks = pks_from(&params);
    debug!(kind = %kind, pk_count = pks.len(), "serving node query");

    let tree = state.tree.read().await;

    match kind.as_str() {
        "check" => check(&tree, &pks)
            .map(|result| success_response(json!(result)).into_response())
            .unwrap_or_else(|err| respond_err(&err)),
        "fetch" => fetch(&tree, &pks)
            .map(|result| success_response(json!(result)).into_response())
            .unwrap_or_else(|err| respond_err(&err)),
        "get_parents" => get_parents(&tree, &pks)
            .map(|result| success_response(json!(result)).into_response())
            .unwrap_or_else(|err| respond_err(&err)),
        "check_children" => {
            let Some(&pk) = pks.first() else {
                return error_response("Could not find pk").into_response();
            };
            check_children(&tree, pk)
                .map(|report| success_response(json!(report)).into_response())
                .unwrap_or_else(|err| respond_err(&err))
        }
        other => {
            warn!(kind = %other, "unknown sync API call type");
            error_response("Unknown API call type.").into_response()
        }
    }
}

/// `GET /api/sync?updated_time=<float>` — a missing or malformed
/// `updated_time` defaults to `0.0` rather than rejecting the request.
pub async fn since_handler(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let t = params
        .get("updated_time")
        .and_then(|raw| raw.parse::<f64>().ok())
        .unwrap_or(0.0);
    let tree = state.tree.read().await;
    let result = since(&tree, t);
    success_response(json!(result)).into_response()
}

pub async fn health_handler() -> Response {
    success_response(json!({ "status": "ok" })).into_response()
}
