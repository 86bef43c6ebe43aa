use axum::response::{IntoResponse, Json};
use serde_json::{json, Value};

/// Builds the `{success: true, data: ...}` envelope.
pub fn success_response(data: Value) -> impl IntoResponse {
    Json(json!({
        "success": true,
        "data": data,
    }))
}

/// Builds the `{success: false, error_message: ...}` envelope.
pub fn error_response(message: impl Into<String>) -> impl IntoResponse {
    Json(json!({
        "success": false,
        "error_message": message.into(),
    }))
}

/// Maps a [`treesync_core::TreeSyncError`] to the client-facing error
/// envelope. Unknown-pk gets a fixed literal string; everything else
/// surfaces its own message.
pub fn error_from(err: &treesync_core::TreeSyncError) -> impl IntoResponse {
    use treesync_core::TreeSyncError::{
        DigestFailure, EmptyRoot, InvalidChild, MissingAttribute, Unsupported, UnknownKey,
    };
    let message = match err {
        UnknownKey { .. } => "Could not find pk".to_owned(),
        EmptyRoot | MissingAttribute { .. } | InvalidChild | Unsupported(_) | DigestFailure(_) => {
            err.to_string()
        }
    };
    error_response(message)
}
