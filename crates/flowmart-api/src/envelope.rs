//! Decoding of the `{status, message, code, data}` wrapper sent on every
//! response.

use crate::transport::HttpResponse;
use flowmart_core::{Acknowledgement, ApiError, Outcome};
use log::trace;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Wire wrapper. `status` and `code` vary in type between endpoints, so they
/// stay untyped until a caller needs them.
#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(default)]
    status: Option<Value>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<Value>,
    #[serde(default)]
    data: Option<Value>,
}

/// Decode the payload of `response` as `T`.
///
/// The server usually nests the resource under `key` inside `data`
/// (`{"data": {"category": {...}}}`); a bare resource directly in `data` is
/// accepted as well.
pub(crate) fn decode_payload<T>(response: &HttpResponse, key: Option<&str>) -> Outcome<T>
where
    T: DeserializeOwned,
{
    if !response.is_success() {
        return Err(api_error(response).into());
    }

    let envelope: Envelope = serde_json::from_str(&response.body).map_err(|e| {
        ApiError::contract_violation(format!("Response body could not be decoded: {}", e))
    })?;

    let data = match envelope.data {
        Some(data) if !data.is_null() => data,
        _ => {
            trace!("Envelope without data (status {:?}, code {:?})", envelope.status, envelope.code);
            return Err(ApiError::contract_violation("Response did not include any data").into());
        }
    };

    let payload = match (key, data) {
        (Some(key), Value::Object(mut fields)) if fields.contains_key(key) => {
            fields.remove(key).unwrap_or(Value::Null)
        }
        (_, data) => data,
    };

    serde_json::from_value(payload).map_err(|e| {
        ApiError::contract_violation(format!(
            "Unexpected {} payload: {}",
            key.unwrap_or("response"),
            e
        ))
        .into()
    })
}

/// Decode a response that carries no resource.
///
/// An empty 2xx body is accepted; any other body must still be an envelope.
pub(crate) fn decode_acknowledgement(response: &HttpResponse) -> Outcome<Acknowledgement> {
    if !response.is_success() {
        return Err(api_error(response).into());
    }

    if response.body.trim().is_empty() {
        return Ok(Acknowledgement::default());
    }

    let envelope: Envelope = serde_json::from_str(&response.body).map_err(|e| {
        ApiError::contract_violation(format!("Response body could not be decoded: {}", e))
    })?;

    let data_message = envelope
        .data
        .as_ref()
        .and_then(|data| data.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(Acknowledgement {
        message: envelope.message.or(data_message),
        status: envelope.status.map(|status| match status {
            Value::String(s) => s,
            other => other.to_string(),
        }),
    })
}

/// Error for a non-2xx response, using the envelope message when present.
pub(crate) fn api_error(response: &HttpResponse) -> ApiError {
    serde_json::from_str::<Envelope>(&response.body)
        .ok()
        .and_then(|envelope| envelope.message)
        .filter(|message| !message.trim().is_empty())
        .map(|message| ApiError::new(response.status, message))
        .unwrap_or_else(|| ApiError::unknown(response.status))
}
