// Response envelope handling
//
// The rental platform wraps most JSON responses in
// `{"status": "ok"|"error", "message": ..., "data": ...}`, but a handful of
// endpoints return bare payloads (entity lists, booking windows). A body is
// treated as enveloped purely by the presence and value of its `status`
// key, never by schema validation, so domain objects that happen to carry
// their own `status` field (rentals report "pending", "active", ...) still
// pass through untouched.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::Error;

/// Fallback shown when a failure envelope carries no usable `message`.
const DEFAULT_FAILURE_MESSAGE: &str = "request failed";

/// A platform response envelope.
///
/// All fields are optional on the wire; unknown fields are kept in `extra`
/// so failure context survives intact.
#[derive(Debug, Clone, Default)]
pub struct Envelope {
    pub status: Option<String>,
    pub message: Option<String>,
    pub data: Option<Value>,
    /// Catch-all for undocumented fields.
    pub extra: Map<String, Value>,
}

impl Envelope {
    /// Split a JSON object into the known envelope fields plus `extra`.
    ///
    /// Non-string `status`/`message` values are left in `extra` rather
    /// than dropped.
    fn from_object(mut map: Map<String, Value>) -> Self {
        let status = take_string(&mut map, "status");
        let message = take_string(&mut map, "message");
        let data = map.remove("data");
        Self {
            status,
            message,
            data,
            extra: map,
        }
    }
}

fn take_string(map: &mut Map<String, Value>, key: &str) -> Option<String> {
    match map.remove(key) {
        Some(Value::String(s)) => Some(s),
        Some(other) => {
            map.insert(key.to_owned(), other);
            None
        }
        None => None,
    }
}

/// A response body classified at the deserialization boundary.
#[derive(Debug)]
pub(crate) enum Body {
    /// `"status": "ok"` -- the payload is the envelope's `data` field
    /// (`Value::Null` when absent).
    Success(Value),
    /// `"status": "error"` -- the call failed; the whole envelope is kept
    /// as failure context.
    Failure(Envelope),
    /// No `status` key, a non-object body, or an unrecognized `status`
    /// value: the body is the payload itself.
    Bare(Value),
}

/// Classify a parsed body as enveloped or bare.
pub(crate) fn classify(value: Value) -> Body {
    enum Tag {
        Success,
        Failure,
        Bare,
    }

    // `Value::get` returns None for non-objects, so primitives and arrays
    // fall straight through to Bare.
    let tag = match value.get("status").and_then(Value::as_str) {
        Some("ok") => Tag::Success,
        Some("error") => Tag::Failure,
        _ => Tag::Bare,
    };

    match tag {
        Tag::Success => {
            let mut value = value;
            let data = value.get_mut("data").map(Value::take).unwrap_or(Value::Null);
            Body::Success(data)
        }
        Tag::Failure => {
            let Value::Object(map) = value else {
                return Body::Bare(value);
            };
            Body::Failure(Envelope::from_object(map))
        }
        Tag::Bare => Body::Bare(value),
    }
}

/// Unwrap a raw response body into the caller's payload type.
///
/// Success envelopes yield their `data` field, failure envelopes become
/// [`Error::RequestFailed`], and anything else deserializes as-is.
pub(crate) fn unwrap_body<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    let value: Value = serde_json::from_str(body).map_err(|e| decode_error(&e, body))?;

    let payload = match classify(value) {
        Body::Success(data) => data,
        Body::Bare(raw) => raw,
        Body::Failure(envelope) => return Err(failure_error(envelope, None)),
    };

    serde_json::from_value(payload).map_err(|e| decode_error(&e, body))
}

/// Build the error for a failure envelope, falling back to a non-empty
/// message when the platform sent none. `status` records the HTTP code
/// the envelope rode on; envelopes on 2xx responses carry `None`.
pub(crate) fn failure_error(envelope: Envelope, status: Option<u16>) -> Error {
    let message = envelope
        .message
        .clone()
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_owned());
    Error::RequestFailed {
        message,
        envelope,
        status,
    }
}

fn decode_error(err: &serde_json::Error, body: &str) -> Error {
    let preview: String = body.chars().take(200).collect();
    Error::Deserialization {
        message: format!("{err} (body preview: {preview:?})"),
        body: body.to_owned(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn success_envelope_yields_data() {
        let body = r#"{"status":"ok","data":{"balance":120.5}}"#;
        let value: Value = unwrap_body(body).unwrap();
        assert_eq!(value, json!({"balance": 120.5}));
    }

    #[test]
    fn success_envelope_without_data_yields_null() {
        let body = r#"{"status":"ok","message":"done"}"#;
        let value: Value = unwrap_body(body).unwrap();
        assert_eq!(value, Value::Null);

        // And it still satisfies an optional payload type.
        let opt: Option<u32> = unwrap_body(body).unwrap();
        assert_eq!(opt, None);
    }

    #[test]
    fn failure_envelope_raises_with_message() {
        let body = r#"{"status":"error","message":"car not available"}"#;
        let err = unwrap_body::<Value>(body).unwrap_err();
        match err {
            Error::RequestFailed { message, .. } => assert_eq!(message, "car not available"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn failure_envelope_without_message_gets_fallback() {
        for body in [r#"{"status":"error"}"#, r#"{"status":"error","message":""}"#] {
            let err = unwrap_body::<Value>(body).unwrap_err();
            match err {
                Error::RequestFailed { message, .. } => {
                    assert!(!message.is_empty(), "fallback message must be non-empty");
                }
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn failure_envelope_keeps_context() {
        let body = r#"{"status":"error","message":"nope","data":{"code":7},"hint":"retry later"}"#;
        let err = unwrap_body::<Value>(body).unwrap_err();
        let envelope = err.envelope().unwrap();
        assert_eq!(envelope.status.as_deref(), Some("error"));
        assert_eq!(envelope.data, Some(json!({"code": 7})));
        assert_eq!(envelope.extra.get("hint"), Some(&json!("retry later")));
    }

    #[test]
    fn bare_object_passes_through() {
        let body = r#"{"balance":42.0}"#;
        let value: Value = unwrap_body(body).unwrap();
        assert_eq!(value, json!({"balance": 42.0}));
    }

    #[test]
    fn bare_array_and_scalar_pass_through() {
        let list: Vec<u32> = unwrap_body("[1,2,3]").unwrap();
        assert_eq!(list, vec![1, 2, 3]);

        let n: u32 = unwrap_body("7").unwrap();
        assert_eq!(n, 7);
    }

    #[test]
    fn unrecognized_status_is_bare_payload() {
        // Rentals carry their own lifecycle status; the body must come
        // back whole, not unwrapped.
        let body = r#"{"status":"pending","total_price":99.0}"#;
        let value: Value = unwrap_body(body).unwrap();
        assert_eq!(value, json!({"status": "pending", "total_price": 99.0}));
    }

    #[test]
    fn non_string_status_is_bare_payload() {
        let body = r#"{"status":7,"data":"x"}"#;
        let value: Value = unwrap_body(body).unwrap();
        assert_eq!(value, json!({"status": 7, "data": "x"}));
    }

    #[test]
    fn invalid_json_is_a_decode_error() {
        let err = unwrap_body::<Value>("not json").unwrap_err();
        assert!(matches!(err, Error::Deserialization { .. }));
    }

    #[test]
    fn typed_payload_decodes_from_data() {
        #[derive(serde::Deserialize)]
        struct Balance {
            balance: f64,
        }

        let body = r#"{"status":"ok","data":{"balance":10.0}}"#;
        let parsed: Balance = unwrap_body(body).unwrap();
        assert!((parsed.balance - 10.0).abs() < f64::EPSILON);
    }
}
