//! Recognition service contract.
//!
//! The board sends a snapshot of the ink plus the user's variable bindings to
//! an external service and gets back `(expression, answer)` pairs. This module
//! holds the wire types, response parsing, and the [`Recognizer`] seam that
//! transports implement.
//!
//! ## Wire format
//!
//! ```json
//! { "image": "data:image/png;base64,...", "dict_of_vars": { "x": 4 } }
//! ```
//!
//! ```json
//! { "data": [ { "expr": "2 + 2", "result": "4", "assign": false } ] }
//! ```

use crate::surface::{SnapshotLayers, Surface};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;
use thiserror::Error;

/// Path of the recognition endpoint, relative to the service base URL.
pub const CALCULATE_PATH: &str = "/calculate";

/// Variable name to value, sent with every request and never interpreted here.
pub type VariableBindings = BTreeMap<String, Value>;

/// Recognition errors. All of them are recoverable.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecognitionError {
    #[error("Snapshot encoding failed: {0}")]
    Encode(String),
    #[error("Request failed: {0}")]
    Request(String),
    #[error("Request timed out")]
    Timeout,
    #[error("Service returned status {status}")]
    Status { status: u16, body: String },
    #[error("Malformed response: {0}")]
    Parse(String),
    #[error("Service returned no results")]
    Empty,
    #[error("A recognition request is already in flight")]
    Busy,
}

/// Outcome of one recognition request.
pub type RecognitionOutcome = Result<Vec<RecognitionResult>, RecognitionError>;

/// Boxed future returned by [`Recognizer`] implementations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// One recognized expression and its computed answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognitionResult {
    pub expression: String,
    pub answer: String,
    /// `result` exactly as the service sent it. Bound variables carry this
    /// value, so numbers stay numbers on the next request.
    #[serde(default)]
    pub value: Value,
    /// The drawing assigned `answer` to the variable named `expression`.
    #[serde(default)]
    pub assign: bool,
}

impl RecognitionResult {
    pub fn new(expression: impl Into<String>, answer: impl Into<String>) -> Self {
        let answer = answer.into();
        Self {
            expression: expression.into(),
            value: Value::String(answer.clone()),
            answer,
            assign: false,
        }
    }

    /// Mark this result as a variable assignment.
    pub fn assigned(mut self) -> Self {
        self.assign = true;
        self
    }
}

/// Body of a `POST /calculate` request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculateRequest {
    /// Data URI of the snapshot PNG.
    pub image: String,
    pub dict_of_vars: VariableBindings,
}

impl CalculateRequest {
    /// Snapshot `surface` and bundle it with `bindings`.
    pub fn from_surface(
        surface: &Surface,
        layers: SnapshotLayers,
        bindings: &VariableBindings,
    ) -> Result<Self, RecognitionError> {
        let snapshot = surface
            .snapshot(layers)
            .map_err(|e| RecognitionError::Encode(e.to_string()))?;
        Ok(Self {
            image: snapshot.to_data_uri(),
            dict_of_vars: bindings.clone(),
        })
    }
}

/// Body of a successful response.
#[derive(Debug, Clone, Deserialize)]
struct CalculateResponse {
    #[serde(default)]
    data: Option<Vec<WireResult>>,
}

#[derive(Debug, Clone, Deserialize)]
struct WireResult {
    expr: Value,
    result: Value,
    #[serde(default)]
    assign: Option<bool>,
}

fn value_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// Parse a response body into results, in service order.
///
/// `result` may be a string or any other JSON value; non-strings keep their
/// JSON text. A missing or empty `data` list is [`RecognitionError::Empty`].
pub fn parse_response(body: &str) -> RecognitionOutcome {
    let response: CalculateResponse =
        serde_json::from_str(body).map_err(|e| RecognitionError::Parse(e.to_string()))?;
    let data = response.data.unwrap_or_default();
    if data.is_empty() {
        return Err(RecognitionError::Empty);
    }
    Ok(data
        .into_iter()
        .map(|wire| RecognitionResult {
            expression: value_text(wire.expr),
            answer: value_text(wire.result.clone()),
            value: wire.result,
            assign: wire.assign.unwrap_or(false),
        })
        .collect())
}

/// Transport to the recognition service.
pub trait Recognizer: Send + Sync {
    /// Send one request and return the parsed results.
    fn recognize<'a>(&'a self, request: &'a CalculateRequest) -> BoxFuture<'a, RecognitionOutcome>;
}

/// Snapshot `surface`, send it with `bindings`, and return the results.
///
/// Encoding failures are returned as [`RecognitionError::Encode`] without
/// contacting the service.
pub async fn submit(
    recognizer: &dyn Recognizer,
    surface: &Surface,
    layers: SnapshotLayers,
    bindings: &VariableBindings,
) -> RecognitionOutcome {
    let request = CalculateRequest::from_surface(surface, layers, bindings)?;
    recognizer.recognize(&request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::SerializableColor;
    use serde_json::json;
    use std::sync::Mutex;

    struct Recording {
        seen: Mutex<Vec<CalculateRequest>>,
        reply: RecognitionOutcome,
    }

    impl Recognizer for Recording {
        fn recognize<'a>(&'a self, request: &'a CalculateRequest) -> BoxFuture<'a, RecognitionOutcome> {
            Box::pin(async move {
                if let Ok(mut seen) = self.seen.lock() {
                    seen.push(request.clone());
                }
                self.reply.clone()
            })
        }
    }

    #[test]
    fn test_parse_single_result() {
        let results = parse_response(r#"{"data":[{"expr":"2+2","result":"4"}]}"#).unwrap();
        assert_eq!(results, vec![RecognitionResult::new("2+2", "4")]);
    }

    #[test]
    fn test_parse_numeric_result_and_assign() {
        let body = json!({
            "message": "Image processed",
            "status": "success",
            "data": [
                {"expr": "x", "result": 4, "assign": true},
                {"expr": "y", "result": 2.5, "assign": true}
            ]
        })
        .to_string();
        let results = parse_response(&body).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].expression, "x");
        assert_eq!(results[0].answer, "4");
        assert_eq!(results[0].value, json!(4));
        assert!(results[0].assign);
        assert_eq!(results[1].answer, "2.5");
        assert_eq!(results[1].value, json!(2.5));
    }

    #[test]
    fn test_parse_empty_and_missing_data() {
        assert_eq!(parse_response(r#"{"data":[]}"#), Err(RecognitionError::Empty));
        assert_eq!(parse_response(r#"{"status":"ok"}"#), Err(RecognitionError::Empty));
    }

    #[test]
    fn test_parse_malformed() {
        assert!(matches!(parse_response("not json"), Err(RecognitionError::Parse(_))));
        assert!(matches!(
            parse_response(r#"{"data":[{"expression":"2+2"}]}"#),
            Err(RecognitionError::Parse(_))
        ));
    }

    #[test]
    fn test_request_serializes_with_wire_names() {
        let mut bindings = VariableBindings::new();
        bindings.insert("x".to_string(), json!(4));
        let request = CalculateRequest {
            image: "data:image/png;base64,AAAA".to_string(),
            dict_of_vars: bindings,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["image"], "data:image/png;base64,AAAA");
        assert_eq!(value["dict_of_vars"]["x"], 4);
    }

    #[test]
    fn test_submit_sends_snapshot_and_bindings() {
        let surface = Surface::new(8, 8, SerializableColor::black());
        let mut bindings = VariableBindings::new();
        bindings.insert("y".to_string(), json!("5"));
        let recognizer = Recording {
            seen: Mutex::new(Vec::new()),
            reply: Ok(vec![RecognitionResult::new("y+1", "6")]),
        };

        let outcome = pollster::block_on(submit(&recognizer, &surface, SnapshotLayers::Ink, &bindings));
        assert_eq!(outcome.unwrap()[0].answer, "6");

        let seen = recognizer.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].image.starts_with("data:image/png;base64,"));
        assert_eq!(seen[0].dict_of_vars, bindings);
    }
}
