use serde::Deserialize;

use super::raw_result::ColumnarResult;

/// Response envelope from the HTTP pipeline endpoint.
///
/// Contains one entry per pipeline step; the first entry corresponds to the
/// `execute` step and is the only one prismo inspects.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineResponse {
    /// Per-step results, in pipeline order.
    #[serde(default)]
    pub results: Vec<PipelineEntry>,
}

/// Result of a single pipeline step.
///
/// An entry of kind `"error"` carries an [`ErrorDetail`] and no response
/// payload; the server may report it alongside an HTTP 200 status.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineEntry {
    /// `"ok"` or `"error"`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Step payload, present on success.
    pub response: Option<PipelineEntryResponse>,

    /// Error details, present on failure.
    pub error: Option<ErrorDetail>,
}

impl PipelineEntry {
    /// True if the server marked this step as failed.
    pub fn is_error(&self) -> bool {
        self.kind == "error"
    }
}

/// Payload of a successful pipeline step.
///
/// Only execute steps carry a statement result; the close step's payload is
/// an empty shell.
#[derive(Debug, Clone, Deserialize)]
pub struct PipelineEntryResponse {
    /// The columnar statement result, present for execute steps.
    #[serde(default)]
    pub result: Option<ColumnarResult>,
}

/// Error details for a failed pipeline step.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorDetail {
    /// Human-readable error message, reported verbatim to callers.
    pub message: String,

    /// Optional machine-readable error code.
    #[serde(default)]
    pub code: Option<String>,
}
