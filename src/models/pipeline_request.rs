use serde::Serialize;

/// Request envelope for the HTTP pipeline endpoint.
///
/// The backend executes the listed steps in order. Every prismo operation
/// sends exactly one `execute` step followed by one `close` step.
///
/// # Examples
///
/// ```rust
/// use prismo::models::PipelineRequest;
///
/// let request = PipelineRequest::execute("SELECT * FROM users LIMIT 10");
/// assert_eq!(request.requests.len(), 2);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct PipelineRequest {
    /// Ordered pipeline steps.
    pub requests: Vec<PipelineStep>,
}

impl PipelineRequest {
    /// Build the standard single-statement pipeline: execute, then close.
    pub fn execute(sql: impl Into<String>) -> Self {
        Self {
            requests: vec![
                PipelineStep::Execute {
                    stmt: Stmt { sql: sql.into() },
                },
                PipelineStep::Close,
            ],
        }
    }
}

/// A single step in the pipeline envelope.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PipelineStep {
    /// Execute one SQL statement.
    Execute {
        /// The statement to run.
        stmt: Stmt,
    },
    /// Close the pipeline connection.
    Close,
}

/// Statement wrapper within an execute step.
#[derive(Debug, Clone, Serialize)]
pub struct Stmt {
    /// SQL statement text.
    pub sql: String,
}
