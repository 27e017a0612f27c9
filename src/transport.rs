//! Execution backends for SQL statements.
//!
//! Both backends expose a single capability: `execute(sql) -> RawResult`.
//! The HTTP backend speaks the libSQL-style pipeline protocol; the embedded
//! backend delegates to a local SQLite connection. Failures are terminal:
//! the core performs no retries and applies no timeouts, leaving retry
//! policy to the caller.

use std::sync::Arc;

use log::{debug, warn};
use serde_json::Value as JsonValue;
use tokio::sync::Mutex;

use crate::error::{PrismoError, Result};
use crate::models::{DriverResult, PipelineRequest, PipelineResponse, RawResult};

/// Pluggable execution backend, fixed at client construction.
pub(crate) enum Transport {
    Http(HttpTransport),
    Embedded(EmbeddedTransport),
    #[cfg(test)]
    Mock(MockTransport),
}

impl Transport {
    /// Execute one SQL statement and return the backend's raw result.
    pub(crate) async fn execute(&self, sql: &str) -> Result<RawResult> {
        match self {
            Transport::Http(http) => http.execute(sql).await,
            Transport::Embedded(embedded) => embedded.execute(sql).await,
            #[cfg(test)]
            Transport::Mock(mock) => mock.execute(sql),
        }
    }

    /// Fetch the backend server's version string. HTTP backend only.
    pub(crate) async fn server_version(&self) -> Result<String> {
        match self {
            Transport::Http(http) => http.server_version().await,
            Transport::Embedded(_) => Err(PrismoError::Unsupported("version")),
            #[cfg(test)]
            Transport::Mock(_) => Ok("mock".to_string()),
        }
    }
}

/// HTTP pipeline backend: one bearer-authenticated POST per statement.
pub(crate) struct HttpTransport {
    base_url: String,
    token: String,
    http_client: reqwest::Client,
}

impl HttpTransport {
    pub(crate) fn new(base_url: String, token: String) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .build()
            .map_err(|e| PrismoError::Configuration(e.to_string()))?;

        Ok(Self {
            base_url,
            token,
            http_client,
        })
    }

    async fn execute(&self, sql: &str) -> Result<RawResult> {
        let url = format!("{}/v2/pipeline", self.base_url);
        debug!("[PRISMO_HTTP] POST {} sql_len={}", url, sql.len());

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&PipelineRequest::execute(sql))
            .send()
            .await?;

        let status = response.status();
        debug!("[PRISMO_HTTP] response status={}", status);

        let body = response.text().await?;
        raw_from_pipeline(status.is_success(), &body)
    }

    async fn server_version(&self) -> Result<String> {
        let url = format!("{}/version", self.base_url);
        debug!("[PRISMO_HTTP] GET {}", url);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!("[PRISMO_HTTP] version probe failed status={}", status);
            return Err(PrismoError::Transport(format!(
                "version probe failed with status {}",
                status
            )));
        }

        Ok(response.text().await?)
    }
}

/// Validate a pipeline response body and extract the execute step's result.
///
/// A non-2xx status or a first entry of kind `"error"` is a query failure
/// carrying the server's message verbatim, even when the HTTP status is
/// 200.
fn raw_from_pipeline(status_ok: bool, body: &str) -> Result<RawResult> {
    let response: PipelineResponse = match serde_json::from_str(body) {
        Ok(response) => response,
        Err(_) if !status_ok => {
            // Server rejected the request without a pipeline envelope.
            return Err(PrismoError::Query(body.to_string()));
        }
        Err(e) => return Err(PrismoError::Serialization(e)),
    };

    let entry = response
        .results
        .into_iter()
        .next()
        .ok_or_else(|| PrismoError::Query("empty pipeline response".into()))?;

    if !status_ok || entry.is_error() {
        let message = entry
            .error
            .map(|e| e.message)
            .unwrap_or_else(|| "unknown server error".to_string());
        warn!("[PRISMO_HTTP] server error: {}", message);
        return Err(PrismoError::Query(message));
    }

    let result = entry
        .response
        .and_then(|r| r.result)
        .ok_or_else(|| PrismoError::Query("pipeline entry missing result".into()))?;

    Ok(RawResult::Columnar(result))
}

/// Embedded backend: a long-lived local SQLite connection owned by the
/// client. Calls are serialized through one mutex; no further coordination
/// is added.
pub(crate) struct EmbeddedTransport {
    conn: Arc<Mutex<rusqlite::Connection>>,
}

impl EmbeddedTransport {
    /// Open the database file named by a `file:` URL.
    pub(crate) fn open(url: &reqwest::Url) -> Result<Self> {
        if url.scheme() != "file" {
            return Err(PrismoError::Configuration(format!(
                "embedded backend requires a file: URL, got '{}'",
                url.scheme()
            )));
        }

        let path = url
            .to_file_path()
            .unwrap_or_else(|_| std::path::PathBuf::from(url.path()));
        debug!("[PRISMO_DB] opening {}", path.display());

        let conn = rusqlite::Connection::open(&path)
            .map_err(|e| PrismoError::Transport(e.to_string()))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn execute(&self, sql: &str) -> Result<RawResult> {
        let conn = self.conn.lock().await;
        debug!("[PRISMO_DB] execute sql_len={}", sql.len());

        let mut stmt = conn.prepare(sql)?;

        // Statements that produce no result set (INSERT, UPDATE, DELETE,
        // DDL) are run directly and return an empty driver shape.
        if stmt.column_count() == 0 {
            stmt.execute([])?;
            return Ok(RawResult::Driver(DriverResult {
                columns: vec![],
                rows: vec![],
            }));
        }

        let columns: Vec<String> = stmt
            .column_names()
            .into_iter()
            .map(str::to_string)
            .collect();

        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            let mut record = serde_json::Map::new();
            for (i, name) in columns.iter().enumerate() {
                record.insert(name.clone(), json_from_sqlite(row.get_ref(i)?));
            }
            out.push(JsonValue::Object(record));
        }

        Ok(RawResult::Driver(DriverResult { columns, rows: out }))
    }
}

/// Convert one SQLite cell to JSON. Blobs are lossy-decoded as UTF-8 text;
/// non-finite reals become null (JSON has no representation for them).
fn json_from_sqlite(value: rusqlite::types::ValueRef<'_>) -> JsonValue {
    use rusqlite::types::ValueRef;

    match value {
        ValueRef::Null => JsonValue::Null,
        ValueRef::Integer(i) => JsonValue::from(i),
        ValueRef::Real(f) => serde_json::Number::from_f64(f)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        ValueRef::Text(text) => JsonValue::String(String::from_utf8_lossy(text).into_owned()),
        ValueRef::Blob(blob) => JsonValue::String(String::from_utf8_lossy(blob).into_owned()),
    }
}

/// Test backend: counts executes and returns a canned response, so tests
/// can assert that validation failures never reach the transport.
#[cfg(test)]
pub(crate) struct MockTransport {
    pub calls: Arc<std::sync::atomic::AtomicUsize>,
    pub response: RawResult,
}

#[cfg(test)]
impl MockTransport {
    pub(crate) fn returning(response: RawResult) -> (Self, Arc<std::sync::atomic::AtomicUsize>) {
        let calls = Arc::new(std::sync::atomic::AtomicUsize::new(0));
        (
            Self {
                calls: Arc::clone(&calls),
                response,
            },
            calls,
        )
    }

    fn execute(&self, _sql: &str) -> Result<RawResult> {
        self.calls
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        Ok(self.response.clone())
    }
}
