//! Main prismo client with builder pattern.
//!
//! Composes the SQL builders, transport backend, and result normalizer
//! behind the public operation set, and drives the schema type-generation
//! workflow.

use std::path::PathBuf;

use log::debug;
use tokio::fs;

use crate::error::{PrismoError, Result};
use crate::models::{RawResult, Row};
use crate::normalize::normalize;
use crate::schema::parse_create_table;
use crate::sql::{
    build_delete, build_find_first, build_find_one, build_insert, build_select, build_update,
};
use crate::transport::{EmbeddedTransport, HttpTransport, Transport};
use crate::typegen::{self, TypegenOptions};

/// Async client for a SQLite-compatible database.
///
/// Connects either to a remote HTTP pipeline endpoint or to an embedded
/// database file, depending on how it was built. The connection
/// configuration is fixed for the client's lifetime.
///
/// # Examples
///
/// ```rust,no_run
/// use prismo::PrismoClient;
/// use serde_json::json;
///
/// # async fn example() -> prismo::Result<()> {
/// let client = PrismoClient::builder()
///     .url("https://db.example.com")
///     .token("secret")
///     .build()?;
///
/// let guilds = client.find_many("guilds", None, None).await?;
/// println!("{} guilds", guilds.len());
///
/// let filter = json!({"name": "ferris"});
/// let row = client.find_first("guilds", filter.as_object().unwrap()).await?;
/// # Ok(())
/// # }
/// ```
///
/// # Security
///
/// Statements are built by direct string interpolation without escaping;
/// see [`crate::sql`]. Do not pass untrusted input as table names, filter
/// values, or data values.
pub struct PrismoClient {
    transport: Transport,
}

impl PrismoClient {
    /// Create a new builder for configuring the client.
    pub fn builder() -> PrismoClientBuilder {
        PrismoClientBuilder::new()
    }

    /// Fetch up to `limit` rows (default 1000) from `table`, optionally
    /// filtered by equality on every entry of `filter`.
    pub async fn find_many(
        &self,
        table: &str,
        filter: Option<&Row>,
        limit: Option<u64>,
    ) -> Result<Vec<Row>> {
        let sql = build_select(table, filter, limit)?;
        let raw = self.transport.execute(&sql).await?;
        Ok(normalize(&raw))
    }

    /// Fetch the row of `table` whose `id` column equals `id`, if any.
    pub async fn find_one(&self, table: &str, id: &str) -> Result<Option<Row>> {
        let sql = build_find_one(table, id)?;
        let raw = self.transport.execute(&sql).await?;
        Ok(normalize(&raw).into_iter().next())
    }

    /// Fetch the first row of `table` matching `filter`, if any. The filter
    /// is required and must be non-empty.
    pub async fn find_first(&self, table: &str, filter: &Row) -> Result<Option<Row>> {
        let sql = build_find_first(table, filter)?;
        let raw = self.transport.execute(&sql).await?;
        Ok(normalize(&raw).into_iter().next())
    }

    /// Insert `data` as a new row of `table`. Returns the inserted data map
    /// as passed in.
    pub async fn create(&self, table: &str, data: &Row) -> Result<Row> {
        let sql = build_insert(table, data)?;
        self.transport.execute(&sql).await?;
        Ok(data.clone())
    }

    /// Update every row of `table` matching `filter` with the columns of
    /// `data`. Returns the data map as passed in.
    pub async fn update(&self, table: &str, filter: &Row, data: &Row) -> Result<Row> {
        let sql = build_update(table, filter, data)?;
        self.transport.execute(&sql).await?;
        Ok(data.clone())
    }

    /// Delete every row of `table` matching `filter`. Returns the filter
    /// map as passed in.
    pub async fn delete(&self, table: &str, filter: &Row) -> Result<Row> {
        let sql = build_delete(table, filter)?;
        self.transport.execute(&sql).await?;
        Ok(filter.clone())
    }

    /// List the names of all user tables in the database.
    pub async fn list_tables(&self) -> Result<Vec<String>> {
        let raw = self
            .transport
            .execute("SELECT name FROM sqlite_master WHERE type='table';")
            .await?;

        Ok(normalize(&raw)
            .iter()
            .filter_map(|row| row.get("name").and_then(|v| v.as_str()).map(str::to_string))
            .collect())
    }

    /// Escape hatch: execute raw SQL and return the backend's unprocessed
    /// result shape.
    pub async fn sql(&self, sql: &str) -> Result<RawResult> {
        self.transport.execute(sql).await
    }

    /// Fetch the backend server's version string.
    ///
    /// # Errors
    ///
    /// Returns [`PrismoError::Unsupported`] on the embedded backend.
    pub async fn version(&self) -> Result<String> {
        self.transport.server_version().await
    }

    /// Generate Rust type declarations for every user table.
    ///
    /// Queries `sqlite_master` for all table definitions (excluding the
    /// internal `sqlite_sequence` table), parses each `CREATE TABLE`
    /// statement, and writes one artifact containing a `TABLES` name list
    /// plus one record struct per table. Optionally persists each table's
    /// raw DDL under `{out_dir}/sql/`. Table blocks appear in
    /// `sqlite_master` result order; accumulation is deliberately
    /// sequential.
    ///
    /// Returns the path of the generated type-declaration file.
    pub async fn generate_types(&self, options: TypegenOptions) -> Result<PathBuf> {
        let raw = self
            .transport
            .execute("SELECT * FROM sqlite_master WHERE type='table'")
            .await?;

        let tables: Vec<(String, String)> = normalize(&raw)
            .iter()
            .filter_map(|row| {
                let name = row.get("name")?.as_str()?;
                let ddl = row.get("sql")?.as_str()?;
                (name != "sqlite_sequence").then(|| (name.to_string(), ddl.to_string()))
            })
            .collect();
        debug!("[PRISMO_TYPEGEN] generating types for {} tables", tables.len());

        let sql_dir = options.out_dir.join("sql");
        fs::create_dir_all(&sql_dir).await?;

        let names: Vec<String> = tables.iter().map(|(name, _)| name.clone()).collect();
        let mut artifact = typegen::render_header(&names);

        for (name, ddl) in &tables {
            if options.write_sql_files {
                fs::write(sql_dir.join(format!("{}.sql", name)), ddl).await?;
            }

            let schema = parse_create_table(ddl)?;
            artifact.push_str(&typegen::render_table(&schema));
            artifact.push('\n');
        }

        let types_path = options.out_dir.join(typegen::TYPES_FILE);
        fs::write(&types_path, artifact).await?;
        debug!("[PRISMO_TYPEGEN] wrote {}", types_path.display());

        Ok(types_path)
    }
}

/// Builder for configuring [`PrismoClient`] instances.
///
/// `url` and `token` are required; `embedded(true)` switches from the HTTP
/// pipeline backend to a direct embedded connection (the URL must then use
/// the `file:` scheme).
pub struct PrismoClientBuilder {
    url: Option<String>,
    token: Option<String>,
    embedded: bool,
}

impl PrismoClientBuilder {
    fn new() -> Self {
        Self {
            url: None,
            token: None,
            embedded: false,
        }
    }

    /// Set the database URL. Must parse as an absolute URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the bearer credential sent with every HTTP request.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Bypass the HTTP endpoint and connect directly to an embedded
    /// database file.
    pub fn embedded(mut self, embedded: bool) -> Self {
        self.embedded = embedded;
        self
    }

    /// Validate the configuration and build the client.
    pub fn build(self) -> Result<PrismoClient> {
        let url = self
            .url
            .ok_or_else(|| PrismoError::Configuration("url is required".into()))?;
        let url = reqwest::Url::parse(&url)
            .map_err(|e| PrismoError::Configuration(format!("invalid url '{}': {}", url, e)))?;

        let token = self
            .token
            .ok_or_else(|| PrismoError::Configuration("token is required".into()))?;
        if token.is_empty() {
            return Err(PrismoError::Configuration("token must not be empty".into()));
        }

        let transport = if self.embedded {
            Transport::Embedded(EmbeddedTransport::open(&url)?)
        } else {
            let base_url = url.as_str().trim_end_matches('/').to_string();
            Transport::Http(HttpTransport::new(base_url, token)?)
        };

        Ok(PrismoClient { transport })
    }
}
