//! # prismo: lightweight SQLite-compatible database client
//!
//! An async client library for CRUD-style operations against a remote
//! SQLite-compatible database, reachable either through the libSQL-style
//! HTTP pipeline endpoint or through a direct embedded connection, plus a
//! schema introspection workflow that emits Rust type declarations for
//! calling code.
//!
//! ## Features
//!
//! - **CRUD operations**: `find_many`, `find_one`, `find_first`, `create`,
//!   `update`, `delete` built from plain filter/data maps
//! - **Two backends**: HTTP pipeline (`POST {url}/v2/pipeline`, bearer
//!   authenticated) or an embedded database file, selected at build time
//! - **Uniform results**: both backends' response shapes normalize into
//!   one ordered row-map sequence
//! - **Type generation**: parses `CREATE TABLE` DDL from `sqlite_master`
//!   into generated record structs
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use prismo::PrismoClient;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PrismoClient::builder()
//!         .url("https://db.example.com")
//!         .token("secret")
//!         .build()?;
//!
//!     // Insert a row
//!     let data = json!({"id": "1", "name": "ferris"});
//!     client.create("users", data.as_object().unwrap()).await?;
//!
//!     // Read it back
//!     let users = client.find_many("users", None, None).await?;
//!     println!("{} users", users.len());
//!
//!     // Generate type declarations under .prismo/
//!     client.generate_types(Default::default()).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Embedded backend
//!
//! ```rust,no_run
//! use prismo::PrismoClient;
//!
//! # fn example() -> prismo::Result<()> {
//! let client = PrismoClient::builder()
//!     .url("file:///var/lib/app/local.db")
//!     .token("unused-locally")
//!     .embedded(true)
//!     .build()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Security
//!
//! Statement text is assembled by direct string interpolation with no
//! escaping or parameter binding, matching the wire behavior this client
//! was built against. A value containing a quote character corrupts the
//! statement. Do not pass untrusted input to any operation; see
//! [`sql`](crate::sql) for details.

pub mod client;
pub mod error;
pub mod models;
pub mod normalize;
pub mod schema;
pub mod sql;
pub mod typegen;

mod transport;

// Re-export main types for convenience
pub use client::{PrismoClient, PrismoClientBuilder};
pub use error::{PrismoError, Result};
pub use models::{RawResult, Row};
pub use schema::{parse_create_table, Field, FieldType, TableSchema};
pub use typegen::TypegenOptions;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
