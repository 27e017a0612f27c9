//! Rendering of the generated type-declaration artifact.
//!
//! The client's `generate_types` workflow queries `sqlite_master`, parses
//! each table's DDL via [`crate::schema`], and renders one Rust source file
//! containing a union of table names plus one record struct per table. This
//! module holds the pure rendering half; orchestration lives in
//! [`crate::client`].

use std::path::PathBuf;

use crate::schema::TableSchema;

/// Default output directory for generated artifacts.
pub const DEFAULT_OUT_DIR: &str = ".prismo";

/// Name of the generated type-declaration file within the output directory.
pub const TYPES_FILE: &str = "types.rs";

/// Options for the type-generation workflow.
///
/// # Examples
///
/// ```rust
/// use prismo::TypegenOptions;
///
/// // Defaults: write to .prismo/, no per-table .sql files.
/// let options = TypegenOptions::default();
///
/// // Keep the raw DDL alongside the generated types.
/// let options = TypegenOptions::default().write_sql_files(true);
/// ```
#[derive(Debug, Clone)]
pub struct TypegenOptions {
    /// Also persist each table's raw DDL as `{out_dir}/sql/{table}.sql`.
    pub write_sql_files: bool,

    /// Output directory for generated artifacts.
    pub out_dir: PathBuf,
}

impl Default for TypegenOptions {
    fn default() -> Self {
        Self {
            write_sql_files: false,
            out_dir: PathBuf::from(DEFAULT_OUT_DIR),
        }
    }
}

impl TypegenOptions {
    /// Toggle persisting per-table `.sql` DDL files.
    pub fn write_sql_files(mut self, write: bool) -> Self {
        self.write_sql_files = write;
        self
    }

    /// Override the output directory (defaults to `.prismo`).
    pub fn out_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.out_dir = dir.into();
        self
    }
}

/// Render the artifact header and the union-of-table-names declaration.
pub fn render_header(table_names: &[String]) -> String {
    let names = table_names
        .iter()
        .map(|name| format!("\"{}\"", name))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "// @generated by prismo. Do not edit.\n\
         #![allow(non_snake_case, non_camel_case_types)]\n\n\
         /// Tables present in the database schema.\n\
         pub const TABLES: &[&str] = &[{}];\n\n",
        names
    )
}

/// Render one table's record struct. Every field is `Option<T>`: the parser
/// does not model NOT NULL constraints, so all columns are treated as
/// nullable.
pub fn render_table(schema: &TableSchema) -> String {
    let mut block = String::new();
    block.push_str("#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]\n");
    block.push_str("#[serde(default)]\n");
    block.push_str(&format!("pub struct {} {{\n", schema.name));
    for field in &schema.fields {
        block.push_str(&format!(
            "    pub {}: Option<{}>,\n",
            field.name,
            field.field_type.rust_type()
        ));
    }
    block.push_str("}\n");
    block
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::parse_create_table;

    #[test]
    fn test_render_header_unions_table_names() {
        let header = render_header(&["Guild".to_string(), "users".to_string()]);
        assert!(header.contains("pub const TABLES: &[&str] = &[\"Guild\", \"users\"];"));
    }

    #[test]
    fn test_render_table_struct() {
        let schema = parse_create_table(
            r#"CREATE TABLE "Guild" ("id" TEXT, "count" INTEGER, "active" BOOLEAN)"#,
        )
        .unwrap();

        let block = render_table(&schema);
        assert!(block.contains("pub struct Guild {"));
        assert!(block.contains("    pub id: Option<String>,"));
        assert!(block.contains("    pub count: Option<f64>,"));
        assert!(block.contains("    pub active: Option<bool>,"));
    }

    #[test]
    fn test_unknown_type_renders_as_json_value() {
        let schema = parse_create_table(r#"CREATE TABLE "b" ("payload" BLOB)"#).unwrap();
        let block = render_table(&schema);
        assert!(block.contains("pub payload: Option<serde_json::Value>,"));
    }

    #[test]
    fn test_default_options() {
        let options = TypegenOptions::default();
        assert!(!options.write_sql_files);
        assert_eq!(options.out_dir, std::path::Path::new(".prismo"));
    }
}
