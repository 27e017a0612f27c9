use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// One table row as an ordered column-name → value mapping.
///
/// This is both the shape callers pass for filters and insert/update data,
/// and the uniform shape every read operation returns after normalization.
/// Key order follows insertion order (`serde_json` is built with
/// `preserve_order`).
pub type Row = serde_json::Map<String, JsonValue>;

/// Unprocessed backend response for one statement, before normalization.
///
/// The two transport backends return structurally different shapes; this is
/// a tagged union over both, discriminated by field presence (`cols` vs
/// `columns`). Transient: produced per call and discarded after
/// [`normalize`](crate::normalize::normalize).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawResult {
    /// The HTTP pipeline's columnar shape.
    Columnar(ColumnarResult),
    /// The embedded driver's row-object shape.
    Driver(DriverResult),
}

/// Columnar statement result: positional cell rows matched to `cols` by
/// index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnarResult {
    /// Result column descriptors, in statement order.
    pub cols: Vec<Col>,

    /// Result rows; each row is a positional sequence of cells matching
    /// `cols` by index.
    pub rows: Vec<Vec<Cell>>,
}

/// A single result column descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Col {
    /// Column name.
    pub name: String,
}

/// A single result cell.
///
/// The wire shape carries a type tag alongside the value; only the value is
/// retained. A cell without a value field (SQL NULL) decodes as
/// `JsonValue::Null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cell {
    /// The cell value.
    #[serde(default)]
    pub value: JsonValue,
}

/// Driver row-object result: rows keyed by column name, or by stringified
/// positional index depending on the driver's row representation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriverResult {
    /// Result column names, in statement order.
    pub columns: Vec<String>,

    /// Result rows; each row is an object keyed by column name or by
    /// stringified index.
    pub rows: Vec<JsonValue>,
}
