//! Data models for the prismo client library.
//!
//! Defines the request and response structures for the libSQL-style HTTP
//! pipeline protocol and the raw result shapes returned by both transport
//! backends.

pub mod pipeline_request;
pub mod pipeline_response;
pub mod raw_result;

pub use pipeline_request::{PipelineRequest, PipelineStep, Stmt};
pub use pipeline_response::{ErrorDetail, PipelineEntry, PipelineResponse};
pub use raw_result::{Cell, Col, ColumnarResult, DriverResult, RawResult, Row};
