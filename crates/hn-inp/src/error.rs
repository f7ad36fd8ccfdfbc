//! Translator error and diagnostic types.

use thiserror::Error;

/// Export failed; carries every offending element, never just the first.
#[derive(Error, Debug)]
#[error("INP serialization failed with {} issue(s)", issues.len())]
pub struct SerializeError {
    pub issues: Vec<SerializeIssue>,
}

/// One element-level export problem.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SerializeIssue {
    #[error("Conduit '{edge_id}' references missing node '{node_id}'")]
    DanglingEndpoint { edge_id: String, node_id: String },

    #[error("Output request '{request_id}' references missing element '{element_id}'")]
    DanglingRequest {
        request_id: String,
        element_id: String,
    },

    #[error("Element '{element_id}': required parameter {name} is missing")]
    MissingParameter {
        element_id: String,
        name: &'static str,
    },

    #[error("Element '{element_id}': parameter {name} must be a finite number (got '{value}')")]
    NonNumericParameter {
        element_id: String,
        name: &'static str,
        value: String,
    },

    #[error("Computational parameter {field} must be finite and positive (got {value})")]
    InvalidControl { field: &'static str, value: f64 },
}

/// A recoverable problem on one input line. Warnings are collected and
/// returned with the parse result; they never abort the parse.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseWarning {
    /// 1-based line number.
    pub line: usize,
    /// The keyword the line was classified by (uppercased), or the raw
    /// first token for unrecognized lines.
    pub keyword: String,
    /// The raw line text.
    pub text: String,
    pub reason: String,
}

/// Fatal parse failure: the document has no recoverable structure.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Input is empty")]
    EmptyInput,

    #[error("No recognizable network elements found")]
    NoElements,

    #[error("Conduit on line {line} references undefined element index {index}")]
    UnresolvedEndpoint { line: usize, index: u32 },
}
