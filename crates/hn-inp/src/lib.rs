//! hn-inp: bidirectional translator between the network model and the
//! line-oriented INP solver input format.
//!
//! The serializer is a total, deterministic function over a valid model:
//! identical models produce byte-identical text. The parser is tolerant:
//! unrecognized or malformed lines become warnings, never aborts, except
//! for structurally unrecoverable documents.

pub mod error;
pub mod parse;
pub mod schema;
pub mod serialize;

pub use error::{ParseError, ParseWarning, SerializeError, SerializeIssue};
pub use parse::{ParseOutcome, parse_inp};
pub use schema::FormatSchema;
pub use serialize::serialize_network;

/// Conventional file extension for solver input decks.
pub const FILE_EXTENSION: &str = "inp";

use hn_model::NodeKind;

/// INP record keyword for a node kind.
pub fn kind_keyword(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Reservoir => "RESERVOIR",
        NodeKind::Node => "NODE",
        NodeKind::Junction => "JUNCTION",
        NodeKind::SurgeTank => "SURGETANK",
        NodeKind::FlowBoundary => "FLOWBC",
    }
}

/// Reverse lookup, case-insensitive; None for non-element keywords.
pub fn kind_from_keyword(keyword: &str) -> Option<NodeKind> {
    match keyword.to_ascii_uppercase().as_str() {
        "RESERVOIR" => Some(NodeKind::Reservoir),
        "NODE" => Some(NodeKind::Node),
        "JUNCTION" => Some(NodeKind::Junction),
        "SURGETANK" => Some(NodeKind::SurgeTank),
        "FLOWBC" => Some(NodeKind::FlowBoundary),
        _ => None,
    }
}
