//! Network element data structures.

use hn_core::{ParamMap, Position};

/// The closed set of hydraulic node kinds.
///
/// Serializer and parser match on this exhaustively, so growing the
/// vocabulary is a compile-time event, never a silently dropped record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeKind {
    Reservoir,
    Node,
    Junction,
    SurgeTank,
    FlowBoundary,
}

impl NodeKind {
    /// All kinds in canonical emission order.
    pub const ALL: [NodeKind; 5] = [
        NodeKind::Reservoir,
        NodeKind::Node,
        NodeKind::Junction,
        NodeKind::SurgeTank,
        NodeKind::FlowBoundary,
    ];
}

/// A node in the hydraulic network.
///
/// `sequence` is the element index the INP format uses to reference the
/// node; it is globally unique and stable across edits. `position` is
/// editor-only state with no hydraulic meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: String,
    pub kind: NodeKind,
    pub position: Position,
    pub sequence: u32,
    pub params: ParamMap,
}

/// A conduit connecting exactly two distinct nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub params: ParamMap,
}
