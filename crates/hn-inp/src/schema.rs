//! Per-kind parameter requirements applied at serialization time.
//!
//! The model treats element parameters as opaque; which attributes a kind
//! must carry is solver knowledge, so it lives here as replaceable data
//! rather than as model invariants.

use hn_model::NodeKind;

/// Required numeric parameters per element kind.
#[derive(Debug, Clone)]
pub struct FormatSchema {
    node_required: Vec<(NodeKind, Vec<&'static str>)>,
    conduit_required: Vec<&'static str>,
}

impl FormatSchema {
    /// The stock WHAMO-flavored requirements.
    pub fn whamo() -> Self {
        Self {
            node_required: vec![
                (NodeKind::Reservoir, vec!["ELEV"]),
                (NodeKind::Node, vec!["ELEV"]),
                (NodeKind::Junction, vec![]),
                (NodeKind::SurgeTank, vec!["ELEV", "AREA"]),
                (NodeKind::FlowBoundary, vec!["Q"]),
            ],
            conduit_required: vec!["LENGTH", "DIAMETER"],
        }
    }

    /// A schema with no requirements, for callers that validate elsewhere.
    pub fn permissive() -> Self {
        Self {
            node_required: Vec::new(),
            conduit_required: Vec::new(),
        }
    }

    pub fn required_for_kind(&self, kind: NodeKind) -> &[&'static str] {
        self.node_required
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, names)| names.as_slice())
            .unwrap_or(&[])
    }

    pub fn required_for_conduit(&self) -> &[&'static str] {
        &self.conduit_required
    }
}

impl Default for FormatSchema {
    fn default() -> Self {
        Self::whamo()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whamo_schema_covers_every_kind() {
        let schema = FormatSchema::whamo();
        assert_eq!(schema.required_for_kind(NodeKind::Reservoir), ["ELEV"]);
        assert_eq!(
            schema.required_for_kind(NodeKind::SurgeTank),
            ["ELEV", "AREA"]
        );
        assert!(schema.required_for_kind(NodeKind::Junction).is_empty());
        assert_eq!(schema.required_for_conduit(), ["LENGTH", "DIAMETER"]);
    }

    #[test]
    fn permissive_schema_requires_nothing() {
        let schema = FormatSchema::permissive();
        for kind in NodeKind::ALL {
            assert!(schema.required_for_kind(kind).is_empty());
        }
    }
}
