//! The network container and its invariant-enforcing mutations.

use hn_core::{ParamMap, ParamValue, Position, next_prefixed_id};

use crate::compute::{ComputationalParams, ComputationalParamsPatch};
use crate::element::{Edge, Node, NodeKind};
use crate::error::{ModelError, ModelResult};
use crate::output::{ElementType, OutputRequest, OutputRequestSpec, OutputVariable};

/// The in-memory hydraulic network.
///
/// Element order is insertion order and is observable: conduits serialize
/// in it, and output requests keep it within their request-type group.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Network {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    params: ComputationalParams,
    output_requests: Vec<OutputRequest>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    // ----- reads -----

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn output_requests(&self) -> &[OutputRequest] {
        &self.output_requests
    }

    pub fn computational_params(&self) -> &ComputationalParams {
        &self.params
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn edge(&self, id: &str) -> Option<&Edge> {
        self.edges.iter().find(|e| e.id == id)
    }

    pub fn node_by_sequence(&self, sequence: u32) -> Option<&Node> {
        self.nodes.iter().find(|n| n.sequence == sequence)
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty() && self.edges.is_empty() && self.output_requests.is_empty()
    }

    // ----- editor mutations -----

    /// Add a node of the given kind; always succeeds. Returns the fresh id.
    pub fn add_node(&mut self, kind: NodeKind, position: Position) -> String {
        let id = next_prefixed_id("n", self.nodes.iter().map(|n| n.id.as_str()));
        let sequence = self.next_sequence();
        self.nodes.push(Node {
            id: id.clone(),
            kind,
            position,
            sequence,
            params: ParamMap::new(),
        });
        id
    }

    /// Create a conduit between two existing, distinct nodes.
    pub fn connect(&mut self, source: &str, target: &str) -> ModelResult<String> {
        if source == target {
            return Err(ModelError::InvalidConnection {
                source_id: source.to_string(),
                target_id: target.to_string(),
                reason: "an element cannot be connected to itself",
            });
        }
        if self.node(source).is_none() {
            return Err(ModelError::InvalidConnection {
                source_id: source.to_string(),
                target_id: target.to_string(),
                reason: "source node does not exist",
            });
        }
        if self.node(target).is_none() {
            return Err(ModelError::InvalidConnection {
                source_id: source.to_string(),
                target_id: target.to_string(),
                reason: "target node does not exist",
            });
        }

        let id = next_prefixed_id("c", self.edges.iter().map(|e| e.id.as_str()));
        self.edges.push(Edge {
            id: id.clone(),
            source: source.to_string(),
            target: target.to_string(),
            params: ParamMap::new(),
        });
        Ok(id)
    }

    /// Delete a node or conduit, cascading removal of everything that
    /// references it. Returns false (and changes nothing) when the id is
    /// unknown.
    pub fn delete_element(&mut self, id: &str, element_type: ElementType) -> bool {
        match element_type {
            ElementType::Node => {
                if self.node(id).is_none() {
                    return false;
                }
                let mut removed_edges = Vec::new();
                self.edges.retain(|e| {
                    let remove = e.source == id || e.target == id;
                    if remove {
                        removed_edges.push(e.id.clone());
                    }
                    !remove
                });
                self.nodes.retain(|n| n.id != id);
                self.output_requests.retain(|r| {
                    !(r.element_id == id
                        || (r.element_type == ElementType::Edge
                            && removed_edges.iter().any(|e| *e == r.element_id)))
                });
                true
            }
            ElementType::Edge => {
                if self.edge(id).is_none() {
                    return false;
                }
                self.edges.retain(|e| e.id != id);
                self.output_requests
                    .retain(|r| !(r.element_type == ElementType::Edge && r.element_id == id));
                true
            }
        }
    }

    /// Update a node's canvas position.
    pub fn move_node(&mut self, id: &str, position: Position) -> ModelResult<()> {
        match self.nodes.iter_mut().find(|n| n.id == id) {
            Some(node) => {
                node.position = position;
                Ok(())
            }
            None => Err(ModelError::NotFound {
                id: id.to_string(),
                what: "node",
            }),
        }
    }

    /// Set one opaque attribute on a node or conduit.
    pub fn set_param(
        &mut self,
        id: &str,
        element_type: ElementType,
        name: &str,
        value: ParamValue,
    ) -> ModelResult<()> {
        self.element_params_mut(id, element_type)?.set(name, value);
        Ok(())
    }

    /// Drop one opaque attribute; absent names are fine.
    pub fn remove_param(
        &mut self,
        id: &str,
        element_type: ElementType,
        name: &str,
    ) -> ModelResult<()> {
        self.element_params_mut(id, element_type)?.remove(name);
        Ok(())
    }

    pub fn update_computational_params(&mut self, patch: ComputationalParamsPatch) {
        self.params.apply(patch);
    }

    /// Add an output request; fails without touching the model when the
    /// referenced element does not resolve (or its type mismatches) or
    /// when no variables are requested.
    pub fn add_output_request(&mut self, spec: OutputRequestSpec) -> ModelResult<String> {
        self.check_element_ref(&spec.element_id, spec.element_type, "output request")?;
        if spec.variables.is_empty() {
            return Err(ModelError::Validation {
                what: format!("output request for '{}'", spec.element_id),
                reason: "at least one variable must be requested".to_string(),
            });
        }

        let mut variables: Vec<OutputVariable> = Vec::with_capacity(spec.variables.len());
        for var in spec.variables {
            if !variables.contains(&var) {
                variables.push(var);
            }
        }

        let id = next_prefixed_id("r", self.output_requests.iter().map(|r| r.id.as_str()));
        self.output_requests.push(OutputRequest {
            id: id.clone(),
            element_id: spec.element_id,
            element_type: spec.element_type,
            request_type: spec.request_type,
            variables,
        });
        Ok(id)
    }

    /// Returns false when the id is unknown.
    pub fn remove_output_request(&mut self, id: &str) -> bool {
        let before = self.output_requests.len();
        self.output_requests.retain(|r| r.id != id);
        before != self.output_requests.len()
    }

    /// Empty the network; computational parameters go back to defaults.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.output_requests.clear();
        self.params = ComputationalParams::default();
    }

    // ----- load-path construction -----
    //
    // Used by the parser and project loading, where ids and sequences come
    // from outside and must be checked rather than allocated.

    pub fn insert_node(&mut self, node: Node) -> ModelResult<()> {
        if self.node(&node.id).is_some() {
            return Err(ModelError::DuplicateId {
                id: node.id,
                context: "nodes",
            });
        }
        if self.node_by_sequence(node.sequence).is_some() {
            return Err(ModelError::Validation {
                what: format!("node '{}'", node.id),
                reason: format!("sequence number {} already in use", node.sequence),
            });
        }
        self.nodes.push(node);
        Ok(())
    }

    pub fn insert_edge(&mut self, edge: Edge) -> ModelResult<()> {
        if self.edge(&edge.id).is_some() {
            return Err(ModelError::DuplicateId {
                id: edge.id,
                context: "edges",
            });
        }
        if edge.source == edge.target {
            return Err(ModelError::InvalidConnection {
                source_id: edge.source,
                target_id: edge.target,
                reason: "an element cannot be connected to itself",
            });
        }
        if self.node(&edge.source).is_none() {
            return Err(ModelError::InvalidConnection {
                source_id: edge.source,
                target_id: edge.target,
                reason: "source node does not exist",
            });
        }
        if self.node(&edge.target).is_none() {
            return Err(ModelError::InvalidConnection {
                source_id: edge.source,
                target_id: edge.target,
                reason: "target node does not exist",
            });
        }
        self.edges.push(edge);
        Ok(())
    }

    pub fn insert_output_request(&mut self, request: OutputRequest) -> ModelResult<()> {
        if self.output_requests.iter().any(|r| r.id == request.id) {
            return Err(ModelError::DuplicateId {
                id: request.id,
                context: "output requests",
            });
        }
        self.check_element_ref(&request.element_id, request.element_type, "output request")?;
        if request.variables.is_empty() {
            return Err(ModelError::Validation {
                what: format!("output request '{}'", request.id),
                reason: "at least one variable must be requested".to_string(),
            });
        }
        self.output_requests.push(request);
        Ok(())
    }

    pub fn set_computational_params(&mut self, params: ComputationalParams) {
        self.params = params;
    }

    // ----- internals -----

    fn next_sequence(&self) -> u32 {
        self.nodes.iter().map(|n| n.sequence).max().unwrap_or(0) + 1
    }

    fn element_params_mut(
        &mut self,
        id: &str,
        element_type: ElementType,
    ) -> ModelResult<&mut ParamMap> {
        match element_type {
            ElementType::Node => self
                .nodes
                .iter_mut()
                .find(|n| n.id == id)
                .map(|n| &mut n.params)
                .ok_or_else(|| ModelError::NotFound {
                    id: id.to_string(),
                    what: "node",
                }),
            ElementType::Edge => self
                .edges
                .iter_mut()
                .find(|e| e.id == id)
                .map(|e| &mut e.params)
                .ok_or_else(|| ModelError::NotFound {
                    id: id.to_string(),
                    what: "edge",
                }),
        }
    }

    fn check_element_ref(
        &self,
        element_id: &str,
        element_type: ElementType,
        context: &str,
    ) -> ModelResult<()> {
        let resolves = match element_type {
            ElementType::Node => self.node(element_id).is_some(),
            ElementType::Edge => self.edge(element_id).is_some(),
        };
        if resolves {
            Ok(())
        } else {
            Err(ModelError::Validation {
                what: format!("{} for '{}'", context, element_id),
                reason: "referenced element does not exist".to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::RequestType;

    fn two_node_network() -> (Network, String, String) {
        let mut network = Network::new();
        let a = network.add_node(NodeKind::Reservoir, Position::new(0.0, 0.0));
        let b = network.add_node(NodeKind::Junction, Position::new(100.0, 0.0));
        (network, a, b)
    }

    #[test]
    fn add_node_assigns_ids_and_global_sequences() {
        let (network, a, b) = two_node_network();
        assert_eq!(a, "n1");
        assert_eq!(b, "n2");
        assert_eq!(network.node(&a).unwrap().sequence, 1);
        assert_eq!(network.node(&b).unwrap().sequence, 2);
    }

    #[test]
    fn connect_rejects_self_loop_without_mutation() {
        let (mut network, a, _) = two_node_network();
        let err = network.connect(&a, &a).unwrap_err();
        assert!(matches!(err, ModelError::InvalidConnection { .. }));
        assert!(network.edges().is_empty());
    }

    #[test]
    fn connect_rejects_missing_endpoint() {
        let (mut network, a, _) = two_node_network();
        let err = network.connect(&a, "n99").unwrap_err();
        assert!(matches!(err, ModelError::InvalidConnection { .. }));
        assert!(network.edges().is_empty());
    }

    #[test]
    fn delete_node_cascades_edges_and_requests() {
        let (mut network, a, b) = two_node_network();
        let edge = network.connect(&a, &b).unwrap();
        network
            .add_output_request(OutputRequestSpec {
                element_id: edge.clone(),
                element_type: ElementType::Edge,
                request_type: RequestType::History,
                variables: vec![OutputVariable::Q],
            })
            .unwrap();

        assert!(network.delete_element(&a, ElementType::Node));
        assert!(network.node(&a).is_none());
        assert!(network.edge(&edge).is_none());
        assert!(network.output_requests().is_empty());
        // The untouched node survives.
        assert!(network.node(&b).is_some());
    }

    #[test]
    fn delete_unknown_is_noop() {
        let (mut network, _, _) = two_node_network();
        assert!(!network.delete_element("n99", ElementType::Node));
        assert_eq!(network.nodes().len(), 2);
    }

    #[test]
    fn output_request_requires_resolving_reference() {
        let (mut network, _, _) = two_node_network();
        let err = network
            .add_output_request(OutputRequestSpec {
                element_id: "missing".to_string(),
                element_type: ElementType::Node,
                request_type: RequestType::History,
                variables: vec![OutputVariable::Q],
            })
            .unwrap_err();
        assert!(matches!(err, ModelError::Validation { .. }));
        assert!(network.output_requests().is_empty());
    }

    #[test]
    fn output_request_type_must_match_element() {
        let (mut network, a, _) = two_node_network();
        // `a` is a node; claiming it is an edge must fail.
        let err = network
            .add_output_request(OutputRequestSpec {
                element_id: a,
                element_type: ElementType::Edge,
                request_type: RequestType::Plot,
                variables: vec![OutputVariable::Head],
            })
            .unwrap_err();
        assert!(matches!(err, ModelError::Validation { .. }));
    }

    #[test]
    fn output_request_rejects_empty_variables() {
        let (mut network, a, _) = two_node_network();
        let err = network
            .add_output_request(OutputRequestSpec {
                element_id: a,
                element_type: ElementType::Node,
                request_type: RequestType::History,
                variables: vec![],
            })
            .unwrap_err();
        assert!(matches!(err, ModelError::Validation { .. }));
    }

    #[test]
    fn output_request_deduplicates_variables() {
        let (mut network, a, _) = two_node_network();
        let id = network
            .add_output_request(OutputRequestSpec {
                element_id: a,
                element_type: ElementType::Node,
                request_type: RequestType::History,
                variables: vec![OutputVariable::Q, OutputVariable::Head, OutputVariable::Q],
            })
            .unwrap();
        let request = network
            .output_requests()
            .iter()
            .find(|r| r.id == id)
            .unwrap();
        assert_eq!(
            request.variables,
            vec![OutputVariable::Q, OutputVariable::Head]
        );
    }

    #[test]
    fn clear_resets_params_to_defaults() {
        let (mut network, _, _) = two_node_network();
        network.update_computational_params(ComputationalParamsPatch {
            tmax: Some(99.0),
            ..Default::default()
        });
        network.clear();
        assert!(network.is_empty());
        assert_eq!(*network.computational_params(), ComputationalParams::default());
    }

    #[test]
    fn id_allocation_survives_load_style_insertion() {
        let mut network = Network::new();
        network
            .insert_node(Node {
                id: "n7".to_string(),
                kind: NodeKind::Node,
                position: Position::default(),
                sequence: 7,
                params: ParamMap::new(),
            })
            .unwrap();
        let fresh = network.add_node(NodeKind::Junction, Position::default());
        assert_eq!(fresh, "n8");
        assert_eq!(network.node(&fresh).unwrap().sequence, 8);
    }

    #[test]
    fn insert_edge_validates_endpoints() {
        let mut network = Network::new();
        let err = network
            .insert_edge(Edge {
                id: "c1".to_string(),
                source: "n1".to_string(),
                target: "n2".to_string(),
                params: ParamMap::new(),
            })
            .unwrap_err();
        assert!(matches!(err, ModelError::InvalidConnection { .. }));
    }

    #[test]
    fn set_param_on_missing_element_fails() {
        let mut network = Network::new();
        let err = network
            .set_param("n1", ElementType::Node, "ELEV", ParamValue::Number(1.0))
            .unwrap_err();
        assert!(matches!(err, ModelError::NotFound { .. }));
    }
}
