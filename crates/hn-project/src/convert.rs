//! Conversions between the project document and the runtime network model.

use hn_model::{
    ComputationalParams, Edge, ElementType, Network, Node, NodeKind, OutputRequest,
    OutputVariable, RequestType,
};

use crate::schema::{
    ComputationalParamsDef, EdgeDef, ElementTypeDef, NodeDef, NodeKindDef, OutputRequestDef,
    Project, RequestTypeDef,
};
use crate::{ProjectError, ProjectResult, ValidationError};

impl From<NodeKind> for NodeKindDef {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Reservoir => NodeKindDef::Reservoir,
            NodeKind::Node => NodeKindDef::Node,
            NodeKind::Junction => NodeKindDef::Junction,
            NodeKind::SurgeTank => NodeKindDef::SurgeTank,
            NodeKind::FlowBoundary => NodeKindDef::FlowBoundary,
        }
    }
}

impl From<NodeKindDef> for NodeKind {
    fn from(kind: NodeKindDef) -> Self {
        match kind {
            NodeKindDef::Reservoir => NodeKind::Reservoir,
            NodeKindDef::Node => NodeKind::Node,
            NodeKindDef::Junction => NodeKind::Junction,
            NodeKindDef::SurgeTank => NodeKind::SurgeTank,
            NodeKindDef::FlowBoundary => NodeKind::FlowBoundary,
        }
    }
}

impl From<ElementType> for ElementTypeDef {
    fn from(ty: ElementType) -> Self {
        match ty {
            ElementType::Node => ElementTypeDef::Node,
            ElementType::Edge => ElementTypeDef::Edge,
        }
    }
}

impl From<ElementTypeDef> for ElementType {
    fn from(ty: ElementTypeDef) -> Self {
        match ty {
            ElementTypeDef::Node => ElementType::Node,
            ElementTypeDef::Edge => ElementType::Edge,
        }
    }
}

impl From<RequestType> for RequestTypeDef {
    fn from(ty: RequestType) -> Self {
        match ty {
            RequestType::History => RequestTypeDef::History,
            RequestType::Plot => RequestTypeDef::Plot,
            RequestType::Spreadsheet => RequestTypeDef::Spreadsheet,
        }
    }
}

impl From<RequestTypeDef> for RequestType {
    fn from(ty: RequestTypeDef) -> Self {
        match ty {
            RequestTypeDef::History => RequestType::History,
            RequestTypeDef::Plot => RequestType::Plot,
            RequestTypeDef::Spreadsheet => RequestType::Spreadsheet,
        }
    }
}

/// Capture the live network as a persistable document.
pub fn project_from_network(network: &Network, project_name: &str) -> Project {
    let params = network.computational_params();
    Project {
        version: crate::migrate::LATEST_VERSION,
        project_name: project_name.to_string(),
        nodes: network
            .nodes()
            .iter()
            .map(|n| NodeDef {
                id: n.id.clone(),
                kind: n.kind.into(),
                position: n.position,
                sequence_number: n.sequence,
                parameters: n.params.clone(),
            })
            .collect(),
        edges: network
            .edges()
            .iter()
            .map(|e| EdgeDef {
                id: e.id.clone(),
                source: e.source.clone(),
                target: e.target.clone(),
                parameters: e.params.clone(),
            })
            .collect(),
        computational_params: ComputationalParamsDef {
            dtcomp: params.dtcomp,
            dtout: params.dtout,
            tmax: params.tmax,
        },
        output_requests: network
            .output_requests()
            .iter()
            .map(|r| OutputRequestDef {
                id: r.id.clone(),
                element_id: r.element_id.clone(),
                element_type: r.element_type.into(),
                request_type: r.request_type.into(),
                variables: r.variables.iter().map(|v| v.keyword().to_string()).collect(),
            })
            .collect(),
    }
}

/// Rebuild the runtime network from a (validated) document.
pub fn network_from_project(project: &Project) -> ProjectResult<Network> {
    let mut network = Network::new();

    for def in &project.nodes {
        network.insert_node(Node {
            id: def.id.clone(),
            kind: def.kind.into(),
            position: def.position,
            sequence: def.sequence_number,
            params: def.parameters.clone(),
        })?;
    }

    for def in &project.edges {
        network.insert_edge(Edge {
            id: def.id.clone(),
            source: def.source.clone(),
            target: def.target.clone(),
            params: def.parameters.clone(),
        })?;
    }

    network.set_computational_params(ComputationalParams {
        dtcomp: project.computational_params.dtcomp,
        dtout: project.computational_params.dtout,
        tmax: project.computational_params.tmax,
    });

    for def in &project.output_requests {
        let mut variables = Vec::with_capacity(def.variables.len());
        for token in &def.variables {
            let variable = OutputVariable::from_token(token).ok_or_else(|| {
                ProjectError::Validation(ValidationError::InvalidValue {
                    field: format!("output request '{}' variables", def.id),
                    value: token.clone(),
                    reason: "not in the output variable vocabulary".to_string(),
                })
            })?;
            if !variables.contains(&variable) {
                variables.push(variable);
            }
        }
        network.insert_output_request(OutputRequest {
            id: def.id.clone(),
            element_id: def.element_id.clone(),
            element_type: def.element_type.into(),
            request_type: def.request_type.into(),
            variables,
        })?;
    }

    Ok(network)
}
