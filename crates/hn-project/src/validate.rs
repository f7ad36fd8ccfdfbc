//! Project document validation logic.

use crate::schema::{ElementTypeDef, Project};
use hn_model::OutputVariable;
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Missing reference: {id} in {context}")]
    MissingReference { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version > crate::migrate::LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    let mut node_ids = HashSet::new();
    let mut sequences = HashSet::new();
    for node in &project.nodes {
        if !node_ids.insert(&node.id) {
            return Err(ValidationError::DuplicateId {
                id: node.id.clone(),
                context: "nodes".to_string(),
            });
        }
        if !sequences.insert(node.sequence_number) {
            return Err(ValidationError::InvalidValue {
                field: format!("node '{}' sequenceNumber", node.id),
                value: node.sequence_number.to_string(),
                reason: "already in use by another node".to_string(),
            });
        }
    }

    let mut edge_ids = HashSet::new();
    for edge in &project.edges {
        if !edge_ids.insert(&edge.id) {
            return Err(ValidationError::DuplicateId {
                id: edge.id.clone(),
                context: "edges".to_string(),
            });
        }
        if edge.source == edge.target {
            return Err(ValidationError::InvalidValue {
                field: format!("edge '{}'", edge.id),
                value: edge.source.clone(),
                reason: "an element cannot be connected to itself".to_string(),
            });
        }
        for endpoint in [&edge.source, &edge.target] {
            if !node_ids.contains(endpoint) {
                return Err(ValidationError::MissingReference {
                    id: endpoint.clone(),
                    context: format!("edge '{}' endpoint", edge.id),
                });
            }
        }
    }

    let mut request_ids = HashSet::new();
    for request in &project.output_requests {
        if !request_ids.insert(&request.id) {
            return Err(ValidationError::DuplicateId {
                id: request.id.clone(),
                context: "outputRequests".to_string(),
            });
        }
        let resolves = match request.element_type {
            ElementTypeDef::Node => node_ids.contains(&request.element_id),
            ElementTypeDef::Edge => edge_ids.contains(&request.element_id),
        };
        if !resolves {
            return Err(ValidationError::MissingReference {
                id: request.element_id.clone(),
                context: format!("output request '{}'", request.id),
            });
        }
        if request.variables.is_empty() {
            return Err(ValidationError::InvalidValue {
                field: format!("output request '{}' variables", request.id),
                value: "[]".to_string(),
                reason: "at least one variable must be requested".to_string(),
            });
        }
        for variable in &request.variables {
            if OutputVariable::from_token(variable).is_none() {
                return Err(ValidationError::InvalidValue {
                    field: format!("output request '{}' variables", request.id),
                    value: variable.clone(),
                    reason: "not in the output variable vocabulary".to_string(),
                });
            }
        }
    }

    Ok(())
}
