//! Project file schema definitions.
//!
//! The on-disk document keeps the original editor's JSON shape: camelCase
//! keys, node kinds as lowerCamel strings, output variables as their
//! upper-case vocabulary tokens.

use hn_core::{ParamMap, Position};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub version: u32,
    pub project_name: String,
    #[serde(default)]
    pub nodes: Vec<NodeDef>,
    #[serde(default)]
    pub edges: Vec<EdgeDef>,
    #[serde(default)]
    pub computational_params: ComputationalParamsDef,
    #[serde(default)]
    pub output_requests: Vec<OutputRequestDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeDef {
    pub id: String,
    pub kind: NodeKindDef,
    pub position: Position,
    pub sequence_number: u32,
    #[serde(default)]
    pub parameters: ParamMap,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum NodeKindDef {
    Reservoir,
    Node,
    Junction,
    SurgeTank,
    FlowBoundary,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EdgeDef {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub parameters: ParamMap,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ComputationalParamsDef {
    pub dtcomp: f64,
    pub dtout: f64,
    pub tmax: f64,
}

impl Default for ComputationalParamsDef {
    fn default() -> Self {
        let defaults = hn_model::ComputationalParams::default();
        Self {
            dtcomp: defaults.dtcomp,
            dtout: defaults.dtout,
            tmax: defaults.tmax,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OutputRequestDef {
    pub id: String,
    pub element_id: String,
    pub element_type: ElementTypeDef,
    pub request_type: RequestTypeDef,
    pub variables: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ElementTypeDef {
    Node,
    Edge,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestTypeDef {
    History,
    Plot,
    Spreadsheet,
}
