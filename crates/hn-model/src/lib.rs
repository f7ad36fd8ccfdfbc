//! hn-model: the in-memory hydraulic network graph model.
//!
//! Owns nodes, conduits, computational parameters, and output requests,
//! and enforces every referential invariant (no self-loops, no dangling
//! endpoints, no output request without a live target). All mutations fail
//! fast: on any invariant violation the model is left untouched.

pub mod compute;
pub mod element;
pub mod error;
pub mod network;
pub mod output;

pub use compute::{ComputationalParams, ComputationalParamsPatch};
pub use element::{Edge, Node, NodeKind};
pub use error::{ModelError, ModelResult};
pub use network::Network;
pub use output::{ElementType, OutputRequest, OutputRequestSpec, OutputVariable, RequestType};
