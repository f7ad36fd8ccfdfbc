//! External collaborator seams.
//!
//! The core hands collaborators serialized data and treats their results
//! as opaque; transport, retries, and timeouts belong to the shell.

use hn_inp::FormatSchema;
use hn_model::{Edge, Node};

use crate::error::{AppError, AppResult};
use crate::store::Store;

/// The external transient solver: takes INP text, returns an opaque
/// result artifact or its own error message.
pub trait SimulationService {
    fn run(&self, inp: &str) -> Result<Vec<u8>, String>;
}

/// The diagram generator: consumes the live element data and a
/// label-visibility flag.
pub trait DiagramRenderer {
    fn render(&self, nodes: &[Node], edges: &[Edge], show_labels: bool)
    -> Result<Vec<u8>, String>;
}

/// Export the model and submit it to the solver. Serialization and
/// validation failures surface as their own error kinds; only a failure
/// reported by the collaborator becomes `ExternalService`.
pub fn run_simulation(
    store: &Store,
    schema: &FormatSchema,
    service: &dyn SimulationService,
) -> AppResult<Vec<u8>> {
    let inp = store.export_inp(schema)?;
    service
        .run(&inp)
        .map_err(|message| AppError::ExternalService { message })
}

pub fn render_diagram(
    store: &Store,
    renderer: &dyn DiagramRenderer,
    show_labels: bool,
) -> AppResult<Vec<u8>> {
    renderer
        .render(store.network().nodes(), store.network().edges(), show_labels)
        .map_err(|message| AppError::Diagram { message })
}
