//! The editing-session façade.
//!
//! Owns the network model, the project name, and the history engine.
//! Every mutating operation is routed through history so it can be undone;
//! failed operations leave both the model and the history untouched.

use std::path::Path;

use hn_core::{ParamValue, Position};
use hn_inp::{FormatSchema, ParseWarning, parse_inp, serialize_network};
use hn_model::{
    ComputationalParamsPatch, ElementType, ModelResult, Network, NodeKind, OutputRequestSpec,
};
use hn_project::{network_from_project, project_from_network};
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::history::{History, HistoryConfig, Snapshot};

pub struct Store {
    network: Network,
    project_name: String,
    history: History,
    /// Pre-gesture state while a drag is in flight; committed as a single
    /// history entry when the gesture ends.
    gesture: Option<Snapshot>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    pub fn new() -> Self {
        Self::with_history_config(HistoryConfig::default())
    }

    pub fn with_history_config(config: HistoryConfig) -> Self {
        Self {
            network: Network::new(),
            project_name: String::new(),
            history: History::new(config),
            gesture: None,
        }
    }

    // ----- reads -----

    pub fn network(&self) -> &Network {
        &self.network
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
            || self
                .gesture
                .as_ref()
                .is_some_and(|g| *g.as_network() != self.network)
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ----- metadata (not part of the undo stream) -----

    pub fn set_project_name(&mut self, name: impl Into<String>) {
        self.project_name = name.into();
    }

    // ----- wrapped mutations -----

    pub fn add_node(&mut self, kind: NodeKind, position: Position) -> String {
        self.commit_gesture();
        let before = Snapshot::capture(&self.network);
        let id = self.network.add_node(kind, position);
        debug!(id = %id, ?kind, "added node");
        self.history.record(before);
        id
    }

    pub fn connect(&mut self, source: &str, target: &str) -> ModelResult<String> {
        self.wrap(|network| network.connect(source, target))
    }

    /// Cascade-delete an element; a single history entry covers the whole
    /// cascade. Unknown ids are a no-op and record nothing.
    pub fn delete_element(&mut self, id: &str, element_type: ElementType) -> bool {
        self.commit_gesture();
        let before = Snapshot::capture(&self.network);
        let removed = self.network.delete_element(id, element_type);
        if removed {
            debug!(id, "deleted element");
            self.history.record(before);
        }
        removed
    }

    /// Discrete, undoable position change (e.g. nudging with arrow keys).
    /// Continuous dragging goes through the gesture API instead.
    pub fn move_node(&mut self, id: &str, position: Position) -> ModelResult<()> {
        self.wrap(|network| network.move_node(id, position))
    }

    pub fn set_param(
        &mut self,
        id: &str,
        element_type: ElementType,
        name: &str,
        value: ParamValue,
    ) -> ModelResult<()> {
        self.wrap(|network| network.set_param(id, element_type, name, value))
    }

    pub fn remove_param(
        &mut self,
        id: &str,
        element_type: ElementType,
        name: &str,
    ) -> ModelResult<()> {
        self.wrap(|network| network.remove_param(id, element_type, name))
    }

    pub fn update_computational_params(&mut self, patch: ComputationalParamsPatch) {
        self.commit_gesture();
        let before = Snapshot::capture(&self.network);
        self.network.update_computational_params(patch);
        if *before.as_network() != self.network {
            self.history.record(before);
        }
    }

    pub fn add_output_request(&mut self, spec: OutputRequestSpec) -> ModelResult<String> {
        self.wrap(|network| network.add_output_request(spec))
    }

    pub fn remove_output_request(&mut self, id: &str) -> bool {
        self.commit_gesture();
        let before = Snapshot::capture(&self.network);
        let removed = self.network.remove_output_request(id);
        if removed {
            self.history.record(before);
        }
        removed
    }

    pub fn clear_network(&mut self) {
        self.commit_gesture();
        let before = Snapshot::capture(&self.network);
        self.network.clear();
        if *before.as_network() != self.network {
            self.history.record(before);
        }
    }

    // ----- drag gestures -----
    //
    // The coalescing boundary is the caller's: a gesture spans from
    // begin_drag to end_drag and lands in history as at most one entry,
    // holding the position prior to the gesture's start.

    pub fn begin_drag(&mut self) {
        if self.gesture.is_none() {
            self.gesture = Some(Snapshot::capture(&self.network));
        }
    }

    /// Intermediate drag frame; starts a gesture implicitly if none is
    /// open. Never records history on its own.
    pub fn drag_node(&mut self, id: &str, position: Position) -> ModelResult<()> {
        self.begin_drag();
        self.network.move_node(id, position)
    }

    pub fn end_drag(&mut self) {
        self.commit_gesture();
    }

    fn commit_gesture(&mut self) {
        if let Some(before) = self.gesture.take() {
            if *before.as_network() != self.network {
                self.history.record(before);
            }
        }
    }

    fn wrap<T>(&mut self, mutate: impl FnOnce(&mut Network) -> ModelResult<T>) -> ModelResult<T> {
        self.commit_gesture();
        let before = Snapshot::capture(&self.network);
        // Model operations guarantee no partial mutation on failure, so
        // an Err here means nothing changed and nothing is recorded.
        let value = mutate(&mut self.network)?;
        if *before.as_network() != self.network {
            self.history.record(before);
        }
        Ok(value)
    }

    // ----- history -----

    /// Restore the state before the most recent edit. Returns false when
    /// there is nothing to undo. An open gesture is committed first.
    pub fn undo(&mut self) -> bool {
        self.commit_gesture();
        let current = Snapshot::capture(&self.network);
        match self.history.undo(current) {
            Some(snapshot) => {
                self.network = snapshot.into_network();
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        self.commit_gesture();
        let current = Snapshot::capture(&self.network);
        match self.history.redo(current) {
            Some(snapshot) => {
                self.network = snapshot.into_network();
                true
            }
            None => false,
        }
    }

    // ----- wholesale replacement -----

    /// Replace the entire model. Resets history: a load is not undoable
    /// back to the pre-load state.
    pub fn load_network(&mut self, network: Network, project_name: impl Into<String>) {
        self.network = network;
        self.project_name = project_name.into();
        self.gesture = None;
        self.history.reset();
        info!(
            nodes = self.network.nodes().len(),
            edges = self.network.edges().len(),
            "loaded network"
        );
    }

    // ----- import / export -----

    /// Serialize the model to INP text. The project name check belongs to
    /// this caller-side boundary; everything element-level is collected by
    /// the serializer.
    pub fn export_inp(&self, schema: &FormatSchema) -> AppResult<String> {
        if self.project_name.trim().is_empty() {
            return Err(AppError::Validation(
                "project name must not be empty".to_string(),
            ));
        }
        Ok(serialize_network(&self.network, schema)?)
    }

    /// Replace the model with the contents of an INP document. Returns
    /// the parse warnings so the shell can surface them.
    pub fn import_inp(
        &mut self,
        text: &str,
        project_name: impl Into<String>,
    ) -> AppResult<Vec<ParseWarning>> {
        let outcome = parse_inp(text)?;
        self.load_network(outcome.network, project_name);
        Ok(outcome.warnings)
    }

    /// Persist the current model; `.yaml`/`.yml` paths use YAML, anything
    /// else JSON.
    pub fn save_project(&self, path: &Path) -> AppResult<()> {
        let project = project_from_network(&self.network, &self.project_name);
        if is_yaml(path) {
            hn_project::save_yaml(path, &project)?;
        } else {
            hn_project::save_json(path, &project)?;
        }
        Ok(())
    }

    /// Load a project file, replacing the model and resetting history.
    pub fn load_project(&mut self, path: &Path) -> AppResult<()> {
        let project = if is_yaml(path) {
            hn_project::load_yaml(path)?
        } else {
            hn_project::load_json(path)?
        };
        let network = network_from_project(&project)?;
        self.load_network(network, project.project_name);
        Ok(())
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}
