//! Shared application service layer for hydronet.
//!
//! Provides the editing-session façade used by frontends: a `Store`
//! owning the network model and the undo/redo history, import/export
//! entry points for project files and INP decks, and the trait seams for
//! the external simulation and diagram collaborators.

pub mod error;
pub mod external;
pub mod history;
pub mod store;

// Re-export key types for convenience
pub use error::{AppError, AppResult};
pub use external::{DiagramRenderer, SimulationService, render_diagram, run_simulation};
pub use history::{History, HistoryConfig, Snapshot};
pub use store::Store;
