//! Export engine
//!
//! The orchestrator owns the run loop, the writer persists items, and the
//! summary records what a fire-and-forget design would otherwise lose.

pub mod orchestrator;
pub mod summary;
pub mod writer;

pub use orchestrator::{BackupOrchestrator, GraphEndpoints};
pub use summary::{BackupSummary, ResourceReport};
pub use writer::ObjectWriter;
