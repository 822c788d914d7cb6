//! Workflow coordinator for a remote-backed data-query session.
//!
//! The session moves from an uploaded dataset, through its schema and a
//! generated (and possibly revised) query, to an execution result and a
//! formatted answer. Every transition is one [`WorkflowCommand`]: the
//! [`Coordinator`] checks its precondition, issues exactly one remote
//! call, and commits the response with the invalidation rules that keep
//! downstream fields consistent with the query that produced them.

pub mod commands;
pub mod coordinator;
pub mod error;
pub mod extract;
pub mod session;
pub mod stage;

pub use commands::WorkflowCommand;
pub use coordinator::{
    Committed, CompletedRequest, Coordinator, DiscardReason, Outcome, PendingRequest, Slot, Ticket,
};
pub use error::{Precondition, WorkflowError};
pub use extract::extract_query;
pub use session::{DatasetFile, DatasetHandle, SessionState};
pub use stage::Stage;
