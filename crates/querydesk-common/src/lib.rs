pub mod actions;
pub mod errors;
pub mod events;
pub mod id;
pub mod types;

pub use actions::{Action, Panel};
pub use errors::{ConfigError, QuerydeskError};
pub use events::{Event, EventBus};
pub use id::{new_correlation_id, new_id, SessionId};
pub use types::{ColumnDescriptor, Operation, Row};

pub type Result<T> = std::result::Result<T, QuerydeskError>;
