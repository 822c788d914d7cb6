//! The workflow coordinator: owns the session and sequences its requests.

mod begin;
mod commit;
mod dispatch;
mod request;
mod sequencer;

#[cfg(test)]
mod fake;

use std::sync::Arc;

use querydesk_common::{Event, EventBus, SessionId};
use querydesk_remote::Collaborator;

use crate::session::SessionState;
use crate::stage::Stage;

pub use commit::{Committed, DiscardReason, Outcome};
pub use request::{CompletedRequest, PendingRequest};
pub use sequencer::{Slot, Ticket};

use sequencer::Sequencer;

/// Single owner of a [`SessionState`].
///
/// Every state change goes through [`Coordinator::begin`] and
/// [`Coordinator::commit`]; the remote call between them is the only
/// await point.
pub struct Coordinator {
    id: SessionId,
    session: SessionState,
    sequencer: Sequencer,
    remote: Arc<dyn Collaborator>,
    events: Option<EventBus>,
    auto_fetch_schema: bool,
}

impl Coordinator {
    pub fn new(remote: Arc<dyn Collaborator>) -> Self {
        Self {
            id: SessionId::new(),
            session: SessionState::new(),
            sequencer: Sequencer::default(),
            remote,
            events: None,
            auto_fetch_schema: true,
        }
    }

    pub fn with_event_bus(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    /// Whether a successful upload is followed by a schema fetch.
    pub fn with_auto_fetch_schema(mut self, enabled: bool) -> Self {
        self.auto_fetch_schema = enabled;
        self
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn stage(&self) -> Stage {
        self.session.stage()
    }

    pub fn remote(&self) -> Arc<dyn Collaborator> {
        Arc::clone(&self.remote)
    }

    /// Whether a request for `slot` has been issued and not yet committed.
    pub fn is_pending(&self, slot: Slot) -> bool {
        self.sequencer.is_pending(slot)
    }

    pub fn set_question(&mut self, question: impl Into<String>) {
        self.session.set_question(question);
    }

    pub fn set_feedback(&mut self, feedback: impl Into<String>) {
        self.session.set_feedback(feedback);
    }

    pub(crate) fn publish(&self, event: Event) {
        if let Some(events) = &self.events {
            events.publish(event);
        }
    }
}
