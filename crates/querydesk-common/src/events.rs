use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

use crate::types::{ColumnDescriptor, Operation, Row};

/// State changes published by the workflow coordinator.
///
/// Each event carries the new data so a view can render it without
/// holding a reference to the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Event {
    DatasetUploaded {
        file_name: String,
        message: String,
    },
    SchemaUpdated(Vec<ColumnDescriptor>),
    QueryUpdated {
        query: String,
        revision: u32,
    },
    ResultUpdated(Vec<Row>),
    AnswerUpdated(String),
    ResponseDiscarded {
        operation: Operation,
        reason: String,
    },
    OperationFailed {
        operation: Operation,
        message: String,
    },
    #[serde(other)]
    Unknown,
}

pub struct EventBus {
    sender: broadcast::Sender<Event>,
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.sender.subscribe()
    }

    pub fn publish(&self, event: Event) -> usize {
        self.sender.send(event).unwrap_or(0)
    }
}

impl Clone for EventBus {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_and_receive() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(Event::AnswerUpdated("42 rows".into()));

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, Event::AnswerUpdated(ref text) if text == "42 rows"));
    }

    #[tokio::test]
    async fn multiple_subscribers() {
        let bus = EventBus::new(16);
        let mut rx1 = bus.subscribe();
        let mut rx2 = bus.subscribe();

        bus.publish(Event::QueryUpdated {
            query: "SELECT 1".into(),
            revision: 0,
        });

        let e1 = rx1.recv().await.unwrap();
        let e2 = rx2.recv().await.unwrap();
        assert!(matches!(e1, Event::QueryUpdated { .. }));
        assert!(matches!(e2, Event::QueryUpdated { .. }));
    }

    #[tokio::test]
    async fn clone_shares_channel() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();
        let other = bus.clone();

        other.publish(Event::OperationFailed {
            operation: Operation::Execute,
            message: "no such table".into(),
        });

        let event = rx.recv().await.unwrap();
        assert!(matches!(
            event,
            Event::OperationFailed { operation: Operation::Execute, .. }
        ));
    }

    #[test]
    fn publish_returns_zero_with_no_subscribers() {
        let bus = EventBus::new(16);
        let count = bus.publish(Event::ResultUpdated(Vec::new()));
        assert_eq!(count, 0);
    }

    #[test]
    fn unknown_event_deserializes() {
        let json = r#"{"type":"SomeNewEventWeNeverHeardOf","data":null}"#;
        let event: Event = serde_json::from_str(json).unwrap();
        assert!(matches!(event, Event::Unknown));
    }
}
