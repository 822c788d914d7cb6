//! Interactive driver: reads commands, launches requests, commits replies.
//!
//! The driver is the only owner of the [`Coordinator`]. Remote calls run as
//! spawned tasks and report back over a channel, so a second command can
//! be issued while the first is still in flight.

mod commands;

use std::path::Path;

use querydesk_common::{Action, QuerydeskError};
use querydesk_config::schema::DisplayConfig;
use querydesk_workflow::{CompletedRequest, Coordinator, DatasetFile, WorkflowCommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::view;

pub use commands::command_for;

pub struct Driver {
    coordinator: Coordinator,
    display: DisplayConfig,
    completions_tx: mpsc::UnboundedSender<CompletedRequest>,
    completions_rx: mpsc::UnboundedReceiver<CompletedRequest>,
    in_flight: usize,
}

impl Driver {
    pub fn new(coordinator: Coordinator, display: DisplayConfig) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            coordinator,
            display,
            completions_tx,
            completions_rx,
            in_flight: 0,
        }
    }

    /// Run until `quit` or end of input, then wait for outstanding requests.
    pub async fn run(mut self) -> Result<(), QuerydeskError> {
        println!("{}", view::help_text());
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    match Action::parse(&line) {
                        Ok(Action::Quit) => break,
                        Ok(action) => self.handle(action).await,
                        Err(e) => println!("{e}"),
                    }
                }
                Some(completed) = self.completions_rx.recv() => {
                    self.complete(completed);
                }
            }
        }

        while self.in_flight > 0 {
            match self.completions_rx.recv().await {
                Some(completed) => self.complete(completed),
                None => break,
            }
        }
        Ok(())
    }

    async fn handle(&mut self, action: Action) {
        match action {
            Action::UploadDataset(path) => match read_dataset(Path::new(&path)).await {
                Ok(file) => self.launch(WorkflowCommand::Upload(file)),
                Err(e) => println!("cannot read {path}: {e}"),
            },
            Action::SetQuestion(text) => self.coordinator.set_question(text),
            Action::SetFeedback(text) => self.coordinator.set_feedback(text),
            Action::Show(panel) => {
                println!("{}", view::format_panel(&self.coordinator, panel, &self.display));
            }
            Action::Help => println!("{}", view::help_text()),
            remote if remote.is_remote() => {
                if let Some(command) = command_for(&remote, self.coordinator.session()) {
                    self.launch(command);
                }
            }
            _ => {}
        }
    }

    /// Begin `command` and send it on a background task.
    ///
    /// A refused command is already published as an event by the coordinator.
    fn launch(&mut self, command: WorkflowCommand) {
        let pending = match self.coordinator.begin(command) {
            Ok(pending) => pending,
            Err(e) => {
                tracing::debug!("command refused: {e}");
                return;
            }
        };
        tracing::debug!(ticket = %pending.ticket(), operation = %pending.operation(), "launching");

        let remote = self.coordinator.remote();
        let tx = self.completions_tx.clone();
        self.in_flight += 1;
        tokio::spawn(async move {
            let completed = pending.send(remote.as_ref()).await;
            deliver(&tx, completed);
        });
    }

    fn complete(&mut self, completed: CompletedRequest) {
        self.in_flight = self.in_flight.saturating_sub(1);
        match self.coordinator.commit(completed) {
            Ok(committed) => {
                if let Some(follow_up) = committed.follow_up {
                    self.launch(follow_up);
                }
            }
            Err(e) => tracing::debug!("commit reported failure: {e}"),
        }
    }
}

/// Hand a completion back to the driver. Returns `false` if it is gone.
fn deliver(tx: &mpsc::UnboundedSender<CompletedRequest>, completed: CompletedRequest) -> bool {
    let operation = completed.operation();
    if tx.send(completed).is_err() {
        tracing::debug!(%operation, "driver gone, completion dropped");
        return false;
    }
    true
}

async fn read_dataset(path: &Path) -> std::io::Result<DatasetFile> {
    let content = tokio::fs::read(path).await?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(DatasetFile::new(file_name, content))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn dataset_is_read_with_its_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sales.csv");
        tokio::fs::write(&path, b"name,total\nAcme,10\n").await.unwrap();

        let file = read_dataset(&path).await.unwrap();
        assert_eq!(file.file_name, "sales.csv");
        assert_eq!(file.content, b"name,total\nAcme,10\n");
    }

    async fn failed_upload_completion() -> CompletedRequest {
        let remote = querydesk_remote::HttpCollaborator::new(
            querydesk_remote::HttpConfig::new("http://127.0.0.1:9")
                .with_request_timeout(std::time::Duration::from_secs(2)),
        )
        .unwrap();
        let mut coordinator = Coordinator::new(std::sync::Arc::new(remote));
        let pending = coordinator
            .begin(WorkflowCommand::Upload(DatasetFile::new("a.csv", b"a\n1\n".to_vec())))
            .unwrap();
        let remote = coordinator.remote();
        pending.send(remote.as_ref()).await
    }

    #[tokio::test]
    async fn completion_reaches_a_live_driver() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        assert!(deliver(&tx, failed_upload_completion().await));
        let received = rx.recv().await.unwrap();
        assert!(!received.is_success());
    }

    #[tokio::test]
    async fn completion_after_driver_exit_is_dropped_quietly() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        assert!(!deliver(&tx, failed_upload_completion().await));
    }

    #[tokio::test]
    async fn missing_dataset_is_an_io_error() {
        let err = read_dataset(Path::new("/nonexistent/querydesk/sales.csv"))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    }
}
