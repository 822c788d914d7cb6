//! Sequential begin/send/commit, plus one method per user operation.

use std::sync::Arc;

use tracing::debug;

use crate::commands::WorkflowCommand;
use crate::error::WorkflowError;
use crate::session::DatasetFile;

use super::{Committed, Coordinator, Outcome};

impl Coordinator {
    /// Run one command to completion without follow-ups.
    pub async fn run(&mut self, command: WorkflowCommand) -> Result<Committed, WorkflowError> {
        let pending = self.begin(command)?;
        let remote = Arc::clone(&self.remote);
        let completed = pending.send(remote.as_ref()).await;
        self.commit(completed)
    }

    /// Run `command` and every follow-up it yields, in order.
    ///
    /// Stops at the first error; outcomes already committed stay applied.
    pub async fn dispatch(
        &mut self,
        command: WorkflowCommand,
    ) -> Result<Vec<Outcome>, WorkflowError> {
        let mut outcomes = Vec::new();
        let mut next = Some(command);
        while let Some(command) = next.take() {
            let committed = self.run(command).await?;
            if let Some(follow_up) = &committed.follow_up {
                debug!(session = %self.id, operation = %follow_up.operation(), "dispatching follow-up");
            }
            outcomes.push(committed.outcome);
            next = committed.follow_up;
        }
        Ok(outcomes)
    }

    pub async fn upload_dataset(
        &mut self,
        file: DatasetFile,
    ) -> Result<Vec<Outcome>, WorkflowError> {
        self.dispatch(WorkflowCommand::Upload(file)).await
    }

    pub async fn fetch_schema(&mut self) -> Result<Outcome, WorkflowError> {
        self.single(WorkflowCommand::FetchSchema).await
    }

    /// Record `question` as the session's input, then generate from it.
    pub async fn generate_query(&mut self, question: &str) -> Result<Outcome, WorkflowError> {
        self.session.set_question(question);
        self.single(WorkflowCommand::Generate {
            question: question.to_string(),
        })
        .await
    }

    /// Record `feedback`, then revise the current query with it and the
    /// session's question.
    pub async fn regenerate_query(&mut self, feedback: &str) -> Result<Outcome, WorkflowError> {
        self.session.set_feedback(feedback);
        let command = WorkflowCommand::Regenerate {
            question: self.session.question().to_string(),
            previous_query: self.session.query().to_string(),
            feedback: feedback.to_string(),
        };
        self.single(command).await
    }

    pub async fn execute_query(&mut self, query: &str) -> Result<Outcome, WorkflowError> {
        self.single(WorkflowCommand::Execute {
            query: query.to_string(),
        })
        .await
    }

    pub async fn format_answer(&mut self, question: &str) -> Result<Outcome, WorkflowError> {
        self.single(WorkflowCommand::FormatAnswer {
            question: question.to_string(),
        })
        .await
    }

    async fn single(&mut self, command: WorkflowCommand) -> Result<Outcome, WorkflowError> {
        let committed = self.run(command).await?;
        Ok(committed.outcome)
    }
}
