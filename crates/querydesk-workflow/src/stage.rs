use std::fmt;

use serde::{Deserialize, Serialize};

use crate::session::SessionState;

/// Where a session is in the workflow, derived from which fields are set.
///
/// `QueryDrafted` and `QueryRevised` can alternate; `ResultReady` and
/// `AnswerReady` only exist for the current query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    Empty,
    DatasetUploaded,
    SchemaKnown,
    QueryDrafted,
    QueryRevised,
    ResultReady,
    AnswerReady,
}

impl Stage {
    pub fn of(session: &SessionState) -> Self {
        if !session.formatted_answer().is_empty() {
            Stage::AnswerReady
        } else if !session.execution_result().is_empty() {
            Stage::ResultReady
        } else if session.has_query() {
            if session.revisions() > 0 {
                Stage::QueryRevised
            } else {
                Stage::QueryDrafted
            }
        } else if !session.schema().is_empty() {
            Stage::SchemaKnown
        } else if session.dataset().is_some() {
            Stage::DatasetUploaded
        } else {
            Stage::Empty
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Stage::Empty => "no dataset",
            Stage::DatasetUploaded => "dataset uploaded",
            Stage::SchemaKnown => "schema known",
            Stage::QueryDrafted => "query drafted",
            Stage::QueryRevised => "query revised",
            Stage::ResultReady => "result ready",
            Stage::AnswerReady => "answer ready",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
