//! The session record and its invalidation rules.

use chrono::{DateTime, Utc};
use querydesk_common::{new_id, ColumnDescriptor, Row};

use crate::stage::Stage;

/// User-selected dataset content, ready to upload.
#[derive(Clone, PartialEq, Eq)]
pub struct DatasetFile {
    pub file_name: String,
    pub content: Vec<u8>,
}

impl DatasetFile {
    pub fn new(file_name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            content: content.into(),
        }
    }
}

impl std::fmt::Debug for DatasetFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatasetFile")
            .field("file_name", &self.file_name)
            .field("size", &self.content.len())
            .finish()
    }
}

/// Client-side reference to a dataset the service accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetHandle {
    pub id: String,
    pub file_name: String,
    /// The service's acknowledgement text.
    pub message: String,
    /// Column names echoed by the upload, if any.
    pub columns: Vec<String>,
    pub uploaded_at: DateTime<Utc>,
}

impl DatasetHandle {
    pub(crate) fn new(file_name: String, message: String, columns: Vec<String>) -> Self {
        Self {
            id: new_id(),
            file_name,
            message,
            columns,
            uploaded_at: Utc::now(),
        }
    }
}

/// Revision counters for the state that downstream requests are built on.
///
/// A response is only committed if the revision it was built from is
/// still current.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Lineage {
    pub(crate) dataset: u64,
    pub(crate) query: u64,
    pub(crate) result: u64,
}

/// Everything one interactive session knows.
///
/// Fields are read through accessors; only the coordinator mutates them,
/// and only through the methods below so invalidation cannot be skipped.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    dataset: Option<DatasetHandle>,
    schema: Vec<ColumnDescriptor>,
    question: String,
    feedback: String,
    query: String,
    execution_result: Vec<Row>,
    formatted_answer: String,
    /// Successful regenerations since the last fresh generate.
    revisions: u32,
    lineage: Lineage,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    pub fn dataset(&self) -> Option<&DatasetHandle> {
        self.dataset.as_ref()
    }

    pub fn schema(&self) -> &[ColumnDescriptor] {
        &self.schema
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    /// Current query text; empty when none has been generated.
    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn has_query(&self) -> bool {
        !self.query.is_empty()
    }

    pub fn execution_result(&self) -> &[Row] {
        &self.execution_result
    }

    pub fn formatted_answer(&self) -> &str {
        &self.formatted_answer
    }

    pub fn revisions(&self) -> u32 {
        self.revisions
    }

    pub fn stage(&self) -> Stage {
        Stage::of(self)
    }

    pub(crate) fn lineage(&self) -> Lineage {
        self.lineage
    }

    // -----------------------------------------------------------------------
    // Mutations
    // -----------------------------------------------------------------------

    pub(crate) fn set_question(&mut self, question: impl Into<String>) {
        self.question = question.into();
    }

    pub(crate) fn set_feedback(&mut self, feedback: impl Into<String>) {
        self.feedback = feedback.into();
    }

    /// Start a new dataset lineage. Question and feedback survive.
    pub(crate) fn replace_dataset(&mut self, dataset: DatasetHandle) {
        self.dataset = Some(dataset);
        self.schema.clear();
        self.query.clear();
        self.execution_result.clear();
        self.formatted_answer.clear();
        self.revisions = 0;
        self.lineage.dataset += 1;
        self.lineage.query += 1;
        self.lineage.result += 1;
    }

    pub(crate) fn set_schema(&mut self, schema: Vec<ColumnDescriptor>) {
        self.schema = schema;
    }

    /// Replace the query and drop the result and answer with it.
    pub(crate) fn replace_query(&mut self, query: String, revised: bool) {
        self.query = query;
        self.execution_result.clear();
        self.formatted_answer.clear();
        self.revisions = if revised {
            self.revisions.saturating_add(1)
        } else {
            0
        };
        self.lineage.query += 1;
        self.lineage.result += 1;
    }

    pub(crate) fn set_execution_result(&mut self, rows: Vec<Row>) {
        self.execution_result = rows;
        self.lineage.result += 1;
    }

    pub(crate) fn set_formatted_answer(&mut self, answer: String) {
        self.formatted_answer = answer;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: serde_json::Value) -> Row {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("row must be an object"),
        }
    }

    fn handle(name: &str) -> DatasetHandle {
        DatasetHandle::new(name.into(), "ok".into(), Vec::new())
    }

    fn populated() -> SessionState {
        let mut session = SessionState::new();
        session.replace_dataset(handle("a.csv"));
        session.set_schema(vec![ColumnDescriptor::new("total", "REAL")]);
        session.set_question("total sales");
        session.set_feedback("per region");
        session.replace_query("SELECT SUM(total) FROM uploaded_data".into(), false);
        session.set_execution_result(vec![row(json!({ "sum": 10 }))]);
        session.set_formatted_answer("Total sales are 10.".into());
        session
    }

    #[test]
    fn new_session_is_empty() {
        let session = SessionState::new();
        assert!(session.dataset().is_none());
        assert!(session.schema().is_empty());
        assert!(!session.has_query());
        assert!(session.execution_result().is_empty());
        assert!(session.formatted_answer().is_empty());
    }

    #[test]
    fn replace_dataset_clears_lineage_but_keeps_inputs() {
        let mut session = populated();
        session.replace_dataset(handle("b.csv"));

        assert_eq!(session.dataset().unwrap().file_name, "b.csv");
        assert!(session.schema().is_empty());
        assert!(!session.has_query());
        assert!(session.execution_result().is_empty());
        assert!(session.formatted_answer().is_empty());
        assert_eq!(session.question(), "total sales");
        assert_eq!(session.feedback(), "per region");
    }

    #[test]
    fn replace_query_clears_result_and_answer_together() {
        let mut session = populated();
        let before = session.lineage();
        session.replace_query("SELECT 1".into(), true);

        assert_eq!(session.query(), "SELECT 1");
        assert!(session.execution_result().is_empty());
        assert!(session.formatted_answer().is_empty());
        assert_eq!(session.revisions(), 1);
        assert!(session.lineage().query > before.query);
        assert!(session.lineage().result > before.result);
        assert_eq!(session.lineage().dataset, before.dataset);
    }

    #[test]
    fn fresh_generate_resets_revisions() {
        let mut session = populated();
        session.replace_query("SELECT 1".into(), true);
        session.replace_query("SELECT 2".into(), true);
        assert_eq!(session.revisions(), 2);
        session.replace_query("SELECT 3".into(), false);
        assert_eq!(session.revisions(), 0);
    }

    #[test]
    fn setting_result_keeps_answer_and_query() {
        let mut session = populated();
        session.set_execution_result(vec![row(json!({ "sum": 11 }))]);
        assert_eq!(session.formatted_answer(), "Total sales are 10.");
        assert_eq!(session.query(), "SELECT SUM(total) FROM uploaded_data");
    }

    #[test]
    fn dataset_file_debug_hides_content() {
        let file = DatasetFile::new("a.csv", b"secret,data".to_vec());
        let debug = format!("{file:?}");
        assert!(debug.contains("a.csv"));
        assert!(!debug.contains("secret"));
    }
}
