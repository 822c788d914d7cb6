//! Plain-text rendering of workflow events and session panels.

use querydesk_common::{Action, ColumnDescriptor, Event, Panel, Row};
use querydesk_config::schema::DisplayConfig;
use querydesk_workflow::{Coordinator, Slot};
use tokio::sync::broadcast;

/// Print every event until the bus closes.
pub async fn render_events(mut rx: broadcast::Receiver<Event>, display: DisplayConfig) {
    loop {
        match rx.recv().await {
            Ok(event) => {
                if let Some(text) = format_event(&event, &display) {
                    println!("{text}");
                }
            }
            Err(broadcast::error::RecvError::Lagged(n)) => {
                tracing::warn!("view lagged, skipped {n} events");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

pub fn format_event(event: &Event, display: &DisplayConfig) -> Option<String> {
    let text = match event {
        Event::DatasetUploaded { file_name, message } => {
            format!("[dataset] {file_name}: {message}")
        }
        Event::SchemaUpdated(columns) => {
            format!("[schema] {} columns\n{}", columns.len(), format_schema(columns))
        }
        Event::QueryUpdated { query, revision } => {
            if *revision == 0 {
                format!("[query]\n{query}")
            } else {
                format!("[query, revision {revision}]\n{query}")
            }
        }
        Event::ResultUpdated(rows) => {
            format!("[result] {} rows\n{}", rows.len(), format_rows(rows, display))
        }
        Event::AnswerUpdated(answer) => format!("[answer]\n{answer}"),
        Event::ResponseDiscarded { operation, reason } => {
            format!("[discarded] {operation}: {reason}")
        }
        Event::OperationFailed { message, .. } => format!("[error] {message}"),
        Event::Unknown => return None,
    };
    Some(text)
}

pub fn format_schema(columns: &[ColumnDescriptor]) -> String {
    if columns.is_empty() {
        return "(no schema)".to_string();
    }
    columns
        .iter()
        .map(|c| format!("  {c}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render rows as JSON records, cut to `display.max_rows`.
pub fn format_rows(rows: &[Row], display: &DisplayConfig) -> String {
    if rows.is_empty() {
        return "(no rows)".to_string();
    }
    let limit = display.max_rows as usize;
    let shown = &rows[..rows.len().min(limit)];
    let body = if display.pretty_json {
        serde_json::to_string_pretty(shown)
    } else {
        serde_json::to_string(shown)
    }
    .unwrap_or_else(|e| format!("(unprintable rows: {e})"));

    if rows.len() > limit {
        format!("{body}\n... {} more rows", rows.len() - limit)
    } else {
        body
    }
}

fn or_placeholder(text: &str, placeholder: &str) -> String {
    if text.is_empty() {
        placeholder.to_string()
    } else {
        text.to_string()
    }
}

pub fn format_panel(coordinator: &Coordinator, panel: Panel, display: &DisplayConfig) -> String {
    let session = coordinator.session();
    match panel {
        Panel::Schema => format_schema(session.schema()),
        Panel::Query => or_placeholder(session.query(), "(no query)"),
        Panel::Result => format_rows(session.execution_result(), display),
        Panel::Answer => or_placeholder(session.formatted_answer(), "(no answer)"),
        Panel::Status => {
            let dataset = match session.dataset() {
                Some(d) => format!(
                    "{} (uploaded {})",
                    d.file_name,
                    d.uploaded_at.format("%Y-%m-%d %H:%M:%S UTC")
                ),
                None => "(none)".to_string(),
            };
            let pending: Vec<String> = [
                Slot::Dataset,
                Slot::Schema,
                Slot::Query,
                Slot::Execution,
                Slot::Answer,
            ]
            .into_iter()
            .filter(|slot| coordinator.is_pending(*slot))
            .map(|slot| format!("{slot:?}").to_lowercase())
            .collect();

            let mut lines = vec![
                format!("stage:     {}", coordinator.stage()),
                format!("dataset:   {dataset}"),
                format!("question:  {}", or_placeholder(session.question(), "(none)")),
                format!("feedback:  {}", or_placeholder(session.feedback(), "(none)")),
                format!("revisions: {}", session.revisions()),
            ];
            if !pending.is_empty() {
                lines.push(format!("pending:   {}", pending.join(", ")));
            }
            lines.join("\n")
        }
    }
}

pub fn help_text() -> String {
    let mut lines = vec!["Commands:".to_string()];
    for action in Action::help_actions() {
        lines.push(format!("  {:<44} {}", action.usage(), action.label()));
    }
    lines.join("\n")
}
