//! Pull the literal query out of a generated response.

use std::sync::LazyLock;

use regex::Regex;

/// A ```` ```sql ```` fenced block; the content may span lines.
static FENCED_QUERY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```sql\r?\n(.*?)\r?\n```").expect("fenced query pattern must compile")
});

/// Return the trimmed content of the first fenced query block, or the
/// whole response trimmed when there is none.
pub fn extract_query(response: &str) -> String {
    match FENCED_QUERY_RE.captures(response).and_then(|c| c.get(1)) {
        Some(inner) => inner.as_str().trim().to_string(),
        None => response.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fenced_block_yields_inner_content() {
        let response = "```sql\nSELECT * FROM customers LIMIT 5\n```";
        assert_eq!(extract_query(response), "SELECT * FROM customers LIMIT 5");
    }

    #[test]
    fn commentary_around_block_is_dropped() {
        let response = "Here is the query you asked for:\n\n```sql\nSELECT region, SUM(total)\nFROM uploaded_data\nGROUP BY region\n```\n\nIt groups sales by region.";
        assert_eq!(
            extract_query(response),
            "SELECT region, SUM(total)\nFROM uploaded_data\nGROUP BY region"
        );
    }

    #[test]
    fn inner_content_is_trimmed() {
        let response = "```sql\n   SELECT 1;   \n\n```";
        assert_eq!(extract_query(response), "SELECT 1;");
    }

    #[test]
    fn first_block_wins() {
        let response = "```sql\nSELECT 1\n```\nor\n```sql\nSELECT 2\n```";
        assert_eq!(extract_query(response), "SELECT 1");
    }

    #[test]
    fn crlf_line_endings_are_accepted() {
        let response = "```sql\r\nSELECT 1\r\n```";
        assert_eq!(extract_query(response), "SELECT 1");
    }

    #[test]
    fn unfenced_response_is_trimmed_whole() {
        assert_eq!(
            extract_query("  \n SELECT name FROM uploaded_data \n"),
            "SELECT name FROM uploaded_data"
        );
    }

    #[test]
    fn untagged_fence_is_not_a_query_block() {
        let response = "```\nSELECT 1\n```";
        assert_eq!(extract_query(response), response);
    }

    #[test]
    fn unterminated_fence_falls_back_to_whole_text() {
        let response = "```sql\nSELECT 1";
        assert_eq!(extract_query(response), "```sql\nSELECT 1");
    }

    #[test]
    fn empty_response_extracts_empty() {
        assert_eq!(extract_query("   "), "");
    }
}
