use async_trait::async_trait;
use serde_json::Value;

use crate::error::SheetsError;

/// An append-only worksheet.
///
/// Rows come back as display strings regardless of how they were written.
/// There is no update or delete path.
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// Every value in one column (0-based), top to bottom, header included.
    async fn read_column(&self, column: usize) -> Result<Vec<String>, SheetsError>;

    /// Every row of the worksheet, header row first.
    async fn read_rows(&self) -> Result<Vec<Vec<String>>, SheetsError>;

    /// Append one row after the last non-empty row.
    async fn append_row(&self, row: &[Value]) -> Result<(), SheetsError>;

    /// Cheap reachability probe.
    async fn health_check(&self) -> Result<(), SheetsError>;
}

/// Render a written cell the way the sheet displays it back.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn strings_are_not_quoted() {
        assert_eq!(display_value(&json!("남성")), "남성");
    }

    #[test]
    fn numbers_render_plainly() {
        assert_eq!(display_value(&json!(25)), "25");
    }

    #[test]
    fn null_renders_empty() {
        assert_eq!(display_value(&Value::Null), "");
    }
}
