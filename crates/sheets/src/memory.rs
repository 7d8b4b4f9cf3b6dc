//! In-process worksheet for local development and tests.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::error::SheetsError;
use crate::store::{display_value, SheetStore};

/// A worksheet held in memory. Reads and appends can be switched to fail
/// to exercise store outages.
#[derive(Default)]
pub struct MemorySheetStore {
    rows: RwLock<Vec<Vec<Value>>>,
    reads_fail: AtomicBool,
    appends_fail: AtomicBool,
}

impl MemorySheetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a header row already in place.
    pub fn with_header<I, S>(header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let header = header.into_iter().map(|h| Value::String(h.into())).collect();
        Self {
            rows: RwLock::new(vec![header]),
            ..Self::default()
        }
    }

    pub fn fail_reads(&self, fail: bool) {
        self.reads_fail.store(fail, Ordering::SeqCst);
    }

    pub fn fail_appends(&self, fail: bool) {
        self.appends_fail.store(fail, Ordering::SeqCst);
    }

    /// Snapshot of every row, header included.
    pub async fn rows(&self) -> Vec<Vec<Value>> {
        self.rows.read().await.clone()
    }

    pub async fn row_count(&self) -> usize {
        self.rows.read().await.len()
    }

    fn check_reads(&self) -> Result<(), SheetsError> {
        if self.reads_fail.load(Ordering::SeqCst) {
            return Err(SheetsError::Unavailable("reads disabled".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl SheetStore for MemorySheetStore {
    async fn read_column(&self, column: usize) -> Result<Vec<String>, SheetsError> {
        self.check_reads()?;
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .map(|row| row.get(column).map(display_value).unwrap_or_default())
            .collect())
    }

    async fn read_rows(&self) -> Result<Vec<Vec<String>>, SheetsError> {
        self.check_reads()?;
        Ok(self
            .rows
            .read()
            .await
            .iter()
            .map(|row| row.iter().map(display_value).collect())
            .collect())
    }

    async fn append_row(&self, row: &[Value]) -> Result<(), SheetsError> {
        if self.appends_fail.load(Ordering::SeqCst) {
            return Err(SheetsError::Unavailable("appends disabled".into()));
        }
        self.rows.write().await.push(row.to_vec());
        Ok(())
    }

    async fn health_check(&self) -> Result<(), SheetsError> {
        self.check_reads()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[tokio::test]
    async fn appended_rows_read_back_as_text() {
        let store = MemorySheetStore::with_header(["user_id", "age"]);
        store.append_row(&[json!("u-1"), json!(25)]).await.unwrap();

        assert_eq!(store.read_column(0).await.unwrap(), vec!["user_id", "u-1"]);
        assert_eq!(
            store.read_rows().await.unwrap()[1],
            vec!["u-1".to_string(), "25".to_string()]
        );
    }

    #[tokio::test]
    async fn short_rows_read_as_empty_cells() {
        let store = MemorySheetStore::new();
        store.append_row(&[json!("only")]).await.unwrap();
        assert_eq!(store.read_column(3).await.unwrap(), vec![String::new()]);
    }

    #[tokio::test]
    async fn failing_reads_do_not_block_appends() {
        let store = MemorySheetStore::new();
        store.fail_reads(true);

        assert_matches!(store.read_column(0).await, Err(SheetsError::Unavailable(_)));
        assert_matches!(store.health_check().await, Err(SheetsError::Unavailable(_)));
        store.append_row(&[json!("u-1")]).await.unwrap();
        assert_eq!(store.row_count().await, 1);
    }

    #[tokio::test]
    async fn failing_appends_leave_rows_untouched() {
        let store = MemorySheetStore::new();
        store.fail_appends(true);
        assert_matches!(store.append_row(&[json!("u-1")]).await, Err(SheetsError::Unavailable(_)));
        assert!(store.rows().await.is_empty());
    }
}
