//! Duplicate-aware submission of records to the worksheet.
//!
//! The duplicate check and the append are two separate calls with no
//! transaction between them: two sessions racing with one identifier can
//! both pass the check.

use std::sync::Arc;

use gongryak_core::duplicate::{self, DEFAULT_IDENTIFIER_HEADER};
use gongryak_core::record::{SubmissionRecord, IDENTIFIER_COLUMN};
use gongryak_core::types::SessionId;
use gongryak_core::variant::{CheckFailurePolicy, DuplicateCheck};

use crate::error::SheetsError;
use crate::store::SheetStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Exactly one row was appended.
    Accepted,
    /// The identifier is already recorded; nothing was appended.
    Duplicate,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// The store could not be read for the duplicate check (fail-closed only).
    #[error("Duplicate check failed: {0}")]
    CheckFailed(#[source] SheetsError),

    #[error("Append failed: {0}")]
    AppendFailed(#[source] SheetsError),
}

/// Duplicate-check settings of the deployed variant.
#[derive(Debug, Clone)]
pub struct DuplicateGuard {
    pub mode: DuplicateCheck,
    pub on_failure: CheckFailurePolicy,
    /// Header naming the identifier column in full-record scans.
    pub identifier_header: String,
}

impl DuplicateGuard {
    pub fn new(mode: DuplicateCheck, on_failure: CheckFailurePolicy) -> Self {
        Self {
            mode,
            on_failure,
            identifier_header: DEFAULT_IDENTIFIER_HEADER.to_string(),
        }
    }

    pub fn disabled() -> Self {
        Self::new(DuplicateCheck::Disabled, CheckFailurePolicy::FailClosed)
    }
}

pub struct SubmissionSink {
    store: Arc<dyn SheetStore>,
    guard: DuplicateGuard,
}

impl SubmissionSink {
    pub fn new(store: Arc<dyn SheetStore>, guard: DuplicateGuard) -> Self {
        Self { store, guard }
    }

    pub fn store(&self) -> &Arc<dyn SheetStore> {
        &self.store
    }

    pub fn guard(&self) -> &DuplicateGuard {
        &self.guard
    }

    /// Raw lookup of `id` in the sheet. Always `false` when checking is disabled.
    pub async fn lookup(&self, id: &SessionId) -> Result<bool, SheetsError> {
        match self.guard.mode {
            DuplicateCheck::Disabled => Ok(false),
            DuplicateCheck::IdentifierColumn => {
                let column = self.store.read_column(IDENTIFIER_COLUMN).await?;
                Ok(duplicate::column_contains(&column, id))
            }
            DuplicateCheck::FullRecords => {
                let rows = self.store.read_rows().await?;
                duplicate::records_contain(&rows, &self.guard.identifier_header, id)
                    .ok_or_else(|| SheetsError::MissingHeader(self.guard.identifier_header.clone()))
            }
        }
    }

    /// Whether `id` already has a recorded submission, with the failure
    /// policy applied to store errors.
    pub async fn has_submitted(&self, id: &SessionId) -> Result<bool, SubmitError> {
        match self.lookup(id).await {
            Ok(found) => Ok(found),
            Err(err) => match self.guard.on_failure {
                CheckFailurePolicy::FailOpen => {
                    tracing::warn!(
                        session_id = %id,
                        error = %err,
                        "Duplicate check failed, assuming no prior submission"
                    );
                    Ok(false)
                }
                CheckFailurePolicy::FailClosed => {
                    tracing::error!(session_id = %id, error = %err, "Duplicate check failed");
                    Err(SubmitError::CheckFailed(err))
                }
            },
        }
    }

    /// Check for a prior submission (if enabled), then append the record.
    pub async fn submit(&self, record: &SubmissionRecord) -> Result<SubmitOutcome, SubmitError> {
        if self.has_submitted(&record.session_id).await? {
            tracing::warn!(session_id = %record.session_id, "Rejected duplicate submission");
            return Ok(SubmitOutcome::Duplicate);
        }

        self.store
            .append_row(&record.to_row())
            .await
            .map_err(|err| {
                tracing::error!(session_id = %record.session_id, error = %err, "Failed to append submission");
                SubmitError::AppendFailed(err)
            })?;

        tracing::info!(
            session_id = %record.session_id,
            mbti = %record.mbti,
            category = %record.category,
            steps = record.answers.len(),
            "Submission appended"
        );
        Ok(SubmitOutcome::Accepted)
    }
}
