//! Construction of the sheet store and submission sink from configuration.

use std::sync::Arc;
use std::time::Duration;

use gongryak_sheets::auth::TokenProvider;
use gongryak_sheets::credentials::ServiceAccountKey;
use gongryak_sheets::google::{GoogleSheetsConfig, GoogleSheetsStore};
use gongryak_sheets::{DuplicateGuard, MemorySheetStore, SheetStore, SheetsError, SubmissionSink};

use crate::config::{CredentialsSource, ServerConfig, SheetsBackend, SheetsConfig};

/// Open the store selected by `SHEETS_BACKEND`.
///
/// The Google backend needs a spreadsheet id and a service-account key; the
/// key is parsed here so a bad key fails at startup rather than on the first
/// submission.
pub fn build_sheet_store(
    config: &SheetsConfig,
    request_timeout: Duration,
) -> Result<Arc<dyn SheetStore>, SheetsError> {
    match config.backend {
        SheetsBackend::Memory => {
            tracing::warn!("Using in-memory sheet store; submissions are lost on restart");
            Ok(Arc::new(MemorySheetStore::with_header([
                config.identifier_header.as_str(),
            ])))
        }
        SheetsBackend::Google => {
            let spreadsheet_id = config
                .spreadsheet_id
                .clone()
                .ok_or_else(|| SheetsError::Config("SHEETS_SPREADSHEET_ID must be set".into()))?;

            let key = match &config.credentials {
                Some(CredentialsSource::File(path)) => ServiceAccountKey::from_file(path)?,
                Some(CredentialsSource::Inline(json)) => ServiceAccountKey::from_json(json)?,
                None => {
                    return Err(SheetsError::Config(
                        "GOOGLE_APPLICATION_CREDENTIALS or SHEETS_CREDENTIALS_JSON must be set"
                            .into(),
                    ))
                }
            };

            let client = reqwest::Client::builder().timeout(request_timeout).build()?;
            let tokens = TokenProvider::new(client.clone(), key)?;
            let sheet = GoogleSheetsConfig::new(spreadsheet_id, config.worksheet.clone());

            Ok(Arc::new(GoogleSheetsStore::new(client, sheet, tokens)))
        }
    }
}

/// Wrap `store` in a sink carrying the configured duplicate-check settings.
pub fn build_submission_sink(store: Arc<dyn SheetStore>, config: &ServerConfig) -> SubmissionSink {
    let mut guard = DuplicateGuard::new(config.survey.duplicate_check, config.survey.on_check_failure);
    guard.identifier_header = config.sheets.identifier_header.clone();

    tracing::info!(
        duplicate_check = ?guard.mode,
        on_failure = ?guard.on_failure,
        identifier_header = %guard.identifier_header,
        "Submission sink configured"
    );

    SubmissionSink::new(store, guard)
}
