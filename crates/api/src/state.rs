use std::sync::Arc;

use gongryak_sheets::SubmissionSink;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: everything sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Duplicate-aware writer over the configured worksheet.
    pub sink: Arc<SubmissionSink>,
}
