//! Spreadsheet-backed storage for survey submissions.
//!
//! Provides the [`SheetStore`] abstraction over one append-only worksheet,
//! a Google Sheets REST implementation with service-account auth, an
//! in-memory implementation, and the duplicate-aware [`SubmissionSink`].

pub mod auth;
pub mod credentials;
pub mod error;
pub mod google;
pub mod memory;
pub mod sink;
pub mod store;

pub use error::SheetsError;
pub use memory::MemorySheetStore;
pub use sink::{DuplicateGuard, SubmissionSink, SubmitError, SubmitOutcome};
pub use store::SheetStore;
