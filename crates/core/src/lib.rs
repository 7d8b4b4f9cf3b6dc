//! Domain logic for the "내 MBTI를 공략해라" survey.
//!
//! Zero I/O: types, the static scenario table, form collection and the
//! row encoding. The sheet client and HTTP server build on top of this.

pub mod demographics;
pub mod duplicate;
pub mod error;
pub mod form;
pub mod mbti;
pub mod record;
pub mod scenario;
pub mod style;
pub mod types;
pub mod variant;
