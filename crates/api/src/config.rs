use std::path::PathBuf;
use std::str::FromStr;

use gongryak_core::duplicate::DEFAULT_IDENTIFIER_HEADER;
use gongryak_core::record::WallClock;
use gongryak_core::variant::{CheckFailurePolicy, DuplicateCheck, ScenarioKeying, SurveyVariant};
use gongryak_sheets::google::DEFAULT_WORKSHEET;

/// Which [`SheetStore`](gongryak_sheets::SheetStore) backs the submission sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetsBackend {
    Google,
    /// Rows live in process memory and vanish on restart.
    Memory,
}

impl FromStr for SheetsBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "memory" => Ok(Self::Memory),
            other => Err(format!("unknown sheets backend '{other}' (expected google|memory)")),
        }
    }
}

/// Where the service-account key comes from.
#[derive(Debug, Clone)]
pub enum CredentialsSource {
    File(PathBuf),
    Inline(String),
}

#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub backend: SheetsBackend,
    /// Required for the Google backend.
    pub spreadsheet_id: Option<String>,
    pub worksheet: String,
    /// Header of the identifier column, used by full-record duplicate scans.
    pub identifier_header: String,
    pub credentials: Option<CredentialsSource>,
}

#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub cookie_name: String,
    /// Mark the cookie `Secure` (HTTPS deployments).
    pub cookie_secure: bool,
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development except the
/// Google Sheets settings, which are required when that backend is selected.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    pub request_timeout_secs: u64,
    /// How long open connections may drain after a shutdown signal.
    pub shutdown_timeout_secs: u64,
    /// Directory served at `/` (the browser form).
    pub static_dir: PathBuf,
    pub session: SessionConfig,
    pub survey: SurveyVariant,
    /// Clock used for the submission timestamp column.
    pub wall_clock: WallClock,
    pub sheets: SheetsConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                          | Default                 |
    /// |----------------------------------|-------------------------|
    /// | `HOST`                           | `0.0.0.0`               |
    /// | `PORT`                           | `3000`                  |
    /// | `CORS_ORIGINS`                   | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`           | `30`                    |
    /// | `SHUTDOWN_TIMEOUT_SECS`          | `30`                    |
    /// | `STATIC_DIR`                     | `static`                |
    /// | `SESSION_COOKIE_NAME`            | `gongryak.sid`          |
    /// | `SESSION_COOKIE_SECURE`          | `false`                 |
    /// | `SURVEY_SCENARIO_KEYING`         | `type`                  |
    /// | `SURVEY_SCORED`                  | `false`                 |
    /// | `SURVEY_DUPLICATE_CHECK`         | `identifier-column`     |
    /// | `SURVEY_CHECK_FAILURE`           | `fail-closed`           |
    /// | `SURVEY_UTC_OFFSET`              | `+09:00`                |
    /// | `SHEETS_BACKEND`                 | `google`                |
    /// | `SHEETS_SPREADSHEET_ID`          | (none)                  |
    /// | `SHEETS_WORKSHEET`               | `Sheet1`                |
    /// | `SHEETS_IDENTIFIER_HEADER`       | `user_id`               |
    /// | `GOOGLE_APPLICATION_CREDENTIALS` | (none, path)            |
    /// | `SHEETS_CREDENTIALS_JSON`        | (none, inline key)      |
    ///
    /// Panics on malformed values so misconfiguration fails at startup.
    pub fn from_env() -> Self {
        let host = env_or("HOST", "0.0.0.0");

        let port: u16 = env_or("PORT", "3000")
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = env_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = env_or("SHUTDOWN_TIMEOUT_SECS", "30")
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let session = SessionConfig {
            cookie_name: env_or("SESSION_COOKIE_NAME", "gongryak.sid"),
            cookie_secure: env_or("SESSION_COOKIE_SECURE", "false")
                .parse()
                .expect("SESSION_COOKIE_SECURE must be true or false"),
        };

        let survey = SurveyVariant {
            keying: env_parse::<ScenarioKeying>("SURVEY_SCENARIO_KEYING", "type"),
            scored: env_or("SURVEY_SCORED", "false")
                .parse()
                .expect("SURVEY_SCORED must be true or false"),
            duplicate_check: env_parse::<DuplicateCheck>("SURVEY_DUPLICATE_CHECK", "identifier-column"),
            on_check_failure: env_parse::<CheckFailurePolicy>("SURVEY_CHECK_FAILURE", "fail-closed"),
        };

        let wall_clock = env_parse::<WallClock>("SURVEY_UTC_OFFSET", "+09:00");

        let credentials = match (
            std::env::var("GOOGLE_APPLICATION_CREDENTIALS").ok(),
            std::env::var("SHEETS_CREDENTIALS_JSON").ok(),
        ) {
            (Some(path), _) if !path.trim().is_empty() => Some(CredentialsSource::File(path.into())),
            (_, Some(json)) if !json.trim().is_empty() => Some(CredentialsSource::Inline(json)),
            _ => None,
        };

        let sheets = SheetsConfig {
            backend: env_parse::<SheetsBackend>("SHEETS_BACKEND", "google"),
            spreadsheet_id: std::env::var("SHEETS_SPREADSHEET_ID")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            worksheet: env_or("SHEETS_WORKSHEET", DEFAULT_WORKSHEET),
            identifier_header: env_or("SHEETS_IDENTIFIER_HEADER", DEFAULT_IDENTIFIER_HEADER),
            credentials,
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            static_dir: env_or("STATIC_DIR", "static").into(),
            session,
            survey,
            wall_clock,
            sheets,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T>(key: &str, default: &str) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = env_or(key, default);
    raw.parse()
        .unwrap_or_else(|e| panic!("Invalid {key} '{raw}': {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_parses_case_insensitively() {
        assert_eq!("Google".parse::<SheetsBackend>().unwrap(), SheetsBackend::Google);
        assert_eq!(" memory ".parse::<SheetsBackend>().unwrap(), SheetsBackend::Memory);
        assert!("postgres".parse::<SheetsBackend>().is_err());
    }
}
