pub mod health;
pub mod survey;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /survey                          form definition
/// /survey/scenario/{category}      scenario steps for a type or style
/// /session                         participant identifier
/// /submissions                     submit answers (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().merge(survey::router())
}
