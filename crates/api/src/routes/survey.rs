use axum::routing::{get, post};
use axum::Router;

use crate::handlers::survey;
use crate::state::AppState;

/// ```text
/// GET    /survey                        -> get_form
/// GET    /survey/scenario/{category}    -> get_scenario
/// GET    /session                       -> get_session
/// POST   /submissions                   -> submit
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/survey", get(survey::get_form))
        .route("/survey/scenario/{category}", get(survey::get_scenario))
        .route("/session", get(survey::get_session))
        .route("/submissions", post(survey::submit))
}
