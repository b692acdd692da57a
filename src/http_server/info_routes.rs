//! Phonebook summary page

use axum::{extract::State, response::Html, routing::get, Router};
use chrono::{DateTime, Local, TimeZone};

use super::errors::ApiResult;
use super::state::AppState;

/// Wall-clock format for the summary page. Millisecond precision so two
/// requests never render the same instant.
pub const TIMESTAMP_FORMAT: &str = "%a %b %d %Y %H:%M:%S%.3f GMT%z";

pub fn info_routes(state: AppState) -> Router {
    Router::new()
        .route("/info", get(info_handler))
        .with_state(state)
}

/// Renders the summary HTML for `count` people at time `now`.
pub fn render_info<Tz: TimeZone>(count: usize, now: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "<p>Phonebook has info for {} people</p><p>{}</p>",
        count,
        now.format(TIMESTAMP_FORMAT)
    )
}

async fn info_handler(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let people = state.people.list_all().await?;
    Ok(Html(render_info(people.len(), &Local::now())))
}
