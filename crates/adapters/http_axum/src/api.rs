//! JSON command API.

pub mod commands;

use axum::Router;
use axum::routing::post;

use crate::state::AppState;

/// Command routes. `/power` exists only with a direct device switch.
pub fn routes(direct_control: bool) -> Router<AppState> {
    let router = Router::new()
        .route("/on", post(commands::on))
        .route("/off", post(commands::off));

    if direct_control {
        router.route("/power", post(commands::power))
    } else {
        router
    }
}
