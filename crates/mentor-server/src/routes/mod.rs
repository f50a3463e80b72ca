// Export route modules
pub mod agents;
pub mod health;
pub mod message;

use crate::state::AppState;
use axum::Router;

// Function to configure all routes
pub fn configure(state: AppState) -> Router {
    Router::new()
        .merge(message::routes(state.clone()))
        .merge(agents::routes(state))
        .merge(health::routes())
}
