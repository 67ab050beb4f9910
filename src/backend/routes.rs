use axum::routing::{delete, get, post};
use axum::Router;

use crate::backend::{handlers, middleware, AppState};

pub fn api_routes(state: AppState) -> Router {
    let public = Router::new()
        .route("/auth/request-code", post(handlers::auth::request_code_handler))
        .route("/auth/verify-code", post(handlers::auth::verify_code_handler));

    // Everything below requires a Bearer session token.
    let protected = Router::new()
        .route("/onboarding/income", post(handlers::onboarding::save_income_handler))
        .route(
            "/onboarding/fixed-expenses",
            post(handlers::onboarding::save_fixed_expenses_handler),
        )
        .route("/expenses", post(handlers::expenses::create_expense_handler))
        .route("/expenses/:id", delete(handlers::expenses::delete_expense_handler))
        .route("/balance", get(handlers::balance::get_balance_handler))
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::require_auth,
        ));

    Router::new()
        .route("/health", get(|| async { "Backend is running" }))
        .merge(public)
        .merge(protected)
        .with_state(state)
}
