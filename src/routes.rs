use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{department, employee, hierarchy, root};
use crate::middleware::require_admin;
use crate::state::AppState;

pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/", get(root::root))
        .route("/health", get(root::health))
        .merge(employee_routes())
        .merge(admin_routes(&state))
        .route("/employee/department/all", get(department::all_departments))
        .route("/hierarchy", get(hierarchy::hierarchy))
        // Cross-origin requests are allowed from anywhere
        .layer(CorsLayer::permissive());

    if state.config.server.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn employee_routes() -> Router<AppState> {
    Router::new()
        .route("/employee/add", post(employee::add_employee))
        .route("/employee/login", post(employee::login))
        .route("/employee/all", get(employee::all_employees))
        .route("/employee/:id", get(employee::get_employee))
}

/// Writes that may require a CEO or manager token, see `require_admin`
fn admin_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/employee/update", put(employee::update_employee))
        .route("/employee/remove/:id", delete(employee::remove_employee))
        .route_layer(from_fn_with_state(state.clone(), require_admin))
}
