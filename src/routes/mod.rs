use std::collections::HashMap;

use axum::{
    extract::{Query, State},
    http::Uri,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::entity::{
    NewCustomer, NewDepartment, NewEmployee, NewProduct, NewProject, NewSale, NewSupplier,
};
use crate::error::AppError;
use crate::gateway::Resource;
use crate::handlers::{records, reports};
use crate::report::CATALOG;
use crate::state::AppState;

pub mod health;

/// Create the main router
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/reports/", get(reports::list_reports));

    // Record routes
    router = record_routes::<NewDepartment>(router);
    router = record_routes::<NewEmployee>(router);
    router = record_routes::<NewProject>(router);
    router = record_routes::<NewCustomer>(router);
    router = record_routes::<NewSupplier>(router);
    router = record_routes::<NewProduct>(router);
    router = record_routes::<NewSale>(router);

    // Report routes
    for def in CATALOG {
        router = router.route(
            &def.path(),
            get(
                move |state: State<AppState>, query: Query<HashMap<String, String>>| {
                    reports::run_report(def, state, query)
                },
            ),
        );
    }

    router
        .fallback(fallback)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// `/{records}/` and `/{records}/bulk/` for one record type
fn record_routes<R: Resource>(router: Router<AppState>) -> Router<AppState> {
    router
        .route(
            &format!("/{}/", R::NAME),
            get(records::list::<R>).post(records::create::<R>),
        )
        .route(&format!("/{}/bulk/", R::NAME), post(records::create_bulk::<R>))
}

/// Fallback handler for 404
pub async fn fallback(uri: Uri) -> AppError {
    AppError::NotFound(format!("no route for {}", uri.path()))
}
