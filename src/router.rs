use axum::{
    extract::DefaultBodyLimit,
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    middleware::from_fn_with_state,
    routing::{get, patch, post, put},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::Role;
use crate::config::AppConfig;
use crate::handlers::{elevated, protected, public};
use crate::middleware::{request_gate, require_role};
use crate::state::AppState;

/// Build the full application router.
///
/// Every request passes the request gate; `/SuperAdmin/*` additionally
/// requires the `SuperAdmin` role.
pub fn app(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        .merge(public_routes())
        .merge(protected_routes())
        .nest("/SuperAdmin", superadmin_routes())
        .layer(from_fn_with_state(state.verifier.clone(), request_gate))
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes))
        .layer(cors_layer(&config.security.cors_origins))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .route("/docs/", get(public::docs))
        .route("/docs/api", get(public::docs))
        .route("/login", post(public::login))
        .route("/logout", post(public::logout))
        .route("/submit", post(public::submit))
}

fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/me", get(protected::me))
        .route(
            "/restaurants/:restaurant_id/menus",
            get(protected::menu_list).post(protected::menu_create),
        )
        .route("/restaurants/:restaurant_id/orders", get(protected::order_list))
        .route("/orders", post(protected::order_create))
        .route("/orders/:order_id/status", put(protected::order_status_update))
        .route("/orders/:order_id/payment", get(protected::payment_for_order))
        .route("/payments", post(protected::payment_create))
}

fn superadmin_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/restaurants",
            get(elevated::restaurant_list).post(elevated::restaurant_create),
        )
        .route(
            "/restaurants/:id",
            get(elevated::restaurant_show)
                .put(elevated::restaurant_update)
                .delete(elevated::restaurant_delete),
        )
        .route("/admins", get(elevated::admin_list).post(elevated::admin_create))
        .route(
            "/admins/:id",
            get(elevated::admin_show)
                .put(elevated::admin_update)
                .delete(elevated::admin_delete),
        )
        .route(
            "/notifications",
            get(elevated::notification_list).post(elevated::notification_create),
        )
        .route(
            "/notifications/:id",
            get(elevated::notification_show)
                .put(elevated::notification_update)
                .delete(elevated::notification_delete),
        )
        .route("/notifications/:id/read", patch(elevated::notification_mark_read))
        .route_layer(from_fn_with_state(Role::SuperAdmin, require_role))
}

/// Credentialed CORS for the configured origins only.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    if origins.is_empty() {
        return CorsLayer::new();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::PATCH, Method::DELETE])
        .allow_headers([CONTENT_TYPE])
        .allow_credentials(true)
}
