//! Application router configuration.

use axum::{
    Router,
    routing::{delete, get, post},
};

use crate::{
    AppState,
    confirmation::resolve_confirmation_endpoint,
    dashboard::{get_dashboard_page, get_reports_page},
    endpoints,
    offline::{get_service_worker, get_web_manifest},
    settings::{clear_data_endpoint, export_endpoint, get_settings_page, import_endpoint},
    static_files::serve_static_asset,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_create_transaction_page,
        get_transactions_page,
    },
};

/// Return a router with all the app's routes.
///
/// Any GET request that does not match a route is answered from the static
/// asset directory in [AppState::static_assets].
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_dashboard_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(
            endpoints::NEW_TRANSACTION_VIEW,
            get(get_create_transaction_page),
        )
        .route(endpoints::REPORTS_VIEW, get(get_reports_page))
        .route(endpoints::SETTINGS_VIEW, get(get_settings_page));

    let api_routes = Router::new()
        .route(
            endpoints::TRANSACTIONS_API,
            post(create_transaction_endpoint),
        )
        .route(
            endpoints::DELETE_TRANSACTION,
            delete(delete_transaction_endpoint),
        )
        .route(endpoints::CLEAR_TRANSACTIONS, post(clear_data_endpoint))
        .route(endpoints::EXPORT, get(export_endpoint))
        .route(endpoints::IMPORT, post(import_endpoint))
        .route(
            endpoints::CONFIRMATION,
            post(resolve_confirmation_endpoint),
        );

    let offline_routes = Router::new()
        .route(endpoints::SERVICE_WORKER, get(get_service_worker))
        .route(endpoints::WEB_MANIFEST, get(get_web_manifest));

    page_routes
        .merge(api_routes)
        .merge(offline_routes)
        .fallback(get(serve_static_asset))
        .with_state(state)
}
