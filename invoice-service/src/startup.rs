use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::middleware::{metrics::metrics_middleware, tracing::request_id_middleware};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    app::health_check,
    customers::{
        create_customer, delete_customer, export_customers, get_customer, list_customers,
        update_customer,
    },
    invoices::{delete_invoice, export_invoices, get_invoice, list_invoices, save_invoice},
    metrics::metrics,
    products::{
        create_product, delete_product, export_products, get_product, list_products,
        update_product,
    },
};
use crate::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics))
        .route("/api/invoices", post(save_invoice).get(list_invoices))
        .route("/api/invoices/export", get(export_invoices))
        .route(
            "/api/invoices/:id",
            get(get_invoice).delete(delete_invoice),
        )
        .route("/api/customers", post(create_customer).get(list_customers))
        .route("/api/customers/export", get(export_customers))
        .route(
            "/api/customers/:id",
            get(get_customer).put(update_customer).delete(delete_customer),
        )
        .route("/api/products", post(create_product).get(list_products))
        .route("/api/products/export", get(export_products))
        .route(
            "/api/products/:id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .layer(CorsLayer::permissive())
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}
