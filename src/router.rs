use crate::handlers::{
    accounts::{get_profile, login, logout, signup, update_profile, user_dashboard},
    admin::{
        admin_cancel_booking, admin_dashboard, admin_delete_booking, admin_delete_user,
        admin_update_booking, approve_booking, disapprove_booking, reschedule_booking,
    },
    bookings::{
        cancel_booking, create_booking, delete_booking, get_booking, my_bookings, update_booking,
    },
    health::health_check,
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Account routes
        .route("/api/v1/auth/signup", post(signup))
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/logout", post(logout))
        .route("/api/v1/dashboard", get(user_dashboard))
        .route("/api/v1/profile", get(get_profile))
        .route("/api/v1/profile", put(update_profile))
        // Booking routes (owner-scoped)
        .route("/api/v1/bookings", post(create_booking))
        .route("/api/v1/bookings", get(my_bookings))
        .route("/api/v1/bookings/:booking_id", get(get_booking))
        .route("/api/v1/bookings/:booking_id", put(update_booking))
        .route("/api/v1/bookings/:booking_id", delete(delete_booking))
        .route("/api/v1/bookings/:booking_id/cancel", post(cancel_booking))
        // Admin routes (staff only)
        .route("/api/v1/admin/dashboard", get(admin_dashboard))
        .route("/api/v1/admin/bookings/:booking_id", put(admin_update_booking))
        .route("/api/v1/admin/bookings/:booking_id", delete(admin_delete_booking))
        .route(
            "/api/v1/admin/bookings/:booking_id/approve",
            post(approve_booking),
        )
        .route(
            "/api/v1/admin/bookings/:booking_id/disapprove",
            post(disapprove_booking),
        )
        .route(
            "/api/v1/admin/bookings/:booking_id/reschedule",
            post(reschedule_booking),
        )
        .route(
            "/api/v1/admin/bookings/:booking_id/cancel",
            post(admin_cancel_booking),
        )
        .route("/api/v1/admin/users/:user_id", delete(admin_delete_user))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
