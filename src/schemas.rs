use model::entities::{booking, profile};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, ToSchema};

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Secret used to sign and verify session tokens
    pub jwt_secret: String,
}

/// API response wrapper
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success status
    pub success: bool,
}

/// Error response
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Serialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// Bookable service categories as exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Portrait,
    Wedding,
    Product,
    Event,
}

impl From<ServiceType> for booking::ServiceType {
    fn from(value: ServiceType) -> Self {
        match value {
            ServiceType::Portrait => booking::ServiceType::Portrait,
            ServiceType::Wedding => booking::ServiceType::Wedding,
            ServiceType::Product => booking::ServiceType::Product,
            ServiceType::Event => booking::ServiceType::Event,
        }
    }
}

impl From<booking::ServiceType> for ServiceType {
    fn from(value: booking::ServiceType) -> Self {
        match value {
            booking::ServiceType::Portrait => ServiceType::Portrait,
            booking::ServiceType::Wedding => ServiceType::Wedding,
            booking::ServiceType::Product => ServiceType::Product,
            booking::ServiceType::Event => ServiceType::Event,
        }
    }
}

/// Booking lifecycle status as exposed by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Approved,
    Disapproved,
    Cancelled,
}

impl From<BookingStatus> for booking::BookingStatus {
    fn from(value: BookingStatus) -> Self {
        match value {
            BookingStatus::Pending => booking::BookingStatus::Pending,
            BookingStatus::Approved => booking::BookingStatus::Approved,
            BookingStatus::Disapproved => booking::BookingStatus::Disapproved,
            BookingStatus::Cancelled => booking::BookingStatus::Cancelled,
        }
    }
}

impl From<booking::BookingStatus> for BookingStatus {
    fn from(value: booking::BookingStatus) -> Self {
        match value {
            booking::BookingStatus::Pending => BookingStatus::Pending,
            booking::BookingStatus::Approved => BookingStatus::Approved,
            booking::BookingStatus::Disapproved => BookingStatus::Disapproved,
            booking::BookingStatus::Cancelled => BookingStatus::Cancelled,
        }
    }
}

/// Avatar selection from the fixed icon set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Avatar {
    #[serde(rename = "iconA")]
    IconA,
    #[serde(rename = "iconB")]
    IconB,
    #[serde(rename = "iconC")]
    IconC,
}

impl From<Avatar> for profile::Avatar {
    fn from(value: Avatar) -> Self {
        match value {
            Avatar::IconA => profile::Avatar::IconA,
            Avatar::IconB => profile::Avatar::IconB,
            Avatar::IconC => profile::Avatar::IconC,
        }
    }
}

impl From<profile::Avatar> for Avatar {
    fn from(value: profile::Avatar) -> Self {
        match value {
            profile::Avatar::IconA => Avatar::IconA,
            profile::Avatar::IconB => Avatar::IconB,
            profile::Avatar::IconC => Avatar::IconC,
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::accounts::signup,
        crate::handlers::accounts::login,
        crate::handlers::accounts::logout,
        crate::handlers::accounts::user_dashboard,
        crate::handlers::accounts::get_profile,
        crate::handlers::accounts::update_profile,
        crate::handlers::bookings::create_booking,
        crate::handlers::bookings::my_bookings,
        crate::handlers::bookings::get_booking,
        crate::handlers::bookings::update_booking,
        crate::handlers::bookings::cancel_booking,
        crate::handlers::bookings::delete_booking,
        crate::handlers::admin::admin_dashboard,
        crate::handlers::admin::admin_update_booking,
        crate::handlers::admin::approve_booking,
        crate::handlers::admin::disapprove_booking,
        crate::handlers::admin::reschedule_booking,
        crate::handlers::admin::admin_cancel_booking,
        crate::handlers::admin::admin_delete_booking,
        crate::handlers::admin::admin_delete_user,
    ),
    components(
        schemas(
            ErrorResponse,
            HealthResponse,
            ServiceType,
            BookingStatus,
            Avatar,
            crate::handlers::accounts::SignupRequest,
            crate::handlers::accounts::LoginRequest,
            crate::handlers::accounts::LoginResponse,
            crate::handlers::accounts::UserResponse,
            crate::handlers::accounts::ProfileResponse,
            crate::handlers::accounts::UpdateProfileRequest,
            crate::handlers::accounts::UserDashboardResponse,
            crate::handlers::bookings::CreateBookingRequest,
            crate::handlers::bookings::UpdateBookingRequest,
            crate::handlers::bookings::BookingResponse,
            crate::handlers::bookings::MyBookingsResponse,
            crate::handlers::bookings::DeleteBookingResponse,
            crate::handlers::admin::AdminDashboardResponse,
            crate::handlers::admin::UserSummary,
            crate::handlers::admin::DeletedUserResponse,
            crate::handlers::admin::NotificationMessage,
            crate::handlers::admin::ActivityLogEntry,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "accounts", description = "Signup, login and profile endpoints"),
        (name = "bookings", description = "Booking lifecycle endpoints for owners"),
        (name = "admin", description = "Staff-only booking and user administration")
    ),
    info(
        title = "Shutterbook API",
        description = "Photography booking management API - accounts, bookings and staff administration",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
