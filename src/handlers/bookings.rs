use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use chrono::{DateTime, Utc};
use model::entities::booking;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use utoipa::ToSchema;

use crate::auth::AuthUser;
use crate::error::ApiError;
use crate::schemas::{ApiResponse, AppState, BookingStatus, ServiceType};

/// Booking data returned by the API
#[derive(Serialize, Deserialize, ToSchema)]
pub struct BookingResponse {
    pub id: i32,
    pub user_id: i32,
    pub service_type: ServiceType,
    pub session_datetime: DateTime<Utc>,
    pub status: BookingStatus,
    pub notes: Option<String>,
    pub notified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<booking::Model> for BookingResponse {
    fn from(booking: booking::Model) -> Self {
        BookingResponse {
            id: booking.id,
            user_id: booking.user_id,
            service_type: booking.service_type.into(),
            session_datetime: booking.session_datetime,
            status: booking.status.into(),
            notes: booking.notes,
            notified: booking.notified,
            created_at: booking.created_at,
        }
    }
}

/// Request to book a session
#[derive(Deserialize, ToSchema)]
pub struct CreateBookingRequest {
    pub service_type: ServiceType,
    pub session_datetime: DateTime<Utc>,
    pub notes: Option<String>,
}

/// Partial booking update; omitted fields keep their current value
#[derive(Deserialize, ToSchema)]
pub struct UpdateBookingRequest {
    pub service_type: Option<ServiceType>,
    pub session_datetime: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// The caller's bookings plus any newly surfaced status notifications
#[derive(Serialize, Deserialize, ToSchema)]
pub struct MyBookingsResponse {
    pub bookings: Vec<BookingResponse>,
    /// Approval messages not yet seen by the owner. Each is delivered
    /// exactly once.
    pub notifications: Vec<String>,
}

/// Outcome of a delete request
#[derive(Serialize, Deserialize, ToSchema)]
pub struct DeleteBookingResponse {
    pub deleted: bool,
}

/// Book a session
#[utoipa::path(
    post,
    path = "/api/v1/bookings",
    tag = "bookings",
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = ApiResponse<BookingResponse>),
        (status = 401, description = "Not authenticated", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth, request))]
pub async fn create_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<BookingResponse>>), ApiError> {
    // Every booking enters the queue as pending, whatever the client
    // sends. Approval is a staff decision.
    let new_booking = booking::ActiveModel {
        user_id: Set(auth.id),
        service_type: Set(request.service_type.into()),
        session_datetime: Set(request.session_datetime),
        status: Set(booking::BookingStatus::Pending),
        notes: Set(request.notes),
        notified: Set(false),
        created_at: Set(Utc::now()),
        ..Default::default()
    };

    let created = new_booking.insert(&state.db).await?;
    info!(
        "Booking {} created by user {} for {}",
        created.id,
        auth.id,
        created.service_type.display()
    );

    let response = ApiResponse {
        data: BookingResponse::from(created),
        message: "Your booking request has been submitted and is pending approval.".to_string(),
        success: true,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// List the caller's bookings
#[utoipa::path(
    get,
    path = "/api/v1/bookings",
    tag = "bookings",
    responses(
        (status = 200, description = "Bookings with pending notifications", body = ApiResponse<MyBookingsResponse>),
        (status = 401, description = "Not authenticated", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth))]
pub async fn my_bookings(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<MyBookingsResponse>>, ApiError> {
    let owned = booking::Entity::find()
        .filter(booking::Column::UserId.eq(auth.id))
        .order_by_desc(booking::Column::SessionDatetime)
        .all(&state.db)
        .await?;

    let mut notifications = Vec::new();
    let mut bookings = Vec::with_capacity(owned.len());

    for item in owned {
        let surfaced = match (item.status, item.notified) {
            (booking::BookingStatus::Approved, false) => {
                notifications.push(format!(
                    "Your booking for {} on {} is now APPROVED.",
                    item.service_type.display(),
                    item.session_datetime.format("%Y-%m-%d %H:%M")
                ));
                true
            }
            // Disapprovals are marked seen without a message; the status
            // itself is visible in the list.
            (booking::BookingStatus::Disapproved, false) => true,
            _ => false,
        };

        if surfaced {
            let mut active: booking::ActiveModel = item.into();
            active.notified = Set(true);
            bookings.push(active.update(&state.db).await?.into());
        } else {
            bookings.push(item.into());
        }
    }

    debug!(
        "user {} listed {} bookings, {} new notifications",
        auth.id,
        bookings.len(),
        notifications.len()
    );

    let response = ApiResponse {
        data: MyBookingsResponse {
            bookings,
            notifications,
        },
        message: "Bookings retrieved successfully".to_string(),
        success: true,
    };

    Ok(Json(response))
}

/// Get one of the caller's bookings
#[utoipa::path(
    get,
    path = "/api/v1/bookings/{booking_id}",
    tag = "bookings",
    params(
        ("booking_id" = i32, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking data", body = ApiResponse<BookingResponse>),
        (status = 401, description = "Not authenticated", body = crate::schemas::ErrorResponse),
        (status = 404, description = "Booking not found", body = crate::schemas::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth))]
pub async fn get_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(booking_id): Path<i32>,
) -> Result<Json<ApiResponse<BookingResponse>>, ApiError> {
    let found = find_owned_booking(&state, auth.id, booking_id).await?;

    let response = ApiResponse {
        data: BookingResponse::from(found),
        message: "Booking retrieved successfully".to_string(),
        success: true,
    };

    Ok(Json(response))
}

/// Edit one of the caller's bookings
#[utoipa::path(
    put,
    path = "/api/v1/bookings/{booking_id}",
    tag = "bookings",
    params(
        ("booking_id" = i32, Path, description = "Booking ID")
    ),
    request_body = UpdateBookingRequest,
    responses(
        (status = 200, description = "Booking updated", body = ApiResponse<BookingResponse>),
        (status = 401, description = "Not authenticated", body = crate::schemas::ErrorResponse),
        (status = 404, description = "Booking not found", body = crate::schemas::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth, request))]
pub async fn update_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(booking_id): Path<i32>,
    Json(request): Json<UpdateBookingRequest>,
) -> Result<Json<ApiResponse<BookingResponse>>, ApiError> {
    let found = find_owned_booking(&state, auth.id, booking_id).await?;

    // Owners edit details only; status and the notification flag stay
    // as staff left them.
    let mut active: booking::ActiveModel = found.into();
    if let Some(service_type) = request.service_type {
        active.service_type = Set(service_type.into());
    }
    if let Some(session_datetime) = request.session_datetime {
        active.session_datetime = Set(session_datetime);
    }
    if let Some(notes) = request.notes {
        active.notes = Set(Some(notes));
    }

    let updated = active.update(&state.db).await?;
    info!("Booking {} updated by owner {}", booking_id, auth.id);

    let response = ApiResponse {
        data: BookingResponse::from(updated),
        message: "Booking updated successfully.".to_string(),
        success: true,
    };

    Ok(Json(response))
}

/// Cancel one of the caller's bookings
#[utoipa::path(
    post,
    path = "/api/v1/bookings/{booking_id}/cancel",
    tag = "bookings",
    params(
        ("booking_id" = i32, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking cancelled", body = ApiResponse<BookingResponse>),
        (status = 401, description = "Not authenticated", body = crate::schemas::ErrorResponse),
        (status = 404, description = "Booking not found", body = crate::schemas::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth))]
pub async fn cancel_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(booking_id): Path<i32>,
) -> Result<Json<ApiResponse<BookingResponse>>, ApiError> {
    let found = find_owned_booking(&state, auth.id, booking_id).await?;

    // Cancelling an already-cancelled booking is a no-op, not an error.
    let (updated, message) = if found.status == booking::BookingStatus::Cancelled {
        (found, "Booking is already cancelled.")
    } else {
        let mut active: booking::ActiveModel = found.into();
        active.status = Set(booking::BookingStatus::Cancelled);
        active.notified = Set(false);
        let updated = active.update(&state.db).await?;
        info!("Booking {} cancelled by owner {}", booking_id, auth.id);
        (updated, "Your booking has been cancelled.")
    };

    let response = ApiResponse {
        data: BookingResponse::from(updated),
        message: message.to_string(),
        success: true,
    };

    Ok(Json(response))
}

/// Delete a booking
#[utoipa::path(
    delete,
    path = "/api/v1/bookings/{booking_id}",
    tag = "bookings",
    params(
        ("booking_id" = i32, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Outcome of the delete request", body = ApiResponse<DeleteBookingResponse>),
        (status = 401, description = "Not authenticated", body = crate::schemas::ErrorResponse),
        (status = 404, description = "Booking not found", body = crate::schemas::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth))]
pub async fn delete_booking(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(booking_id): Path<i32>,
) -> Result<Json<ApiResponse<DeleteBookingResponse>>, ApiError> {
    let found = booking::Entity::find_by_id(booking_id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound("Booking"))?;

    let (deleted, message) = if auth.is_staff {
        found.delete(&state.db).await?;
        info!("Booking {} deleted by staff user {}", booking_id, auth.id);
        (true, "Booking deleted successfully.")
    } else if found.user_id == auth.id {
        found.delete(&state.db).await?;
        info!("Booking {} removed by owner {}", booking_id, auth.id);
        (true, "Booking removed successfully.")
    } else {
        // A caller who neither owns the booking nor holds staff rights
        // gets a quiet no-op rather than an error.
        warn!(
            "user {} attempted to delete booking {} owned by user {}",
            auth.id, booking_id, found.user_id
        );
        (false, "No action taken.")
    };

    let response = ApiResponse {
        data: DeleteBookingResponse { deleted },
        message: message.to_string(),
        success: true,
    };

    Ok(Json(response))
}

async fn find_owned_booking(
    state: &AppState,
    user_id: i32,
    booking_id: i32,
) -> Result<booking::Model, ApiError> {
    // Another user's booking reads the same as a missing one.
    booking::Entity::find_by_id(booking_id)
        .filter(booking::Column::UserId.eq(user_id))
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound("Booking"))
}
