use std::collections::HashMap;

use axum::extract::{Path, State};
use axum::response::Json;
use chrono::{DateTime, Utc};
use model::entities::{booking, deleted_user, user};
use sea_orm::{ActiveModelTrait, EntityTrait, ModelTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use utoipa::ToSchema;

use crate::auth::Staff;
use crate::error::ApiError;
use crate::handlers::bookings::{BookingResponse, UpdateBookingRequest};
use crate::schemas::{ApiResponse, AppState};

/// How many entries each dashboard feed shows.
const FEED_LIMIT: usize = 5;

/// Per-user line in the admin user list
#[derive(Serialize, Deserialize, ToSchema)]
pub struct UserSummary {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub is_staff: bool,
    pub date_joined: DateTime<Utc>,
}

impl From<user::Model> for UserSummary {
    fn from(user: user::Model) -> Self {
        UserSummary {
            id: user.id,
            username: user.username,
            email: user.email,
            display_name: user.display_name,
            is_staff: user.is_staff,
            date_joined: user.date_joined,
        }
    }
}

/// Audit record of a removed account
#[derive(Serialize, Deserialize, ToSchema)]
pub struct DeletedUserResponse {
    pub username: String,
    pub deleted_by: String,
    pub timestamp: DateTime<Utc>,
}

impl From<deleted_user::Model> for DeletedUserResponse {
    fn from(record: deleted_user::Model) -> Self {
        DeletedUserResponse {
            username: record.username,
            deleted_by: record.deleted_by,
            timestamp: record.timestamp,
        }
    }
}

/// One line in the admin notification feed
#[derive(Serialize, Deserialize, ToSchema)]
pub struct NotificationMessage {
    pub message: String,
}

/// One line in the recent-activity feed
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ActivityLogEntry {
    pub timestamp: DateTime<Utc>,
    pub action: String,
}

/// Aggregated view backing the staff dashboard
#[derive(Serialize, Deserialize, ToSchema)]
pub struct AdminDashboardResponse {
    pub total_bookings: u64,
    pub approved_bookings: u64,
    pub cancelled_bookings: u64,
    pub total_users: u64,
    /// Bookings awaiting a staff decision
    pub pending_bookings: Vec<BookingResponse>,
    pub user_list: Vec<UserSummary>,
    pub deleted_users: Vec<DeletedUserResponse>,
    pub notifications: Vec<NotificationMessage>,
    pub activity_logs: Vec<ActivityLogEntry>,
}

/// Staff dashboard aggregation
#[utoipa::path(
    get,
    path = "/api/v1/admin/dashboard",
    tag = "admin",
    responses(
        (status = 200, description = "Dashboard data", body = ApiResponse<AdminDashboardResponse>),
        (status = 401, description = "Not authenticated", body = crate::schemas::ErrorResponse),
        (status = 403, description = "Staff privileges required", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, _staff))]
pub async fn admin_dashboard(
    State(state): State<AppState>,
    _staff: Staff,
) -> Result<Json<ApiResponse<AdminDashboardResponse>>, ApiError> {
    let all_bookings = booking::Entity::find()
        .order_by_desc(booking::Column::SessionDatetime)
        .all(&state.db)
        .await?;

    let users = user::Entity::find()
        .order_by_desc(user::Column::DateJoined)
        .all(&state.db)
        .await?;

    let deleted_users = deleted_user::Entity::find()
        .order_by_desc(deleted_user::Column::Timestamp)
        .all(&state.db)
        .await?;

    // Booking rows only carry the owner's ID; usernames for the feeds
    // come from one lookup over the user list. Rows orphaned by an
    // account deletion show as "unknown".
    let usernames: HashMap<i32, &str> = users
        .iter()
        .map(|u| (u.id, u.username.as_str()))
        .collect();
    let owner_name = |user_id: i32| usernames.get(&user_id).copied().unwrap_or("unknown");

    let total_bookings = all_bookings.len() as u64;
    let approved_bookings = all_bookings
        .iter()
        .filter(|b| b.status == booking::BookingStatus::Approved)
        .count() as u64;
    let cancelled_bookings = all_bookings
        .iter()
        .filter(|b| b.status == booking::BookingStatus::Cancelled)
        .count() as u64;

    // All three feeds are capped and ordered by creation time, newest
    // first.
    let mut recently_created: Vec<&booking::Model> = all_bookings.iter().collect();
    recently_created.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    let mut notifications: Vec<NotificationMessage> = recently_created
        .iter()
        .filter(|b| b.status == booking::BookingStatus::Pending)
        .take(FEED_LIMIT)
        .map(|b| NotificationMessage {
            message: format!(
                "{} requested a {} session.",
                owner_name(b.user_id),
                b.service_type.display()
            ),
        })
        .collect();

    notifications.extend(
        recently_created
            .iter()
            .filter(|b| b.status == booking::BookingStatus::Cancelled)
            .take(FEED_LIMIT)
            .map(|b| NotificationMessage {
                message: format!(
                    "{} cancelled their {} booking.",
                    owner_name(b.user_id),
                    b.service_type.display()
                ),
            }),
    );

    let activity_logs = recently_created
        .iter()
        .take(FEED_LIMIT)
        .map(|b| ActivityLogEntry {
            timestamp: b.created_at,
            action: format!("{} booked {}", owner_name(b.user_id), b.service_type.display()),
        })
        .collect();

    let pending_bookings = all_bookings
        .iter()
        .filter(|b| b.status == booking::BookingStatus::Pending)
        .cloned()
        .map(BookingResponse::from)
        .collect();

    debug!(
        "admin dashboard: {} bookings, {} users, {} deleted users",
        total_bookings,
        users.len(),
        deleted_users.len()
    );

    let response = ApiResponse {
        data: AdminDashboardResponse {
            total_bookings,
            approved_bookings,
            cancelled_bookings,
            total_users: users.len() as u64,
            pending_bookings,
            user_list: users.into_iter().map(UserSummary::from).collect(),
            deleted_users: deleted_users
                .into_iter()
                .map(DeletedUserResponse::from)
                .collect(),
            notifications,
            activity_logs,
        },
        message: "Dashboard retrieved successfully".to_string(),
        success: true,
    };

    Ok(Json(response))
}

/// Edit any booking
#[utoipa::path(
    put,
    path = "/api/v1/admin/bookings/{booking_id}",
    tag = "admin",
    params(
        ("booking_id" = i32, Path, description = "Booking ID")
    ),
    request_body = UpdateBookingRequest,
    responses(
        (status = 200, description = "Booking updated", body = ApiResponse<BookingResponse>),
        (status = 403, description = "Staff privileges required", body = crate::schemas::ErrorResponse),
        (status = 404, description = "Booking not found", body = crate::schemas::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, staff, request))]
pub async fn admin_update_booking(
    State(state): State<AppState>,
    staff: Staff,
    Path(booking_id): Path<i32>,
    Json(request): Json<UpdateBookingRequest>,
) -> Result<Json<ApiResponse<BookingResponse>>, ApiError> {
    let found = find_booking(&state, booking_id).await?;

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
    info!("Booking {} updated by staff '{}'", booking_id, staff.0.username);

    let response = ApiResponse {
        data: BookingResponse::from(updated),
        message: "Booking updated successfully.".to_string(),
        success: true,
    };

    Ok(Json(response))
}

/// Approve a booking
#[utoipa::path(
    post,
    path = "/api/v1/admin/bookings/{booking_id}/approve",
    tag = "admin",
    params(
        ("booking_id" = i32, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking approved", body = ApiResponse<BookingResponse>),
        (status = 403, description = "Staff privileges required", body = crate::schemas::ErrorResponse),
        (status = 404, description = "Booking not found", body = crate::schemas::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, staff))]
pub async fn approve_booking(
    State(state): State<AppState>,
    staff: Staff,
    Path(booking_id): Path<i32>,
) -> Result<Json<ApiResponse<BookingResponse>>, ApiError> {
    let found = find_booking(&state, booking_id).await?;

    // Approval resets the notification flag so the owner sees the
    // approval message on their next booking list.
    let mut active: booking::ActiveModel = found.into();
    active.status = Set(booking::BookingStatus::Approved);
    active.notified = Set(false);

    let updated = active.update(&state.db).await?;
    info!("Booking {} approved by staff '{}'", booking_id, staff.0.username);

    let response = ApiResponse {
        data: BookingResponse::from(updated),
        message: "Booking approved.".to_string(),
        success: true,
    };

    Ok(Json(response))
}

/// Disapprove a booking
#[utoipa::path(
    post,
    path = "/api/v1/admin/bookings/{booking_id}/disapprove",
    tag = "admin",
    params(
        ("booking_id" = i32, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking disapproved", body = ApiResponse<BookingResponse>),
        (status = 403, description = "Staff privileges required", body = crate::schemas::ErrorResponse),
        (status = 404, description = "Booking not found", body = crate::schemas::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, staff))]
pub async fn disapprove_booking(
    State(state): State<AppState>,
    staff: Staff,
    Path(booking_id): Path<i32>,
) -> Result<Json<ApiResponse<BookingResponse>>, ApiError> {
    let found = find_booking(&state, booking_id).await?;

    // Disapproval is marked already-notified: the owner learns of it
    // from the status column, with no separate message.
    let mut active: booking::ActiveModel = found.into();
    active.status = Set(booking::BookingStatus::Disapproved);
    active.notified = Set(true);

    let updated = active.update(&state.db).await?;
    info!(
        "Booking {} disapproved by staff '{}'",
        booking_id, staff.0.username
    );

    let response = ApiResponse {
        data: BookingResponse::from(updated),
        message: "Booking disapproved.".to_string(),
        success: true,
    };

    Ok(Json(response))
}

/// Reschedule a booking back into the pending queue
#[utoipa::path(
    post,
    path = "/api/v1/admin/bookings/{booking_id}/reschedule",
    tag = "admin",
    params(
        ("booking_id" = i32, Path, description = "Booking ID")
    ),
    request_body = UpdateBookingRequest,
    responses(
        (status = 200, description = "Booking rescheduled", body = ApiResponse<BookingResponse>),
        (status = 403, description = "Staff privileges required", body = crate::schemas::ErrorResponse),
        (status = 404, description = "Booking not found", body = crate::schemas::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, staff, request))]
pub async fn reschedule_booking(
    State(state): State<AppState>,
    staff: Staff,
    Path(booking_id): Path<i32>,
    Json(request): Json<UpdateBookingRequest>,
) -> Result<Json<ApiResponse<BookingResponse>>, ApiError> {
    let found = find_booking(&state, booking_id).await?;

    // Rescheduling voids any earlier decision: the booking re-enters
    // the pending queue and the owner will be notified afresh.
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
    active.status = Set(booking::BookingStatus::Pending);
    active.notified = Set(false);

    let updated = active.update(&state.db).await?;
    info!(
        "Booking {} rescheduled by staff '{}'",
        booking_id, staff.0.username
    );

    let response = ApiResponse {
        data: BookingResponse::from(updated),
        message: "Booking rescheduled and moved back to pending.".to_string(),
        success: true,
    };

    Ok(Json(response))
}

/// Cancel any booking
#[utoipa::path(
    post,
    path = "/api/v1/admin/bookings/{booking_id}/cancel",
    tag = "admin",
    params(
        ("booking_id" = i32, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking cancelled", body = ApiResponse<BookingResponse>),
        (status = 403, description = "Staff privileges required", body = crate::schemas::ErrorResponse),
        (status = 404, description = "Booking not found", body = crate::schemas::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, staff))]
pub async fn admin_cancel_booking(
    State(state): State<AppState>,
    staff: Staff,
    Path(booking_id): Path<i32>,
) -> Result<Json<ApiResponse<BookingResponse>>, ApiError> {
    let found = find_booking(&state, booking_id).await?;

    // Staff cancellation leaves the notification flag alone, so it is
    // never announced through the owner's notification feed.
    let (updated, message) = if found.status == booking::BookingStatus::Cancelled {
        (found, "Booking is already cancelled.")
    } else {
        let mut active: booking::ActiveModel = found.into();
        active.status = Set(booking::BookingStatus::Cancelled);
        let updated = active.update(&state.db).await?;
        info!(
            "Booking {} cancelled by staff '{}'",
            booking_id, staff.0.username
        );
        (updated, "Booking cancelled.")
    };

    let response = ApiResponse {
        data: BookingResponse::from(updated),
        message: message.to_string(),
        success: true,
    };

    Ok(Json(response))
}

/// Delete any booking
#[utoipa::path(
    delete,
    path = "/api/v1/admin/bookings/{booking_id}",
    tag = "admin",
    params(
        ("booking_id" = i32, Path, description = "Booking ID")
    ),
    responses(
        (status = 200, description = "Booking deleted", body = ApiResponse<String>),
        (status = 403, description = "Staff privileges required", body = crate::schemas::ErrorResponse),
        (status = 404, description = "Booking not found", body = crate::schemas::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, staff))]
pub async fn admin_delete_booking(
    State(state): State<AppState>,
    staff: Staff,
    Path(booking_id): Path<i32>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    let result = booking::Entity::delete_by_id(booking_id)
        .exec(&state.db)
        .await?;
    if result.rows_affected == 0 {
        return Err(ApiError::NotFound("Booking"));
    }

    info!("Booking {} deleted by staff '{}'", booking_id, staff.0.username);

    let response = ApiResponse {
        data: format!("Booking {} deleted", booking_id),
        message: "Booking deleted.".to_string(),
        success: true,
    };

    Ok(Json(response))
}

/// Delete a user account
#[utoipa::path(
    delete,
    path = "/api/v1/admin/users/{user_id}",
    tag = "admin",
    params(
        ("user_id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User deleted", body = ApiResponse<String>),
        (status = 400, description = "Cannot delete own account", body = crate::schemas::ErrorResponse),
        (status = 403, description = "Staff privileges required", body = crate::schemas::ErrorResponse),
        (status = 404, description = "User not found", body = crate::schemas::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, staff))]
pub async fn admin_delete_user(
    State(state): State<AppState>,
    staff: Staff,
    Path(user_id): Path<i32>,
) -> Result<Json<ApiResponse<String>>, ApiError> {
    if staff.0.id == user_id {
        return Err(ApiError::Validation(
            "You cannot delete your own account.".to_string(),
        ));
    }

    let target = user::Entity::find_by_id(user_id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    // The audit row is written first, so a failure between the two
    // steps leaves a record rather than an unexplained gap.
    let audit = deleted_user::ActiveModel {
        username: Set(target.username.clone()),
        deleted_by: Set(staff.0.username.clone()),
        timestamp: Set(Utc::now()),
        ..Default::default()
    };
    audit.insert(&state.db).await?;

    let username = target.username.clone();
    // Cascades to the user's profile and bookings.
    target.delete(&state.db).await?;

    info!("User '{}' deleted by staff '{}'", username, staff.0.username);

    let response = ApiResponse {
        data: format!("User '{}' deleted", username),
        message: "User deleted successfully.".to_string(),
        success: true,
    };

    Ok(Json(response))
}

async fn find_booking(state: &AppState, booking_id: i32) -> Result<booking::Model, ApiError> {
    booking::Entity::find_by_id(booking_id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound("Booking"))
}
