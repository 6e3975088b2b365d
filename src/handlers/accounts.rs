use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use chrono::{DateTime, Utc};
use model::entities::{booking, profile, user};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};
use utoipa::ToSchema;

use crate::auth::{self, AuthUser};
use crate::error::ApiError;
use crate::handlers::bookings::BookingResponse;
use crate::schemas::{ApiResponse, AppState, Avatar};

/// Request to create a new account
#[derive(Deserialize, ToSchema)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    /// Must match `password` exactly.
    pub confirm_password: String,
}

/// Login credentials
#[derive(Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Successful login payload. `is_staff` tells the client which dashboard
/// to land on.
#[derive(Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    /// Bearer token for subsequent requests
    pub token: String,
    pub user_id: i32,
    pub username: String,
    pub is_staff: bool,
}

/// Account data returned by the API
#[derive(Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub is_staff: bool,
    pub date_joined: DateTime<Utc>,
}

impl From<user::Model> for UserResponse {
    fn from(user: user::Model) -> Self {
        UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            display_name: user.display_name,
            is_staff: user.is_staff,
            date_joined: user.date_joined,
        }
    }
}

/// Combined account and profile view
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ProfileResponse {
    pub id: i32,
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub avatar: Avatar,
    pub is_staff: bool,
    pub date_joined: DateTime<Utc>,
}

/// Profile edit form. The password pair is optional; empty strings count
/// as absent.
#[derive(Deserialize, ToSchema)]
pub struct UpdateProfileRequest {
    pub username: String,
    pub email: String,
    pub display_name: Option<String>,
    pub avatar: Avatar,
    pub password1: Option<String>,
    pub password2: Option<String>,
}

/// Dashboard summary for a regular account
#[derive(Serialize, Deserialize, ToSchema)]
pub struct UserDashboardResponse {
    pub is_staff: bool,
    /// Soonest upcoming booking, if any
    pub next_booking: Option<BookingResponse>,
    pub total_booked: u64,
    pub pending_sessions: u64,
    pub completed_sessions: u64,
}

/// Create a new account
#[utoipa::path(
    post,
    path = "/api/v1/auth/signup",
    tag = "accounts",
    request_body = SignupRequest,
    responses(
        (status = 201, description = "Account created successfully", body = ApiResponse<UserResponse>),
        (status = 400, description = "Validation error", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ApiError> {
    debug!("Creating account with username: {}", request.username);

    if request.password != request.confirm_password {
        return Err(ApiError::Validation("Passwords do not match.".to_string()));
    }
    if request.username.trim().is_empty() {
        return Err(ApiError::Validation("Username must not be empty.".to_string()));
    }

    let existing = user::Entity::find()
        .filter(user::Column::Username.eq(&request.username))
        .one(&state.db)
        .await?;
    if existing.is_some() {
        warn!("signup rejected, username '{}' already taken", request.username);
        return Err(ApiError::Validation("Username is already taken.".to_string()));
    }

    let password_hash = auth::hash_password(&request.password)?;

    // Account and profile are inserted in one transaction so the
    // one-profile-per-account invariant holds even across failures.
    let txn = state.db.begin().await?;

    let new_user = user::ActiveModel {
        username: Set(request.username.clone()),
        email: Set(request.email.clone()),
        display_name: Set(None),
        password_hash: Set(password_hash),
        is_staff: Set(false),
        date_joined: Set(Utc::now()),
        ..Default::default()
    };
    let created = new_user.insert(&txn).await?;

    let new_profile = profile::ActiveModel {
        user_id: Set(created.id),
        avatar: Set(profile::Avatar::default()),
        ..Default::default()
    };
    new_profile.insert(&txn).await?;

    txn.commit().await?;

    info!(
        "Account created successfully with ID: {}, username: {}",
        created.id, created.username
    );

    let response = ApiResponse {
        data: UserResponse::from(created),
        message: "Account created successfully! You can now log in.".to_string(),
        success: true,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// Exchange credentials for a session token
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "accounts",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid credentials", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    )
)]
#[instrument(skip(state, request))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let found = user::Entity::find()
        .filter(user::Column::Username.eq(&request.username))
        .one(&state.db)
        .await?
        .ok_or(ApiError::Authentication)?;

    if !auth::verify_password(&request.password, &found.password_hash)? {
        warn!("failed login attempt for username '{}'", request.username);
        return Err(ApiError::Authentication);
    }

    let token = auth::issue_token(&found, &state.jwt_secret)?;
    info!("User '{}' logged in", found.username);

    let response = ApiResponse {
        data: LoginResponse {
            token,
            user_id: found.id,
            username: found.username,
            is_staff: found.is_staff,
        },
        message: "Login successful".to_string(),
        success: true,
    };

    Ok(Json(response))
}

/// End the current session
#[utoipa::path(
    post,
    path = "/api/v1/auth/logout",
    tag = "accounts",
    responses(
        (status = 200, description = "Logged out", body = ApiResponse<String>),
        (status = 401, description = "Not authenticated", body = crate::schemas::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(auth))]
pub async fn logout(auth: AuthUser) -> Json<ApiResponse<String>> {
    // Tokens are stateless; logout is acknowledged so the client drops
    // the token and shows the goodbye message.
    info!("User '{}' logged out", auth.username);

    Json(ApiResponse {
        data: auth.username,
        message: "You have been logged out successfully!".to_string(),
        success: true,
    })
}

/// Dashboard statistics for the authenticated user
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "accounts",
    responses(
        (status = 200, description = "Dashboard data", body = ApiResponse<UserDashboardResponse>),
        (status = 401, description = "Not authenticated", body = crate::schemas::ErrorResponse),
        (status = 500, description = "Internal server error", body = crate::schemas::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth))]
pub async fn user_dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<UserDashboardResponse>>, ApiError> {
    // Staff accounts are redirected to the admin dashboard by the client.
    if auth.is_staff {
        return Ok(Json(ApiResponse {
            data: UserDashboardResponse {
                is_staff: true,
                next_booking: None,
                total_booked: 0,
                pending_sessions: 0,
                completed_sessions: 0,
            },
            message: "Staff accounts use the admin dashboard".to_string(),
            success: true,
        }));
    }

    let next_booking = booking::Entity::find()
        .filter(booking::Column::UserId.eq(auth.id))
        .filter(booking::Column::SessionDatetime.gte(Utc::now()))
        .order_by_asc(booking::Column::SessionDatetime)
        .one(&state.db)
        .await?;

    let total_booked = booking::Entity::find()
        .filter(booking::Column::UserId.eq(auth.id))
        .count(&state.db)
        .await?;

    let pending_sessions = booking::Entity::find()
        .filter(booking::Column::UserId.eq(auth.id))
        .filter(booking::Column::Status.eq(booking::BookingStatus::Pending))
        .count(&state.db)
        .await?;

    let completed_sessions = booking::Entity::find()
        .filter(booking::Column::UserId.eq(auth.id))
        .filter(booking::Column::Status.eq(booking::BookingStatus::Approved))
        .count(&state.db)
        .await?;

    debug!(
        "dashboard for user {}: {} bookings, {} pending",
        auth.id, total_booked, pending_sessions
    );

    let response = ApiResponse {
        data: UserDashboardResponse {
            is_staff: false,
            next_booking: next_booking.map(BookingResponse::from),
            total_booked,
            pending_sessions,
            completed_sessions,
        },
        message: "Dashboard retrieved successfully".to_string(),
        success: true,
    };

    Ok(Json(response))
}

/// Get the authenticated user's profile
#[utoipa::path(
    get,
    path = "/api/v1/profile",
    tag = "accounts",
    responses(
        (status = 200, description = "Profile data", body = ApiResponse<ProfileResponse>),
        (status = 401, description = "Not authenticated", body = crate::schemas::ErrorResponse),
        (status = 404, description = "Profile not found", body = crate::schemas::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth))]
pub async fn get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<ProfileResponse>>, ApiError> {
    let (account, user_profile) = load_account_with_profile(&state, auth.id).await?;

    let response = ApiResponse {
        data: profile_response(account, user_profile),
        message: "Profile retrieved successfully".to_string(),
        success: true,
    };

    Ok(Json(response))
}

/// Update the authenticated user's profile
#[utoipa::path(
    put,
    path = "/api/v1/profile",
    tag = "accounts",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = ApiResponse<ProfileResponse>),
        (status = 400, description = "Validation error", body = crate::schemas::ErrorResponse),
        (status = 401, description = "Not authenticated", body = crate::schemas::ErrorResponse),
        (status = 404, description = "Profile not found", body = crate::schemas::ErrorResponse)
    ),
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, auth, request))]
pub async fn update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<ProfileResponse>>, ApiError> {
    // Username collision check excludes the caller's own row so keeping
    // the current name is always allowed.
    let collision = user::Entity::find()
        .filter(user::Column::Username.eq(&request.username))
        .filter(user::Column::Id.ne(auth.id))
        .one(&state.db)
        .await?;
    if collision.is_some() {
        return Err(ApiError::Validation("Username is already taken.".to_string()));
    }

    let (account, user_profile) = load_account_with_profile(&state, auth.id).await?;

    let mut account_active: user::ActiveModel = account.into();
    account_active.username = Set(request.username.clone());
    account_active.email = Set(request.email.clone());
    account_active.display_name = Set(request.display_name.clone());

    let password1 = request.password1.as_deref().filter(|p| !p.is_empty());
    let password2 = request.password2.as_deref().filter(|p| !p.is_empty());
    if password1.is_some() || password2.is_some() {
        if password1 != password2 {
            return Err(ApiError::Validation("Passwords do not match.".to_string()));
        }
        if let Some(new_password) = password1 {
            account_active.password_hash = Set(auth::hash_password(new_password)?);
            info!("User {} changed their password", auth.id);
        }
    }

    let updated_account = account_active.update(&state.db).await?;

    // The avatar is written on every save, matching the profile form.
    let mut profile_active: profile::ActiveModel = user_profile.into();
    profile_active.avatar = Set(request.avatar.into());
    let updated_profile = profile_active.update(&state.db).await?;

    info!("Profile updated for user {}", auth.id);

    let response = ApiResponse {
        data: profile_response(updated_account, updated_profile),
        message: "Profile updated successfully.".to_string(),
        success: true,
    };

    Ok(Json(response))
}

async fn load_account_with_profile(
    state: &AppState,
    user_id: i32,
) -> Result<(user::Model, profile::Model), ApiError> {
    let account = user::Entity::find_by_id(user_id)
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound("User"))?;

    let user_profile = profile::Entity::find()
        .filter(profile::Column::UserId.eq(user_id))
        .one(&state.db)
        .await?
        .ok_or(ApiError::NotFound("Profile"))?;

    Ok((account, user_profile))
}

fn profile_response(account: user::Model, user_profile: profile::Model) -> ProfileResponse {
    ProfileResponse {
        id: account.id,
        username: account.username,
        email: account.email,
        display_name: account.display_name,
        avatar: user_profile.avatar.into(),
        is_staff: account.is_staff,
        date_joined: account.date_joined,
    }
}
