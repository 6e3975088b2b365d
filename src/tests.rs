#[cfg(test)]
mod integration_tests {
    use crate::schemas::ApiResponse;
    use crate::test_utils::test_utils::{
        create_staff_user, setup_test_app, setup_test_app_with_state,
    };
    use axum::http::{header, HeaderValue, StatusCode};
    use axum_test::TestServer;
    use chrono::{Duration, Utc};
    use model::entities::{booking, deleted_user, user};
    use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
    use serde_json::json;

    fn bearer(token: &str) -> HeaderValue {
        HeaderValue::from_str(&format!("Bearer {}", token)).expect("invalid token header")
    }

    /// Register an account through the API and log in, returning the
    /// session token.
    async fn signup_and_login(server: &TestServer, username: &str, password: &str) -> String {
        let signup_response = server
            .post("/api/v1/auth/signup")
            .json(&json!({
                "username": username,
                "email": format!("{}@example.com", username),
                "password": password,
                "confirm_password": password,
            }))
            .await;
        signup_response.assert_status(StatusCode::CREATED);

        login(server, username, password).await
    }

    async fn login(server: &TestServer, username: &str, password: &str) -> String {
        let response = server
            .post("/api/v1/auth/login")
            .json(&json!({ "username": username, "password": password }))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        body.data["token"].as_str().expect("missing token").to_string()
    }

    /// Create a booking for the given session owner, returning its ID.
    async fn create_booking(server: &TestServer, token: &str, service_type: &str) -> i64 {
        let session = Utc::now() + Duration::days(7);
        let response = server
            .post("/api/v1/bookings")
            .add_header(header::AUTHORIZATION, bearer(token))
            .json(&json!({
                "service_type": service_type,
                "session_datetime": session.to_rfc3339(),
                "notes": "test session",
            }))
            .await;
        response.assert_status(StatusCode::CREATED);
        let body: ApiResponse<serde_json::Value> = response.json();
        body.data["id"].as_i64().expect("missing booking id")
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/health").await;

        response.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn test_signup_creates_account_with_default_profile() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let token = signup_and_login(&server, "alice", "secret123").await;

        let response = server
            .get("/api/v1/profile")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert!(body.success);
        assert_eq!(body.data["username"], "alice");
        assert_eq!(body.data["avatar"], "iconA");
        assert_eq!(body.data["is_staff"], false);
    }

    #[tokio::test]
    async fn test_signup_rejects_mismatched_passwords() {
        let (app, state) = setup_test_app_with_state().await;
        let server = TestServer::new(app).unwrap();

        let response = server
            .post("/api/v1/auth/signup")
            .json(&json!({
                "username": "bob",
                "email": "bob@example.com",
                "password": "secret123",
                "confirm_password": "secret124",
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"], "Passwords do not match.");

        // No account may exist after the failed signup.
        let count = user::Entity::find()
            .filter(user::Column::Username.eq("bob"))
            .count(&state.db)
            .await
            .unwrap();
        assert_eq!(count, 0);
    }

    #[tokio::test]
    async fn test_signup_rejects_taken_username() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        signup_and_login(&server, "alice", "secret123").await;

        let response = server
            .post("/api/v1/auth/signup")
            .json(&json!({
                "username": "alice",
                "email": "other@example.com",
                "password": "different1",
                "confirm_password": "different1",
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "Username is already taken.");
    }

    #[tokio::test]
    async fn test_login_rejects_bad_password() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        signup_and_login(&server, "alice", "secret123").await;

        let response = server
            .post("/api/v1/auth/login")
            .json(&json!({ "username": "alice", "password": "wrong" }))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "INVALID_CREDENTIALS");
    }

    #[tokio::test]
    async fn test_requests_without_token_are_rejected() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let response = server.get("/api/v1/bookings").await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_booking_starts_pending() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let token = signup_and_login(&server, "alice", "secret123").await;
        let booking_id = create_booking(&server, &token, "portrait").await;

        let response = server
            .get(&format!("/api/v1/bookings/{}", booking_id))
            .add_header(header::AUTHORIZATION, bearer(&token))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["status"], "pending");
        assert_eq!(body.data["notified"], false);
        assert_eq!(body.data["service_type"], "portrait");
    }

    #[tokio::test]
    async fn test_owner_cannot_see_another_users_booking() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let alice = signup_and_login(&server, "alice", "secret123").await;
        let booking_id = create_booking(&server, &alice, "wedding").await;

        let mallory = signup_and_login(&server, "mallory", "secret123").await;
        let response = server
            .get(&format!("/api/v1/bookings/{}", booking_id))
            .add_header(header::AUTHORIZATION, bearer(&mallory))
            .await;

        response.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_owner_update_does_not_touch_status() {
        let (app, state) = setup_test_app_with_state().await;
        let server = TestServer::new(app).unwrap();

        create_staff_user(&state.db, "admin", "adminpass").await;
        let admin = login(&server, "admin", "adminpass").await;

        let alice = signup_and_login(&server, "alice", "secret123").await;
        let booking_id = create_booking(&server, &alice, "portrait").await;

        server
            .post(&format!("/api/v1/admin/bookings/{}/approve", booking_id))
            .add_header(header::AUTHORIZATION, bearer(&admin))
            .await
            .assert_status(StatusCode::OK);

        let response = server
            .put(&format!("/api/v1/bookings/{}", booking_id))
            .add_header(header::AUTHORIZATION, bearer(&alice))
            .json(&json!({ "notes": "bring the wide lens" }))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["status"], "approved");
        assert_eq!(body.data["notes"], "bring the wide lens");
    }

    #[tokio::test]
    async fn test_owner_cancel_is_idempotent() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let token = signup_and_login(&server, "alice", "secret123").await;
        let booking_id = create_booking(&server, &token, "event").await;

        let first = server
            .post(&format!("/api/v1/bookings/{}/cancel", booking_id))
            .add_header(header::AUTHORIZATION, bearer(&token))
            .await;
        first.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = first.json();
        assert_eq!(body.data["status"], "cancelled");

        // A second cancel succeeds without changing anything.
        let second = server
            .post(&format!("/api/v1/bookings/{}/cancel", booking_id))
            .add_header(header::AUTHORIZATION, bearer(&token))
            .await;
        second.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = second.json();
        assert_eq!(body.data["status"], "cancelled");
        assert!(body.success);
    }

    #[tokio::test]
    async fn test_approval_notification_is_delivered_once() {
        let (app, state) = setup_test_app_with_state().await;
        let server = TestServer::new(app).unwrap();

        create_staff_user(&state.db, "admin", "adminpass").await;
        let admin = login(&server, "admin", "adminpass").await;

        let alice = signup_and_login(&server, "alice", "secret123").await;
        let booking_id = create_booking(&server, &alice, "portrait").await;

        let approve = server
            .post(&format!("/api/v1/admin/bookings/{}/approve", booking_id))
            .add_header(header::AUTHORIZATION, bearer(&admin))
            .await;
        approve.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = approve.json();
        assert_eq!(body.data["status"], "approved");
        assert_eq!(body.data["notified"], false);

        // First listing surfaces the approval message and flags it seen.
        let first = server
            .get("/api/v1/bookings")
            .add_header(header::AUTHORIZATION, bearer(&alice))
            .await;
        first.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = first.json();
        let notifications = body.data["notifications"].as_array().unwrap();
        assert_eq!(notifications.len(), 1);
        assert!(notifications[0]
            .as_str()
            .unwrap()
            .contains("Portrait Session"));
        assert!(notifications[0].as_str().unwrap().contains("APPROVED"));
        assert_eq!(body.data["bookings"][0]["notified"], true);

        // Second listing is quiet.
        let second = server
            .get("/api/v1/bookings")
            .add_header(header::AUTHORIZATION, bearer(&alice))
            .await;
        let body: ApiResponse<serde_json::Value> = second.json();
        assert!(body.data["notifications"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_disapproval_is_flagged_without_a_message() {
        let (app, state) = setup_test_app_with_state().await;
        let server = TestServer::new(app).unwrap();

        create_staff_user(&state.db, "admin", "adminpass").await;
        let admin = login(&server, "admin", "adminpass").await;

        let alice = signup_and_login(&server, "alice", "secret123").await;
        let booking_id = create_booking(&server, &alice, "wedding").await;

        let disapprove = server
            .post(&format!("/api/v1/admin/bookings/{}/disapprove", booking_id))
            .add_header(header::AUTHORIZATION, bearer(&admin))
            .await;
        disapprove.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = disapprove.json();
        assert_eq!(body.data["status"], "disapproved");
        assert_eq!(body.data["notified"], true);

        let listing = server
            .get("/api/v1/bookings")
            .add_header(header::AUTHORIZATION, bearer(&alice))
            .await;
        let body: ApiResponse<serde_json::Value> = listing.json();
        assert!(body.data["notifications"].as_array().unwrap().is_empty());
        assert_eq!(body.data["bookings"][0]["status"], "disapproved");
    }

    #[tokio::test]
    async fn test_reschedule_returns_booking_to_pending() {
        let (app, state) = setup_test_app_with_state().await;
        let server = TestServer::new(app).unwrap();

        create_staff_user(&state.db, "admin", "adminpass").await;
        let admin = login(&server, "admin", "adminpass").await;

        let alice = signup_and_login(&server, "alice", "secret123").await;
        let booking_id = create_booking(&server, &alice, "product").await;

        server
            .post(&format!("/api/v1/admin/bookings/{}/approve", booking_id))
            .add_header(header::AUTHORIZATION, bearer(&admin))
            .await
            .assert_status(StatusCode::OK);

        let new_session = Utc::now() + Duration::days(21);
        let response = server
            .post(&format!("/api/v1/admin/bookings/{}/reschedule", booking_id))
            .add_header(header::AUTHORIZATION, bearer(&admin))
            .json(&json!({ "session_datetime": new_session.to_rfc3339() }))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["status"], "pending");
        assert_eq!(body.data["notified"], false);
    }

    #[tokio::test]
    async fn test_admin_endpoints_reject_non_staff() {
        let (app, state) = setup_test_app_with_state().await;
        let server = TestServer::new(app).unwrap();

        let alice = signup_and_login(&server, "alice", "secret123").await;
        let booking_id = create_booking(&server, &alice, "portrait").await;

        let response = server
            .post(&format!("/api/v1/admin/bookings/{}/approve", booking_id))
            .add_header(header::AUTHORIZATION, bearer(&alice))
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
        let body: serde_json::Value = response.json();
        assert_eq!(body["code"], "PERMISSION_DENIED");

        let dashboard = server
            .get("/api/v1/admin/dashboard")
            .add_header(header::AUTHORIZATION, bearer(&alice))
            .await;
        dashboard.assert_status(StatusCode::FORBIDDEN);

        // The rejected approval must not have touched the booking.
        let stored = booking::Entity::find_by_id(booking_id as i32)
            .one(&state.db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.status, booking::BookingStatus::Pending);
    }

    #[tokio::test]
    async fn test_delete_by_unrelated_user_is_a_quiet_noop() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let alice = signup_and_login(&server, "alice", "secret123").await;
        let booking_id = create_booking(&server, &alice, "event").await;

        let carol = signup_and_login(&server, "carol", "secret123").await;
        let response = server
            .delete(&format!("/api/v1/bookings/{}", booking_id))
            .add_header(header::AUTHORIZATION, bearer(&carol))
            .await;

        // No error and no deletion.
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["deleted"], false);

        let still_there = server
            .get(&format!("/api/v1/bookings/{}", booking_id))
            .add_header(header::AUTHORIZATION, bearer(&alice))
            .await;
        still_there.assert_status(StatusCode::OK);
    }

    #[tokio::test]
    async fn test_owner_delete_removes_booking() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let alice = signup_and_login(&server, "alice", "secret123").await;
        let booking_id = create_booking(&server, &alice, "portrait").await;

        let response = server
            .delete(&format!("/api/v1/bookings/{}", booking_id))
            .add_header(header::AUTHORIZATION, bearer(&alice))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["deleted"], true);

        let gone = server
            .get(&format!("/api/v1/bookings/{}", booking_id))
            .add_header(header::AUTHORIZATION, bearer(&alice))
            .await;
        gone.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_admin_delete_user_audits_then_cascades() {
        let (app, state) = setup_test_app_with_state().await;
        let server = TestServer::new(app).unwrap();

        create_staff_user(&state.db, "admin", "adminpass").await;
        let admin = login(&server, "admin", "adminpass").await;

        let alice = signup_and_login(&server, "alice", "secret123").await;
        create_booking(&server, &alice, "portrait").await;
        create_booking(&server, &alice, "wedding").await;

        let alice_id = user::Entity::find()
            .filter(user::Column::Username.eq("alice"))
            .one(&state.db)
            .await
            .unwrap()
            .unwrap()
            .id;

        let response = server
            .delete(&format!("/api/v1/admin/users/{}", alice_id))
            .add_header(header::AUTHORIZATION, bearer(&admin))
            .await;
        response.assert_status(StatusCode::OK);

        // Audit row names both parties.
        let audit = deleted_user::Entity::find()
            .one(&state.db)
            .await
            .unwrap()
            .expect("audit row missing");
        assert_eq!(audit.username, "alice");
        assert_eq!(audit.deleted_by, "admin");

        // Account and owned bookings are gone.
        let remaining_users = user::Entity::find_by_id(alice_id)
            .one(&state.db)
            .await
            .unwrap();
        assert!(remaining_users.is_none());
        let remaining_bookings = booking::Entity::find()
            .filter(booking::Column::UserId.eq(alice_id))
            .count(&state.db)
            .await
            .unwrap();
        assert_eq!(remaining_bookings, 0);
    }

    #[tokio::test]
    async fn test_admin_cannot_delete_own_account() {
        let (app, state) = setup_test_app_with_state().await;
        let server = TestServer::new(app).unwrap();

        let staff = create_staff_user(&state.db, "admin", "adminpass").await;
        let admin = login(&server, "admin", "adminpass").await;

        let response = server
            .delete(&format!("/api/v1/admin/users/{}", staff.id))
            .add_header(header::AUTHORIZATION, bearer(&admin))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "You cannot delete your own account.");

        // No audit row for the refused deletion.
        let audits = deleted_user::Entity::find().count(&state.db).await.unwrap();
        assert_eq!(audits, 0);
    }

    #[tokio::test]
    async fn test_admin_dashboard_aggregates() {
        let (app, state) = setup_test_app_with_state().await;
        let server = TestServer::new(app).unwrap();

        create_staff_user(&state.db, "admin", "adminpass").await;
        let admin = login(&server, "admin", "adminpass").await;

        let alice = signup_and_login(&server, "alice", "secret123").await;
        let bob = signup_and_login(&server, "bob", "secret123").await;

        let approved_id = create_booking(&server, &alice, "portrait").await;
        create_booking(&server, &alice, "wedding").await;
        let cancelled_id = create_booking(&server, &bob, "event").await;

        server
            .post(&format!("/api/v1/admin/bookings/{}/approve", approved_id))
            .add_header(header::AUTHORIZATION, bearer(&admin))
            .await
            .assert_status(StatusCode::OK);
        server
            .post(&format!("/api/v1/bookings/{}/cancel", cancelled_id))
            .add_header(header::AUTHORIZATION, bearer(&bob))
            .await
            .assert_status(StatusCode::OK);

        let response = server
            .get("/api/v1/admin/dashboard")
            .add_header(header::AUTHORIZATION, bearer(&admin))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        let data = &body.data;

        assert_eq!(data["total_bookings"], 3);
        assert_eq!(data["approved_bookings"], 1);
        assert_eq!(data["cancelled_bookings"], 1);
        assert_eq!(data["total_users"], 3);
        assert_eq!(data["pending_bookings"].as_array().unwrap().len(), 1);

        let notifications: Vec<&str> = data["notifications"]
            .as_array()
            .unwrap()
            .iter()
            .map(|n| n["message"].as_str().unwrap())
            .collect();
        assert!(notifications
            .iter()
            .any(|m| m.contains("alice requested a Wedding Photoshoot session.")));
        assert!(notifications
            .iter()
            .any(|m| m.contains("bob cancelled their Event Coverage booking.")));

        let activity = data["activity_logs"].as_array().unwrap();
        assert_eq!(activity.len(), 3);
        assert!(activity
            .iter()
            .any(|entry| entry["action"] == "alice booked Portrait Session"));
    }

    #[tokio::test]
    async fn test_user_dashboard_counts() {
        let (app, state) = setup_test_app_with_state().await;
        let server = TestServer::new(app).unwrap();

        create_staff_user(&state.db, "admin", "adminpass").await;
        let admin = login(&server, "admin", "adminpass").await;

        let alice = signup_and_login(&server, "alice", "secret123").await;
        let approved_id = create_booking(&server, &alice, "portrait").await;
        create_booking(&server, &alice, "wedding").await;

        server
            .post(&format!("/api/v1/admin/bookings/{}/approve", approved_id))
            .add_header(header::AUTHORIZATION, bearer(&admin))
            .await
            .assert_status(StatusCode::OK);

        let response = server
            .get("/api/v1/dashboard")
            .add_header(header::AUTHORIZATION, bearer(&alice))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["is_staff"], false);
        assert_eq!(body.data["total_booked"], 2);
        assert_eq!(body.data["pending_sessions"], 1);
        assert_eq!(body.data["completed_sessions"], 1);
        assert!(body.data["next_booking"].is_object());
    }

    #[tokio::test]
    async fn test_update_profile_changes_avatar_and_password() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let token = signup_and_login(&server, "alice", "secret123").await;

        let response = server
            .put("/api/v1/profile")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .json(&json!({
                "username": "alice",
                "email": "alice@example.com",
                "display_name": "Alice A.",
                "avatar": "iconC",
                "password1": "newsecret1",
                "password2": "newsecret1",
            }))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["avatar"], "iconC");
        assert_eq!(body.data["display_name"], "Alice A.");

        // Old password no longer works, the new one does.
        server
            .post("/api/v1/auth/login")
            .json(&json!({ "username": "alice", "password": "secret123" }))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
        login(&server, "alice", "newsecret1").await;
    }

    #[tokio::test]
    async fn test_update_profile_rejects_mismatched_password_pair() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let token = signup_and_login(&server, "alice", "secret123").await;

        let response = server
            .put("/api/v1/profile")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .json(&json!({
                "username": "alice",
                "email": "alice@example.com",
                "avatar": "iconA",
                "password1": "newsecret1",
                "password2": "other",
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "Passwords do not match.");

        // The old password still works.
        login(&server, "alice", "secret123").await;
    }

    #[tokio::test]
    async fn test_update_profile_rejects_username_collision() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        signup_and_login(&server, "alice", "secret123").await;
        let bob = signup_and_login(&server, "bob", "secret123").await;

        let response = server
            .put("/api/v1/profile")
            .add_header(header::AUTHORIZATION, bearer(&bob))
            .json(&json!({
                "username": "alice",
                "email": "bob@example.com",
                "avatar": "iconB",
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json();
        assert_eq!(body["error"], "Username is already taken.");
    }

    #[tokio::test]
    async fn test_update_profile_keeps_own_username() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let token = signup_and_login(&server, "alice", "secret123").await;

        // Saving the form with the unchanged username is not a collision.
        let response = server
            .put("/api/v1/profile")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .json(&json!({
                "username": "alice",
                "email": "alice@example.com",
                "avatar": "iconB",
            }))
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["username"], "alice");
        assert_eq!(body.data["avatar"], "iconB");
    }

    #[tokio::test]
    async fn test_logout_acknowledges_session_end() {
        let app = setup_test_app().await;
        let server = TestServer::new(app).unwrap();

        let token = signup_and_login(&server, "alice", "secret123").await;

        let response = server
            .post("/api/v1/auth/logout")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .await;

        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.message, "You have been logged out successfully!");
    }

    #[tokio::test]
    async fn test_admin_delete_booking() {
        let (app, state) = setup_test_app_with_state().await;
        let server = TestServer::new(app).unwrap();

        create_staff_user(&state.db, "admin", "adminpass").await;
        let admin = login(&server, "admin", "adminpass").await;

        let alice = signup_and_login(&server, "alice", "secret123").await;
        let booking_id = create_booking(&server, &alice, "product").await;

        let response = server
            .delete(&format!("/api/v1/admin/bookings/{}", booking_id))
            .add_header(header::AUTHORIZATION, bearer(&admin))
            .await;
        response.assert_status(StatusCode::OK);

        // Deleting it again is a 404.
        let again = server
            .delete(&format!("/api/v1/admin/bookings/{}", booking_id))
            .add_header(header::AUTHORIZATION, bearer(&admin))
            .await;
        again.assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_admin_cancel_leaves_notification_flag_alone() {
        let (app, state) = setup_test_app_with_state().await;
        let server = TestServer::new(app).unwrap();

        create_staff_user(&state.db, "admin", "adminpass").await;
        let admin = login(&server, "admin", "adminpass").await;

        let alice = signup_and_login(&server, "alice", "secret123").await;
        let booking_id = create_booking(&server, &alice, "wedding").await;

        // Disapprove first so the flag is set, then cancel.
        server
            .post(&format!("/api/v1/admin/bookings/{}/disapprove", booking_id))
            .add_header(header::AUTHORIZATION, bearer(&admin))
            .await
            .assert_status(StatusCode::OK);

        let response = server
            .post(&format!("/api/v1/admin/bookings/{}/cancel", booking_id))
            .add_header(header::AUTHORIZATION, bearer(&admin))
            .await;
        response.assert_status(StatusCode::OK);
        let body: ApiResponse<serde_json::Value> = response.json();
        assert_eq!(body.data["status"], "cancelled");
        assert_eq!(body.data["notified"], true);
    }
}
