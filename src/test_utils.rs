#[cfg(test)]
pub mod test_utils {
    use crate::auth;
    use crate::router::create_router;
    use crate::schemas::AppState;
    use axum::Router;
    use chrono::Utc;
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    /// Create an in-memory SQLite database for testing
    pub async fn setup_test_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:")
            .await
            .expect("Failed to connect to in-memory database");

        // Run migrations
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");

        db
    }

    /// Create AppState for testing
    pub async fn setup_test_app_state() -> AppState {
        let db = setup_test_db().await;

        AppState {
            db,
            jwt_secret: "test-secret".to_string(),
        }
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| match level.to_uppercase().as_str() {
                "ERROR" => Some(Level::ERROR),
                "WARN" => Some(Level::WARN),
                "INFO" => Some(Level::INFO),
                "DEBUG" => Some(Level::DEBUG),
                "TRACE" => Some(Level::TRACE),
                _ => None,
            })
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr) // Output to stderr, which is captured by tests
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing
    pub async fn setup_test_app() -> Router {
        let (router, _state) = setup_test_app_with_state().await;
        router
    }

    /// Create axum app plus the shared state, for tests that verify
    /// database contents directly.
    pub async fn setup_test_app_with_state() -> (Router, AppState) {
        // Initialize tracing for tests
        let _ = init_test_tracing();

        let state = setup_test_app_state().await;
        let router = create_router(state.clone());
        (router, state)
    }

    /// Insert a staff account directly. Staff accounts are never created
    /// through the public signup endpoint.
    pub async fn create_staff_user(
        db: &DatabaseConnection,
        username: &str,
        password: &str,
    ) -> model::entities::user::Model {
        let password_hash = auth::hash_password(password).expect("Failed to hash password");

        let staff = model::entities::user::ActiveModel {
            username: Set(username.to_string()),
            email: Set(format!("{}@example.com", username)),
            display_name: Set(None),
            password_hash: Set(password_hash),
            is_staff: Set(true),
            date_joined: Set(Utc::now()),
            ..Default::default()
        };
        let staff = staff.insert(db).await.expect("Failed to create staff user");

        let profile = model::entities::profile::ActiveModel {
            user_id: Set(staff.id),
            avatar: Set(model::entities::profile::Avatar::default()),
            ..Default::default()
        };
        profile
            .insert(db)
            .await
            .expect("Failed to create staff profile");

        staff
    }
}
