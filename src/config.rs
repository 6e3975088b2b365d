use anyhow::Result;
use sea_orm::Database;

use crate::schemas::AppState;

/// Initialize application state for a given database URL.
pub async fn initialize_app_state_with_url(database_url: &str) -> Result<AppState> {
    dotenvy::dotenv().ok();

    tracing::info!("Connecting to database: {}", database_url);
    let db = Database::connect(database_url).await?;

    Ok(AppState {
        db,
        jwt_secret: get_jwt_secret(),
    })
}

/// Secret used to sign session tokens. Every instance behind a load
/// balancer must share the same value.
pub fn get_jwt_secret() -> String {
    std::env::var("JWT_SECRET").unwrap_or_else(|_| "shutterbook-dev-secret".to_string())
}
