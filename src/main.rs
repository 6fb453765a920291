/// Lift4M: lift installation and service workflow platform
///
/// Main entry point. Loads configuration from the environment and starts the
/// HTTP server.

use lift4m::{config::Config, server::start_server};

/// Application entry point
///
/// The server provides:
/// - User listing at /api/users
/// - Role-filtered dashboard at /api/dashboard?user_id=
/// - Project detail, stage updates and assignments at /api/projects/*
/// - Health check at /healthz
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::default();

    start_server(config).await?;

    Ok(())
}
