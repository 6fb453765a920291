/// Configuration management for the Lift4M platform
///
/// Handles server bind settings and whether demo fixtures are seeded at startup.

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Startup data configuration
    pub seed: SeedConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server bind address (e.g., "0.0.0.0")
    pub host: String,
    /// Server port number
    pub port: u16,
}

/// Startup data configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Load the demo users and sample projects (default: true)
    pub demo_data: bool,
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Default for Config {
    /// Default configuration with ENV_VAR support for container deployment
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: std::env::var("LIFT4M_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: std::env::var("LIFT4M_PORT")
                    .unwrap_or_else(|_| "8000".to_string())
                    .parse()
                    .unwrap_or(8000),
            },
            seed: SeedConfig {
                demo_data: std::env::var("LIFT4M_SEED_DEMO")
                    .ok()
                    .and_then(|v| parse_flag(&v))
                    .unwrap_or(true),
            },
        }
    }
}
