//! Application configuration management.
//!
//! Configuration comes entirely from environment variables, deserialized
//! into a type-safe struct with the `envy` crate.

use serde::Deserialize;

/// Configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    #[serde(default = "default_port")]
    pub server_port: u16,
}

/// Default port if SERVER_PORT is not set.
fn default_port() -> u16 {
    3000
}

impl Config {
    /// Load configuration from the environment.
    ///
    /// Loads a `.env` file first if one exists (optional), then
    /// deserializes environment variables into a `Config`.
    ///
    /// # Errors
    ///
    /// Returns an error if `DATABASE_URL` is missing or a value cannot be
    /// parsed into its expected type.
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();

        // Field names map to upper-case variables: database_url -> DATABASE_URL
        envy::from_env::<Config>()
    }
}
