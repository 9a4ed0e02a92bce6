use anyhow::Result;
use env_logger::Builder;
use log::{info, LevelFilter};
use rocket::http::Method;
use rocket_cors::{AllowedHeaders, AllowedOrigins, CorsOptions};
use std::env;

const DEFAULT_API_BASE: &str = "https://www.googleapis.com/youtube/v3";
const DEFAULT_FRONTEND_ORIGIN: &str = "http://localhost:8080";

/// Resolved once at startup and handed to the components that need it.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub frontend_origin: String,
    pub youtube_api_base: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        AppConfig {
            frontend_origin: env::var("FRONTEND_ORIGIN")
                .unwrap_or_else(|_| DEFAULT_FRONTEND_ORIGIN.to_string()),
            youtube_api_base: env::var("YOUTUBE_API_BASE")
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
        }
    }
}

pub fn init_logger() {
    Builder::new().filter_level(LevelFilter::Info).init();
    info!("Starting Rocket backend...");
}

pub fn load_environment() {
    dotenv::dotenv().ok();
}

pub fn create_cors(app_config: &AppConfig) -> Result<rocket_cors::Cors> {
    let cors = CorsOptions::default()
        .allowed_origins(AllowedOrigins::some_exact(&[&app_config.frontend_origin]))
        .allowed_methods(
            vec![Method::Get, Method::Post, Method::Options]
                .into_iter()
                .map(From::from)
                .collect(),
        )
        .allowed_headers(AllowedHeaders::some(&["Accept", "Content-Type"]))
        .allow_credentials(true)
        .to_cors()
        .map_err(|e| anyhow::anyhow!("Failed to create CORS options: {}", e))?;

    Ok(cors)
}
