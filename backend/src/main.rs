#[macro_use]
extern crate rocket;

mod api;
mod config;
mod error;
mod models;
mod services;
mod utils;

use crate::config::AppConfig;
use crate::services::credential_store::CredentialStore;
use crate::services::youtube::YouTubeClient;
use rocket::{Build, Rocket};

pub struct AppState {
    pub youtube: YouTubeClient,
    pub credentials: CredentialStore,
}

pub fn build_rocket(app_config: AppConfig) -> Rocket<Build> {
    let cors = config::create_cors(&app_config).expect("Failed to create CORS options");

    let state = AppState {
        youtube: YouTubeClient::new(app_config.youtube_api_base.clone()),
        credentials: CredentialStore::new(),
    };

    rocket::build()
        .manage(state)
        .attach(cors)
        .mount("/search", routes![api::search::search_trending])
        .mount(
            "/credentials",
            routes![
                api::credentials::update_credentials,
                api::credentials::credential_status
            ],
        )
        .mount("/video", routes![api::video::video_detail])
}

#[launch]
fn rocket() -> _ {
    config::load_environment();
    config::init_logger();

    build_rocket(AppConfig::from_env())
}
