use crate::api::session_id;
use crate::models::{ErrorResponse, VideoDetail};
use crate::services::rotation::execute_with_rotation;
use crate::services::video_search;
use crate::AppState;
use rocket::http::CookieJar;
use rocket::serde::json::Json;
use rocket::{get, State};

#[get("/<id>")]
pub async fn video_detail(
    id: &str,
    cookies: &CookieJar<'_>,
    state: &State<AppState>,
) -> Result<Json<VideoDetail>, ErrorResponse> {
    let session = session_id(cookies);
    let keys = state.credentials.credentials_for(&session);

    let youtube = &state.youtube;
    let detail = execute_with_rotation(&keys, |key| async move {
        video_search::video_detail(youtube, &key, id).await
    })
    .await?;

    Ok(Json(detail))
}

#[cfg(test)]
mod tests {
    use crate::build_rocket;
    use crate::config::AppConfig;
    use rocket::http::Status;
    use rocket::local::asynchronous::Client;

    #[rocket::async_test]
    async fn detail_lookup_needs_credentials_too() {
        let config = AppConfig {
            frontend_origin: "http://localhost:8080".to_string(),
            youtube_api_base: "http://127.0.0.1:0".to_string(),
        };
        let client = Client::tracked(build_rocket(config))
            .await
            .expect("valid rocket instance");

        let response = client.get("/video/dQw4w9WgXcQ").dispatch().await;
        assert_eq!(response.status(), Status::BadRequest);
        assert!(response
            .into_string()
            .await
            .unwrap()
            .contains("no_credentials"));
    }
}
