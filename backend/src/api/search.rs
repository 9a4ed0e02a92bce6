use crate::api::session_id;
use crate::models::{ErrorResponse, SearchResults, SearchWindow};
use crate::services::rotation::execute_with_rotation;
use crate::services::{channel_search, video_search};
use crate::AppState;
use rocket::http::CookieJar;
use rocket::serde::json::Json;
use rocket::{get, State};

#[get("/?<query>&<mode>&<duration>&<page_token>")]
pub async fn search_trending(
    query: String,
    mode: Option<String>,
    duration: Option<String>,
    page_token: Option<String>,
    cookies: &CookieJar<'_>,
    state: &State<AppState>,
) -> Result<Json<SearchResults>, ErrorResponse> {
    let session = session_id(cookies);
    let keys = state.credentials.credentials_for(&session);
    let window = SearchWindow::from_param(duration.as_deref().unwrap_or("all"));

    let youtube = &state.youtube;
    let query = query.as_str();

    let results = match mode.as_deref().unwrap_or("videos") {
        "channels" => {
            let channels = execute_with_rotation(&keys, |key| async move {
                channel_search::search_channels(youtube, &key, query).await
            })
            .await?;
            SearchResults::Channels { channels }
        }
        _ => {
            let token = page_token.as_deref();
            let page = execute_with_rotation(&keys, |key| async move {
                video_search::search_videos(youtube, &key, query, window, token).await
            })
            .await?;
            SearchResults::Videos {
                videos: page.videos,
                next_page_token: page.next_page_token,
            }
        }
    };

    Ok(Json(results))
}

#[cfg(test)]
mod tests {
    use crate::config::AppConfig;
    use crate::{build_rocket, AppState};
    use rocket::http::Status;
    use rocket::local::asynchronous::Client;

    fn test_config() -> AppConfig {
        AppConfig {
            frontend_origin: "http://localhost:8080".to_string(),
            // Port 0 is never connectable, so any accidental upstream call
            // fails fast instead of leaving the test hanging on the network.
            youtube_api_base: "http://127.0.0.1:0".to_string(),
        }
    }

    async fn test_client() -> Client {
        Client::tracked(build_rocket(test_config()))
            .await
            .expect("valid rocket instance")
    }

    #[rocket::async_test]
    async fn search_without_credentials_is_rejected_before_any_network() {
        let client = test_client().await;
        let response = client.get("/search?query=cats").dispatch().await;

        assert_eq!(response.status(), Status::BadRequest);
        let body = response.into_string().await.unwrap();
        assert!(body.contains("no_credentials"));
        assert!(body.contains("No API keys configured"));
    }

    #[rocket::async_test]
    async fn search_mints_a_session_cookie() {
        let client = test_client().await;
        let response = client.get("/search?query=cats&mode=channels").dispatch().await;

        assert!(response.cookies().get(crate::api::SESSION_COOKIE).is_some());
    }

    #[rocket::async_test]
    async fn unreachable_upstream_is_a_fatal_error() {
        let client = test_client().await;
        client
            .post("/credentials")
            .header(rocket::http::ContentType::JSON)
            .body(r#"{"keys": "test-key"}"#)
            .dispatch()
            .await;

        let response = client.get("/search?query=cats&duration=24h").dispatch().await;
        assert_eq!(response.status(), Status::BadGateway);
        let body = response.into_string().await.unwrap();
        assert!(body.contains("upstream_error"));
    }

    #[rocket::async_test]
    async fn state_holds_no_credentials_for_fresh_sessions() {
        let rocket = build_rocket(test_config());
        let state = rocket.state::<AppState>().unwrap();
        assert!(state.credentials.credentials_for("unseen").is_empty());
    }
}
