use crate::env_variable_utils::BACKEND_URL;
use crate::models::{CredentialStatus, ErrorResponse, SearchResults, VideoDetail};
use crate::search::options::{SearchMode, TimeWindow};
use gloo_net::http::{Request, Response};
use web_sys::RequestCredentials;
use yew::prelude::*;

/// Backend errors arrive as `{error, message}`; fall back to the raw body
/// when the shape is something else entirely.
async fn extract_error(response: Response) -> String {
    let status = response.status();
    match response.text().await {
        Ok(error_text) => match serde_json::from_str::<ErrorResponse>(&error_text) {
            Ok(error_response) => error_response.message,
            Err(_) => format!("Search failed ({}): {}", status, error_text),
        },
        Err(_) => format!("Search failed with status: {}", status),
    }
}

pub async fn execute_search(
    query: String,
    mode: SearchMode,
    window: TimeWindow,
    page_token: Option<String>,
    results: UseStateHandle<Option<SearchResults>>,
    error_message: UseStateHandle<Option<String>>,
    loading: UseStateHandle<bool>,
) {
    let mut url = format!(
        "{}/search?query={}&mode={}&duration={}",
        &*BACKEND_URL,
        urlencoding::encode(&query),
        mode.key(),
        window.key()
    );
    if let Some(token) = &page_token {
        url.push_str("&page_token=");
        url.push_str(&urlencoding::encode(token));
    }

    match Request::get(&url)
        .credentials(RequestCredentials::Include)
        .send()
        .await
    {
        Ok(response) => {
            if response.ok() {
                match response.json::<SearchResults>().await {
                    Ok(fetched) => {
                        let merged = match ((*results).clone(), fetched, page_token.is_some()) {
                            // A continuation page extends the list already on
                            // screen instead of replacing it.
                            (
                                Some(SearchResults::Videos {
                                    videos: mut shown, ..
                                }),
                                SearchResults::Videos {
                                    videos: more,
                                    next_page_token,
                                },
                                true,
                            ) => {
                                shown.extend(more);
                                SearchResults::Videos {
                                    videos: shown,
                                    next_page_token,
                                }
                            }
                            (_, fetched, _) => fetched,
                        };
                        results.set(Some(merged));
                        error_message.set(None);
                    }
                    Err(e) => {
                        error_message.set(Some(format!("Failed to parse response: {}", e)));
                    }
                }
            } else {
                error_message.set(Some(extract_error(response).await));
            }
        }
        Err(e) => {
            error_message.set(Some(format!("Network error: {}", e)));
        }
    }

    loading.set(false);
}

pub async fn fetch_video_detail(
    video_id: String,
    detail: UseStateHandle<Option<VideoDetail>>,
    error_message: UseStateHandle<Option<String>>,
    loading: UseStateHandle<bool>,
) {
    let url = format!("{}/video/{}", &*BACKEND_URL, video_id);

    match Request::get(&url)
        .credentials(RequestCredentials::Include)
        .send()
        .await
    {
        Ok(response) => {
            if response.ok() {
                match response.json::<VideoDetail>().await {
                    Ok(fetched) => {
                        detail.set(Some(fetched));
                        error_message.set(None);
                    }
                    Err(e) => error_message.set(Some(format!("Failed to parse response: {}", e))),
                }
            } else {
                error_message.set(Some(extract_error(response).await));
            }
        }
        Err(e) => error_message.set(Some(format!("Network error: {}", e))),
    }

    loading.set(false);
}

pub async fn fetch_credential_status(count: UseStateHandle<Option<usize>>) {
    let url = format!("{}/credentials", &*BACKEND_URL);

    if let Ok(response) = Request::get(&url)
        .credentials(RequestCredentials::Include)
        .send()
        .await
    {
        if let Ok(status) = response.json::<CredentialStatus>().await {
            count.set(Some(status.count));
        }
    }
}

pub async fn save_credentials(
    keys_blob: String,
    count: UseStateHandle<Option<usize>>,
    error_message: UseStateHandle<Option<String>>,
    saving: UseStateHandle<bool>,
) {
    let url = format!("{}/credentials", &*BACKEND_URL);
    let body = serde_json::json!({ "keys": keys_blob });

    let request = Request::post(&url)
        .credentials(RequestCredentials::Include)
        .json(&body);

    match request {
        Ok(request) => match request.send().await {
            Ok(response) if response.ok() => match response.json::<CredentialStatus>().await {
                Ok(status) => {
                    count.set(Some(status.count));
                    error_message.set(None);
                }
                Err(e) => error_message.set(Some(format!("Failed to parse response: {}", e))),
            },
            Ok(response) => error_message.set(Some(extract_error(response).await)),
            Err(e) => error_message.set(Some(format!("Network error: {}", e))),
        },
        Err(e) => error_message.set(Some(format!("Failed to encode request: {}", e))),
    }

    saving.set(false);
}
