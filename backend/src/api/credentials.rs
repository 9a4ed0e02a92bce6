use crate::api::session_id;
use crate::models::{CredentialStatus, CredentialUpdate};
use crate::services::credential_store::parse_credential_list;
use crate::AppState;
use log::info;
use rocket::http::CookieJar;
use rocket::serde::json::Json;
use rocket::{get, post, State};

/// Replaces the session's key list with the pasted blob. Only the count goes
/// back out; key material is never echoed.
#[post("/", data = "<update>")]
pub async fn update_credentials(
    update: Json<CredentialUpdate>,
    cookies: &CookieJar<'_>,
    state: &State<AppState>,
) -> Json<CredentialStatus> {
    let session = session_id(cookies);
    let keys = parse_credential_list(&update.keys);
    let count = keys.len();

    info!("session stored {count} API keys");
    state.credentials.replace(&session, keys);

    Json(CredentialStatus { count })
}

#[get("/")]
pub async fn credential_status(
    cookies: &CookieJar<'_>,
    state: &State<AppState>,
) -> Json<CredentialStatus> {
    let session = session_id(cookies);
    Json(CredentialStatus {
        count: state.credentials.count(&session),
    })
}
