pub mod credentials;
pub mod search;
pub mod video;

pub use credentials::*;
pub use search::*;
pub use video::*;

use rocket::http::{Cookie, CookieJar};
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "scout_session";

/// Resolves the caller's session id, minting a cookie on first contact. The
/// id is opaque; key material only ever lives server-side.
pub fn session_id(cookies: &CookieJar<'_>) -> String {
    if let Some(cookie) = cookies.get(SESSION_COOKIE) {
        return cookie.value().to_string();
    }
    let id = Uuid::new_v4().to_string();
    cookies.add(Cookie::new(SESSION_COOKIE, id.clone()));
    id
}
