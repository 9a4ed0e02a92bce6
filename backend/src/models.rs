use crate::error::SearchError;
use chrono::{DateTime, Duration, Utc};
use rocket::http::{ContentType, Status};
use rocket::request::Request;
use rocket::response::Responder;
use rocket::serde::{Deserialize, Serialize};
use rocket::{response, Response};
use std::io::Cursor;

/// One Shorts candidate, scored for view velocity. Built fresh per request;
/// `views_per_hour` is only comparable to records from the same batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoRecord {
    pub video_id: String,
    pub title: String,
    pub channel_id: String,
    pub channel_name: String,
    pub views: i64,
    pub thumbnail: String,
    pub published_at: DateTime<Utc>,
    pub hours_live: f64,
    pub views_per_hour: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopVideo {
    pub video_id: String,
    pub title: String,
    pub views: i64,
}

/// A channel surfaced by reverse scouting, paired with the best-performing
/// recent Short that got it onto the list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelRecord {
    pub channel_id: String,
    pub title: String,
    pub thumbnail: String,
    pub subscribers: i64,
    pub total_views: i64,
    pub video_count: i64,
    pub top_video: TopVideo,
}

/// Recency filter applied to the upstream search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchWindow {
    Day,
    ThreeDays,
    Week,
    Month,
    All,
}

impl SearchWindow {
    pub fn from_param(value: &str) -> Self {
        match value {
            "24h" => SearchWindow::Day,
            "72h" => SearchWindow::ThreeDays,
            "7d" => SearchWindow::Week,
            "30d" => SearchWindow::Month,
            _ => SearchWindow::All,
        }
    }

    pub fn hours(&self) -> Option<i64> {
        match self {
            SearchWindow::Day => Some(24),
            SearchWindow::ThreeDays => Some(72),
            SearchWindow::Week => Some(7 * 24),
            SearchWindow::Month => Some(30 * 24),
            SearchWindow::All => None,
        }
    }

    /// Lower publish-time bound, or `None` for an unbounded search.
    pub fn published_after(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.hours().map(|h| now - Duration::hours(h))
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum SearchResults {
    Videos {
        videos: Vec<VideoRecord>,
        next_page_token: Option<String>,
    },
    Channels {
        channels: Vec<ChannelRecord>,
    },
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CredentialUpdate {
    /// Free-text blob of API keys, split on commas, whitespace and newlines.
    pub keys: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CredentialStatus {
    pub count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoDetail {
    pub video: VideoRecord,
    pub likes: i64,
    pub tags: Vec<String>,
    pub recent_uploads: Vec<VideoRecord>,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip)]
    pub status: Status,
}

impl From<SearchError> for ErrorResponse {
    fn from(err: SearchError) -> Self {
        let (error, status) = match &err {
            SearchError::NoCredentials => ("no_credentials", Status::BadRequest),
            SearchError::QuotaExceeded(_)
            | SearchError::RateLimited(_)
            | SearchError::CredentialsExhausted(_) => {
                ("credentials_exhausted", Status::ServiceUnavailable)
            }
            SearchError::Upstream(_) => ("upstream_error", Status::BadGateway),
        };

        let message = match &err {
            SearchError::NoCredentials => {
                "No API keys configured. Open the key settings and paste at least one \
                 YouTube Data API key."
                    .to_string()
            }
            SearchError::CredentialsExhausted(count) => format!(
                "All {count} API keys are out of quota. Add fresh keys or retry after \
                 the daily quota reset."
            ),
            SearchError::QuotaExceeded(detail) | SearchError::RateLimited(detail) => {
                format!("The API key ran out of quota: {detail}")
            }
            SearchError::Upstream(detail) => format!("YouTube request failed: {detail}"),
        };

        ErrorResponse {
            error: error.to_string(),
            message,
            status,
        }
    }
}

impl<'r> Responder<'r, 'static> for ErrorResponse {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status;
        let json = serde_json::to_string(&self).map_err(|_| Status::InternalServerError)?;
        Response::build()
            .status(status)
            .header(ContentType::JSON)
            .sized_body(json.len(), Cursor::new(json))
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_params_map_to_hour_counts() {
        assert_eq!(SearchWindow::from_param("24h").hours(), Some(24));
        assert_eq!(SearchWindow::from_param("72h").hours(), Some(72));
        assert_eq!(SearchWindow::from_param("7d").hours(), Some(168));
        assert_eq!(SearchWindow::from_param("30d").hours(), Some(720));
        assert_eq!(SearchWindow::from_param("all").hours(), None);
    }

    #[test]
    fn unknown_window_param_is_unbounded() {
        assert_eq!(SearchWindow::from_param("6h"), SearchWindow::All);
        assert!(SearchWindow::from_param("6h").published_after(Utc::now()).is_none());
    }

    #[test]
    fn bounded_window_subtracts_from_now() {
        let now = Utc::now();
        let bound = SearchWindow::Day.published_after(now).unwrap();
        assert_eq!(now - bound, Duration::hours(24));
    }

    #[test]
    fn exhausted_error_keeps_the_three_way_outcome() {
        let exhausted = ErrorResponse::from(SearchError::CredentialsExhausted(3));
        assert_eq!(exhausted.error, "credentials_exhausted");
        assert_eq!(exhausted.status, Status::ServiceUnavailable);
        assert!(exhausted.message.contains("All 3 API keys"));

        let fatal = ErrorResponse::from(SearchError::Upstream("bad query".into()));
        assert_eq!(fatal.error, "upstream_error");
        assert_eq!(fatal.status, Status::BadGateway);
    }
}
