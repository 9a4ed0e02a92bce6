use crate::error::SearchError;
use chrono::{DateTime, SecondsFormat, Utc};
use log::debug;
use reqwest::{Client, StatusCode};
use serde_json::Value;

/// Upstream page size cap, shared by search and the batched detail lookups.
pub const MAX_RESULTS: usize = 50;

/// Sort orders understood by the upstream search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOrder {
    ViewCount,
    Relevance,
    Date,
}

impl SearchOrder {
    pub fn as_param(&self) -> &'static str {
        match self {
            SearchOrder::ViewCount => "viewCount",
            SearchOrder::Relevance => "relevance",
            SearchOrder::Date => "date",
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchHit {
    pub video_id: String,
    pub channel_id: String,
}

/// One page of search results plus the cursor for the next one.
#[derive(Debug, Clone, Default)]
pub struct SearchPage {
    pub items: Vec<SearchHit>,
    pub next_page_token: Option<String>,
}

/// Snippet and statistics for one video, as returned by the batched lookup.
#[derive(Debug, Clone)]
pub struct VideoStats {
    pub video_id: String,
    pub title: String,
    pub channel_id: String,
    pub channel_name: String,
    pub views: i64,
    pub likes: i64,
    pub tags: Vec<String>,
    pub thumbnail: String,
    pub published_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ChannelStats {
    pub channel_id: String,
    pub title: String,
    pub thumbnail: String,
    pub subscribers: i64,
    pub total_views: i64,
    pub video_count: i64,
}

/// Thin client over the YouTube Data API v3. One instance per process; every
/// call takes the API key explicitly so the rotation executor can swap keys
/// between attempts.
pub struct YouTubeClient {
    http: Client,
    api_base: String,
}

impl YouTubeClient {
    pub fn new(api_base: String) -> Self {
        YouTubeClient {
            http: Client::new(),
            api_base,
        }
    }

    /// One page of short-form search results.
    /// Documentation: https://developers.google.com/youtube/v3/docs/search
    pub async fn search_shorts(
        &self,
        api_key: &str,
        query: &str,
        order: SearchOrder,
        published_after: Option<DateTime<Utc>>,
        page_token: Option<&str>,
        channel_id: Option<&str>,
    ) -> Result<SearchPage, SearchError> {
        let url = format!("{}/search", self.api_base);
        let mut params: Vec<(&str, String)> = vec![
            ("part", "snippet".to_string()),
            ("q", query.to_string()),
            ("type", "video".to_string()),
            ("videoDuration", "short".to_string()),
            ("order", order.as_param().to_string()),
            ("maxResults", MAX_RESULTS.to_string()),
            ("key", api_key.to_string()),
        ];
        if let Some(after) = published_after {
            params.push((
                "publishedAfter",
                after.to_rfc3339_opts(SecondsFormat::Secs, true),
            ));
        }
        if let Some(token) = page_token {
            params.push(("pageToken", token.to_string()));
        }
        if let Some(channel) = channel_id {
            params.push(("channelId", channel.to_string()));
        }

        let body = self.get_json(&url, &params).await?;
        let page = parse_search_page(&body);
        debug!(
            "search order={} returned {} hits",
            order.as_param(),
            page.items.len()
        );
        Ok(page)
    }

    /// Batched snippet + statistics lookup, one call for up to 50 ids.
    /// Documentation: https://developers.google.com/youtube/v3/docs/videos
    pub async fn video_details(
        &self,
        api_key: &str,
        ids: &[String],
    ) -> Result<Vec<VideoStats>, SearchError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let url = format!("{}/videos", self.api_base);
        let params = [
            ("part", "snippet,statistics".to_string()),
            ("id", ids.join(",")),
            ("key", api_key.to_string()),
        ];
        let body = self.get_json(&url, &params).await?;
        Ok(parse_video_items(&body))
    }

    /// Batched channel snippet + statistics lookup.
    /// Documentation: https://developers.google.com/youtube/v3/docs/channels
    pub async fn channel_details(
        &self,
        api_key: &str,
        ids: &[String],
    ) -> Result<Vec<ChannelStats>, SearchError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let url = format!("{}/channels", self.api_base);
        let params = [
            ("part", "snippet,statistics".to_string()),
            ("id", ids.join(",")),
            ("key", api_key.to_string()),
        ];
        let body = self.get_json(&url, &params).await?;
        Ok(parse_channel_items(&body))
    }

    async fn get_json(&self, url: &str, params: &[(&str, String)]) -> Result<Value, SearchError> {
        let response = self.http.get(url).query(params).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_upstream_failure(status, &body));
        }
        Ok(response.json::<Value>().await?)
    }
}

/// Maps an upstream failure onto the retry classification. Forbidden means the
/// key's daily budget is spent; anything else ends the request.
pub fn classify_upstream_failure(status: StatusCode, body: &str) -> SearchError {
    let reason = error_reason(body).unwrap_or_else(|| format!("HTTP {}", status.as_u16()));
    match status {
        StatusCode::FORBIDDEN => SearchError::QuotaExceeded(reason),
        StatusCode::TOO_MANY_REQUESTS => SearchError::RateLimited(reason),
        _ => SearchError::Upstream(format!("HTTP {}: {}", status.as_u16(), reason)),
    }
}

/// Pulls the machine-readable `reason` (falling back to the message) out of a
/// Google API error body.
fn error_reason(body: &str) -> Option<String> {
    let parsed: Value = serde_json::from_str(body).ok()?;
    parsed["error"]["errors"][0]["reason"]
        .as_str()
        .or_else(|| parsed["error"]["message"].as_str())
        .map(|s| s.to_string())
}

fn parse_search_page(body: &Value) -> SearchPage {
    let empty_vec = vec![];
    let items = body["items"]
        .as_array()
        .unwrap_or(&empty_vec)
        .iter()
        .filter_map(|item| {
            Some(SearchHit {
                video_id: item["id"]["videoId"].as_str()?.to_string(),
                channel_id: item["snippet"]["channelId"]
                    .as_str()
                    .unwrap_or("")
                    .to_string(),
            })
        })
        .collect();

    SearchPage {
        items,
        next_page_token: body["nextPageToken"].as_str().map(|s| s.to_string()),
    }
}

fn parse_video_items(body: &Value) -> Vec<VideoStats> {
    let empty_vec = vec![];
    body["items"]
        .as_array()
        .unwrap_or(&empty_vec)
        .iter()
        .filter_map(|item| {
            let snippet = &item["snippet"];
            let stats = &item["statistics"];
            Some(VideoStats {
                video_id: item["id"].as_str()?.to_string(),
                title: snippet["title"].as_str().unwrap_or("").to_string(),
                channel_id: snippet["channelId"].as_str().unwrap_or("").to_string(),
                channel_name: snippet["channelTitle"].as_str().unwrap_or("").to_string(),
                views: stats["viewCount"]
                    .as_str()
                    .unwrap_or("0")
                    .parse()
                    .unwrap_or(0),
                likes: stats["likeCount"]
                    .as_str()
                    .unwrap_or("0")
                    .parse()
                    .unwrap_or(0),
                tags: snippet["tags"]
                    .as_array()
                    .map(|arr| {
                        arr.iter()
                            .filter_map(|v| v.as_str())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
                thumbnail: pick_thumbnail(&snippet["thumbnails"]),
                published_at: snippet["publishedAt"]
                    .as_str()?
                    .parse::<DateTime<Utc>>()
                    .ok()?,
            })
        })
        .collect()
}

fn parse_channel_items(body: &Value) -> Vec<ChannelStats> {
    let empty_vec = vec![];
    body["items"]
        .as_array()
        .unwrap_or(&empty_vec)
        .iter()
        .filter_map(|item| {
            let snippet = &item["snippet"];
            let stats = &item["statistics"];
            Some(ChannelStats {
                channel_id: item["id"].as_str()?.to_string(),
                title: snippet["title"].as_str().unwrap_or("").to_string(),
                thumbnail: pick_thumbnail(&snippet["thumbnails"]),
                subscribers: stats["subscriberCount"]
                    .as_str()
                    .unwrap_or("0")
                    .parse()
                    .unwrap_or(0),
                total_views: stats["viewCount"]
                    .as_str()
                    .unwrap_or("0")
                    .parse()
                    .unwrap_or(0),
                video_count: stats["videoCount"]
                    .as_str()
                    .unwrap_or("0")
                    .parse()
                    .unwrap_or(0),
            })
        })
        .collect()
}

/// Best thumbnail the upload actually has.
fn pick_thumbnail(thumbnails: &Value) -> String {
    for quality in ["maxres", "high", "medium", "default"] {
        if let Some(url) = thumbnails[quality]["url"].as_str() {
            return url.to_string();
        }
    }
    String::new()
}
