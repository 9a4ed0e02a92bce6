use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoRecord {
    pub video_id: String,
    pub title: String,
    pub channel_id: String,
    pub channel_name: String,
    pub views: i64,
    pub thumbnail: String,
    pub published_at: String,
    pub hours_live: f64,
    pub views_per_hour: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopVideo {
    pub video_id: String,
    pub title: String,
    pub views: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelRecord {
    pub channel_id: String,
    pub title: String,
    pub thumbnail: String,
    pub subscribers: i64,
    pub total_views: i64,
    pub video_count: i64,
    pub top_video: TopVideo,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
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

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoDetail {
    pub video: VideoRecord,
    pub likes: i64,
    pub tags: Vec<String>,
    pub recent_uploads: Vec<VideoRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialStatus {
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}
