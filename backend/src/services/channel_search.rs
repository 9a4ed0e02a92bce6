use crate::error::SearchError;
use crate::models::{ChannelRecord, TopVideo};
use crate::services::youtube::{SearchOrder, VideoStats, YouTubeClient};
use chrono::{Duration, Utc};
use log::info;
use std::collections::HashMap;

/// Reverse scouting always looks at the last 30 days; shorter windows surface
/// too few distinct channels to be useful.
const WINDOW_DAYS: i64 = 30;

/// The channel detail endpoint takes at most 50 ids, so only the first 50
/// distinct channels encountered get resolved.
const MAX_CHANNELS: usize = 50;

/// Channels behind the highest-viewed recent Shorts matching `query`, each
/// represented by its single best-performing candidate.
pub async fn search_channels(
    client: &YouTubeClient,
    api_key: &str,
    query: &str,
) -> Result<Vec<ChannelRecord>, SearchError> {
    let published_after = Utc::now() - Duration::days(WINDOW_DAYS);
    let page = client
        .search_shorts(
            api_key,
            query,
            SearchOrder::ViewCount,
            Some(published_after),
            None,
            None,
        )
        .await?;

    if page.items.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<String> = page.items.iter().map(|hit| hit.video_id.clone()).collect();
    let details = client.video_details(api_key, &ids).await?;
    let best = best_video_per_channel(&details);

    // Channel encounter order follows the search ranking, not the unordered
    // detail response.
    let mut channel_ids: Vec<String> = Vec::new();
    for hit in &page.items {
        if best.contains_key(hit.channel_id.as_str()) && !channel_ids.contains(&hit.channel_id) {
            channel_ids.push(hit.channel_id.clone());
        }
    }
    channel_ids.truncate(MAX_CHANNELS);

    let stats = client.channel_details(api_key, &channel_ids).await?;

    let mut channels: Vec<ChannelRecord> = stats
        .into_iter()
        .filter_map(|chan| {
            let video = best.get(chan.channel_id.as_str())?;
            Some(ChannelRecord {
                channel_id: chan.channel_id,
                title: chan.title,
                thumbnail: chan.thumbnail,
                subscribers: chan.subscribers,
                total_views: chan.total_views,
                video_count: chan.video_count,
                top_video: TopVideo {
                    video_id: video.video_id.clone(),
                    title: video.title.clone(),
                    views: video.views,
                },
            })
        })
        .collect();
    channels.sort_by(|a, b| b.top_video.views.cmp(&a.top_video.views));

    info!(
        "channel search for {query:?} produced {} channels",
        channels.len()
    );
    Ok(channels)
}

/// Keeps each channel's strictly highest-viewed candidate. Later candidates
/// with equal or lower view counts are discarded, so the first seen wins ties.
/// Not-yet-indexed candidates never represent a channel.
fn best_video_per_channel(details: &[VideoStats]) -> HashMap<String, &VideoStats> {
    let mut best: HashMap<String, &VideoStats> = HashMap::new();
    for video in details {
        if video.views <= 0 || video.channel_id.is_empty() {
            continue;
        }
        match best.get(video.channel_id.as_str()) {
            Some(current) if video.views <= current.views => {}
            _ => {
                best.insert(video.channel_id.clone(), video);
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn candidate(id: &str, channel: &str, views: i64) -> VideoStats {
        VideoStats {
            video_id: id.to_string(),
            title: format!("video {id}"),
            channel_id: channel.to_string(),
            channel_name: format!("channel {channel}"),
            views,
            likes: 0,
            tags: Vec::new(),
            thumbnail: String::new(),
            published_at: "2026-08-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap(),
        }
    }

    #[test]
    fn grouping_keeps_the_highest_viewed_video_per_channel() {
        let details = vec![
            candidate("v1", "A", 500),
            candidate("v2", "A", 900),
            candidate("v3", "B", 200),
        ];
        let best = best_video_per_channel(&details);

        assert_eq!(best.len(), 2);
        assert_eq!(best["A"].views, 900);
        assert_eq!(best["B"].views, 200);
    }

    #[test]
    fn grouping_is_insensitive_to_input_order() {
        let details = vec![
            candidate("v2", "A", 900),
            candidate("v3", "B", 200),
            candidate("v1", "A", 500),
        ];
        let best = best_video_per_channel(&details);

        assert_eq!(best["A"].video_id, "v2");
        assert_eq!(best["B"].video_id, "v3");
    }

    #[test]
    fn equal_view_counts_keep_the_first_candidate() {
        let details = vec![candidate("first", "A", 700), candidate("later", "A", 700)];
        let best = best_video_per_channel(&details);

        assert_eq!(best["A"].video_id, "first");
    }

    #[test]
    fn zero_view_candidates_never_represent_a_channel() {
        let details = vec![candidate("v1", "A", 0), candidate("v2", "B", 1)];
        let best = best_video_per_channel(&details);

        assert!(!best.contains_key("A"));
        assert_eq!(best["B"].views, 1);
    }
}
