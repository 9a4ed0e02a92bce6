use crate::error::SearchError;
use crate::models::{SearchWindow, VideoDetail, VideoRecord};
use crate::services::youtube::{SearchOrder, SearchPage, VideoStats, YouTubeClient};
use crate::utils;
use chrono::{DateTime, Utc};
use log::{debug, info};
use std::collections::HashMap;
use std::future::Future;

/// Order fallbacks for time-bounded searches. Combining `publishedAfter` with
/// viewCount ordering intermittently returns nothing upstream, so the search
/// retries with progressively safer orders until one yields items.
const ORDER_CASCADE: [SearchOrder; 3] = [
    SearchOrder::ViewCount,
    SearchOrder::Relevance,
    SearchOrder::Date,
];

/// How many recent uploads the detail view lists for the video's channel.
const RECENT_UPLOADS: usize = 6;

#[derive(Debug, Default)]
pub struct VideoSearchPage {
    pub videos: Vec<VideoRecord>,
    pub next_page_token: Option<String>,
}

/// Shorts matching `query` within `window`, scored and sorted by view count.
pub async fn search_videos(
    client: &YouTubeClient,
    api_key: &str,
    query: &str,
    window: SearchWindow,
    page_token: Option<&str>,
) -> Result<VideoSearchPage, SearchError> {
    let published_after = window.published_after(Utc::now());

    let page = first_non_empty_page(|order| {
        client.search_shorts(api_key, query, order, published_after, page_token, None)
    })
    .await?;

    if page.items.is_empty() {
        return Ok(VideoSearchPage::default());
    }

    let ids: Vec<String> = page.items.iter().map(|hit| hit.video_id.clone()).collect();
    let details = client.video_details(api_key, &ids).await?;
    let videos = build_video_records(details, &ids, Utc::now());

    info!("video search for {query:?} produced {} records", videos.len());
    Ok(VideoSearchPage {
        videos,
        next_page_token: page.next_page_token,
    })
}

/// Snippet, statistics and the channel's latest Shorts for one video, so a
/// researcher can judge whether the channel repeats its numbers.
pub async fn video_detail(
    client: &YouTubeClient,
    api_key: &str,
    video_id: &str,
) -> Result<VideoDetail, SearchError> {
    let details = client.video_details(api_key, &[video_id.to_string()]).await?;
    let stats = details
        .into_iter()
        .next()
        .ok_or_else(|| SearchError::Upstream(format!("video {video_id} not found")))?;

    let now = Utc::now();
    let channel_id = stats.channel_id.clone();
    let likes = stats.likes;
    let tags = stats.tags.clone();
    let video = to_record(stats, now);

    let recent_page = client
        .search_shorts(api_key, "", SearchOrder::Date, None, None, Some(&channel_id))
        .await?;
    let recent_ids: Vec<String> = recent_page
        .items
        .iter()
        .map(|hit| hit.video_id.clone())
        .filter(|id| id != video_id)
        .take(RECENT_UPLOADS)
        .collect();
    let recent_details = client.video_details(api_key, &recent_ids).await?;
    let recent_uploads = build_video_records(recent_details, &recent_ids, now);

    Ok(VideoDetail {
        video,
        likes,
        tags,
        recent_uploads,
    })
}

/// Walks the order cascade and returns the first page with items; an empty
/// page from the last order is returned as-is. Upstream failures propagate
/// immediately so credential rotation can take over.
async fn first_non_empty_page<F, Fut>(mut fetch: F) -> Result<SearchPage, SearchError>
where
    F: FnMut(SearchOrder) -> Fut,
    Fut: Future<Output = Result<SearchPage, SearchError>>,
{
    let mut page = SearchPage::default();
    for order in ORDER_CASCADE {
        page = fetch(order).await?;
        if !page.items.is_empty() {
            return Ok(page);
        }
        debug!("no items under {} ordering, falling back", order.as_param());
    }
    Ok(page)
}

/// Drops not-yet-indexed entries, derives the velocity metric and sorts by
/// raw view count. The sort is stable on top of the search ranking, so equal
/// view counts keep their upstream relative order.
fn build_video_records(
    mut details: Vec<VideoStats>,
    id_order: &[String],
    now: DateTime<Utc>,
) -> Vec<VideoRecord> {
    // The batched detail lookup does not guarantee the requested id order;
    // restore the search ranking first.
    let rank: HashMap<&str, usize> = id_order
        .iter()
        .enumerate()
        .map(|(position, id)| (id.as_str(), position))
        .collect();
    details.sort_by_key(|d| rank.get(d.video_id.as_str()).copied().unwrap_or(usize::MAX));

    let mut videos: Vec<VideoRecord> = details
        .into_iter()
        .filter(|d| d.views > 0)
        .map(|d| to_record(d, now))
        .collect();
    videos.sort_by(|a, b| b.views.cmp(&a.views));
    videos
}

fn to_record(stats: VideoStats, now: DateTime<Utc>) -> VideoRecord {
    VideoRecord {
        views_per_hour: utils::growth_rate(stats.views, stats.published_at, now),
        hours_live: utils::age_hours(stats.published_at, now),
        video_id: stats.video_id,
        title: stats.title,
        channel_id: stats.channel_id,
        channel_name: stats.channel_name,
        views: stats.views,
        thumbnail: stats.thumbnail,
        published_at: stats.published_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::youtube::SearchHit;
    use chrono::Duration;
    use std::cell::RefCell;

    fn page(ids: &[&str], token: Option<&str>) -> SearchPage {
        SearchPage {
            items: ids
                .iter()
                .map(|id| SearchHit {
                    video_id: id.to_string(),
                    channel_id: format!("chan-{id}"),
                })
                .collect(),
            next_page_token: token.map(|t| t.to_string()),
        }
    }

    fn stats(id: &str, views: i64, published_at: DateTime<Utc>) -> VideoStats {
        VideoStats {
            video_id: id.to_string(),
            title: format!("video {id}"),
            channel_id: format!("chan-{id}"),
            channel_name: format!("channel {id}"),
            views,
            likes: 0,
            tags: Vec::new(),
            thumbnail: String::new(),
            published_at,
        }
    }

    #[tokio::test]
    async fn cascade_stops_at_the_first_order_with_items() {
        let orders = RefCell::new(Vec::new());
        let result = first_non_empty_page(|order| {
            orders.borrow_mut().push(order);
            async move {
                Ok(match order {
                    SearchOrder::Relevance => page(&["v1"], Some("tok-relevance")),
                    _ => page(&[], Some("tok-other")),
                })
            }
        })
        .await
        .unwrap();

        assert_eq!(
            *orders.borrow(),
            vec![SearchOrder::ViewCount, SearchOrder::Relevance]
        );
        assert_eq!(result.items[0].video_id, "v1");
        // The cursor comes from the call that yielded data, not the first one.
        assert_eq!(result.next_page_token.as_deref(), Some("tok-relevance"));
    }

    #[tokio::test]
    async fn cascade_returns_empty_after_all_orders_run_dry() {
        let calls = RefCell::new(0usize);
        let result = first_non_empty_page(|_| {
            *calls.borrow_mut() += 1;
            async { Ok(page(&[], None)) }
        })
        .await
        .unwrap();

        assert_eq!(*calls.borrow(), ORDER_CASCADE.len());
        assert!(result.items.is_empty());
    }

    #[tokio::test]
    async fn cascade_propagates_failures_without_falling_back() {
        let calls = RefCell::new(0usize);
        let result = first_non_empty_page(|_| {
            *calls.borrow_mut() += 1;
            async { Err(SearchError::QuotaExceeded("quotaExceeded".into())) }
        })
        .await;

        assert!(matches!(result, Err(SearchError::QuotaExceeded(_))));
        assert_eq!(*calls.borrow(), 1);
    }

    #[test]
    fn records_drop_zero_views_and_keep_single_views() {
        let now = Utc::now();
        let published = now - Duration::hours(2);
        let ids = vec!["a".to_string(), "b".to_string()];
        let records = build_video_records(
            vec![stats("a", 0, published), stats("b", 1, published)],
            &ids,
            now,
        );

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].video_id, "b");
    }

    #[test]
    fn records_sort_by_views_with_stable_ties() {
        let now = Utc::now();
        let recent = now - Duration::hours(1);
        let old = now - Duration::hours(100);
        let ids: Vec<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        // b and c tie on views but differ wildly in growth rate; the tie must
        // keep the search order, not prefer the faster riser.
        let records = build_video_records(
            vec![
                stats("a", 500, recent),
                stats("b", 900, old),
                stats("c", 900, recent),
            ],
            &ids,
            now,
        );

        let order: Vec<&str> = records.iter().map(|r| r.video_id.as_str()).collect();
        assert_eq!(order, vec!["b", "c", "a"]);
        assert!(records[1].views_per_hour > records[0].views_per_hour);
    }

    #[test]
    fn records_restore_search_ranking_before_sorting() {
        let now = Utc::now();
        let published = now - Duration::hours(2);
        // Detail results arrive reordered; ties must still resolve to the
        // search ranking (b before a).
        let ids: Vec<String> = ["b", "a"].iter().map(|s| s.to_string()).collect();
        let records = build_video_records(
            vec![stats("a", 700, published), stats("b", 700, published)],
            &ids,
            now,
        );

        let order: Vec<&str> = records.iter().map(|r| r.video_id.as_str()).collect();
        assert_eq!(order, vec!["b", "a"]);
    }

    #[test]
    fn records_carry_the_velocity_metric() {
        let now = Utc::now();
        let records = build_video_records(
            vec![stats("a", 1000, now - Duration::hours(2))],
            &["a".to_string()],
            now,
        );
        assert_eq!(records[0].views_per_hour, 500);
        assert!((records[0].hours_live - 2.0).abs() < 0.01);
    }
}
