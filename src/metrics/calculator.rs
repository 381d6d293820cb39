use crate::domain::{ChannelMetrics, NormalizedVideo, VideoCategory};

/// Summarise one ingested batch of videos.
///
/// Videos without a reported view count are left out of the median but still
/// count towards the batch size and the short/long split.
pub fn calculate_metrics(videos: &[NormalizedVideo]) -> ChannelMetrics {
    let view_counts: Vec<i64> = videos.iter().filter_map(|v| v.view_count).collect();
    let short_videos_count = count_shorts(videos);
    let total = videos.len() as i64;

    ChannelMetrics {
        median_viewership: median_viewership(&view_counts),
        upload_frequency: total,
        short_videos_count,
        long_videos_count: total - short_videos_count,
    }
}

/// Median of the view counts; even-sized batches floor the mean of the two middle values.
pub fn median_viewership(view_counts: &[i64]) -> i64 {
    if view_counts.is_empty() {
        return 0;
    }

    let mut sorted = view_counts.to_vec();
    sorted.sort_unstable();
    let mid = sorted.len() / 2;

    if sorted.len() % 2 == 1 {
        sorted[mid]
    } else {
        (sorted[mid - 1] + sorted[mid]).div_euclid(2)
    }
}

fn count_shorts(videos: &[NormalizedVideo]) -> i64 {
    videos
        .iter()
        .filter(|v| v.category() == VideoCategory::Short)
        .count() as i64
}
