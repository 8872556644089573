use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Hashtags shown per entry before collapsing into "+N more".
pub const VISIBLE_HASHTAGS: usize = 8;

/// Shown as-is; nothing measures it.
pub const SUCCESS_RATE_PERCENT: u32 = 94;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    pub video_name: String,
    pub timestamp: DateTime<Utc>,
    pub title: String,
    pub hashtags: Vec<String>,
    pub transcript: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub views: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engagement: Option<u32>,
}

impl HistoryEntry {
    /// The first [`VISIBLE_HASHTAGS`] tags and how many were left out.
    pub fn visible_hashtags(&self) -> (&[String], usize) {
        let shown = self.hashtags.len().min(VISIBLE_HASHTAGS);
        (&self.hashtags[..shown], self.hashtags.len() - shown)
    }
}

fn tags(list: &[&str]) -> Vec<String> {
    list.iter().map(|t| t.to_string()).collect()
}

/// Demo history, rebuilt on every load relative to `now`.
pub fn fabricate_history(now: DateTime<Utc>) -> Vec<HistoryEntry> {
    vec![
        HistoryEntry {
            id: "1".into(),
            video_name: "How to Boost YouTube Views 2024".into(),
            timestamp: now - Duration::days(1),
            title: "Ultimate YouTube Growth Strategy".into(),
            hashtags: tags(&["youtube", "growth", "marketing", "seo", "viral"]),
            transcript: "Sample transcript...".into(),
            summary: "Complete guide to YouTube optimization".into(),
            views: Some(15420),
            engagement: Some(87),
        },
        HistoryEntry {
            id: "2".into(),
            video_name: "Social Media Marketing Tips".into(),
            timestamp: now - Duration::days(2),
            title: "Social Media Mastery Guide".into(),
            hashtags: tags(&["socialmedia", "marketing", "business", "tips", "strategy"]),
            transcript: "Sample transcript...".into(),
            summary: "Essential social media marketing strategies".into(),
            views: Some(8930),
            engagement: Some(92),
        },
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HistoryStats {
    pub total_videos: usize,
    pub total_views: u64,
    pub average_engagement: u32,
    pub success_rate: u32,
}

impl HistoryStats {
    pub fn from_entries(entries: &[HistoryEntry]) -> Self {
        let total_views = entries.iter().map(|e| e.views.unwrap_or(0)).sum();

        let average_engagement = if entries.is_empty() {
            0
        } else {
            let sum: u64 = entries.iter().map(|e| u64::from(e.engagement.unwrap_or(0))).sum();
            (sum as f64 / entries.len() as f64).round() as u32
        };

        Self {
            total_videos: entries.len(),
            total_views,
            average_engagement,
            success_rate: SUCCESS_RATE_PERCENT,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 20, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_fabricated_history_is_relative_to_now() {
        let history = fabricate_history(now());
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].id, "1");
        assert_eq!(history[0].timestamp, now() - Duration::days(1));
        assert_eq!(history[1].timestamp, now() - Duration::days(2));
    }

    #[test]
    fn test_stats_over_fabricated_history() {
        let stats = HistoryStats::from_entries(&fabricate_history(now()));
        assert_eq!(
            stats,
            HistoryStats {
                total_videos: 2,
                total_views: 24350,
                average_engagement: 90,
                success_rate: 94,
            }
        );
    }

    #[test]
    fn test_stats_empty_and_missing_metrics() {
        assert_eq!(HistoryStats::from_entries(&[]).average_engagement, 0);

        let mut entries = fabricate_history(now());
        entries[0].views = None;
        entries[1].engagement = None;
        let stats = HistoryStats::from_entries(&entries);
        assert_eq!(stats.total_views, 8930);
        assert_eq!(stats.average_engagement, 44);
    }

    #[test]
    fn test_visible_hashtags_collapse_after_eight() {
        let mut entry = fabricate_history(now()).remove(0);
        assert_eq!(entry.visible_hashtags().1, 0);

        entry.hashtags = (0..11).map(|i| format!("tag{i}")).collect();
        let (shown, more) = entry.visible_hashtags();
        assert_eq!(shown.len(), 8);
        assert_eq!(more, 3);
    }

    #[test]
    fn test_entry_serializes_camel_case() {
        let json = serde_json::to_value(&fabricate_history(now())[0]).unwrap();
        assert_eq!(json["videoName"], "How to Boost YouTube Views 2024");
        assert_eq!(json["views"], 15420);
    }
}
