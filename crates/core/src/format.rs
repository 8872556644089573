use chrono::{DateTime, Utc};

use crate::{
    analysis::{AnalysisReport, suggested_titles},
    history::{HistoryEntry, HistoryStats},
};

/// Format a timestamp the way the history cards show it, e.g. `May 19, 12:00 PM`
pub fn format_history_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%b %-d, %-I:%M %p").to_string()
}

/// Format an integer with thousands separators
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn format_hashtags(tags: &[String], hidden: usize) -> String {
    let mut line = tags
        .iter()
        .map(|t| format!("#{}", t))
        .collect::<Vec<_>>()
        .join(" ");
    if hidden > 0 {
        line.push_str(&format!(" +{} more", hidden));
    }
    line
}

pub fn format_report_readable(report: &AnalysisReport) -> String {
    let mut output = String::new();
    output.push_str("# Content Intelligence Report\n\n");
    output.push_str(&format!("**Video:** {}\n\n", report.video_name));

    output.push_str("## Optimized title\n\n");
    output.push_str(&format!("{}\n\n", report.title));
    for suggestion in suggested_titles(&report.title) {
        output.push_str(&format!("• {}\n", suggestion));
    }
    output.push('\n');

    output.push_str("## Hashtags\n\n");
    output.push_str(&report.hashtag_line());
    output.push_str("\n\n");

    output.push_str("## Top performers\n\n");
    for stat in report.top_performers() {
        output.push_str(&format!(
            "• #{} {}k uses • {}% match\n",
            stat.tag, stat.count, stat.relevance
        ));
    }
    output.push('\n');

    output.push_str("## Summary\n\n");
    output.push_str(&report.summary);
    output.push_str("\n\n");

    output.push_str("## Transcript\n\n");
    output.push_str(&report.transcript);
    output.push('\n');

    output
}

pub fn format_history_readable(entries: &[HistoryEntry], stats: &HistoryStats) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "**Total videos:** {} | **Total views:** {} | **Avg engagement:** {}% | **Success rate:** {}%\n\n",
        stats.total_videos,
        format_count(stats.total_views),
        stats.average_engagement,
        stats.success_rate
    ));

    if entries.is_empty() {
        output.push_str("No videos analyzed yet\n");
        return output;
    }

    output.push_str("## Recent analysis history\n\n");
    for entry in entries {
        output.push_str(&format!(
            "### {} ({})\n\n",
            entry.video_name,
            format_history_timestamp(&entry.timestamp)
        ));
        if let (Some(views), Some(engagement)) = (entry.views, entry.engagement) {
            output.push_str(&format!(
                "{} views • {}% engagement\n\n",
                format_count(views),
                engagement
            ));
        }
        output.push_str(&format!("**Optimized title:** {}\n", entry.title));
        let (shown, hidden) = entry.visible_hashtags();
        output.push_str(&format!("**Hashtags:** {}\n", format_hashtags(shown, hidden)));
        output.push_str(&format!("**Summary:** {}\n\n", entry.summary));
    }

    output
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::history::fabricate_history;

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0), "0");
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1000), "1,000");
        assert_eq!(format_count(24350), "24,350");
        assert_eq!(format_count(1234567), "1,234,567");
    }

    #[test]
    fn test_format_history_timestamp() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 19, 15, 4, 0).unwrap();
        assert_eq!(format_history_timestamp(&ts), "May 19, 3:04 PM");
    }

    #[test]
    fn test_format_hashtags_with_overflow() {
        let tags = vec!["a".to_string(), "b".to_string()];
        assert_eq!(format_hashtags(&tags, 0), "#a #b");
        assert_eq!(format_hashtags(&tags, 3), "#a #b +3 more");
    }

    #[test]
    fn test_history_readable_contains_stats_and_entries() {
        let now = Utc.with_ymd_and_hms(2024, 5, 20, 12, 0, 0).unwrap();
        let entries = fabricate_history(now);
        let stats = HistoryStats::from_entries(&entries);

        let text = format_history_readable(&entries, &stats);
        assert!(text.contains("**Total views:** 24,350"));
        assert!(text.contains("**Avg engagement:** 90%"));
        assert!(text.contains("### Social Media Marketing Tips (May 18, 12:00 PM)"));
        assert!(text.contains("15,420 views • 87% engagement"));
    }

    #[test]
    fn test_history_readable_empty() {
        let text = format_history_readable(&[], &HistoryStats::from_entries(&[]));
        assert!(text.contains("No videos analyzed yet"));
    }

    #[test]
    fn test_report_readable_sections() {
        let text = format_report_readable(&AnalysisReport::placeholder("clip.mp4"));
        assert!(text.contains("**Video:** clip.mp4"));
        assert!(text.contains("## Top performers"));
        assert!(text.contains("#videomarketing 245k uses • 95% match"));
    }
}
