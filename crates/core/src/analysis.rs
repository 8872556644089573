//! Placeholder analysis output. None of it is computed from the video.

use serde::{Deserialize, Serialize};

/// One bar in the hashtag chart. `count` is in thousands of uses,
/// `relevance` a percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashtagStat {
    pub tag: String,
    pub count: u32,
    pub relevance: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub video_name: String,
    pub title: String,
    pub hashtags: Vec<String>,
    pub transcript: String,
    pub summary: String,
    pub chart: Vec<HashtagStat>,
}

const PLACEHOLDER_CHART: &[(&str, u32, u8)] = &[
    ("videomarketing", 245, 95),
    ("contentcreator", 198, 92),
    ("youtubetips", 176, 88),
    ("seo", 152, 90),
    ("growthhacking", 121, 81),
    ("socialmedia", 98, 76),
    ("viral", 87, 70),
];

impl AnalysisReport {
    pub fn placeholder(video_name: &str) -> Self {
        let mut chart: Vec<HashtagStat> = PLACEHOLDER_CHART
            .iter()
            .map(|&(tag, count, relevance)| HashtagStat {
                tag: tag.to_string(),
                count,
                relevance,
            })
            .collect();
        chart.sort_by(|a, b| b.count.cmp(&a.count));

        Self {
            video_name: video_name.to_string(),
            title: "Grow Your Channel Faster With Smarter Video SEO".to_string(),
            hashtags: chart.iter().map(|s| s.tag.clone()).collect(),
            transcript: "Welcome back to the channel! Today we're breaking down the exact steps \
                         we use to get videos discovered: picking keywords people actually search \
                         for, writing titles that earn the click, and choosing hashtags that put \
                         your content in front of the right audience."
                .to_string(),
            summary: "A practical walkthrough of video SEO fundamentals covering keyword research, \
                      title optimization and hashtag strategy for better discoverability."
                .to_string(),
            chart,
        }
    }

    /// The three highest-count chart records.
    pub fn top_performers(&self) -> &[HashtagStat] {
        &self.chart[..self.chart.len().min(3)]
    }

    pub fn hashtag_line(&self) -> String {
        self.hashtags
            .iter()
            .map(|t| format!("#{t}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

pub fn suggested_titles(title: &str) -> [String; 3] {
    [
        format!("{title} - Viral Content Alert!"),
        format!("{title} | Must Watch 2024"),
        format!("{title} - You Won't Believe This!"),
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisStage {
    ExtractingAudio,
    GeneratingTranscript,
    MiningKeywords,
    OptimizingDiscovery,
}

impl AnalysisStage {
    pub const ALL: [AnalysisStage; 4] = [
        AnalysisStage::ExtractingAudio,
        AnalysisStage::GeneratingTranscript,
        AnalysisStage::MiningKeywords,
        AnalysisStage::OptimizingDiscovery,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AnalysisStage::ExtractingAudio => "Extracting audio waves",
            AnalysisStage::GeneratingTranscript => "Generating smart transcripts",
            AnalysisStage::MiningKeywords => "Mining viral keywords",
            AnalysisStage::OptimizingDiscovery => "Optimizing for discovery",
        }
    }

    pub fn for_progress(percent: u8) -> Self {
        let index = usize::from(percent.min(100)) * Self::ALL.len() / 100;
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_chart_is_ordered() {
        let report = AnalysisReport::placeholder("clip.mp4");
        assert!(report.chart.windows(2).all(|w| w[0].count >= w[1].count));
        assert_eq!(report.top_performers().len(), 3);
        assert_eq!(report.top_performers()[0].tag, "videomarketing");
        assert_eq!(report.hashtags.len(), report.chart.len());
    }

    #[test]
    fn test_placeholder_ignores_the_video() {
        let a = AnalysisReport::placeholder("a.mp4");
        let b = AnalysisReport::placeholder("b.mp4");
        assert_eq!(a.title, b.title);
        assert_eq!(a.chart, b.chart);
    }

    #[test]
    fn test_suggested_titles() {
        let titles = suggested_titles("My Video");
        assert_eq!(titles[0], "My Video - Viral Content Alert!");
        assert_eq!(titles[1], "My Video | Must Watch 2024");
        assert_eq!(titles[2], "My Video - You Won't Believe This!");
    }

    #[test]
    fn test_stage_for_progress() {
        assert_eq!(AnalysisStage::for_progress(0), AnalysisStage::ExtractingAudio);
        assert_eq!(AnalysisStage::for_progress(24), AnalysisStage::ExtractingAudio);
        assert_eq!(AnalysisStage::for_progress(25), AnalysisStage::GeneratingTranscript);
        assert_eq!(AnalysisStage::for_progress(74), AnalysisStage::MiningKeywords);
        assert_eq!(AnalysisStage::for_progress(100), AnalysisStage::OptimizingDiscovery);
        assert_eq!(AnalysisStage::for_progress(250), AnalysisStage::OptimizingDiscovery);
    }

    #[test]
    fn test_hashtag_line() {
        let mut report = AnalysisReport::placeholder("x");
        report.hashtags = vec!["a".into(), "b".into()];
        assert_eq!(report.hashtag_line(), "#a #b");
    }
}
