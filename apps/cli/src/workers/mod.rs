pub mod analyze_video;
pub mod cli_completion_sink;
pub mod events;
pub mod progress_display;
pub mod upload_video;
