//! VideoTag Core Library
//!
//! Mock session gate, simulated video uploads and placeholder SEO analysis
//! for the VideoTag AI demo, plus the in-process event bus the front ends
//! run them on.

pub mod analysis;
pub mod auth;
pub mod config;
pub mod error;
pub mod events;
pub mod format;
pub mod gate;
pub mod history;
pub mod notify;
pub mod queues;
pub mod session;
pub mod storage;
pub mod upload;
pub mod workers;

// Re-export commonly used items at crate root
pub use analysis::{AnalysisReport, AnalysisStage, HashtagStat, suggested_titles};
pub use auth::{AuthError, AuthProvider, Authenticator, Identity, MockAuthProvider};
pub use config::AppConfig;
pub use error::{Result, VideoTagError};
pub use format::{format_count, format_history_readable, format_report_readable};
pub use gate::{Navigation, Route, SessionGate};
pub use history::{HistoryEntry, HistoryStats, fabricate_history};
pub use notify::{Clipboard, Notifier, Toast, ToastVariant, copy_to_clipboard};
pub use session::{Session, SessionMarker};
pub use storage::{FileStorage, MemoryStorage, StorageBackend};
pub use upload::{ObjectUrl, UploadError, UploadListener, UploadSimulator, VideoFile};
