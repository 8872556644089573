use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use videotag_core::notify::{Notifier, Toast};

pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.0}m {:.0}s", (secs / 60.0).floor(), secs % 60.0)
    }
}

pub fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner()
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
        .template("{spinner:.cyan} {msg}")
    {
        pb.set_style(spinner_style);
    }
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

pub fn create_progress_bar() -> ProgressBar {
    let pb = ProgressBar::new(100);
    if let Ok(bar_style) = ProgressStyle::default_bar()
        .template("{bar:40.green/dim} {pos:>3}% {msg}")
        .map(|s| s.progress_chars("█▓░"))
    {
        pb.set_style(bar_style);
    }
    pb
}

/// Prints toasts as a single styled line.
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn toast(&self, toast: Toast) {
        if toast.is_destructive() {
            eprintln!(
                "{} {}",
                style(format!("✗ {}", toast.title)).red().bold(),
                toast.description
            );
        } else {
            println!(
                "{} {}",
                style(format!("✓ {}", toast.title)).green().bold(),
                style(toast.description).dim()
            );
        }
    }
}
