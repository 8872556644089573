use std::{
    path::{Path, PathBuf},
    process::ExitCode,
    sync::Arc,
    time::Duration,
};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use console::style;
use tokio::time::Instant;
use tracing_subscriber::EnvFilter;
use videotag_core::{
    AppConfig, Authenticator, FileStorage, MockAuthProvider, Navigation, Route, Session,
    SessionGate, ToastVariant, VideoTagError,
    config::get_root_data_dir,
    fabricate_history, format_history_readable, format_report_readable,
    history::HistoryStats,
    notify::{Notifier, Toast},
    upload::{self, UploadConfig, VideoFile},
};

use crate::{
    pipeline::{PipelineConfig, start_pipeline},
    ui::{ConsoleNotifier, create_progress_bar, create_spinner, format_duration},
    workers::cli_completion_sink::PipelineOutcome,
};

mod pipeline;
mod ui;
mod workers;

#[derive(Parser)]
#[command(name = "videotag")]
#[command(
    about = "Demo video SEO analyzer: mock sign-in, simulated uploads and placeholder reports"
)]
struct Cli {
    /// Directory holding the local session store
    #[arg(long, global = true, env = "VIDEOTAG_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// Simulated sign-in latency in milliseconds
    #[arg(long, global = true, env = "VIDEOTAG_AUTH_LATENCY_MS", default_value_t = 1000)]
    auth_latency_ms: u64,

    /// Upload progress tick in milliseconds
    #[arg(long, global = true, env = "VIDEOTAG_TICK_MS", default_value_t = 200)]
    tick_ms: u64,

    /// Time spent on each simulated analysis stage, in milliseconds
    #[arg(long, global = true, env = "VIDEOTAG_STAGE_MS", default_value_t = 500)]
    stage_ms: u64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Sign in (demo account: demo@example.com / password123)
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Create an account and sign in
    Register {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
        #[arg(short, long)]
        name: String,
    },
    /// Sign out
    Logout,
    /// Show who is signed in
    Whoami,
    /// Resolve a route through the session gate
    Open { path: String },
    /// Upload a video and print its analysis
    Upload { file: PathBuf },
    /// Show analysis history
    History,
    /// Show the dashboard
    Dashboard,
}

struct App {
    config: AppConfig,
    stage_delay: Duration,
    session: Session,
    auth: Authenticator,
    gate: SessionGate,
    notifier: ConsoleNotifier,
}

impl App {
    fn new(cli: &Cli) -> Self {
        let mut config = AppConfig {
            data_dir: cli.data_dir.clone().unwrap_or_else(get_root_data_dir),
            auth_latency: Duration::from_millis(cli.auth_latency_ms),
            upload: UploadConfig::default(),
        };
        config.upload.tick_interval = Duration::from_millis(cli.tick_ms.max(1));

        let storage = Arc::new(FileStorage::new(config.storage_path()));
        let session = Session::new(storage);
        let provider = Arc::new(MockAuthProvider::new(config.auth_latency));

        Self {
            auth: Authenticator::new(provider, session.clone()),
            gate: SessionGate::new(session.clone()),
            session,
            config,
            stage_delay: Duration::from_millis(cli.stage_ms),
            notifier: ConsoleNotifier,
        }
    }

    /// `None` means the gate sent the user to the login view.
    fn require(&self, route: Route) -> Result<Option<()>> {
        match self.gate.resolve(route.path())? {
            Navigation::Redirect {
                to: Route::Login, ..
            } => {
                self.notifier.toast(
                    Toast::new("Sign in required", "Run `videotag login` first")
                        .with_variant(ToastVariant::Destructive),
                );
                Ok(None)
            }
            _ => Ok(Some(())),
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn header() {
    println!(
        "\n{}  {}\n",
        style("videotag").cyan().bold(),
        style("Video SEO Analyzer").dim()
    );
}

async fn login(app: &App, email: &str, password: &str) -> Result<ExitCode> {
    let spinner = create_spinner("Signing in...");
    let result = app.auth.login(email, password).await;
    spinner.finish_and_clear();

    match result {
        Ok(identity) => {
            app.notifier.toast(Toast::new(
                "Welcome back!",
                format!("Signed in as {}", identity.name),
            ));
            Ok(ExitCode::SUCCESS)
        }
        Err(VideoTagError::Auth(e)) => {
            app.notifier.toast(e.toast());
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

async fn register(app: &App, email: &str, password: &str, name: &str) -> Result<ExitCode> {
    let spinner = create_spinner("Creating account...");
    let result = app.auth.register(email, password, name).await;
    spinner.finish_and_clear();

    match result {
        Ok(_) => {
            app.notifier.toast(Toast::new(
                "Account created!",
                "Welcome to VideoTag AI - let's optimize your videos!",
            ));
            Ok(ExitCode::SUCCESS)
        }
        Err(VideoTagError::Auth(e)) => {
            app.notifier.toast(e.toast());
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

fn logout(app: &App) -> Result<ExitCode> {
    app.auth.logout()?;
    app.notifier
        .toast(Toast::new("Signed out", "See you next time"));
    Ok(ExitCode::SUCCESS)
}

fn whoami(app: &App) -> Result<ExitCode> {
    match app.session.current_user()? {
        Some(user) => println!("{} <{}>", style(user.name).bold(), user.email),
        None => println!("{}", style("not signed in").dim()),
    }
    Ok(ExitCode::SUCCESS)
}

fn open(app: &App, path: &str) -> Result<ExitCode> {
    match app.gate.resolve(path)? {
        Navigation::Render(route) => {
            println!("{} {} ({})", style("→").green().bold(), route, route.title());
            Ok(ExitCode::SUCCESS)
        }
        Navigation::Redirect { from, to } => {
            println!(
                "{} {} redirects to {}",
                style("↪").yellow().bold(),
                from,
                style(to).cyan()
            );
            Ok(ExitCode::SUCCESS)
        }
        Navigation::NotFound(path) => {
            eprintln!("{} no page at {}", style("Error:").red().bold(), path);
            Ok(ExitCode::FAILURE)
        }
    }
}

async fn upload(app: &App, path: &Path) -> Result<ExitCode> {
    if app.require(Route::VideoAnalysis)?.is_none() {
        return Ok(ExitCode::FAILURE);
    }

    let file = VideoFile::from_path(path)
        .await
        .with_context(|| format!("cannot read {}", path.display()))?;

    header();
    println!(
        "{} {} {}",
        style("✓").green().bold(),
        file.name,
        style(format!("({}, {} bytes)", file.media_type, file.size_bytes)).dim()
    );
    println!("{}", style("─".repeat(60)).dim());

    let bar = create_progress_bar();
    let mut pipeline = start_pipeline(
        PipelineConfig {
            upload: app.config.upload.clone(),
            analysis_stage_delay: app.stage_delay,
        },
        bar.clone(),
    )
    .await?;

    let started = Instant::now();
    pipeline.submit(file);
    let outcome = (&mut pipeline.done_rx)
        .await
        .context("pipeline stopped without a result")?;
    pipeline.shutdown().await?;
    bar.finish_and_clear();

    match outcome {
        PipelineOutcome::Analyzed(compiled) => {
            app.notifier.toast(upload::success_toast());
            println!(
                "{} {} {}",
                style("Object URL:").dim(),
                style(&compiled.url).cyan(),
                style(format!("[{}]", format_duration(started.elapsed()))).dim()
            );
            println!("{}", style("─".repeat(60)).dim());
            println!("{}", format_report_readable(&compiled.report));
            Ok(ExitCode::SUCCESS)
        }
        PipelineOutcome::Rejected(e) => {
            app.notifier.toast(e.toast());
            Ok(ExitCode::FAILURE)
        }
        PipelineOutcome::Failed(failed) => {
            eprintln!(
                "{} {} failed: {}",
                style("Error:").red().bold(),
                failed.stage,
                failed.message
            );
            Ok(ExitCode::FAILURE)
        }
    }
}

fn history(app: &App) -> Result<ExitCode> {
    if app.require(Route::History)?.is_none() {
        return Ok(ExitCode::FAILURE);
    }

    let entries = fabricate_history(Utc::now());
    let stats = HistoryStats::from_entries(&entries);

    header();
    println!("{}", format_history_readable(&entries, &stats));
    Ok(ExitCode::SUCCESS)
}

fn dashboard(app: &App) -> Result<ExitCode> {
    if app.require(Route::Dashboard)?.is_none() {
        return Ok(ExitCode::FAILURE);
    }

    header();
    if let Some(user) = app.session.current_user()? {
        println!("Welcome back, {}!\n", style(user.name).bold());
    }

    let recent = app.session.recent_navigation(5)?;
    if recent.is_empty() {
        println!("{}", style("No recent activity").dim());
    } else {
        println!("{}", style("Recent activity").bold());
        for item in recent {
            println!(
                "  {} {} {}",
                item.title,
                style(&item.path).cyan(),
                style(&item.timestamp).dim()
            );
        }
    }
    Ok(ExitCode::SUCCESS)
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();
    let app = App::new(&cli);
    tracing::debug!(storage = %app.config.storage_path().display(), "config loaded");

    let result = match &cli.command {
        Command::Login { email, password } => login(&app, email, password).await,
        Command::Register {
            email,
            password,
            name,
        } => register(&app, email, password, name).await,
        Command::Logout => logout(&app),
        Command::Whoami => whoami(&app),
        Command::Open { path } => open(&app, path),
        Command::Upload { file } => upload(&app, file).await,
        Command::History => history(&app),
        Command::Dashboard => dashboard(&app),
    };

    if let Err(e) = &result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        return Ok(ExitCode::FAILURE);
    }
    result
}
