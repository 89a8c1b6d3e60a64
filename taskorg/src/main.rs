//! `TaskOrganizer`: terminal task list backed by a REST task service.
//!
//! Launches the TUI against the configured service, or against a built-in
//! in-memory service in demo mode. Configuration via CLI flags, environment
//! variables, or config file (`~/.config/taskorg/config.toml`).
//!
//! ```bash
//! # Offline demo mode
//! cargo run --bin taskorg -- --demo
//!
//! # Connect to a task service
//! cargo run --bin taskorg -- --service-url http://127.0.0.1:8080/api
//!
//! # Or via environment variables
//! TASKORG_SERVICE_URL=http://127.0.0.1:8080/api cargo run --bin taskorg
//! ```

use std::io;
use std::path::Path;

use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing_appender::non_blocking::WorkerGuard;

use taskorg::app::App;
use taskorg::components::{TaskBox, TaskList};
use taskorg::config::{CliArgs, ClientConfig, ServiceTarget};
use taskorg::coordinator::Coordinator;
use taskorg::service::TaskService;
use taskorg::service::http::HttpTaskService;
use taskorg::service::memory::InMemoryTaskService;
use taskorg::ui;

#[tokio::main]
async fn main() -> io::Result<()> {
    let cli = CliArgs::parse();

    // Load and resolve configuration (CLI args > env > config file > defaults).
    let config = match ClientConfig::load(&cli) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Warning: failed to load config file: {e}");
            ClientConfig::default()
        }
    };

    // Initialize logging before terminal setup (logs go to file, not stdout).
    let _log_guard = init_logging(&cli.log_level, cli.log_file.as_deref());

    tracing::info!("taskorg starting");

    // Set up terminal.
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app against the selected service.
    let result = match config.service_target() {
        ServiceTarget::Remote(url) => match HttpTaskService::new(&url) {
            Ok(service) => run_app(&mut terminal, service, url, &config).await,
            Err(e) => {
                tracing::warn!(%url, error = %e, "invalid service URL, using demo service");
                run_app(
                    &mut terminal,
                    InMemoryTaskService::demo(),
                    format!("demo (invalid URL {url})"),
                    &config,
                )
                .await
            }
        },
        ServiceTarget::Demo => {
            run_app(&mut terminal, InMemoryTaskService::demo(), "demo".to_string(), &config).await
        }
    };

    // Restore terminal.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!("taskorg exiting");
    result
}

/// Initialize file-based logging.
///
/// Logs are written to a file (never stdout, since ratatui owns the terminal).
/// Returns a [`WorkerGuard`] that must be held until shutdown to ensure all
/// buffered log entries are flushed.
fn init_logging(level: &str, file_path: Option<&Path>) -> Option<WorkerGuard> {
    let default_path = std::env::temp_dir().join("taskorg.log");
    let log_path = file_path.unwrap_or(&default_path);

    let log_dir = log_path.parent()?;
    let file_name = log_path.file_name()?.to_str()?;

    let file_appender = tracing_appender::rolling::never(log_dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_env_filter(env_filter)
        .with_ansi(false)
        .init();

    Some(guard)
}

/// Main application loop.
async fn run_app<S: TaskService + 'static>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    service: S,
    service_label: String,
    config: &ClientConfig,
) -> io::Result<()> {
    let task_box = TaskBox::new().with_max_title_len(config.max_title_len);
    let mut coordinator = Coordinator::with_components(service, TaskList::new(), task_box);
    coordinator.start();
    let mut app = App::new(coordinator, service_label);

    loop {
        // Step 1: Draw the UI frame.
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Step 2: Forward intents and apply finished service calls (non-blocking).
        app.coordinator.tick();

        // Step 3: Poll for terminal input events.
        if event::poll(config.poll_timeout)?
            && let Event::Key(key) = event::read()?
        {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            app.handle_key_event(key);
        }

        if app.should_quit {
            if app.coordinator.in_flight() > 0 {
                tracing::info!(
                    pending = app.coordinator.in_flight(),
                    "quitting with service calls in flight"
                );
            }
            return Ok(());
        }
    }
}
