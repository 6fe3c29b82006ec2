//! Zen List application binary - composition root.
//!
//! 1. Parse CLI arguments and load configuration from TOML
//! 2. Send logs to a file (the terminal belongs to the UI)
//! 3. Fill the triage queue from the demo set or an item file
//! 4. Run the single-threaded event loop until the user quits

mod cli;

use std::fs::OpenOptions;
use std::io::Stdout;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{DisableMouseCapture, EnableMouseCapture, EventStream};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::time::Instant;

use zen_core::config::{UiConfig, ZenConfig};
use zen_core::events::TriageEvent;
use zen_core::{Result, ZenError};
use zen_triage::keymap::KeyMap;
use zen_triage::provider::{load_queue, DemoProvider, FileProvider};
use zen_triage::session::{SessionSettings, TriageSession};
use zen_triage::status::StatusIndicator;
use zen_triage::TriageQueue;
use zen_tui::{DragTracker, HitMap, Theme, UiAction};

use cli::CliArgs;

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Upper bound on how long the loop sleeps with no timer pending.
const IDLE_WAKE: Duration = Duration::from_secs(1);

/// Install a file-backed subscriber.
///
/// Priority: --log-level flag > RUST_LOG > `general.log_level`.
fn init_logging(cli_level: Option<&str>, config_level: &str, log_file: &Path) -> Result<()> {
    if let Some(parent) = log_file.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = OpenOptions::new().create(true).append(true).open(log_file)?;

    let filter = match cli_level {
        Some(level) => tracing_subscriber::EnvFilter::try_new(level),
        None => tracing_subscriber::EnvFilter::try_from_default_env()
            .or_else(|_| tracing_subscriber::EnvFilter::try_new(config_level)),
    }
    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| ZenError::Config(format!("Failed to initialise logging: {e}")))
}

fn load_config(path: &Path) -> Result<ZenConfig> {
    if path.exists() {
        ZenConfig::load(path)
    } else {
        Ok(ZenConfig::default())
    }
}

fn build_queue(items: Option<PathBuf>) -> Result<TriageQueue> {
    let queue = match items {
        Some(path) => load_queue(&FileProvider::new(path)?)?,
        None => load_queue(&DemoProvider::new())?,
    };
    Ok(queue)
}

fn log_event(event: &TriageEvent) {
    match event {
        TriageEvent::InvariantViolated { reason, .. } => {
            tracing::warn!(event = event.event_name(), reason = %reason, "Triage event");
        }
        _ => tracing::info!(event = event.event_name(), details = ?event, "Triage event"),
    }
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode().map_err(|e| ZenError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .map_err(|e| ZenError::Terminal(format!("Failed to enter alternate screen: {e}")))?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Draw, then wait for either terminal input or the next session deadline.
async fn run(terminal: &mut Tui, session: &mut TriageSession, ui: &UiConfig) -> Result<()> {
    let theme = Theme::default();
    let keymap = KeyMap::new();
    let mut hits = HitMap::new(ui.units_per_column);
    let mut drag = DragTracker::new();
    let mut events = EventStream::new();

    loop {
        let now = Instant::now();
        for event in session.poll_timers(now) {
            log_event(&event);
        }

        let view = session.snapshot(now);
        terminal.draw(|frame| zen_tui::draw(frame, &view, &theme, &mut hits))?;

        let deadline = session.next_deadline(now).unwrap_or(now + IDLE_WAKE);

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(event)) => {
                    let action = zen_tui::translate(
                        &event,
                        &hits,
                        &mut drag,
                        &keymap,
                        ui.units_per_column,
                    );
                    match action {
                        Some(UiAction::Quit) => return Ok(()),
                        Some(UiAction::Input(input)) => {
                            let step = session.handle(input, Instant::now());
                            for event in &step.events {
                                log_event(event);
                            }
                            if step.quit {
                                return Ok(());
                            }
                        }
                        None => {}
                    }
                }
                Some(Err(e)) => {
                    return Err(ZenError::Terminal(format!("Terminal event stream failed: {e}")));
                }
                None => return Ok(()),
            },
            _ = tokio::time::sleep_until(deadline) => {}
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config.
    let config_path = args.resolve_config_path();
    let config = load_config(&config_path)?;

    // Tracing.
    let log_file = args.resolve_log_file(&config, &config_path);
    init_logging(
        args.resolve_log_level().as_deref(),
        &config.general.log_level,
        &log_file,
    )?;
    tracing::info!("Starting Zen List v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_path.display(), exists = config_path.exists(), "Configuration resolved");

    // Items.
    let queue = build_queue(args.resolve_items_path(&config))?;
    let mut session = TriageSession::new(
        queue,
        SessionSettings::from(&config),
        StatusIndicator::from(&config.status),
        Instant::now(),
    );
    for event in session.drain_events() {
        log_event(&event);
    }

    // Terminal.
    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &mut session, &config.ui).await;
    let restored = restore_terminal(&mut terminal);

    let counters = session.shutdown();
    if let Err(e) = &result {
        tracing::error!(error = %e, "Event loop failed");
    }
    result?;
    restored?;

    println!(
        "Approved {} | Dismissed {} today",
        counters.approved, counters.dismissed
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn test_build_queue_defaults_to_demo() {
        let queue = build_queue(None).unwrap();
        assert_eq!(queue.len(), 8);
        assert_eq!(queue.approved_count(), 14);
    }

    #[test]
    fn test_build_queue_from_file() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        file.write_all(
            br#"{"items": [{"id": "a", "source": "email", "title": "Hi", "body": "", "priority": 2}]}"#,
        )
        .unwrap();
        let queue = build_queue(Some(file.path().to_path_buf())).unwrap();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.approved_count(), 0);
    }

    #[test]
    fn test_build_queue_rejects_unknown_extension() {
        assert!(matches!(
            build_queue(Some(PathBuf::from("items.csv"))),
            Err(ZenError::Provider(_))
        ));
    }

    #[test]
    fn test_build_queue_rejects_duplicate_ids() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(
            b"[[items]]\nid = \"a\"\nsource = \"task\"\ntitle = \"One\"\nbody = \"\"\npriority = 3\n\n[[items]]\nid = \"a\"\nsource = \"task\"\ntitle = \"Two\"\nbody = \"\"\npriority = 3\n",
        )
        .unwrap();
        assert!(matches!(
            build_queue(Some(file.path().to_path_buf())),
            Err(ZenError::Triage(_))
        ));
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.triage.swipe_threshold, 100.0);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        file.write_all(b"[triage]\nmax_visible = 0\n").unwrap();
        assert!(load_config(file.path()).is_err());
    }
}
