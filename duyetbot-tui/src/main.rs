use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use duyetbot_core::{DemoConfig, DemoError, LoggingConfig};
use duyetbot_tui::app::App;
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const DEFAULT_FILTER: &str = "duyetbot_tui=info,duyetbot_core=info";

fn main() -> Result<()> {
    let config = match DemoConfig::load() {
        Ok(config) => config,
        Err(e) => {
            let err = DemoError::from(e);
            eprintln!("Error: {}", err);
            if let Some(suggestion) = err.user_suggestion() {
                eprintln!("Hint: {}", suggestion);
            }
            return Err(err.into());
        }
    };

    let log_path = config.log_file_path();
    setup_logging(&config.logging, &log_path).context("Failed to initialize logging")?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        log_file = %log_path.display(),
        "duyetbot demo starting"
    );

    let mut terminal = setup_terminal(config.tui.mouse_enabled)?;
    let result = run_app(&mut terminal, &config);
    restore_terminal(&mut terminal, config.tui.mouse_enabled)?;

    if let Err(e) = result {
        eprintln!("Application error: {e:#}");
        return Err(e);
    }

    Ok(())
}

/// Logs go to a file; stdout belongs to the terminal UI.
fn setup_logging(logging: &LoggingConfig, path: &Path) -> Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    let file_name = path
        .file_name()
        .context("Log file path has no file name")?;
    let appender = tracing_appender::rolling::never(dir, file_name);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let (json_layer, text_layer) = if logging.json_format {
        let layer = fmt::layer()
            .json()
            .with_writer(appender)
            .with_target(true);
        (Some(layer), None)
    } else {
        let layer = fmt::layer()
            .with_writer(appender)
            .with_ansi(false)
            .with_target(true)
            .with_line_number(true);
        (None, Some(layer))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .try_init()
        .context("A global tracing subscriber is already set")?;
    Ok(())
}

fn setup_terminal(mouse: bool) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if mouse {
        execute!(stdout, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mouse: bool,
) -> Result<()> {
    disable_raw_mode()?;
    if mouse {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    config: &DemoConfig,
) -> Result<()> {
    let rt = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;
    rt.block_on(async {
        let mut app = App::new(config);
        app.run(terminal).await
    })
}
