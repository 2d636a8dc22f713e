use anyhow::{Context, Result};
use clap::Parser;
use secretly::app::App;
use secretly::cli::Cli;
use secretly::Config;

/// Set up panic hook to restore terminal state on panic
fn setup_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(std::io::stdout(), crossterm::terminal::LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_panic_hook();

    // stdout belongs to the TUI, so logs go to a file
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(|| dirs::home_dir().unwrap_or_default())
        .join("secretly");
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory: {:?}", log_dir))?;

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let file_appender = tracing_appender::rolling::never(&log_dir, "secretly.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    let config_path = cli.config_path();
    let mut config = Config::load_or_create(&config_path)
        .with_context(|| format!("Failed to load configuration from {:?}", config_path))?;
    cli.apply(&mut config);
    tracing::info!("Starting secretly with config {:?}", config_path);

    let mut app = App::new(config)?;
    let result = app.run();

    drop(guard);
    result
}
