//! The Witching Hour
//!
//! A terminal game about running a witch's potion shop for one night.
//!
//! Usage: `witching-hour [CONFIG]` (defaults to `witching-hour.toml`)

use anyhow::Context;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::fs::File;
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use witching_hour::game::config::CONFIG_FILE;
use witching_hour::tui::App;
use witching_hour::{AssetData, Game, GameConfig, Result};

fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .map_or_else(|| PathBuf::from(CONFIG_FILE), PathBuf::from);

    // Config may name the log file; report on reading it once logging is up
    let read = GameConfig::read(&config_path);
    let log_path = match &read {
        Ok(Some(config)) => config.log_path(),
        _ => GameConfig::default().log_path(),
    };
    init_logging(&log_path)?;
    info!(version = witching_hour::VERSION, "starting");
    let config = GameConfig::resolve(&config_path, read);

    let assets = match &config.assets_path {
        Some(path) => AssetData::load(path)
            .with_context(|| format!("loading game data from {}", path.display()))?,
        None => AssetData::default(),
    };
    let game = Game::new(&config, &assets).context("setting up the night")?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(game);
    let result = run(&mut terminal, &mut app);

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result?;

    info!(score = app.game.player.score, "finished");
    println!("\n{}\n", app.game.player);

    Ok(())
}

fn run(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, app: &mut App) -> Result<()> {
    while app.running {
        terminal.draw(|frame| app.render(frame))?;

        if !app.handle_input()? {
            break;
        }
    }
    Ok(())
}

/// Send tracing output to a file; the terminal belongs to the UI
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(Mutex::new(file)).with_ansi(false))
        .with(EnvFilter::from_default_env().add_directive("witching_hour=info".parse()?))
        .init();
    Ok(())
}
