mod app;
mod cli;
mod commands;
mod config;
mod datasources;
mod db;
mod error;
mod logic;
mod models;
mod ui;

use anyhow::Context;
use app::{App, Screen};
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use db::Database;
use error::Result;
use logic::WeatherService;
use ratatui::{backend::CrosstermBackend, Frame, Terminal};
use std::fs::OpenOptions;
use std::io::{self, Stdout};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use ui::screens::{ForecastScreen, StatusLine, TodayScreen};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // The TUI owns the terminal, so its logs go to a file
    let log_file = match cli.command {
        None => Some(Config::data_dir(cli.data_dir.as_ref())?.join("skycast.log")),
        Some(_) => None,
    };
    init_logging(cli.log_level(), log_file.as_deref())?;

    if let Some(Commands::Init) = cli.command {
        return commands::init();
    }

    let config = Config::load(cli.config.as_ref()).context("Could not load configuration")?;
    let db = Database::open(cli.data_dir.as_ref()).context("Could not open database")?;
    let service = WeatherService::new(config, db);

    match &cli.command {
        Some(Commands::Init) => Ok(()),
        Some(Commands::Check) => commands::check(&service, cli.config.as_ref()).await,
        Some(Commands::Today { city }) => commands::today(&service, city.as_deref()).await,
        Some(Commands::Forecast { city }) => commands::forecast(&service, city.as_deref()).await,
        None => run_tui(&service, cli.city.as_deref()).await,
    }
}

fn init_logging(default_level: &str, log_file: Option<&Path>) -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Could not open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
    }

    Ok(())
}

async fn run_tui(service: &WeatherService, city_override: Option<&str>) -> anyhow::Result<()> {
    let config = service.config();
    let initial_city = city_override
        .and_then(|c| WeatherService::validate_city(c).ok())
        .unwrap_or_else(|| service.initial_city());

    let mut app = App::new(
        config.openweathermap.units,
        config.day_boundary,
        &initial_city,
    );
    app.request_load(&initial_city);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the main loop
    let result = run_app(&mut terminal, &mut app, service).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result.context("Terminal UI failed")
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    service: &WeatherService,
) -> Result<()> {
    loop {
        terminal.draw(|f| draw(f, app))?;

        // Fetch after drawing so the loading state is visible
        if let Some(pending) = app.take_pending() {
            let result = if pending.remember {
                service.search(&pending.city).await
            } else {
                service.load(&pending.city).await
            };
            match result {
                Ok(report) => app.apply_report(report),
                Err(e) => {
                    tracing::warn!(city = %pending.city, "Weather lookup failed: {}", e);
                    app.apply_error(&e);
                }
            }
            continue;
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key(app, key);
                }
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn draw(f: &mut Frame, app: &App) {
    let area = f.area();
    let status = StatusLine {
        loading: app.loading,
        error: app.error_message.as_deref(),
        message: app.status_message.as_deref(),
    };
    let report = app.report.as_ref();

    match app.screen {
        Screen::Today => {
            let screen = TodayScreen::new(
                report.and_then(|r| r.current.as_ref()),
                app.units,
                app.day_boundary,
                &app.search_state,
            )
            .with_status(status);
            f.render_widget(screen, area);
        }
        Screen::Forecast => {
            let screen = ForecastScreen::new(
                report.and_then(|r| r.forecast.as_ref()),
                app.units,
                app.forecast_state.selected_index,
                &app.search_state,
            )
            .with_status(status);
            f.render_widget(screen, area);
        }
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.quit();
        return;
    }

    if app.search_state.editing {
        handle_search_input(app, key.code);
        return;
    }

    match key.code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Char('/') => app.search_state.start_editing(),
        KeyCode::Char('r') => app.request_refresh(),
        KeyCode::Char(c) => {
            if let Some(screen) = Screen::from_key(c) {
                app.switch_screen(screen);
            }
        }
        KeyCode::Left if app.screen == Screen::Forecast => app.forecast_state.prev(),
        KeyCode::Right if app.screen == Screen::Forecast => {
            let len = app.forecast_len();
            app.forecast_state.next(len);
        }
        KeyCode::Esc => app.clear_error(),
        _ => {}
    }
}

fn handle_search_input(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc => app.search_state.cancel_editing(&app.city),
        KeyCode::Enter => app.submit_search(),
        KeyCode::Backspace => app.search_state.backspace(),
        KeyCode::Left => app.search_state.left(),
        KeyCode::Right => app.search_state.right(),
        KeyCode::Char(c) => app.search_state.insert(c),
        _ => {}
    }
}
