use anyhow::Result;
use tracing_subscriber::EnvFilter;

mod app;
mod client;
mod config;
mod handler;
mod images;
mod reveal;
mod tui;
mod ui;

use app::App;

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = init_tracing();

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let result = run(&mut terminal).await;
    tui::restore()?;
    result
}

async fn run(terminal: &mut tui::Tui) -> Result<()> {
    let mut app = App::new();
    let mut events = tui::EventHandler::new();

    while !app.should_quit {
        terminal.draw(|frame| ui::render(&mut app, frame))?;

        if let Some(event) = events.next().await {
            handler::handle_event(&mut app, event);
        }
        app.poll_generation().await;
    }

    Ok(())
}

/// Log to a rolling file; stderr belongs to the terminal UI.
fn init_tracing() -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir = dirs::data_dir()?.join("relatos").join("logs");
    std::fs::create_dir_all(&log_dir).ok()?;

    let appender = tracing_appender::rolling::daily(log_dir, "relatos.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Some(guard)
}
