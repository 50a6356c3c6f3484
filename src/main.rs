use std::io;
use std::sync::Arc;

use color_eyre::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use stashview::api::{HttpItemApi, ItemApi};
use stashview::app::App;
use stashview::config::Config;
use stashview::events::AppMessage;
use stashview::logging;
use stashview::ui;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Set up file logging; silently skipped when no writable directory is
/// available.
fn init_logging() -> Option<()> {
    let dir = logging::default_log_dir()?;
    let file = logging::open_log_file(&dir).ok()?;
    logging::init(file);
    Some(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();

    // Take the message receiver; select! needs ownership
    let mut message_rx: Option<mpsc::UnboundedReceiver<AppMessage>> = app.message_rx.take();

    loop {
        if app.needs_redraw {
            terminal.draw(|frame| ui::render(frame, &*app))?;
            app.needs_redraw = false;
        }

        let tick = tokio::time::sleep(std::time::Duration::from_millis(100));

        tokio::select! {
            _ = tick => {
                app.tick();
            }

            event_result = event_stream.next() => {
                if let Some(Ok(event)) = event_result {
                    match event {
                        Event::Key(key) if key.kind == KeyEventKind::Press => {
                            app.handle_key(key);
                        }
                        Event::Mouse(mouse) => {
                            app.handle_mouse(mouse);
                        }
                        Event::Resize(width, height) => {
                            app.set_terminal_size(width, height);
                        }
                        _ => {}
                    }
                }
            }

            message = async {
                match message_rx.as_mut() {
                    Some(rx) => rx.recv().await,
                    None => None,
                }
            } => {
                if let Some(message) = message {
                    app.handle_message(message);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    if std::env::args().any(|arg| arg == "--version" || arg == "-V") {
        println!("stashview {}", VERSION);
        return Ok(());
    }

    let _ = init_logging();
    let config = Config::from_env();
    tracing::info!(api_url = %config.api_url, per_page = config.per_page, "starting");

    let api: Arc<dyn ItemApi> = Arc::new(HttpItemApi::with_base_url(config.api_url.clone()));
    let mut app = App::new(&config, api);

    let mut terminal = setup_terminal()?;
    let size = terminal.size()?;
    app.set_terminal_size(size.width, size.height);
    app.initial_load();

    let result = run_app(&mut terminal, &mut app).await;
    restore_terminal(&mut terminal)?;
    result
}
