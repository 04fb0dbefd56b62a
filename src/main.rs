use pwfield::app::{App, ClipboardSource};
use pwfield::cli::{parse_args, run_cli_command, usage};
use pwfield::field::{PasswordForm, TerminalLockState};
use pwfield::startup::{
    collect_database_requests, default_log_path, init_logging, run_self_test, LaunchConfig,
    StdinReader,
};
use pwfield::terminal::{setup_panic_hook, TerminalManager};
use pwfield::ui;

use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::{backend::Backend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Render and sampler tick
const TICK_INTERVAL: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    // Help, version and usage errors are handled before any initialization
    let command = match parse_args(std::env::args()) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("pwfield: {}\n\n{}", e, usage());
            std::process::exit(2);
        }
    };
    let Some(options) = run_cli_command(command) else {
        return Ok(());
    };

    color_eyre::install()?;

    if let Err(e) = run_self_test() {
        eprintln!("pwfield - Error");
        eprintln!("Fatal error while testing the cryptographic functions.");
        eprintln!("{}", e);
        std::process::exit(e.category().exit_code());
    }

    let config = match LaunchConfig::load(options.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("pwfield: {}", e);
            eprintln!("{}", e.category().recovery_hint());
            std::process::exit(e.category().exit_code());
        }
    };

    if let Some(path) = default_log_path() {
        if let Err(e) = init_logging(&config, &path) {
            eprintln!("Warning: {}", e);
        }
    }
    tracing::info!(
        files = options.files.len(),
        pw_stdin = options.pw_stdin,
        parent_window = ?options.parent_window,
        "pwfield starting"
    );

    let requests = collect_database_requests(&options, &mut StdinReader, &mut io::stdout())?;

    // Setup panic hook to ensure terminal cleanup on panic
    setup_panic_hook();

    let runtime = tokio::runtime::Runtime::new()?;

    let mut term_manager = TerminalManager::new()?;
    let lock_state = Arc::new(TerminalLockState::new(term_manager.lock_state_reporting()));
    let form = PasswordForm::with_poll_interval(lock_state.clone(), config.poll_interval());
    let mut app = App::new(
        form,
        requests,
        &config,
        Box::new(ClipboardSource),
        Instant::now(),
    );

    let result = runtime.block_on(run_app(term_manager.terminal(), &mut app, &lock_state));
    term_manager.restore();

    for outcome in app.outcomes() {
        println!("{}", outcome);
    }
    tracing::info!(outcomes = app.outcomes().len(), "pwfield exiting");
    result
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    lock_state: &TerminalLockState,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();

    loop {
        // Draw the UI only when needed
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, app))?;
            app.needs_redraw = false;
        }

        if app.should_quit {
            return Ok(());
        }

        let timeout = tokio::time::sleep(TICK_INTERVAL);

        tokio::select! {
            _ = timeout => {
                app.tick(Instant::now());
            }

            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(Event::Key(key))) => {
                        // Lock state rides on every key event, releases included
                        lock_state.record(key.state);
                        if key.kind == KeyEventKind::Press {
                            app.handle_key(key, Instant::now());
                        }
                    }
                    Some(Ok(Event::Paste(text))) => app.handle_paste(&text),
                    Some(Ok(Event::Resize(_, _))) => app.mark_dirty(),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::error!(error = %e, "terminal event stream failed");
                        return Err(e.into());
                    }
                    None => return Ok(()),
                }
            }
        }
    }
}
