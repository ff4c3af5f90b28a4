//! `Chatframe` - rich-text chat scrollback in the terminal
//!
//! Entry point for the application.

use std::fs::File;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use ratatui::crossterm::event::{self, Event, KeyEventKind};
use tracing::{Level, info, subscriber, warn};
use tracing_subscriber::FmtSubscriber;

use chatframe::app::{App, spawn_demo_feed};
use chatframe::cli::Args;
use chatframe::fs::{ViewportSettings, load_settings};
use chatframe::tui::TerminalEventGuard;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(&args)?;

    let settings = load_settings(&args.config).unwrap_or_else(|err| {
        warn!("using default settings: {err:#}");
        ViewportSettings::default()
    });

    let mut terminal = ratatui::init();
    let result = run_app(&mut terminal, &args, &settings);
    ratatui::restore();

    result
}

fn init_logging(args: &Args) -> Result<()> {
    let file = File::create(&args.log_file)
        .with_context(|| format!("failed to create log file {}", args.log_file.display()))?;

    let mut builder = FmtSubscriber::builder()
        .with_max_level(args.level)
        .with_target(false)
        .with_ansi(false)
        .with_writer(Mutex::new(file));

    if [Level::DEBUG, Level::TRACE].contains(&args.level) {
        builder = builder.with_file(true).with_line_number(true);
    }

    subscriber::set_global_default(builder.finish()).context("setting default subscriber")?;
    Ok(())
}

fn run_app(
    terminal: &mut ratatui::DefaultTerminal,
    args: &Args,
    settings: &ViewportSettings,
) -> Result<()> {
    // Must come after `ratatui::init`, which resets terminal modes.
    let _event_guard = TerminalEventGuard::new();

    let mut app = App::new(settings);

    if args.feed_interval_ms > 0 {
        spawn_demo_feed(
            app.event_sender(),
            Duration::from_millis(args.feed_interval_ms),
        );
    }
    info!("chatframe started");

    loop {
        terminal.draw(|frame| {
            app.update_layout(frame.area());
            app.render(frame);
        })?;

        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                Event::Paste(text) => app.handle_paste(&text),
                // Next draw picks up the new size.
                _ => {}
            }
        }

        app.process_events();
        app.tick();

        if app.should_quit() {
            break;
        }
    }

    info!("chatframe exiting");
    Ok(())
}
