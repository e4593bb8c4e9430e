// src/ui/tui.rs
//! Terminal setup and the frame loop.

use std::{
    io::{self, Stdout},
    path::Path,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event as CEvent, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::{app::App, config::Settings};

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Run the UI until the operator quits, then write the (possibly tweaked)
/// settings back to `settings_path`.
pub fn run(settings: Settings, settings_path: &Path) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let outcome = run_frames(&mut terminal, settings);

    // Restore the terminal before reporting anything.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    let settings = outcome?;
    settings
        .save_to_file(settings_path)
        .with_context(|| format!("saving settings to {}", settings_path.display()))?;
    log::info!("settings saved to {}", settings_path.display());
    Ok(())
}

/// Update-then-draw once per frame; returns the final settings on quit.
fn run_frames(terminal: &mut Term, settings: Settings) -> Result<Settings> {
    let frame_interval = Duration::from_secs_f64(1.0 / settings.display.frame_rate as f64);
    let second = Duration::from_secs(1);

    let mut app = App::new(settings)?;
    let mut last_frame = Instant::now()
        .checked_sub(frame_interval)
        .unwrap_or_else(Instant::now);
    let mut last_second = Instant::now();

    loop {
        if last_frame.elapsed() >= frame_interval {
            last_frame = Instant::now();
            app.update();
            terminal.draw(|f| app.draw(f))?;
        }

        let timeout = frame_interval.saturating_sub(last_frame.elapsed());
        if event::poll(timeout)? {
            if let CEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && app.on_key(key) {
                    break;
                }
            }
        }

        if last_second.elapsed() >= second {
            last_second += second;
            app.tick_elapsed();
        }
    }

    log::info!("quitting");
    Ok(app.settings)
}
