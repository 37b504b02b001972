//! AgentGuard screening dashboard — interactive Ratatui TUI.
//!
//! Screens one transaction file and lets the reviewer browse agents and
//! rows. Usage:
//!   agentguard-tui fixtures/sample_transactions.csv --as-of 2025-07-10

mod app;
mod ui;

use std::{io, path::PathBuf, process::ExitCode, time::Duration};

use chrono::NaiveDate;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use app::{App, Source};

#[derive(Parser)]
#[command(name = "agentguard-tui", version, about = "Interactive AgentGuard screening dashboard")]
struct Cli {
    /// Transaction file (.csv).
    file: PathBuf,
    /// Screening configuration file (TOML). Defaults apply when omitted.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Judge ID expiry against this date (YYYY-MM-DD) instead of today.
    #[arg(long, value_name = "DATE")]
    as_of: Option<NaiveDate>,
}

// ── Terminal setup / teardown ─────────────────────────────────────────────────

fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}

// ── Main event loop ───────────────────────────────────────────────────────────

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::ui(f, app))?;

        if !event::poll(Duration::from_millis(200))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => return Ok(()),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return Ok(()),

            KeyCode::Down | KeyCode::Char('j') => app.next(),
            KeyCode::Up | KeyCode::Char('k') => app.previous(),
            KeyCode::Char('f') | KeyCode::Char('F') => app.cycle_filter(),
            KeyCode::Char('r') | KeyCode::Char('R') => app.rescreen(),

            _ => {}
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let source = Source {
        file: cli.file,
        config: cli.config,
        as_of: cli.as_of,
    };

    // Fail before touching the terminal if the first screen cannot run.
    let report = match source.screen() {
        Ok(report) => report,
        Err(e) => {
            eprintln!("error: {}", e);
            return ExitCode::from(2);
        }
    };
    let mut app = App::new(source, report);

    // Restore the terminal before printing a panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let result = setup_terminal().and_then(|mut terminal| {
        let outcome = run(&mut terminal, &mut app);
        restore_terminal(&mut terminal)?;
        outcome
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: terminal failure: {}", e);
            ExitCode::from(2)
        }
    }
}
