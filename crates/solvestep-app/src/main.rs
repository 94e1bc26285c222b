//! Terminal front-end for the Solvestep visualizer.

mod app;
mod board;
mod catalog;

use std::io;
use std::time::{Duration, Instant};

use app::{App, AppAction};
use catalog::PuzzleCatalog;
use clap::Parser;
use crossterm::{
    cursor::{Hide, Show},
    event::{self, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};

/// Upper bound on how long the loop sleeps in the input poll, so puzzle
/// events keep getting pumped even when no tick is imminent.
const MAX_POLL_TIMEOUT: Duration = Duration::from_millis(33);

#[derive(Debug, Parser)]
#[command(name = "solvestep", about = "Watch an exact-cover engine solve Sudoku step by step")]
struct Args {
    /// Animation interval in milliseconds per displayed search step.
    #[arg(long, default_value_t = 100)]
    speed: u64,

    /// Index of the puzzle to select at startup.
    #[arg(long, default_value_t = 0)]
    puzzle: usize,
}

fn main() -> io::Result<()> {
    better_panic::install();
    env_logger::init();

    let args = Args::parse();
    let catalog = PuzzleCatalog::bundled();
    if args.puzzle >= catalog.len() {
        eprintln!(
            "puzzle index {} out of range (the catalog has {} puzzles)",
            args.puzzle,
            catalog.len()
        );
        std::process::exit(1);
    }

    log::info!(
        "starting with {} bundled puzzles, speed {} ms",
        catalog.len(),
        args.speed
    );
    let mut app = App::new(catalog, args.puzzle, Duration::from_millis(args.speed));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, Hide)?;

    let result = run(&mut stdout, &mut app);

    app.shutdown();
    execute!(stdout, Show, LeaveAlternateScreen)?;
    disable_raw_mode()?;

    result
}

fn run(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    loop {
        let now = Instant::now();
        app.poll(now);
        app.draw(stdout)?;

        let timeout = app
            .next_deadline()
            .map_or(MAX_POLL_TIMEOUT, |deadline| {
                deadline.saturating_duration_since(now).min(MAX_POLL_TIMEOUT)
            });
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                match app.handle_key(key) {
                    AppAction::Continue => {}
                    AppAction::Quit => return Ok(()),
                }
            }
        }
    }
}
