//! Application state and key dispatch.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use crossterm::{
    cursor::MoveTo,
    event::{KeyCode, KeyEvent},
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use solvestep_session::SolverSession;

use crate::{board::TerminalBoard, catalog::PuzzleCatalog};

const BOARD_X: u16 = 2;
const BOARD_Y: u16 = 2;
const SPEED_STEP_MS: u64 = 25;
const MAX_SPEED_MS: u64 = 1000;

/// What the host loop should do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum AppAction {
    Continue,
    Quit,
}

/// The running application: one session plus the puzzle catalog.
#[derive(Debug)]
pub(crate) struct App {
    session: SolverSession<TerminalBoard>,
    catalog: PuzzleCatalog,
    selected: usize,
}

impl App {
    pub(crate) fn new(catalog: PuzzleCatalog, selected: usize, speed: Duration) -> Self {
        let puzzle = catalog
            .get(selected)
            .expect("selected puzzle index out of range")
            .clone();
        Self {
            session: SolverSession::new(TerminalBoard::new(), puzzle, speed),
            catalog,
            selected,
        }
    }

    /// Drives the pipeline: pumps attempt events and services a due tick.
    pub(crate) fn poll(&mut self, now: Instant) {
        self.session.poll(now);
    }

    /// Deadline of the next animation tick, for bounding the input poll.
    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        self.session.next_deadline()
    }

    pub(crate) fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return AppAction::Quit,
            KeyCode::Char('s') => {
                if self.session.can_solve() {
                    self.session.solve();
                }
            }
            KeyCode::Char('c') => {
                if self.session.can_cancel() {
                    self.session.cancel();
                }
            }
            KeyCode::Char('r') => {
                if self.session.can_reset() {
                    self.session.reset();
                }
            }
            KeyCode::Right | KeyCode::Char('n') => self.select_offset(1),
            KeyCode::Left | KeyCode::Char('p') => self.select_offset(self.catalog.len() - 1),
            KeyCode::Char('+') | KeyCode::Char('=') => self.adjust_speed(-1),
            KeyCode::Char('-') => self.adjust_speed(1),
            _ => {}
        }
        AppAction::Continue
    }

    /// Called before the terminal is torn down; stops any running attempt.
    pub(crate) fn shutdown(&mut self) {
        if self.session.can_cancel() {
            self.session.cancel();
        }
    }

    fn select_offset(&mut self, offset: usize) {
        self.selected = (self.selected + offset) % self.catalog.len();
        let puzzle = self
            .catalog
            .get(self.selected)
            .expect("catalog index wrapped out of range")
            .clone();
        self.session.select_puzzle(puzzle);
    }

    fn adjust_speed(&mut self, direction: i64) {
        let current = u64::try_from(self.session.speed().as_millis()).unwrap_or(MAX_SPEED_MS);
        let adjusted = if direction < 0 {
            current.saturating_sub(SPEED_STEP_MS)
        } else {
            (current + SPEED_STEP_MS).min(MAX_SPEED_MS)
        };
        self.session.set_speed(Duration::from_millis(adjusted));
    }

    pub(crate) fn draw(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, Clear(ClearType::All))?;

        queue!(
            out,
            MoveTo(BOARD_X, 0),
            SetForegroundColor(Color::White),
            Print(format!(
                "Solvestep - {} [{}/{}]",
                self.session.puzzle().title(),
                self.selected + 1,
                self.catalog.len()
            )),
        )?;

        self.session.display().draw(out, BOARD_X, BOARD_Y)?;

        let status_y = BOARD_Y + TerminalBoard::HEIGHT + 2;
        let status = if self.session.state().is_solving() {
            "Solving..."
        } else {
            self.session.status_text()
        };
        queue!(
            out,
            MoveTo(BOARD_X, status_y),
            SetForegroundColor(Color::Yellow),
            Print(status),
        )?;

        queue!(
            out,
            MoveTo(BOARD_X, status_y + 1),
            SetForegroundColor(Color::DarkGrey),
            Print(format!("speed: {} ms/step", self.session.speed().as_millis())),
        )?;

        let mut controls = String::new();
        if self.session.can_solve() {
            controls.push_str("[s]olve  ");
        }
        if self.session.can_cancel() {
            controls.push_str("[c]ancel  ");
        }
        if self.session.can_reset() {
            controls.push_str("[r]eset  ");
        }
        controls.push_str("[n/p] puzzle  [+/-] speed  [q]uit");
        queue!(
            out,
            MoveTo(BOARD_X, status_y + 2),
            SetForegroundColor(Color::DarkGrey),
            Print(controls),
            ResetColor,
        )?;

        out.flush()
    }
}
