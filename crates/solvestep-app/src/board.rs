//! The terminal board: the display collaborator the session drives.

use std::io::{self, Write};

use crossterm::{
    cursor::MoveTo,
    queue,
    style::{Color, Print, SetForegroundColor},
};
use solvestep_core::{Coords, Digit, InitialValue};
use solvestep_session::BoardDisplay;

/// One displayed cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    digit: Digit,
    fixed: bool,
}

/// A 9×9 board rendered with crossterm.
///
/// The session mutates the board through the [`BoardDisplay`] capability
/// set; the host loop renders the current contents each frame with
/// [`TerminalBoard::draw`]. Fixed digits and solver digits are drawn in
/// different colors so the animation reads at a glance.
#[derive(Debug, Default)]
pub(crate) struct TerminalBoard {
    cells: [[Option<Cell>; 9]; 9],
}

impl TerminalBoard {
    /// Height of the rendered grid in terminal rows.
    pub(crate) const HEIGHT: u16 = 13;

    #[must_use]
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        self.cells[row][col]
    }

    fn set_cell(&mut self, coords: Coords, cell: Option<Cell>) {
        self.cells[usize::from(coords.row())][usize::from(coords.col())] = cell;
    }

    /// Draws the grid with its top-left corner at `(x, y)`.
    pub(crate) fn draw(&self, out: &mut impl Write, x: u16, y: u16) -> io::Result<()> {
        let mut line = y;
        for band in 0..3 {
            queue!(
                out,
                MoveTo(x, line),
                SetForegroundColor(Color::DarkGrey),
                Print("+-------+-------+-------+"),
            )?;
            line += 1;
            for row_in_band in 0..3 {
                let row = band * 3 + row_in_band;
                queue!(out, MoveTo(x, line))?;
                for stack in 0..3 {
                    queue!(out, SetForegroundColor(Color::DarkGrey), Print("| "))?;
                    for col_in_stack in 0..3 {
                        let col = stack * 3 + col_in_stack;
                        match self.cell(row, col) {
                            Some(cell) => {
                                let color = if cell.fixed { Color::White } else { Color::Cyan };
                                queue!(
                                    out,
                                    SetForegroundColor(color),
                                    Print(cell.digit.to_string()),
                                    Print(" "),
                                )?;
                            }
                            None => {
                                queue!(
                                    out,
                                    SetForegroundColor(Color::DarkGrey),
                                    Print(". "),
                                )?;
                            }
                        }
                    }
                }
                queue!(out, SetForegroundColor(Color::DarkGrey), Print("|"))?;
                line += 1;
            }
        }
        queue!(
            out,
            MoveTo(x, line),
            SetForegroundColor(Color::DarkGrey),
            Print("+-------+-------+-------+"),
        )?;
        Ok(())
    }
}

impl BoardDisplay for TerminalBoard {
    fn initialise(&mut self) {
        self.cells = [[None; 9]; 9];
    }

    fn reset(&mut self) {
        self.cells = [[None; 9]; 9];
    }

    fn add_initial_values(&mut self, values: &[InitialValue]) {
        for value in values {
            self.set_cell(
                value.coords,
                Some(Cell {
                    digit: value.digit,
                    fixed: true,
                }),
            );
        }
    }

    fn add_digit(&mut self, coords: Coords, digit: Digit) {
        self.set_cell(coords, Some(Cell { digit, fixed: false }));
    }

    fn remove_digit(&mut self, coords: Coords) {
        self.set_cell(coords, None);
    }

    fn remove_digits(&mut self) {
        for row in &mut self.cells {
            for cell in row.iter_mut() {
                if cell.is_some_and(|c| !c.fixed) {
                    *cell = None;
                }
            }
        }
    }
}
