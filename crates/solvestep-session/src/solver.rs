//! One solve attempt, from puzzle to emitted events.

use solvestep_core::{COLUMN_COUNT, CoverRow, InternalRow, Puzzle, build_internal_rows, decode_selection};
use solvestep_dlx::{CancelToken, Matrix};

use crate::event::SolverEvent;

/// Encodes the puzzle, runs the engine to its first solution, and emits the
/// attempt's events through `emit`.
///
/// Emission rules:
/// - events carry only non-fixed rows;
/// - a search step whose selection is entirely fixed rows is counted but
///   not emitted (nothing on the board would change);
/// - exactly one terminal event is emitted, unless cancellation was
///   observed, in which case the attempt ends silently.
pub(crate) fn run_attempt(puzzle: &Puzzle, cancel: &CancelToken, emit: &mut dyn FnMut(SolverEvent)) {
    let internal_rows = build_internal_rows(puzzle);

    let mut matrix = Matrix::new(COLUMN_COUNT);
    for internal_row in &internal_rows {
        let columns: Vec<usize> = CoverRow::from_internal_row(internal_row)
            .column_indices()
            .collect();
        matrix.add_row(&columns);
    }
    log::debug!(
        "solving {:?}: {} internal rows, {} fixed",
        puzzle.title(),
        internal_rows.len(),
        puzzle.initial_values().len(),
    );

    let mut step_count = 0_usize;
    let solution = matrix.solve_first(cancel, |selection| {
        step_count += 1;
        let rows = unfixed_rows(selection, &internal_rows);
        if !rows.is_empty() {
            emit(SolverEvent::SearchStep { step_count, rows });
        }
    });

    match solution {
        Some(selection) => {
            log::info!(
                "{:?}: solution found after {step_count} search steps",
                puzzle.title()
            );
            let rows = unfixed_rows(&selection, &internal_rows);
            emit(SolverEvent::SolutionFound { step_count, rows });
        }
        None if cancel.is_cancelled() => {
            log::info!("{:?}: cancelled after {step_count} search steps", puzzle.title());
        }
        None => {
            log::info!(
                "{:?}: search space exhausted after {step_count} search steps",
                puzzle.title()
            );
            emit(SolverEvent::NoSolutionFound { step_count });
        }
    }
}

/// Decodes a selection and keeps only the rows worth redrawing.
fn unfixed_rows(selection: &[usize], internal_rows: &[InternalRow]) -> Vec<InternalRow> {
    decode_selection(selection, internal_rows)
        .into_iter()
        .filter(|row| !row.is_fixed)
        .collect()
}

#[cfg(test)]
mod tests {
    use solvestep_core::{Coords, Digit};

    use super::*;

    /// A valid completed grid used to derive test puzzles.
    const SOLVED: [&str; 9] = [
        "185362947",
        "793148526",
        "246795183",
        "564239871",
        "931874265",
        "827516394",
        "318427659",
        "672951438",
        "459683712",
    ];

    fn puzzle_with_blank(row: usize, col: usize) -> Puzzle {
        let rows: Vec<String> = SOLVED
            .iter()
            .enumerate()
            .map(|(r, s)| {
                if r == row {
                    let mut chars: Vec<char> = s.chars().collect();
                    chars[col] = '.';
                    chars.into_iter().collect()
                } else {
                    (*s).to_string()
                }
            })
            .collect();
        Puzzle::from_rows("test", &rows).unwrap()
    }

    fn collect_events(puzzle: &Puzzle, cancel: &CancelToken) -> Vec<SolverEvent> {
        let mut events = Vec::new();
        run_attempt(puzzle, cancel, &mut |event| events.push(event));
        events
    }

    #[test]
    fn single_free_cell_emits_its_digit_then_the_solution() {
        let puzzle = puzzle_with_blank(0, 0);
        let events = collect_events(&puzzle, &CancelToken::new());

        let expected_row = InternalRow::new(Coords::new(0, 0), Digit::D1, false);
        let terminal = events.last().unwrap();
        let SolverEvent::SolutionFound { rows, .. } = terminal else {
            panic!("expected SolutionFound, got {terminal:?}");
        };
        assert_eq!(rows, &vec![expected_row]);

        // Every emitted event concerns only the one free cell.
        for event in &events {
            match event {
                SolverEvent::SearchStep { rows, .. } | SolverEvent::SolutionFound { rows, .. } => {
                    assert!(rows.iter().all(|r| !r.is_fixed));
                    assert!(rows.iter().all(|r| r.coords == Coords::new(0, 0)));
                }
                SolverEvent::NoSolutionFound { .. } => panic!("unexpected failure"),
            }
        }
    }

    #[test]
    fn fully_fixed_grid_emits_only_the_solution_event() {
        let puzzle = Puzzle::from_rows("complete", &SOLVED).unwrap();
        let events = collect_events(&puzzle, &CancelToken::new());

        // All 81 selections are fixed rows: every search step filters to
        // empty, so only the terminal event comes through.
        assert_eq!(events.len(), 1);
        let SolverEvent::SolutionFound { step_count, rows } = &events[0] else {
            panic!("expected SolutionFound, got {:?}", events[0]);
        };
        assert_eq!(*step_count, 81);
        assert!(rows.is_empty());
    }

    #[test]
    fn contradictory_puzzle_ends_with_no_solution_found() {
        // Two 5s in the same row: format-valid, unsatisfiable.
        let mut rows = vec!["........."; 9];
        rows[0] = "5.5......";
        let puzzle = Puzzle::from_rows("contradiction", &rows).unwrap();

        let events = collect_events(&puzzle, &CancelToken::new());
        let terminal = events.last().unwrap();
        assert!(matches!(terminal, SolverEvent::NoSolutionFound { .. }));
        assert!(events.iter().filter(|e| e.is_terminal()).count() == 1);
    }

    #[test]
    fn cancelled_attempt_emits_no_terminal_event() {
        let cancel = CancelToken::new();
        cancel.cancel();

        let puzzle = puzzle_with_blank(0, 0);
        let events = collect_events(&puzzle, &cancel);
        assert!(events.iter().all(|e| !e.is_terminal()));
    }

    #[test]
    fn step_counts_never_decrease_across_emitted_events() {
        let puzzle = puzzle_with_blank(4, 4);
        let events = collect_events(&puzzle, &CancelToken::new());

        let counts: Vec<_> = events.iter().map(SolverEvent::step_count).collect();
        for pair in counts.windows(2) {
            assert!(pair[0] <= pair[1]);
        }
        assert!(events.last().unwrap().is_terminal());
    }
}
