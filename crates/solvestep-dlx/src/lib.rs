//! An exact-cover search engine using Knuth's dancing-links technique.
//!
//! A [`Matrix`] is built from binary rows (each row given as the indices of
//! its set columns) and searched with Algorithm X. The engine knows nothing
//! about the problem being modeled; it speaks row indices only. Callers
//! observe the search through a per-selection callback and may stop it
//! cooperatively through a [`CancelToken`].
//!
//! Instead of the pointer-linked node graph of the classic formulation, all
//! links are indices into a single node arena. The borrow checker is happy,
//! the nodes pack contiguously, and the algorithm is otherwise unchanged.
//!
//! # Examples
//!
//! The example matrix from Wikipedia's [Algorithm X] article, which has the
//! unique solution {B, D, F} (rows 1, 3, 5):
//!
//! ```
//! use solvestep_dlx::{CancelToken, Matrix};
//!
//! let mut matrix = Matrix::new(7);
//! matrix.add_row(&[0, 3, 6]); // A
//! matrix.add_row(&[0, 3]); // B
//! matrix.add_row(&[3, 4, 6]); // C
//! matrix.add_row(&[2, 4, 5]); // D
//! matrix.add_row(&[1, 2, 5, 6]); // E
//! matrix.add_row(&[1, 6]); // F
//!
//! let solution = matrix.solve_first(&CancelToken::new(), |_partial| {});
//! let mut rows = solution.unwrap();
//! rows.sort_unstable();
//! assert_eq!(rows, vec![1, 3, 5]);
//! ```
//!
//! [Algorithm X]: https://en.wikipedia.org/wiki/Knuth%27s_Algorithm_X

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// A cooperative cancellation signal shared between the party running a
/// search and the party that may want to stop it.
///
/// Cloning yields another handle to the same signal. The engine checks the
/// token at each row selection; a cancelled search ends as if the remaining
/// search space were exhausted.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Creates a token in the not-cancelled state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Returns whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// One node of the sparse matrix.
///
/// The arena starts with the root (index 0) followed by one header per
/// column; data nodes are appended as rows are added. `column` is the arena
/// index of the node's column header; `row` is the caller-visible row index.
#[derive(Debug, Clone, Copy)]
struct Node {
    up: usize,
    down: usize,
    left: usize,
    right: usize,
    column: usize,
    row: usize,
}

enum Search {
    Found,
    Exhausted,
    Cancelled,
}

/// A sparse binary matrix prepared for exact-cover search.
///
/// Rows are added with [`Matrix::add_row`] and numbered in insertion order;
/// the indices reported by [`Matrix::solve_first`] refer to that numbering,
/// so the caller's row list and the engine's stay aligned by construction.
#[derive(Debug)]
pub struct Matrix {
    nodes: Vec<Node>,
    /// Live node count per column, indexed by header arena index.
    sizes: Vec<usize>,
    column_count: usize,
    row_count: usize,
}

impl Matrix {
    /// Creates an empty matrix with `column_count` mandatory columns.
    #[must_use]
    pub fn new(column_count: usize) -> Self {
        // Root at 0, headers at 1..=column_count, all linked circularly.
        let mut nodes = Vec::with_capacity(column_count + 1);
        for i in 0..=column_count {
            nodes.push(Node {
                up: i,
                down: i,
                left: if i == 0 { column_count } else { i - 1 },
                right: if i == column_count { 0 } else { i + 1 },
                column: i,
                row: usize::MAX,
            });
        }
        Self {
            nodes,
            sizes: vec![0; column_count + 1],
            column_count,
            row_count: 0,
        }
    }

    /// Number of columns.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.column_count
    }

    /// Number of rows added so far.
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Appends a binary row given as the indices of its set columns, and
    /// returns the row's index.
    ///
    /// # Panics
    ///
    /// Panics if any column index is out of range.
    pub fn add_row(&mut self, columns: &[usize]) -> usize {
        let row = self.row_count;
        self.row_count += 1;

        let mut first_in_row: Option<usize> = None;
        for &column in columns {
            assert!(
                column < self.column_count,
                "column index {column} out of range for {} columns",
                self.column_count
            );
            let header = column + 1;
            let node = self.nodes.len();

            // Insert at the bottom of the column.
            let up = self.nodes[header].up;
            self.nodes.push(Node {
                up,
                down: header,
                left: node,
                right: node,
                column: header,
                row,
            });
            self.nodes[up].down = node;
            self.nodes[header].up = node;
            self.sizes[header] += 1;

            // Insert at the end of the row's circular list.
            if let Some(first) = first_in_row {
                let left = self.nodes[first].left;
                self.nodes[node].left = left;
                self.nodes[node].right = first;
                self.nodes[left].right = node;
                self.nodes[first].left = node;
            } else {
                first_in_row = Some(node);
            }
        }
        row
    }

    /// Searches for the first exact cover.
    ///
    /// `on_step` is invoked with the current partial row selection each time
    /// a row is committed to the selection; a backtracked prefix is reported
    /// again as the search moves to the next candidate. The token is checked
    /// at every selection, and a cancelled search returns `None` exactly as
    /// an exhausted one does.
    ///
    /// Consumes the matrix; the link structure is not restored on success.
    #[must_use]
    pub fn solve_first<F>(mut self, cancel: &CancelToken, mut on_step: F) -> Option<Vec<usize>>
    where
        F: FnMut(&[usize]),
    {
        let mut selection = Vec::new();
        match self.search(&mut selection, cancel, &mut on_step) {
            Search::Found => Some(selection),
            Search::Exhausted | Search::Cancelled => None,
        }
    }

    fn search<F>(&mut self, selection: &mut Vec<usize>, cancel: &CancelToken, on_step: &mut F) -> Search
    where
        F: FnMut(&[usize]),
    {
        let Some(column) = self.min_size_column() else {
            return Search::Found;
        };
        if self.sizes[column] == 0 {
            return Search::Exhausted;
        }

        self.cover(column);
        let mut node = self.nodes[column].down;
        while node != column {
            if cancel.is_cancelled() {
                return Search::Cancelled;
            }

            selection.push(self.nodes[node].row);
            on_step(selection);

            let mut j = self.nodes[node].right;
            while j != node {
                self.cover(self.nodes[j].column);
                j = self.nodes[j].right;
            }

            match self.search(selection, cancel, on_step) {
                Search::Exhausted => {}
                done @ (Search::Found | Search::Cancelled) => return done,
            }

            let mut j = self.nodes[node].left;
            while j != node {
                self.uncover(self.nodes[j].column);
                j = self.nodes[j].left;
            }
            selection.pop();

            node = self.nodes[node].down;
        }
        self.uncover(column);
        Search::Exhausted
    }

    /// Picks the active column with the fewest live nodes, or `None` when
    /// no columns remain (a cover has been found).
    fn min_size_column(&self) -> Option<usize> {
        let mut best = None;
        let mut header = self.nodes[0].right;
        while header != 0 {
            let better = match best {
                None => true,
                Some(b) => self.sizes[header] < self.sizes[b],
            };
            if better {
                best = Some(header);
            }
            header = self.nodes[header].right;
        }
        best
    }

    fn cover(&mut self, header: usize) {
        let left = self.nodes[header].left;
        let right = self.nodes[header].right;
        self.nodes[left].right = right;
        self.nodes[right].left = left;

        let mut i = self.nodes[header].down;
        while i != header {
            let mut j = self.nodes[i].right;
            while j != i {
                let up = self.nodes[j].up;
                let down = self.nodes[j].down;
                self.nodes[up].down = down;
                self.nodes[down].up = up;
                self.sizes[self.nodes[j].column] -= 1;
                j = self.nodes[j].right;
            }
            i = self.nodes[i].down;
        }
    }

    /// Exact reverse of [`Matrix::cover`]; the unlinked nodes still carry
    /// the link values needed to splice them back.
    fn uncover(&mut self, header: usize) {
        let mut i = self.nodes[header].up;
        while i != header {
            let mut j = self.nodes[i].left;
            while j != i {
                self.sizes[self.nodes[j].column] += 1;
                let up = self.nodes[j].up;
                let down = self.nodes[j].down;
                self.nodes[up].down = j;
                self.nodes[down].up = j;
                j = self.nodes[j].left;
            }
            i = self.nodes[i].up;
        }

        let left = self.nodes[header].left;
        let right = self.nodes[header].right;
        self.nodes[left].right = header;
        self.nodes[right].left = header;
    }
}
