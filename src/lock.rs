//! "Most complicated" phone lock patterns on the 3×3 dot grid.
//!
//! A pattern visits all nine dots using each of eight move vectors exactly
//! once, in either direction. The four straight and diagonal single steps may
//! hop over a dot that is already taken and land on the next one along the
//! same line; knight-like moves never hop. There are exactly 296 such
//! patterns.
//!
//! Cells are addressed as `(col, row)` with `(0, 0)` top left, and a finished
//! pattern is reported as the grid of step numbers (`1` marks the start).

use std::fmt;

use log::info;

use crate::engine::{search, SearchLimits, SearchOutcome, SearchProblem};

/// Grid width and height.
pub const SIZE: i8 = 3;
/// Number of dots.
pub const CELLS: usize = 9;

/// The move vectors, each usable once per pattern.
pub const MOVES: [(i8, i8); 8] = [(1, 0), (0, 1), (2, 1), (1, 1), (1, 2), (2, -1), (1, -1), (1, -2)];

const ALL_MOVES: u8 = 0xff;

/// Step numbers of the dots, row-major; zero means not visited yet.
pub type Board = [u8; CELLS];

/// Sign a move vector is applied with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    fn sign(self) -> i8 {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }
}

fn can_hop(mv: (i8, i8)) -> bool {
    matches!(mv, (1, 0) | (0, 1) | (1, 1) | (1, -1))
}

fn on_board(col: i8, row: i8) -> bool {
    (0..SIZE).contains(&col) && (0..SIZE).contains(&row)
}

fn cell_index(col: i8, row: i8) -> usize {
    (col + SIZE * row) as usize
}

/// Where `mv` applied in `direction` from `(col, row)` ends up on `board`.
///
/// If the first landing dot is taken and the move may hop, the dot one step
/// further along is returned instead. `None` means the move leaves the grid.
/// The returned dot may still be taken (knight moves never hop, and a hop can
/// land on a visited dot too); callers check that.
#[must_use]
pub fn effective_target(col: i8, row: i8, mv: (i8, i8), direction: Direction, board: &Board) -> Option<(i8, i8)> {
    let (dc, dr) = (mv.0 * direction.sign(), mv.1 * direction.sign());
    let (mut c, mut r) = (col + dc, row + dr);
    if !on_board(c, r) {
        return None;
    }
    if board[cell_index(c, r)] != 0 && can_hop(mv) {
        c += dc;
        r += dr;
        if !on_board(c, r) {
            return None;
        }
    }
    Some((c, r))
}

/// A completed pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LockPattern {
    board: Board,
}

impl LockPattern {
    /// Step number (1..=9) of every dot, row by row.
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Dots in visiting order, as `(col, row)`.
    #[must_use]
    pub fn path(&self) -> Vec<(i8, i8)> {
        let mut path = vec![(0, 0); CELLS];
        for (i, &step) in self.board.iter().enumerate() {
            let i = i as i8;
            if let Some(slot) = usize::from(step).checked_sub(1).and_then(|at| path.get_mut(at)) {
                *slot = (i % SIZE, i / SIZE);
            }
        }
        path
    }
}

impl fmt::Display for LockPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (r, row) in self.board.chunks(SIZE as usize).enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            let cells: Vec<String> = row.iter().map(u8::to_string).collect();
            write!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
struct LockState {
    board: Board,
    col: i8,
    row: i8,
    step: u8,
    // bit i set while MOVES[i] is unused
    moves_left: u8,
}

impl LockState {
    fn start(col: i8, row: i8) -> Self {
        let mut board = [0; CELLS];
        board[cell_index(col, row)] = 1;
        LockState { board, col, row, step: 2, moves_left: ALL_MOVES }
    }

    fn target(&self, (i, direction): (usize, Direction)) -> Option<(i8, i8)> {
        effective_target(self.col, self.row, MOVES[i], direction, &self.board)
    }
}

struct LockProblem;

impl SearchProblem for LockProblem {
    type Partial = LockState;
    type Candidate = (usize, Direction);
    type Solution = LockPattern;

    fn expand<'s>(&'s self, state: &'s LockState) -> Box<dyn Iterator<Item = (usize, Direction)> + 's> {
        let left = state.moves_left;
        Box::new(
            (0..MOVES.len())
                .filter(move |i| left & (1 << i) != 0)
                .flat_map(|i| [(i, Direction::Forward), (i, Direction::Backward)]),
        )
    }

    fn prune(&self, state: &LockState, &candidate: &(usize, Direction)) -> bool {
        match state.target(candidate) {
            Some((c, r)) => state.board[cell_index(c, r)] != 0,
            None => true,
        }
    }

    fn extend(&self, state: &LockState, candidate: (usize, Direction)) -> LockState {
        let mut next = *state;
        // prune already rejected moves without a target
        if let Some((c, r)) = state.target(candidate) {
            next.board[cell_index(c, r)] = state.step;
            next.col = c;
            next.row = r;
        }
        next.step += 1;
        next.moves_left &= !(1 << candidate.0);
        next
    }

    fn accept(&self, state: &LockState, _can_grow: bool) -> bool {
        state.moves_left == 0
    }

    fn solution(&self, state: &LockState) -> LockPattern {
        LockPattern { board: state.board }
    }
}

/// Every lock pattern, grouped by start dot (column by column, top to bottom).
pub fn find_lock_patterns(limits: &SearchLimits) -> SearchOutcome<LockPattern> {
    let roots = (0..SIZE).flat_map(|col| (0..SIZE).map(move |row| LockState::start(col, row)));
    let outcome = search(&LockProblem, roots, limits);
    info!("found {} lock patterns ({:?})", outcome.len(), outcome.status);
    outcome
}
