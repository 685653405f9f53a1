//! Sampled virtual grid that the shape builder grows a body plan on.
//!
//! The field wraps a [`PatternOracle`] and tracks, per cell, whether the cell is
//! still available, sits on the growth frontier, has been consumed, or is held
//! back while a pairing search is in progress.

/// Value a cell must strictly exceed to be eligible for placement.
pub const THRESHOLD: f64 = 0.0;

/// A pattern-producing function sampled by the decoder.
///
/// Implementations are expected to be deterministic and side-effect free for the
/// duration of one translation. Nothing about how the function is produced or
/// evolved is assumed here.
pub trait PatternOracle {
    /// Activation at the grid-centred coordinate `(x, y)`.
    fn activation(&self, x: f64, y: f64) -> f64;
}

impl<F> PatternOracle for F
where
    F: Fn(f64, f64) -> f64,
{
    fn activation(&self, x: f64, y: f64) -> f64 {
        self(x, y)
    }
}

/// A located cell together with the activation it had when it was found.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
    pub value: f64,
}

/// Lifecycle of a single grid cell during one growth run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CellState {
    /// Available, but not adjacent to any placed module.
    #[default]
    Free,
    /// Available and adjacent to a placed module.
    Frontier,
    /// Used for good. Never offered again.
    Consumed,
    /// Tried as a partner during the current pairing search. Counts as used
    /// until it is released back to [`CellState::Free`].
    Pending,
}

impl CellState {
    #[inline]
    pub fn is_used(self) -> bool {
        matches!(self, CellState::Consumed | CellState::Pending)
    }
}

/// Von Neumann neighbourhood in enumeration order: west, east, north, south.
/// Ties between equally valued neighbours go to the earlier direction.
const NEIGHBOURS: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// The sampled grid for one translation.
///
/// Cells are addressed with `x` in `0..width` and `y` in `0..height`; the oracle
/// sees them shifted so the grid is centred on the origin.
pub struct GrowthField<'a, O: PatternOracle + ?Sized> {
    oracle: &'a O,
    width: i32,
    height: i32,
    x_mod: f64,
    y_mod: f64,
    cells: Vec<CellState>,
}

impl<'a, O: PatternOracle + ?Sized> GrowthField<'a, O> {
    /// Creates a field with every cell [`CellState::Free`].
    ///
    /// Allocates one state per cell. Grid sizes from untrusted input should be
    /// checked with [`BuilderConfig::validate`](crate::BuilderConfig::validate) first.
    pub fn new(oracle: &'a O, width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            oracle,
            width,
            height,
            x_mod: (width - 1) as f64 / 2.0,
            y_mod: (height - 1) as f64 / 2.0,
            cells: vec![CellState::Free; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        0 <= x && x < self.width && 0 <= y && y < self.height
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        assert!(
            self.in_bounds(x, y),
            "cell ({x}, {y}) outside {}x{} growth field",
            self.width,
            self.height
        );
        x as usize * self.height as usize + y as usize
    }

    /// Oracle activation at cell `(x, y)`. Sampled fresh on every call.
    ///
    /// # Panics
    /// If `(x, y)` is out of bounds.
    pub fn get(&self, x: i32, y: i32) -> f64 {
        assert!(self.in_bounds(x, y), "cell ({x}, {y}) out of bounds");
        self.oracle.activation(x as f64 - self.x_mod, y as f64 - self.y_mod)
    }

    /// Current state of cell `(x, y)`.
    ///
    /// # Panics
    /// If `(x, y)` is out of bounds.
    pub fn state(&self, x: i32, y: i32) -> CellState {
        self.cells[self.index(x, y)]
    }

    /// Whether cell `(x, y)` is consumed or pending.
    pub fn is_used(&self, x: i32, y: i32) -> bool {
        self.state(x, y).is_used()
    }

    pub fn is_frontier(&self, x: i32, y: i32) -> bool {
        self.state(x, y) == CellState::Frontier
    }

    /// Number of cells currently on the frontier.
    pub fn frontier_len(&self) -> usize {
        self.cells
            .iter()
            .filter(|&&s| s == CellState::Frontier)
            .count()
    }

    /// Samples `(x, y)` and returns it if it beats `best`.
    fn challenge(&self, x: i32, y: i32, best: Option<Coordinate>) -> Option<Coordinate> {
        let value = self.get(x, y);
        // NaN never passes either comparison.
        if value > THRESHOLD && best.is_none_or(|b| value > b.value) {
            Some(Coordinate { x, y, value })
        } else {
            best
        }
    }

    /// Highest-valued unused cell above [`THRESHOLD`] over the whole grid.
    ///
    /// Scans `x` ascending, then `y` ascending; the first cell found wins ties.
    pub fn get_max(&self) -> Option<Coordinate> {
        let mut best = None;
        for x in 0..self.width {
            for y in 0..self.height {
                if !self.is_used(x, y) {
                    best = self.challenge(x, y, best);
                }
            }
        }
        best
    }

    /// Highest-valued unused in-bounds neighbour of `c` above [`THRESHOLD`].
    ///
    /// Neighbours are visited west, east, north, south; earlier directions win ties.
    pub fn get_max_neighbour(&self, c: &Coordinate) -> Option<Coordinate> {
        let mut best = None;
        for (dx, dy) in NEIGHBOURS {
            let (x, y) = (c.x + dx, c.y + dy);
            if self.in_bounds(x, y) && !self.is_used(x, y) {
                best = self.challenge(x, y, best);
            }
        }
        best
    }

    /// Highest-valued frontier cell above [`THRESHOLD`].
    ///
    /// Values are re-sampled on every call. Ties go to the smallest `(x, y)`.
    pub fn get_max_adjacent(&self) -> Option<Coordinate> {
        let mut best = None;
        for x in 0..self.width {
            for y in 0..self.height {
                if self.is_frontier(x, y) {
                    best = self.challenge(x, y, best);
                }
            }
        }
        best
    }

    fn set_state(&mut self, c: &Coordinate, state: CellState) {
        let idx = self.index(c.x, c.y);
        self.cells[idx] = state;
    }

    /// Marks `c` consumed (`true`) or free (`false`).
    ///
    /// Either way the cell leaves the frontier. Freeing a cell does not put it
    /// back on the frontier; only [`add_module_coordinate`](Self::add_module_coordinate) does that.
    pub fn set_used(&mut self, c: &Coordinate, used: bool) {
        let state = if used {
            CellState::Consumed
        } else {
            CellState::Free
        };
        self.set_state(c, state);
    }

    /// Holds `c` for the duration of a pairing search.
    pub fn set_pending(&mut self, c: &Coordinate) {
        self.set_state(c, CellState::Pending);
    }

    /// Releases a cell held by [`set_pending`](Self::set_pending).
    ///
    /// Same effect as `set_used(c, false)`: the cell becomes free and is not on the frontier.
    pub fn release(&mut self, c: &Coordinate) {
        self.set_used(c, false);
    }

    /// Puts every in-bounds, unused neighbour of `c` on the frontier.
    pub fn add_module_coordinate(&mut self, c: &Coordinate) {
        for (dx, dy) in NEIGHBOURS {
            let (x, y) = (c.x + dx, c.y + dy);
            if self.in_bounds(x, y) {
                let idx = self.index(x, y);
                if self.cells[idx] == CellState::Free {
                    self.cells[idx] = CellState::Frontier;
                }
            }
        }
    }
}
