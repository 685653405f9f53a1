//! Grid placement of a single two-cell module.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Edge length of one grid cell in world units (metres).
pub const MODULE_WIDTH: f32 = 0.08;

/// Height of a module body in world units (metres).
pub const MODULE_HEIGHT: f32 = 0.06;

/// Largest magnitude a placement coordinate may have in a valid plan.
pub const COORDINATE_LIMIT: i32 = 1 << 24;

/// The position and orientation of one module on the body-plan grid.
///
/// A module always covers two cells. Its *primary* cell is `(x, z)`; the
/// secondary cell is `(x + 1, z)` when horizontal and `(x, z + 1)` when vertical.
///
/// The derived ordering compares `x`, then `z`, then the orientation with
/// vertical placements sorting before horizontal ones. It is used to pick the
/// canonical "minimal" placement of a plan.
///
/// Valid plans keep both coordinates within `±`[`COORDINATE_LIMIT`]. Cell
/// geometry of a placement outside that range saturates at the `i32` bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RelativeModulePosition {
    pub x: i32,
    pub z: i32,
    pub is_horizontal: bool,
}

impl RelativeModulePosition {
    pub fn new(x: i32, z: i32, is_horizontal: bool) -> Self {
        Self {
            x,
            z,
            is_horizontal,
        }
    }

    /// Horizontal placement anchored at `(x, z)`.
    pub fn horizontal(x: i32, z: i32) -> Self {
        Self::new(x, z, true)
    }

    /// Vertical placement anchored at `(x, z)`.
    pub fn vertical(x: i32, z: i32) -> Self {
        Self::new(x, z, false)
    }

    /// The primary cell `(x, z)`.
    #[inline]
    pub fn primary(&self) -> (i32, i32) {
        (self.x, self.z)
    }

    /// The second cell covered by this module.
    #[inline]
    pub fn secondary(&self) -> (i32, i32) {
        if self.is_horizontal {
            (self.x.saturating_add(1), self.z)
        } else {
            (self.x, self.z.saturating_add(1))
        }
    }

    /// Whether both coordinates lie within `±`[`COORDINATE_LIMIT`].
    pub fn in_range(&self) -> bool {
        let range = -COORDINATE_LIMIT..=COORDINATE_LIMIT;
        range.contains(&self.x) && range.contains(&self.z)
    }

    /// Both occupied cells, primary first.
    #[inline]
    pub fn cells(&self) -> [(i32, i32); 2] {
        [self.primary(), self.secondary()]
    }

    /// Returns true if `(x, z)` is one of the two cells covered by this module.
    pub fn occupies(&self, x: i32, z: i32) -> bool {
        self.cells().contains(&(x, z))
    }

    /// Number of cell pairs, one from each module, that share an edge.
    ///
    /// Coincident cells do not count. The result is at most 2 (two modules
    /// lying side by side along their long edge).
    pub fn adjacency(&self, other: &RelativeModulePosition) -> usize {
        let mut count = 0;
        for a in self.cells() {
            for b in other.cells() {
                if edge_adjacent(a, b) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Number of this module's cells that share an edge with the single cell `(x, z)`.
    pub fn touches_cell(&self, x: i32, z: i32) -> usize {
        self.cells()
            .iter()
            .filter(|&&c| edge_adjacent(c, (x, z)))
            .count()
    }

    /// The same placement translated by `(dx, dz)`, or `None` on `i32` overflow.
    pub fn checked_shifted(&self, dx: i32, dz: i32) -> Option<Self> {
        Some(Self::new(
            self.x.checked_add(dx)?,
            self.z.checked_add(dz)?,
            self.is_horizontal,
        ))
    }

    /// World-space pose of the primary cell for a plan centred at `center`.
    pub fn to_pose(&self, center: Vec3) -> Pose {
        Pose {
            position: Vec3::new(
                self.x as f32 * MODULE_WIDTH + center.x,
                center.y,
                self.z as f32 * MODULE_WIDTH + center.z,
            ),
            is_horizontal: self.is_horizontal,
        }
    }
}

/// Whether two cells share an edge.
#[inline]
fn edge_adjacent(a: (i32, i32), b: (i32, i32)) -> bool {
    matches!((a.0.abs_diff(b.0), a.1.abs_diff(b.1)), (0, 1) | (1, 0))
}

/// World-space placement of a module, as consumed by an assembler or simulator.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// Position of the module's primary cell. `y` is taken from the plan centre.
    pub position: Vec3,

    /// Orientation, passed through from the grid placement.
    pub is_horizontal: bool,
}
