//! Shape builder that grows a [`BodyPlan`] from a [`PatternOracle`].
//!
//! The entry point is [`ShapeBuilder`]. Configure it with a [`BuilderConfig`] and
//! call [`ShapeBuilder::translate`], or use the free function [`translate`] for a
//! square grid.

use crate::blueprint::BodyPlan;
use crate::field::{Coordinate, GrowthField, PatternOracle};
use crate::placement::RelativeModulePosition;
use serde::{Deserialize, Serialize};

/// Largest grid, in cells, that [`BuilderConfig::validate`] accepts.
pub const MAX_GRID_CELLS: usize = 1 << 24;

fn default_grid_size() -> usize {
    11
}

/// Grid the decoder samples the oracle on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuilderConfig {
    /// Grid width in cells.
    #[serde(default = "default_grid_size")]
    pub width: usize,
    /// Grid height in cells.
    #[serde(default = "default_grid_size")]
    pub height: usize,
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self::square(default_grid_size())
    }
}

impl BuilderConfig {
    pub fn square(grid_size: usize) -> Self {
        Self {
            width: grid_size,
            height: grid_size,
        }
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions);
        }
        let fits = self
            .width
            .checked_mul(self.height)
            .is_some_and(|cells| cells <= MAX_GRID_CELLS);
        if !fits {
            return Err(ConfigError::GridTooLarge {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Grid dimensions (width, height) must be non-zero")]
    InvalidDimensions,
    #[error("Grid of {width}x{height} cells exceeds the limit of {MAX_GRID_CELLS} cells")]
    GridTooLarge { width: usize, height: usize },
}

/// Grows connected body plans by best-first search over a sampled grid.
#[derive(Clone, Debug, Default)]
pub struct ShapeBuilder {
    config: BuilderConfig,
}

impl ShapeBuilder {
    /// Creates a builder without validating `config`.
    ///
    /// A zero-sized grid simply decodes to an empty plan. Dimensions beyond
    /// `i32::MAX` are clamped, but the cell count is not: translating allocates
    /// one state per cell, so a huge grid exhausts memory. Use
    /// [`ShapeBuilder::try_new`] for sizes that come from outside the program.
    pub fn new(config: BuilderConfig) -> Self {
        Self { config }
    }

    /// Creates a builder after checking `config` with [`BuilderConfig::validate`].
    pub fn try_new(config: BuilderConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// Decodes `oracle` into a connected body plan.
    ///
    /// Deterministic for a deterministic oracle and always terminates: every
    /// iteration consumes at least one cell of the grid.
    ///
    /// The grid is allocated up front, one state per cell. Sizes that have not
    /// gone through [`ShapeBuilder::try_new`] are not checked against
    /// [`MAX_GRID_CELLS`].
    ///
    /// # Growth
    ///
    /// 1. **Seed.** The best unused cell is paired with its best free neighbour.
    ///    A cell without an eligible neighbour is dropped for good and the next
    ///    best cell is tried. No seed pair means an empty plan.
    /// 2. **Grow.** The best frontier cell becomes an anchor and is consumed.
    ///    Anchors touching more than one module are dropped. Otherwise the
    ///    anchor's neighbours are tried best-first as partners; a partner is
    ///    accepted when the resulting module touches exactly one existing cell.
    ///    Partners that were tried and refused are released as free cells,
    ///    off the frontier.
    /// 3. Growth stops when the frontier holds no cell above the threshold.
    pub fn translate<O: PatternOracle + ?Sized>(&self, oracle: &O) -> BodyPlan {
        let width = clamp_dimension(self.config.width);
        let height = clamp_dimension(self.config.height);
        let mut field = GrowthField::new(oracle, width, height);
        let mut plan = BodyPlan::new(self.config.width.max(self.config.height));

        if !seed(&mut field, &mut plan) {
            log::debug!(
                "No seed pair on {}x{} grid, returning empty plan",
                width,
                height
            );
            return plan;
        }

        while let Some(step) = grow_step(&mut field, &mut plan) {
            match step {
                GrowthStep::Placed(module) => {
                    log::trace!("Placed {:?}", module);
                }
                GrowthStep::Dropped(anchor) => log::trace!(
                    "Anchor ({}, {}) touches several modules, dropped",
                    anchor.x,
                    anchor.y
                ),
                GrowthStep::Abandoned(anchor) => log::trace!(
                    "Anchor ({}, {}) has no usable partner, abandoned",
                    anchor.x,
                    anchor.y
                ),
            }
        }

        log::debug!(
            "Decoded {} modules on {}x{} grid",
            plan.size(),
            width,
            height
        );
        plan
    }
}

/// Outcome of one pass of the growth loop.
#[derive(Clone, Copy, Debug, PartialEq)]
enum GrowthStep {
    /// A module was added to the plan.
    Placed(RelativeModulePosition),
    /// The anchor touched more than one module and was consumed without pairing.
    Dropped(Coordinate),
    /// No neighbour of the anchor formed an acceptable module.
    Abandoned(Coordinate),
}

/// Places the seed module. Returns `false` when the grid holds no seed pair.
fn seed<O: PatternOracle + ?Sized>(field: &mut GrowthField<'_, O>, plan: &mut BodyPlan) -> bool {
    let Some((m, n)) = seed_pair(field) else {
        return false;
    };
    plan.push(module_between(&m, &n));
    field.add_module_coordinate(&m);
    field.add_module_coordinate(&n);
    true
}

/// Takes the best frontier cell as anchor and tries to grow one module from it.
///
/// Returns `None` once the frontier holds no cell above the threshold.
fn grow_step<O: PatternOracle + ?Sized>(
    field: &mut GrowthField<'_, O>,
    plan: &mut BodyPlan,
) -> Option<GrowthStep> {
    let anchor = field.get_max_adjacent()?;
    field.set_used(&anchor, true);

    if plan.cell_neighbours(anchor.x, anchor.y) > 1 {
        return Some(GrowthStep::Dropped(anchor));
    }

    let mut reconsider = Vec::new();
    let step = match pair_anchor(field, plan, &anchor, &mut reconsider) {
        Some((module, partner)) => {
            plan.push(module);
            field.add_module_coordinate(&anchor);
            field.add_module_coordinate(&partner);
            GrowthStep::Placed(module)
        }
        None => GrowthStep::Abandoned(anchor),
    };

    for coord in &reconsider {
        field.release(coord);
    }
    Some(step)
}

/// Finds the first module: best cell plus its best neighbour.
fn seed_pair<O: PatternOracle + ?Sized>(
    field: &mut GrowthField<'_, O>,
) -> Option<(Coordinate, Coordinate)> {
    loop {
        let m = field.get_max()?;
        field.set_used(&m, true);
        if let Some(n) = field.get_max_neighbour(&m) {
            field.set_used(&n, true);
            return Some((m, n));
        }
    }
}

/// Searches the anchor's neighbours for a partner forming a module that touches
/// the plan exactly once. Refused partners are pushed onto `reconsider` and stay
/// pending until the caller releases them.
fn pair_anchor<O: PatternOracle + ?Sized>(
    field: &mut GrowthField<'_, O>,
    plan: &BodyPlan,
    anchor: &Coordinate,
    reconsider: &mut Vec<Coordinate>,
) -> Option<(RelativeModulePosition, Coordinate)> {
    while let Some(partner) = field.get_max_neighbour(anchor) {
        field.set_pending(&partner);

        if plan.cell_neighbours(partner.x, partner.y) > 1 {
            reconsider.push(partner);
            continue;
        }

        let candidate = module_between(anchor, &partner);
        if plan.number_of_neighbours(&candidate) == 1 {
            field.set_used(&partner, true);
            return Some((candidate, partner));
        }
        reconsider.push(partner);
    }
    None
}

/// The module covering two edge-adjacent cells.
fn module_between(a: &Coordinate, b: &Coordinate) -> RelativeModulePosition {
    RelativeModulePosition::new(a.x.min(b.x), a.y.min(b.y), a.y == b.y)
}

fn clamp_dimension(n: usize) -> i32 {
    i32::try_from(n).unwrap_or(i32::MAX)
}

/// Decodes `oracle` on a `grid_size` × `grid_size` grid.
///
/// `grid_size` is not validated; see [`ShapeBuilder::new`].
pub fn translate<O: PatternOracle + ?Sized>(oracle: &O, grid_size: usize) -> BodyPlan {
    ShapeBuilder::new(BuilderConfig::square(grid_size)).translate(oracle)
}
