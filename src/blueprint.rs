use crate::placement::{COORDINATE_LIMIT, MODULE_HEIGHT, MODULE_WIDTH, Pose, RelativeModulePosition};
use bevy_heavy::ComputeMassProperties3d as _;
use bevy_math::primitives::Cuboid;
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One of the ten attachment points on a module.
///
/// "Back" is the end beyond the primary cell, "Front" the end beyond the
/// secondary cell. Left and right are taken looking from back to front.
/// The four axle slots are internal joints and are never locked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConnectorSlot {
    Back,
    BackLeft,
    BackRight,
    Front,
    FrontLeft,
    FrontRight,
    BackAxleBottom,
    BackAxleTop,
    FrontAxleBottom,
    FrontAxleTop,
}

impl ConnectorSlot {
    /// Every slot, in declaration order.
    pub const ALL: [ConnectorSlot; 10] = [
        ConnectorSlot::Back,
        ConnectorSlot::BackLeft,
        ConnectorSlot::BackRight,
        ConnectorSlot::Front,
        ConnectorSlot::FrontLeft,
        ConnectorSlot::FrontRight,
        ConnectorSlot::BackAxleBottom,
        ConnectorSlot::BackAxleTop,
        ConnectorSlot::FrontAxleBottom,
        ConnectorSlot::FrontAxleTop,
    ];

    pub fn is_axle(self) -> bool {
        matches!(
            self,
            ConnectorSlot::BackAxleBottom
                | ConnectorSlot::BackAxleTop
                | ConnectorSlot::FrontAxleBottom
                | ConnectorSlot::FrontAxleTop
        )
    }

    /// Offset from the primary cell to the cell this slot faces.
    ///
    /// Returns `None` for axle slots. The vertical table is the horizontal one
    /// turned a quarter: `(dx, dz) -> (-dz, dx)`.
    pub fn offset(self, is_horizontal: bool) -> Option<(i32, i32)> {
        let horizontal = match self {
            ConnectorSlot::Back => (-1, 0),
            ConnectorSlot::BackLeft => (0, -1),
            ConnectorSlot::BackRight => (0, 1),
            ConnectorSlot::Front => (2, 0),
            ConnectorSlot::FrontLeft => (1, -1),
            ConnectorSlot::FrontRight => (1, 1),
            _ => return None,
        };
        if is_horizontal {
            Some(horizontal)
        } else {
            Some((-horizontal.1, horizontal.0))
        }
    }
}

/// Structural problems found in a plan that did not come from the decoder.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PlanError {
    #[error("Placements {first} and {second} occupy the same cell")]
    Overlap { first: usize, second: usize },
    #[error("Placement {index} does not touch any earlier placement")]
    Disconnected { index: usize },
    #[error("Placement {index} lies outside the coordinate limit of {COORDINATE_LIMIT}")]
    OutOfRange { index: usize },
}

/// Mass and balance point of a whole body plan.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlanMass {
    /// Total mass in kg.
    pub mass: f32,
    /// Centre of mass for a plan centred at the origin.
    pub center_of_mass: Vec3,
}

/// A decoded modular-robot body: placements in the order they were grown.
///
/// Plans produced by the shape builder never overlap and are connected in
/// growth order (every placement after the first touches an earlier one).
/// Plans built by hand or deserialized can be checked with [`validate`](Self::validate).
///
/// The geometric transforms below return new plans and leave `self` untouched.
/// Those that move coordinates return `None` instead of overflowing `i32`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BodyPlan {
    placements: Vec<RelativeModulePosition>,

    /// Size of the grid the plan was grown on. Only used as a rendering hint.
    grid_size: usize,
}

impl BodyPlan {
    pub fn new(grid_size: usize) -> Self {
        Self {
            placements: Vec::new(),
            grid_size,
        }
    }

    /// Builds a plan from existing placements, checking it with [`validate`](Self::validate).
    pub fn from_placements(
        grid_size: usize,
        placements: Vec<RelativeModulePosition>,
    ) -> Result<Self, PlanError> {
        let plan = Self {
            placements,
            grid_size,
        };
        plan.validate()?;
        Ok(plan)
    }

    pub(crate) fn push(&mut self, pos: RelativeModulePosition) {
        self.placements.push(pos);
    }

    /// Number of modules in the plan.
    pub fn size(&self) -> usize {
        self.placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn grid_size(&self) -> usize {
        self.grid_size
    }

    pub fn placement(&self, i: usize) -> Option<RelativeModulePosition> {
        self.placements.get(i).copied()
    }

    pub fn placements(&self) -> &[RelativeModulePosition] {
        &self.placements
    }

    pub fn iter(&self) -> impl Iterator<Item = &RelativeModulePosition> {
        self.placements.iter()
    }

    /// World pose of placement `i` for a plan centred at `center`.
    pub fn absolute_position(&self, center: Vec3, i: usize) -> Option<Pose> {
        self.placements.get(i).map(|p| p.to_pose(center))
    }

    /// Every occupied cell, two per placement, in placement order.
    pub fn occupied_cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.placements.iter().flat_map(|p| p.cells())
    }

    /// Smallest and largest occupied cell coordinates, or `None` for an empty plan.
    pub fn bounds(&self) -> Option<((i32, i32), (i32, i32))> {
        self.occupied_cells().fold(None, |acc, (x, z)| match acc {
            None => Some(((x, z), (x, z))),
            Some(((min_x, min_z), (max_x, max_z))) => Some((
                (min_x.min(x), min_z.min(z)),
                (max_x.max(x), max_z.max(z)),
            )),
        })
    }

    /// Total adjacency of `pos` against every placement in the plan.
    pub fn number_of_neighbours(&self, pos: &RelativeModulePosition) -> usize {
        self.placements.iter().map(|p| p.adjacency(pos)).sum()
    }

    /// Number of occupied cells sharing an edge with the single cell `(x, z)`.
    ///
    /// A cell can border at most one cell of any given module, so this is also
    /// the number of distinct modules the cell touches.
    pub fn cell_neighbours(&self, x: i32, z: i32) -> usize {
        self.placements.iter().map(|p| p.touches_cell(x, z)).sum()
    }

    /// Whether connector `slot` of placement `i` faces a cell occupied by another module.
    ///
    /// Axle slots are never locked. Returns `None` if `i` is out of range.
    pub fn connector(&self, i: usize, slot: ConnectorSlot) -> Option<bool> {
        let pos = self.placements.get(i)?;
        let Some((dx, dz)) = slot.offset(pos.is_horizontal) else {
            return Some(false);
        };
        let (Some(cx), Some(cz)) = (pos.x.checked_add(dx), pos.z.checked_add(dz)) else {
            return Some(false);
        };
        Some(
            self.placements
                .iter()
                .enumerate()
                .any(|(j, other)| j != i && other.occupies(cx, cz)),
        )
    }

    /// Lock state of all ten slots of placement `i`, in [`ConnectorSlot::ALL`] order.
    pub fn connectors(&self, i: usize) -> Option<[bool; 10]> {
        let mut locks = [false; 10];
        for (lock, slot) in locks.iter_mut().zip(ConnectorSlot::ALL) {
            *lock = self.connector(i, slot)?;
        }
        Some(locks)
    }

    /// Checks that every coordinate lies within `±`[`COORDINATE_LIMIT`], that no
    /// two placements overlap and that each placement after the first touches at
    /// least one placement before it.
    pub fn validate(&self) -> Result<(), PlanError> {
        if let Some(index) = self.placements.iter().position(|p| !p.in_range()) {
            return Err(PlanError::OutOfRange { index });
        }

        let mut owners: HashMap<(i32, i32), usize> = HashMap::new();
        for (i, pos) in self.placements.iter().enumerate() {
            for cell in pos.cells() {
                if let Some(&first) = owners.get(&cell) {
                    return Err(PlanError::Overlap { first, second: i });
                }
                owners.insert(cell, i);
            }
        }

        for (i, pos) in self.placements.iter().enumerate().skip(1) {
            let touching: usize = self.placements[..i]
                .iter()
                .map(|p| p.adjacency(pos))
                .sum();
            if touching == 0 {
                return Err(PlanError::Disconnected { index: i });
            }
        }
        Ok(())
    }

    /// Mass and centre of mass of the plan, treating each module as a solid box
    /// of the given density (kg/m³).
    pub fn mass_properties(&self, density: f32) -> PlanMass {
        let mut mass = 0.0;
        let mut moment = Vec3::ZERO;
        for pos in &self.placements {
            let shape = module_shape(pos);
            let module_mass = shape.mass(density);
            let center = module_center(pos) + shape.center_of_mass();
            mass += module_mass;
            moment += center * module_mass;
        }
        let center_of_mass = if mass > 0.0 {
            moment / mass
        } else {
            Vec3::ZERO
        };
        PlanMass {
            mass,
            center_of_mass,
        }
    }

    // --- Canonical transforms ---

    /// The plan translated by `(dx, dz)`.
    pub fn shifted(&self, dx: i32, dz: i32) -> Option<BodyPlan> {
        self.map_placements(|p| p.checked_shifted(dx, dz))
    }

    /// The plan mirrored across the z axis.
    pub fn flipped_horizontally(&self) -> Option<BodyPlan> {
        self.map_placements(|mut p| {
            p.x = p.x.checked_neg()?;
            if !p.is_horizontal {
                p.x = p.x.checked_add(1)?;
            }
            Some(p)
        })
    }

    /// The plan mirrored across the x axis.
    pub fn flipped_vertically(&self) -> Option<BodyPlan> {
        self.map_placements(|mut p| {
            p.z = p.z.checked_neg()?;
            if p.is_horizontal {
                p.z = p.z.checked_add(1)?;
            }
            Some(p)
        })
    }

    /// The plan transposed (x and z swapped).
    pub fn turned_and_mirrored(&self) -> BodyPlan {
        let mut plan = self.clone();
        for p in &mut plan.placements {
            std::mem::swap(&mut p.x, &mut p.z);
            p.is_horizontal = !p.is_horizontal;
        }
        plan
    }

    pub fn rotated_clockwise(&self) -> Option<BodyPlan> {
        self.turned_and_mirrored().flipped_vertically()
    }

    pub fn rotated_counterclockwise(&self) -> Option<BodyPlan> {
        self.turned_and_mirrored().flipped_horizontally()
    }

    fn map_placements<F>(&self, f: F) -> Option<BodyPlan>
    where
        F: FnMut(RelativeModulePosition) -> Option<RelativeModulePosition>,
    {
        let placements = self.placements.iter().copied().map(f).collect::<Option<_>>()?;
        Some(BodyPlan {
            placements,
            grid_size: self.grid_size,
        })
    }

    // --- Equality ---

    /// The canonical minimal placement (see [`RelativeModulePosition`] ordering).
    pub fn minimal(&self) -> Option<RelativeModulePosition> {
        self.placements.iter().min().copied()
    }

    /// Same set of placements, optionally up to translation.
    ///
    /// With `ignore_shift`, both plans are moved so their minimal placement sits
    /// at the origin before comparing. Duplicate placements are matched one to
    /// one, so `[a, a, b]` does not equal `[a, b, b]`.
    pub fn equals(&self, other: &BodyPlan, ignore_shift: bool) -> bool {
        if self.size() != other.size() {
            return false;
        }
        if !ignore_shift {
            return self.matches(other);
        }
        let (Some(a), Some(b)) = (self.minimal(), other.minimal()) else {
            // Both empty.
            return true;
        };
        if a.is_horizontal != b.is_horizontal {
            return false;
        }
        match (self.shifted_to_origin(a), other.shifted_to_origin(b)) {
            (Some(lhs), Some(rhs)) => lhs.matches(&rhs),
            _ => false,
        }
    }

    /// The plan moved so that `anchor` lands on the origin.
    fn shifted_to_origin(&self, anchor: RelativeModulePosition) -> Option<BodyPlan> {
        self.shifted(anchor.x.checked_neg()?, anchor.z.checked_neg()?)
    }

    /// Order-independent exact comparison with one-to-one matching.
    fn matches(&self, other: &BodyPlan) -> bool {
        if self.size() != other.size() {
            return false;
        }
        let mut taken = vec![false; other.size()];
        for p in &self.placements {
            let found = other
                .placements
                .iter()
                .enumerate()
                .position(|(j, q)| !taken[j] && q == p);
            match found {
                Some(j) => taken[j] = true,
                None => return false,
            }
        }
        true
    }

    /// Whether both plans describe the same organism up to translation and,
    /// optionally, quarter-turn rotation and mirroring.
    ///
    /// Tries at most eight orientations of `other`.
    pub fn equal_organisms(
        &self,
        other: &BodyPlan,
        ignore_rotation: bool,
        ignore_mirror: bool,
    ) -> bool {
        if self.equals(other, true) {
            return true;
        }
        if ignore_rotation && self.matches_any_rotation(other.clone()) {
            return true;
        }
        if ignore_mirror {
            let Some(mirrored) = other.flipped_horizontally() else {
                return false;
            };
            if self.equals(&mirrored, true) {
                return true;
            }
            if ignore_rotation && self.matches_any_rotation(mirrored) {
                return true;
            }
        }
        false
    }

    /// Tries the three non-identity quarter turns of `candidate`.
    fn matches_any_rotation(&self, mut candidate: BodyPlan) -> bool {
        for _ in 0..3 {
            let Some(next) = candidate.rotated_clockwise() else {
                return false;
            };
            candidate = next;
            if self.equals(&candidate, true) {
                return true;
            }
        }
        false
    }
}

/// Solid box covering both cells of a module, long axis along its orientation.
fn module_shape(pos: &RelativeModulePosition) -> Cuboid {
    let half_size = if pos.is_horizontal {
        Vec3::new(MODULE_WIDTH, MODULE_HEIGHT / 2.0, MODULE_WIDTH / 2.0)
    } else {
        Vec3::new(MODULE_WIDTH / 2.0, MODULE_HEIGHT / 2.0, MODULE_WIDTH)
    };
    Cuboid { half_size }
}

/// Geometric centre of a module for a plan centred at the origin.
fn module_center(pos: &RelativeModulePosition) -> Vec3 {
    let primary = pos.to_pose(Vec3::ZERO).position;
    if pos.is_horizontal {
        primary + Vec3::new(MODULE_WIDTH / 2.0, 0.0, 0.0)
    } else {
        primary + Vec3::new(0.0, 0.0, MODULE_WIDTH / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(placements: &[RelativeModulePosition]) -> BodyPlan {
        let mut plan = BodyPlan::new(5);
        for &p in placements {
            plan.push(p);
        }
        plan
    }

    /// An L of three modules: two horizontals in a row and a vertical hanging off the end.
    fn l_shape() -> BodyPlan {
        plan(&[
            RelativeModulePosition::horizontal(0, 0),
            RelativeModulePosition::horizontal(2, 0),
            RelativeModulePosition::vertical(3, 1),
        ])
    }

    #[test]
    fn test_offsets_cover_footprint_border() {
        for is_horizontal in [true, false] {
            let pos = RelativeModulePosition::new(0, 0, is_horizontal);
            let mut border: Vec<(i32, i32)> = ConnectorSlot::ALL
                .iter()
                .filter_map(|s| s.offset(is_horizontal))
                .collect();
            border.sort();
            border.dedup();
            assert_eq!(border.len(), 6);
            for (dx, dz) in border {
                assert!(!pos.occupies(dx, dz));
                assert_eq!(pos.touches_cell(dx, dz), 1);
            }
        }
    }

    #[test]
    fn test_connectors_single_module_unlocked() {
        let p = plan(&[RelativeModulePosition::horizontal(0, 0)]);
        assert_eq!(p.connectors(0), Some([false; 10]));
        assert_eq!(p.connector(1, ConnectorSlot::Back), None);
    }

    #[test]
    fn test_connectors_end_to_end() {
        let p = plan(&[
            RelativeModulePosition::horizontal(0, 0),
            RelativeModulePosition::horizontal(2, 0),
        ]);
        assert_eq!(p.connector(0, ConnectorSlot::Front), Some(true));
        assert_eq!(p.connector(1, ConnectorSlot::Back), Some(true));
        let locked: usize = (0..2)
            .map(|i| p.connectors(i).unwrap().iter().filter(|&&l| l).count())
            .sum();
        assert_eq!(locked, 2);
    }

    #[test]
    fn test_connectors_vertical_sides() {
        // Vertical at (0, 0) with neighbours on its +x side at both cells.
        let p = plan(&[
            RelativeModulePosition::vertical(0, 0),
            RelativeModulePosition::vertical(1, 0),
        ]);
        assert_eq!(p.connector(0, ConnectorSlot::BackLeft), Some(true));
        assert_eq!(p.connector(0, ConnectorSlot::FrontLeft), Some(true));
        assert_eq!(p.connector(0, ConnectorSlot::BackRight), Some(false));
        assert_eq!(p.connector(1, ConnectorSlot::BackRight), Some(true));
        assert_eq!(p.connector(1, ConnectorSlot::FrontRight), Some(true));
    }

    #[test]
    fn test_axle_slots_never_locked() {
        let p = l_shape();
        for i in 0..p.size() {
            for slot in ConnectorSlot::ALL.into_iter().filter(|s| s.is_axle()) {
                assert_eq!(p.connector(i, slot), Some(false));
            }
        }
    }

    #[test]
    fn test_neighbour_counts() {
        let p = l_shape();
        assert_eq!(p.number_of_neighbours(&RelativeModulePosition::horizontal(0, 1)), 2);
        assert_eq!(p.number_of_neighbours(&RelativeModulePosition::vertical(5, 5)), 0);
        assert_eq!(p.cell_neighbours(2, 1), 2);
        assert_eq!(p.cell_neighbours(4, 2), 1);
        assert_eq!(p.cell_neighbours(-2, 0), 0);
    }

    #[test]
    fn test_validate() {
        assert!(l_shape().validate().is_ok());

        let overlap = plan(&[
            RelativeModulePosition::horizontal(0, 0),
            RelativeModulePosition::vertical(1, 0),
        ]);
        assert_eq!(
            overlap.validate(),
            Err(PlanError::Overlap {
                first: 0,
                second: 1
            })
        );

        let apart = BodyPlan::from_placements(
            5,
            vec![
                RelativeModulePosition::horizontal(0, 0),
                RelativeModulePosition::horizontal(3, 3),
            ],
        );
        assert!(matches!(apart, Err(PlanError::Disconnected { index: 1 })));
    }

    #[test]
    fn test_validate_rejects_coordinates_out_of_range() {
        assert_eq!(
            BodyPlan::from_placements(3, vec![RelativeModulePosition::horizontal(i32::MAX, 0)])
                .err(),
            Some(PlanError::OutOfRange { index: 0 })
        );

        let far = plan(&[
            RelativeModulePosition::horizontal(0, 0),
            RelativeModulePosition::vertical(0, i32::MIN),
        ]);
        assert_eq!(far.validate(), Err(PlanError::OutOfRange { index: 1 }));

        let edge = plan(&[
            RelativeModulePosition::horizontal(COORDINATE_LIMIT - 1, 0),
            RelativeModulePosition::vertical(COORDINATE_LIMIT, 1),
        ]);
        assert_eq!(edge.validate(), Ok(()));
    }

    #[test]
    fn test_transforms_report_overflow() {
        let p = l_shape();
        assert!(p.shifted(i32::MAX - 1, 0).is_none());
        assert!(p.shifted(0, i32::MAX).is_none());

        let low = plan(&[RelativeModulePosition::vertical(i32::MIN, i32::MIN)]);
        assert!(low.flipped_horizontally().is_none());
        assert!(low.flipped_vertically().is_none());
        assert!(low.rotated_clockwise().is_none());
        assert!(low.rotated_counterclockwise().is_none());
        assert_eq!(
            low.turned_and_mirrored().placements(),
            &[RelativeModulePosition::horizontal(i32::MIN, i32::MIN)]
        );

        // Flipping a vertical at i32::MAX lands exactly on i32::MIN + 2.
        let high = plan(&[RelativeModulePosition::vertical(i32::MAX, 0)]);
        assert_eq!(
            high.flipped_horizontally().unwrap().placements(),
            &[RelativeModulePosition::vertical(i32::MIN + 2, 0)]
        );
    }

    #[test]
    fn test_equality_with_extreme_coordinates() {
        let low = plan(&[
            RelativeModulePosition::horizontal(i32::MIN, 0),
            RelativeModulePosition::horizontal(i32::MIN + 2, 0),
        ]);
        let line = plan(&[
            RelativeModulePosition::horizontal(0, 0),
            RelativeModulePosition::horizontal(2, 0),
        ]);
        assert!(!low.equals(&line, true));
        assert!(!line.equal_organisms(&low, true, true));
        assert!(low.equals(&low, false));

        let top = plan(&[RelativeModulePosition::horizontal(i32::MAX, 0)]);
        assert_eq!(top.connector(0, ConnectorSlot::Front), Some(false));
        assert_eq!(top.connectors(0), Some([false; 10]));
    }

    #[test]
    fn test_bounds() {
        assert_eq!(BodyPlan::default().bounds(), None);
        assert_eq!(l_shape().bounds(), Some(((0, 0), (3, 2))));
    }

    #[test]
    fn test_transforms_leave_original_untouched() {
        let p = l_shape();
        let before = p.placements().to_vec();
        let _ = p.rotated_clockwise();
        let _ = p.flipped_horizontally();
        let _ = p.shifted(3, -2);
        let _ = p.turned_and_mirrored();
        assert_eq!(p.placements(), before.as_slice());
    }

    #[test]
    fn test_flip_horizontally_keeps_footprint() {
        let p = plan(&[
            RelativeModulePosition::horizontal(0, 0),
            RelativeModulePosition::vertical(2, 0),
        ]);
        let f = p.flipped_horizontally().unwrap();
        assert_eq!(
            f.placements(),
            &[
                RelativeModulePosition::horizontal(0, 0),
                RelativeModulePosition::vertical(-1, 0),
            ]
        );
        assert!(f.validate().is_ok());
    }

    #[test]
    fn test_four_rotations_return_home() {
        let p = l_shape();
        let mut r = p.clone();
        for _ in 0..4 {
            r = r.rotated_clockwise().unwrap();
        }
        assert!(p.equals(&r, true));
        let back = p.rotated_clockwise().unwrap().rotated_counterclockwise().unwrap();
        assert!(back.equals(&p, true));
    }

    #[test]
    fn test_equals_shift() {
        let p = l_shape();
        let moved = p.shifted(7, -3).unwrap();
        assert!(p.equals(&moved, true));
        assert!(!p.equals(&moved, false));
        assert!(p.equals(&p.shifted(0, 0).unwrap(), false));
    }

    #[test]
    fn test_equals_is_order_independent() {
        let p = l_shape();
        let mut reversed = p.placements().to_vec();
        reversed.reverse();
        let q = plan(&reversed);
        assert!(p.equals(&q, false));
    }

    #[test]
    fn test_equals_matches_duplicates_one_to_one() {
        let a = RelativeModulePosition::horizontal(0, 0);
        let b = RelativeModulePosition::vertical(2, 0);
        let lhs = plan(&[a, a, b]);
        let rhs = plan(&[a, b, b]);
        assert!(!lhs.equals(&rhs, false));
        assert!(!rhs.equals(&lhs, false));
    }

    #[test]
    fn test_equals_rejects_minimal_orientation_mismatch() {
        let h = plan(&[RelativeModulePosition::horizontal(0, 0)]);
        let v = plan(&[RelativeModulePosition::vertical(0, 0)]);
        assert!(!h.equals(&v, true));
    }

    #[test]
    fn test_equal_organisms_rotation_and_mirror() {
        let p = l_shape();
        let rotated = p.rotated_clockwise().unwrap();
        assert!(!p.equal_organisms(&rotated, false, false));
        assert!(p.equal_organisms(&rotated, true, false));

        let mirrored = p.flipped_horizontally().unwrap();
        assert!(!p.equal_organisms(&mirrored, true, false));
        assert!(p.equal_organisms(&mirrored, false, true));

        let both = mirrored.rotated_counterclockwise().unwrap();
        assert!(!p.equal_organisms(&both, false, true));
        assert!(p.equal_organisms(&both, true, true));
    }

    #[test]
    fn test_equal_organisms_different_shapes() {
        let line = plan(&[
            RelativeModulePosition::horizontal(0, 0),
            RelativeModulePosition::horizontal(2, 0),
            RelativeModulePosition::horizontal(4, 0),
        ]);
        assert!(!l_shape().equal_organisms(&line, true, true));
        assert!(BodyPlan::default().equal_organisms(&BodyPlan::new(9), true, true));
    }

    #[test]
    fn test_mass_properties() {
        assert_eq!(BodyPlan::default().mass_properties(1000.0).mass, 0.0);

        let single = plan(&[RelativeModulePosition::horizontal(0, 0)]);
        let props = single.mass_properties(1000.0);
        let expected = 2.0 * MODULE_WIDTH * MODULE_HEIGHT * MODULE_WIDTH * 1000.0;
        assert!((props.mass - expected).abs() < 1e-4);
        assert!((props.center_of_mass.x - MODULE_WIDTH / 2.0).abs() < 1e-6);
        assert!(props.center_of_mass.z.abs() < 1e-6);

        let pair = plan(&[
            RelativeModulePosition::horizontal(0, 0),
            RelativeModulePosition::horizontal(2, 0),
        ]);
        let props = pair.mass_properties(1000.0);
        assert!((props.mass - 2.0 * expected).abs() < 1e-4);
        assert!((props.center_of_mass.x - 1.5 * MODULE_WIDTH).abs() < 1e-6);
    }
}
