//! Closed set of body representations an organism can carry.

use crate::blueprint::BodyPlan;
use serde::{Deserialize, Serialize};

/// The body of an organism, by representation.
///
/// Comparison is only defined between bodies of the same kind; anything else is
/// simply "not the same organism".
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub enum Morphology {
    /// No body has been decoded yet.
    #[default]
    Pending,
    /// A plan grown on the module grid.
    Grid(BodyPlan),
}

impl Morphology {
    pub fn as_plan(&self) -> Option<&BodyPlan> {
        match self {
            Morphology::Grid(plan) => Some(plan),
            Morphology::Pending => None,
        }
    }

    /// Number of modules, zero while pending.
    pub fn size(&self) -> usize {
        self.as_plan().map_or(0, BodyPlan::size)
    }

    /// Symmetry-aware comparison. Never fails: mismatched kinds compare unequal,
    /// and a pending body equals nothing, not even another pending body.
    pub fn equal_organisms(
        &self,
        other: &Morphology,
        ignore_rotation: bool,
        ignore_mirror: bool,
    ) -> bool {
        match (self, other) {
            (Morphology::Grid(a), Morphology::Grid(b)) => {
                a.equal_organisms(b, ignore_rotation, ignore_mirror)
            }
            _ => false,
        }
    }
}

impl From<BodyPlan> for Morphology {
    fn from(plan: BodyPlan) -> Self {
        Morphology::Grid(plan)
    }
}
