//! # grid-morphology
//!
//! An engine-agnostic decoder that turns a continuous pattern-producing function
//! (for example an evolved CPPN) into a connected, buildable modular-robot body
//! plan on a square grid.
//!
//! The oracle is sampled on a virtual [`GrowthField`]; the [`ShapeBuilder`] grows a
//! [`BodyPlan`] out of two-cell modules by best-first search, keeping the body
//! connected as it goes. Plans can then be compared for symmetry equivalence
//! (translation, quarter turns, mirroring) to deduplicate shapes.
//!
//! ```
//! use grid_morphology::{translate, ConnectorSlot};
//!
//! let plan = translate(&|x: f64, y: f64| 1.0 - (x * x + y * y) / 8.0, 5);
//! assert!(plan.size() > 0);
//! assert_eq!(plan.connector(0, ConnectorSlot::BackAxleTop), Some(false));
//! ```

pub mod blueprint;
pub mod builder;
pub mod field;
pub mod morphology;
pub mod placement;

pub use blueprint::*;
pub use builder::*;
pub use field::*;
pub use morphology::*;
pub use placement::*;
