mod effectiveness;
mod feasibility;
mod problem;
mod solver;
mod survey;

pub use effectiveness::EffectivenessMatrices;
pub use feasibility::Hover;
pub use problem::{HoverMode, HoverProblem};
pub use solver::{AugmentedLagrangian, ConstrainedSolution, EqualityConstrainedProblem};
pub use survey::{survey, sweep_arm_length, SweepPoint};
