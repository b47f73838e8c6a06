pub mod hover;

pub use hover::{
    survey, sweep_arm_length, AugmentedLagrangian, ConstrainedSolution, EffectivenessMatrices,
    EqualityConstrainedProblem, Hover, HoverMode, HoverProblem, SweepPoint,
};
