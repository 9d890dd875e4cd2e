pub mod constraints;
pub mod insertion;
pub mod insertion_context;
pub mod ls;
pub mod recreate;
pub mod ruin;
pub mod ruin_recreate;
pub mod score;
pub mod solution;
pub mod solver_params;
pub mod tour_optimizer;
