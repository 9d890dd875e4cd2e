pub mod stop;
pub mod tour_problem;
