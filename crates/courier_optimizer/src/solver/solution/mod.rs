pub mod route;
pub mod route_id;
pub mod tour;
pub mod working_solution;
