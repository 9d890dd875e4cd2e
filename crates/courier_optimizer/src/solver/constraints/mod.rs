pub mod constraint;
pub mod global_constraint;
pub mod maximum_working_duration_constraint;
pub mod route_constraint;
pub mod travel_time_constraint;
pub mod unassigned_stop_constraint;
