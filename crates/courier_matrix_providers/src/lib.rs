pub mod as_the_crow_flies;
pub mod coordinate;
pub mod graphhopper_api;
pub mod matrix_builder;
pub mod retry;
pub mod travel_matrices;
pub mod travel_profile;
pub mod travel_time_oracle;

#[cfg(test)]
pub(crate) mod test_utils;
