pub mod allocation;
pub mod fleet_allocator;
pub mod fleet_plan;
pub mod schema;
pub mod stop_id;
pub mod stop_pool;

#[cfg(test)]
pub(crate) mod test_utils;
