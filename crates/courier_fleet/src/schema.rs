use schemars::schema_for;

use crate::fleet_plan::FleetPlan;

pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&schema_for!(FleetPlan))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_describes_plan() {
        let schema: serde_json::Value = serde_json::from_str(&generate_json_schema().unwrap()).unwrap();

        assert_eq!(schema["title"], "FleetPlan");
        assert!(schema["properties"]["classes"].is_object());
        assert!(schema["properties"]["depot"].is_object());
    }
}
