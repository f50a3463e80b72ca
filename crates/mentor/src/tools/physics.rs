use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{json, Value};

use crate::errors::{ToolError, ToolResult};
use crate::tool::Tool;

/// Fixed table of (key, value, unit, description)
const CONSTANTS: &[(&str, f64, &str, &str)] = &[
    ("speed_of_light", 299792458.0, "m/s", "Speed of light in vacuum"),
    (
        "gravitational_constant",
        6.67430e-11,
        "m³/(kg⋅s²)",
        "Gravitational constant",
    ),
    ("planck_constant", 6.62607015e-34, "J⋅s", "Planck constant"),
    ("electron_mass", 9.1093837015e-31, "kg", "Electron rest mass"),
    ("proton_mass", 1.67262192369e-27, "kg", "Proton rest mass"),
    ("avogadro_number", 6.02214076e23, "mol⁻¹", "Avogadro constant"),
];

lazy_static! {
    static ref CONSTANTS_TRIGGER: Regex =
        Regex::new(r"constant|speed of light|gravity|planck").unwrap();
    static ref CONSTANT_NAME: Regex =
        Regex::new(r"(?i)speed of light|gravitational constant|planck|electron|proton|avogadro")
            .unwrap();
    static ref FORCE_TRIGGER: Regex = Regex::new(r"force|newton|f\s*=\s*ma").unwrap();
    static ref MASS: Regex = Regex::new(r"(?i)mass[:\s]*(\d+\.?\d*)").unwrap();
    static ref ACCELERATION: Regex = Regex::new(r"(?i)acceleration[:\s]*(\d+\.?\d*)").unwrap();
    static ref WHITESPACE_RUN: Regex = Regex::new(r"\s+").unwrap();
}

/// Look up fundamental physics constants by name
pub fn physics_constants() -> Tool {
    Tool::new(
        "physicsConstants",
        "Look up fundamental physics constants",
        json!({
            "constant": {
                "type": "string",
                "description": "Name of the physics constant to look up"
            }
        }),
        |message| CONSTANTS_TRIGGER.is_match(message),
        extract_constant,
        run_constant_lookup,
    )
}

/// Calculate force using F = ma
pub fn force_calculator() -> Tool {
    Tool::new(
        "forceCalculator",
        "Calculate force using F = ma",
        json!({
            "mass": { "type": "number", "description": "Mass in kilograms" },
            "acceleration": { "type": "number", "description": "Acceleration in m/s²" }
        }),
        |message| FORCE_TRIGGER.is_match(message),
        extract_force_inputs,
        run_force_calculator,
    )
}

// Fragment matches ("planck", "electron") are passed through as-is:
// the lookup rejects them with the list of available constants rather
// than this extractor guessing a full name.
fn extract_constant(message: &str) -> Value {
    let constant = CONSTANT_NAME
        .find(message)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| "speed_of_light".to_string());
    json!({ "constant": constant })
}

fn extract_force_inputs(message: &str) -> Value {
    let mass = MASS
        .captures(message)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(1.0);
    let acceleration = ACCELERATION
        .captures(message)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(9.8);
    json!({ "mass": mass, "acceleration": acceleration })
}

fn run_constant_lookup(parameters: &Value) -> ToolResult<Value> {
    let name = parameters
        .get("constant")
        .and_then(Value::as_str)
        .ok_or_else(|| ToolError::InvalidParameters("constant must be a string".to_string()))?;

    let key = WHITESPACE_RUN
        .replace_all(&name.to_lowercase(), "_")
        .to_string();

    let (_, value, unit, description) = CONSTANTS
        .iter()
        .find(|(k, _, _, _)| *k == key)
        .ok_or_else(|| {
            let available: Vec<String> = CONSTANTS
                .iter()
                .map(|(k, _, _, _)| k.replace('_', " "))
                .collect();
            ToolError::ExecutionError(format!(
                "Constant not found. Available constants: {}",
                available.join(", ")
            ))
        })?;

    Ok(json!({
        "name": name,
        "value": value,
        "unit": unit,
        "description": description,
        "scientificNotation": format!("{:e}", value),
    }))
}

fn run_force_calculator(parameters: &Value) -> ToolResult<Value> {
    let mass = parameters
        .get("mass")
        .and_then(Value::as_f64)
        .ok_or_else(|| ToolError::InvalidParameters("mass must be a number".to_string()))?;
    let acceleration = parameters
        .get("acceleration")
        .and_then(Value::as_f64)
        .ok_or_else(|| ToolError::InvalidParameters("acceleration must be a number".to_string()))?;

    let force = mass * acceleration;

    Ok(json!({
        "force": force,
        "unit": "N (Newtons)",
        "calculation": format!(
            "F = ma = {} kg × {} m/s² = {} N",
            mass, acceleration, force
        ),
        "components": {
            "mass": mass,
            "acceleration": acceleration
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_is_case_and_space_insensitive() {
        for name in ["Speed of Light", "speed_of_light", "speed of light"] {
            let result = run_constant_lookup(&json!({ "constant": name })).unwrap();
            assert_eq!(result["value"].as_f64().unwrap(), 299792458.0);
            assert_eq!(result["unit"], "m/s");
        }
    }

    #[test]
    fn test_lookup_gravitational_constant() {
        let result = run_constant_lookup(&json!({ "constant": "gravitational constant" })).unwrap();
        let value = result["value"].as_f64().unwrap();
        assert!((value - 6.67430e-11).abs() < 1e-16);
        assert!(result["scientificNotation"].as_str().unwrap().contains('e'));
    }

    #[test]
    fn test_lookup_unknown_constant_lists_all_names() {
        let err = run_constant_lookup(&json!({ "constant": "boltzmann" })).unwrap_err();
        let message = err.to_string();
        for name in [
            "speed of light",
            "gravitational constant",
            "planck constant",
            "electron mass",
            "proton mass",
            "avogadro number",
        ] {
            assert!(message.contains(name), "missing {} in {}", name, message);
        }
    }

    #[test]
    fn test_constant_extraction_defaults_to_speed_of_light() {
        let tool = physics_constants();
        assert!(tool.is_relevant("What is the gravitational constant?"));
        let params = tool.extract_parameters("What is the gravitational constant?");
        assert_eq!(params["constant"], "gravitational constant");

        let params = tool.extract_parameters("how fast is light in a vacuum");
        assert_eq!(params["constant"], "speed_of_light");
    }

    #[test]
    fn test_partial_constant_name_fails_lookup_instead_of_guessing() {
        // "Planck" is extracted as a fragment; the lookup must reject it
        // rather than fall back to another constant's value.
        let tool = physics_constants();
        let params = tool.extract_parameters("What is Planck's constant?");
        assert_eq!(params["constant"], "Planck");

        let err = run_constant_lookup(&params).unwrap_err();
        assert!(err.to_string().contains("Available constants"));
    }

    #[test]
    fn test_force_is_mass_times_acceleration() {
        let result = run_force_calculator(&json!({ "mass": 2.0, "acceleration": 5.0 })).unwrap();
        assert_eq!(result["force"].as_f64().unwrap(), 10.0);
        assert_eq!(result["unit"], "N (Newtons)");

        let result = run_force_calculator(&json!({ "mass": -3.0, "acceleration": 0.0 })).unwrap();
        assert_eq!(result["force"].as_f64().unwrap(), 0.0);
    }

    #[test]
    fn test_force_extraction_with_defaults() {
        let tool = force_calculator();
        assert!(tool.is_relevant("calculate the force on this object"));

        let params = tool.extract_parameters("force with mass 2 and acceleration 5");
        assert_eq!(params["mass"].as_f64().unwrap(), 2.0);
        assert_eq!(params["acceleration"].as_f64().unwrap(), 5.0);

        let params = tool.extract_parameters("how much force is that");
        assert_eq!(params["mass"].as_f64().unwrap(), 1.0);
        assert_eq!(params["acceleration"].as_f64().unwrap(), 9.8);
    }
}
