pub mod agents;
pub mod errors;
pub mod models;
pub mod orchestrator;
pub mod providers;
pub mod tool;
pub mod tools;
