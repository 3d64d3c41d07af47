pub mod configuration;
pub mod database;
pub mod inventory;
pub mod output;
pub mod parser;
pub mod pipeline;
pub mod telemetry;
pub mod types;
