pub mod dynamodb;
pub mod error;
pub mod extract;
pub mod relay;
pub mod sigfox;
pub mod slack;
pub mod telemetry;
