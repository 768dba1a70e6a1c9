pub mod config;
pub mod error;
pub mod fia;
pub mod models;
pub mod visualization;

pub use config::Config;
pub use error::YieldError;
pub use fia::FiaClient;
pub use models::{StemModel, TreeMeasurement, YieldEstimate};
