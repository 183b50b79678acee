pub mod error;
pub mod execute;
pub mod health;
pub mod resolve;
pub mod tables;

pub use error::AppError;
