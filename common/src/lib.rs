pub mod config;
pub mod errors;
pub mod repository;

pub use repository::*;

pub type UserId = String;
pub type RequestId = String;
