pub mod config;
pub mod decode;
pub mod endpoints;
pub mod error;
