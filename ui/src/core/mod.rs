pub mod attributes;
pub mod config;
pub mod error;
pub mod format;
pub mod geometry;
pub mod platform;
pub mod timing;
