pub mod client;
pub mod config;
pub mod extract;
pub mod models;

pub use client::{ZoomClient, ZoomError};
pub use extract::extract_mp4_downloads;
