pub mod blog;
pub mod config;
pub mod play;
