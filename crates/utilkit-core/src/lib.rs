pub mod config;
pub mod logging;

pub mod db;
pub mod format;
pub mod params;
pub mod retry;
