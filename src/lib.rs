pub mod api;
pub mod banner;
pub mod config;
pub mod consts;
pub mod runner;
pub mod scripts;
pub mod server;
pub mod telemetry;
