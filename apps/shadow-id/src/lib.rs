//! Shadow ID desktop backend
//!
//! Hosts the users domain behind [`App`] and exposes it to the GUI shell
//! through the line-delimited JSON [`bridge`].

pub mod app;
pub mod bridge;
pub mod config;

pub use app::App;
pub use config::Config;
