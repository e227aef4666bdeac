pub mod logging;

pub mod api;
pub mod components;
pub mod config;
pub mod constants;
pub mod error;
pub mod map;
pub mod markers;
pub mod models;
pub mod render;
pub mod session;

pub use components::app::App;
