#![allow(clippy::needless_pass_by_value)]

pub mod app;
pub mod button;
pub mod controller;
pub mod legend;
pub mod map_view;
pub mod message_panel;
pub mod route_controls;
pub mod scoreboard;
