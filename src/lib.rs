pub mod audio;
pub mod collision;
pub mod config;
pub mod constants;
pub mod entities;
pub mod player;
pub mod powers;
pub mod registry;
pub mod render;
pub mod session;
pub mod spawn;
pub mod state;
