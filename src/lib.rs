pub mod api;
pub mod config;
pub mod conversation;
pub mod player;
pub mod timestamps;
pub mod types;

#[cfg(feature = "ui")]
pub mod ui;
#[cfg(feature = "ui")]
pub mod views;
