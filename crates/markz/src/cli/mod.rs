mod commands;
mod render;
pub mod setup;
mod styles;
mod watch;

pub use commands::run;
