pub mod bot;
pub mod config;
pub mod error;
pub mod listener;
pub mod openai;
pub mod types;

pub use bot::run;
