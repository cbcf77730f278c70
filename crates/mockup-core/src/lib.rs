pub mod client;
pub mod codec;
pub mod config;
pub mod consts;
pub mod error;
pub mod prompt;
pub mod session;
pub mod viewport;
