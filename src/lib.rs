// Crate root library declaration and module exports.
pub mod cli;
pub mod config;
pub mod context;
pub mod controller;
pub mod export;
pub mod handlers;
pub mod help;
pub mod intent;
pub mod model;
pub mod storage;
pub mod system;
