pub mod config;
pub mod error;
pub mod graphs;
pub mod search;
pub mod server;
pub mod session;
