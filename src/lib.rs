pub mod api;
pub mod auth;
pub mod config;
pub mod engine;
pub mod entities;
pub mod error;
pub mod external;
pub mod format;
pub mod map;
pub mod panel;
pub mod routing;
pub mod server;
pub mod store;

#[cfg(test)]
mod test_utils;
