pub mod concepts;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::ServerConfig;
pub use state::AppState;
