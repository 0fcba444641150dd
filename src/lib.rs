pub mod config;
pub mod logger;
pub mod server;
pub mod record;
pub mod filter_state;
pub mod filter;
pub mod ranking;
pub mod paginator;
pub mod query_string;
pub mod debounce;
pub mod listing;
pub mod content_store;
mod text_utils;
pub mod util;
#[cfg(test)]
mod test_data;
