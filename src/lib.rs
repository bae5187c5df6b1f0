/// Metric Rain Bot library
///
/// Watches a rainfall-reporting account, converts each inch measurement it
/// posts to a metric unit, and replies with the converted value. It never
/// replies twice to the same post: the "already replied" set is re-derived
/// from the bot's own post history on every run, so the system keeps no
/// state between runs.

pub mod config;
pub mod convert;
pub mod error;
pub mod http_server;
pub mod job;
pub mod ledger;
pub mod parser;
pub mod scheduler;
pub mod twitter;

#[cfg(test)]
mod tests;
