//! blmonitor infrastructure: PostgreSQL store, DNS probe, system helpers
pub mod database;
pub mod dns;
pub mod repositories;
pub mod system;
