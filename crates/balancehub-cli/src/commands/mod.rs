pub mod career;
pub mod chat;
pub mod config;
pub mod mentor;
pub mod network;
pub mod relax;
pub mod schedule;
