pub mod category;
pub mod chart;
pub mod config;
pub mod init;
pub mod log;
pub mod task;
pub mod timer;
pub mod user;
