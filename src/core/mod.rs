pub mod aggregate;
pub mod carry_over;
pub mod clock;
pub mod coordinator;
pub mod log;
pub mod store;
pub mod timer;
