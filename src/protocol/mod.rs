pub mod messages;
pub mod handler;
pub mod worker;
