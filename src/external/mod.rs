pub mod client;
pub mod pinpoint;
