pub mod client;
pub mod profile;
pub mod types;
