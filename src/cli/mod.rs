pub mod aggregate;
pub mod server;
