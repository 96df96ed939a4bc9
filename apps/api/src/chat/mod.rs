pub mod engine;
pub mod formatter;
pub mod handlers;
pub mod session;
pub mod suggestions;
