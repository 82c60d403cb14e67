pub mod check;
pub mod config;
pub mod parser;
pub mod version;
