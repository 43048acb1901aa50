pub mod config;
pub mod driver;
pub mod export;
pub mod flatten;
pub mod http;
pub mod run;
pub mod types;
