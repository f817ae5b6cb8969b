pub mod config;
pub mod currency;
pub mod strategy;
