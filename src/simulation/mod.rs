pub mod fx_paths;
pub mod portfolio;
pub mod rng;
