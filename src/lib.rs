pub mod config;
pub mod engine;
pub mod generator;
pub mod level;
pub mod pack;
pub mod rng;
pub mod session;
pub mod store;
