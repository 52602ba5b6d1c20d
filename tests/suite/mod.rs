//! Integration test modules

mod config;
mod preprocess;
mod properties;
mod scenarios;
