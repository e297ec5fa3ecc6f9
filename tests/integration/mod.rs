//! Integration tests for the live preview engine

mod classification;
mod config_loading;
mod refresh_generations;
mod synthesis_scenarios;
mod test_utils;
