//! Property-based tests for classification, synthesis and generation gating

mod determinism;
mod generations;
