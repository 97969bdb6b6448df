//! Standalone functional units owned by the pipeline controller but
//! logically separable from it.

pub mod branch_predictor;

pub use branch_predictor::BranchPredictor;
