pub mod engine;

pub use engine::{correct_value, CorrectionInput, CorrectionOutput, CorrectionStage};
