pub mod quality_analyzer;

pub use quality_analyzer::{
    Breach, Metric, QualityAnalyzer, QualityAssessment, QualityLimits, Thresholds,
};
