pub mod convert_alignments_use_case;
pub mod evaluate_boundaries_use_case;
pub mod infrastructure;
pub mod pipeline_error;
pub mod pipeline_executor;
pub mod pipeline_logger;
