pub mod alignment;
pub mod annotation;
pub mod evaluation;
pub mod pipeline;
pub mod shared;
pub mod textgrid;
