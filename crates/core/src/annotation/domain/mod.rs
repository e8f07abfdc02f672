pub mod annotation_error;
pub mod grid;
pub mod interval;
pub mod interval_tier;
pub mod mark;
pub mod point_tier;
pub mod tier;
pub mod time_item;
