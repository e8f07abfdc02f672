pub mod grid_reader;
pub mod grid_writer;
pub mod textgrid_error;
