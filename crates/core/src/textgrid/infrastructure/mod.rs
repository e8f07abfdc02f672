pub mod praat_text_reader;
pub mod praat_text_writer;
