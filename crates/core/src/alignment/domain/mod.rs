pub mod alignment_record;
pub mod decoder_config;
pub mod mlf_error;
pub mod utterance_assembler;
pub mod utterance_name;
