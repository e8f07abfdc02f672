pub mod mlf_decoder;
