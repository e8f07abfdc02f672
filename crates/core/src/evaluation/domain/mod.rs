pub mod boundary;
pub mod boundary_agreement;
pub mod evaluation_error;
