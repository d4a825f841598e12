pub mod command;
pub mod constants;
pub mod decoder;
pub mod mem;
