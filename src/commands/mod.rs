pub mod common;
pub mod log;
pub mod shell;
pub mod status;
pub mod suggest;
