pub mod host;
pub mod input;
pub mod shell;
