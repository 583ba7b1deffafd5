pub mod context;
pub mod extract;
pub mod helper;
pub mod init;
pub mod inline;
pub mod lint;
mod command_result;

pub use command_result::*;
