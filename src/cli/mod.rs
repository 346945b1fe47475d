pub mod command;
pub mod command_loop;
pub mod help;
pub mod logger;
pub mod utils;
