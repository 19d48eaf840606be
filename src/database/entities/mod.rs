pub mod commands;
pub mod platforms;
