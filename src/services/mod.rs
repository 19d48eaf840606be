pub mod command_service;
pub mod platform_service;
pub mod validation;

pub use command_service::*;
pub use platform_service::*;
pub use validation::*;
