//! 工具模块

pub mod deadline;
pub mod response;
pub mod validation;

pub use deadline::*;
pub use validation::*;
