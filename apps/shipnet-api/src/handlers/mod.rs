//! Handlers 模块

pub mod cables;
pub mod chat;
pub mod dashboard;
pub mod health;
pub mod metrics;
pub mod systems;
pub mod tables;

pub use cables::*;
pub use chat::*;
pub use dashboard::*;
pub use health::*;
pub use metrics::*;
pub use systems::*;
pub use tables::*;
