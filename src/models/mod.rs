//! Data models

pub mod user;
pub mod student;
pub mod grade;
pub mod prediction;

pub use user::*;
pub use student::*;
pub use grade::*;
pub use prediction::*;
