//! Logic Module - pure business rules
//!
//! - `risk/` - Risk scoring engine
//! - `analytics` - Class statistics

pub mod risk;
pub mod analytics;
