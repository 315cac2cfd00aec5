//! HTTP handlers

pub mod health;
pub mod auth;
pub mod students;
pub mod grades;
pub mod predictions;
pub mod analytics;
pub mod ml;
pub mod reports;
