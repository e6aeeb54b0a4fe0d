//! HTTP handlers

pub mod assessments;
pub mod dashboard;
pub mod health;
pub mod predict;
pub mod sensors;
pub mod workers;
