//! Data models

pub mod assessment;
pub mod sensor;
pub mod worker;

pub use assessment::*;
pub use sensor::*;
pub use worker::*;
