//! API Routes

pub mod analyze;
