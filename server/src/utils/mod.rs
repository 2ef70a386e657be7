//! Utility functions for the application

pub mod retry;
pub mod time;
