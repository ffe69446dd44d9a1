//! API endpoint handlers.

pub mod algorithms;
pub mod health;
pub mod opinions;
pub mod results;
