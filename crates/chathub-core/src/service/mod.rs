//! Services orchestrating directory state and persistence.

pub mod directory;
