//! Applied loads

mod force;

pub use force::Force;
