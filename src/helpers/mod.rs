//! Helper functions shared by grouping and display

mod date;

pub use date::*;
