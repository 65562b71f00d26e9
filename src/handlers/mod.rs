//! Request handlers module

pub mod extract;
pub mod records;
pub mod reports;
