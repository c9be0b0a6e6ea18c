//! fm library exports for the binary and for testing

pub mod core;
pub mod executor;
pub mod fs;
pub mod preview;
pub mod tui;

#[cfg(test)]
pub mod test_support;
