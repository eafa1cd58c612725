pub mod adapters;
pub mod configuration;
pub mod core;
pub mod error;
#[cfg(any(test, feature = "mocks"))]
pub mod memory;
pub mod pages;
pub mod utils;
