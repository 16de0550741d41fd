//! Allocation: the allocator itself and explicit scope threading.

pub mod allocator;
pub mod scope;

pub use allocator::{allocate, Allocation, Allocator, Baseline};
pub use scope::ZIndexScope;
