//! Common test utilities for rockext-extensions
//!
//! This module provides shared test infrastructure including:
//! - Document and project builders
//! - Small extensions with predictable snippets

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod builders;
pub mod test_extensions;

pub use builders::*;
pub use test_extensions::*;
