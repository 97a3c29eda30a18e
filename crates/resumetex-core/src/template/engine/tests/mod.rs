//! Tests for template engine
//!
//! Organized into focused submodules.

use super::*;

// Test helper functions
mod helpers;
