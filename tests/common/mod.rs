//! Shared test utilities for snmp-codec integration tests.

// Not every test file uses every helper
#![allow(dead_code)]
#![allow(unused_imports)]

mod fixtures;
mod responder;

pub use fixtures::*;
pub use responder::*;
