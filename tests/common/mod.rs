//! Common test infrastructure for palette-validate integration tests.
//!
//! Each test file compiles its own copy of this module, so items may appear
//! unused from the perspective of a single test file even though they're
//! used elsewhere.

#![allow(dead_code)]
#![allow(unused_imports)]

pub mod fixtures;
pub mod mock_server;
pub mod workspace;

pub use mock_server::MockSigevent;
pub use workspace::TestWorkspace;
