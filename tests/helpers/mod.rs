// Test Helper Modules
//
// Shared by every test target through `#[path = "../helpers/mod.rs"]`.
// The app under test runs on the in-memory vehicle store, so no database is
// needed.

#![allow(dead_code, unused_macros, unused_imports)]


pub use assertions::*;
pub use test_app::*;
pub use test_data::*;
