//! Integration tests for sprite-rs crates.
//!
//! End-to-end checks of the load -> extract -> composite -> render flow
//! across crate boundaries. Set `RUST_LOG=debug` to see library events.
