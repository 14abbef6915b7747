//! Unit test module
//!
//! Handler unit tests live here, separate from source files.
//! Tests drive handlers through the public `Handler` API against a recording `MockBot`.

mod event_handler_test;
mod support;
