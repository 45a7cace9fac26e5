//! End-to-end scenario and property tests, layered on top of the per-module
//! unit tests embedded alongside each component.

mod scenarios;
