//! Integration test crate for clipview.
//!
//! This crate exists solely to hold cross-crate integration tests.
//! It wires engine-side producers into adapters to verify they work together.

#[cfg(test)]
mod adapter;

#[cfg(test)]
mod media;
