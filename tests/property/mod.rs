//! Property-based tests

mod record_proptest;
