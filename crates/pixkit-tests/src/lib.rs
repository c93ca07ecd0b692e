//! Integration tests for pixkit crates.
//!
//! End-to-end checks across the engines, the pipeline, the worker and
//! PNG files on disk.
