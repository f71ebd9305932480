//! Core module - Contains the fundamental types and utilities
//!
//! This module provides:
//! - Error types for cache, loader and route failures
//! - Source file reading and parsing
//! - Path resolution utilities
//! - Rendering of JSON values to output formats

pub mod error;
pub mod file_reader;
pub mod paths;
pub mod render;
