//! Error types for the TINY front end.
//!
//! Parse errors are never raised: the parser records them and keeps going.
//! This module defines what gets recorded:
//!
//! - Error structures with source position information
//! - The unexpected-token variants produced while parsing
//! - File access failures from the path entry point
//! - Helpful error messages and suggestions

pub mod errors;
