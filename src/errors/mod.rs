//! Error types and error handling for the frontend.
//!
//! This module defines the error types used throughout lowering. It
//! includes:
//!
//! - Error structures with source position information
//! - Specific error variants for lexing, parsing and tree lowering
//! - Error formatting and display functionality
//! - Helpful error messages and suggestions

pub mod errors;
