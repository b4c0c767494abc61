//! Concrete grammar module for the frontend.
//!
//! This module contains the rule contexts making up the concrete parse
//! tree and the recursive-descent parser that produces them. The
//! contexts mirror the grammar rules one to one and expose their parts
//! as named optional slots; no AST nodes are built here, lowering is a
//! separate phase.

pub mod cst;
pub mod expr;
pub mod parser;
