/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - nodes: Declaration nodes (module, class, field, method, tuple)
/// - expressions: Definitions for various expression types
/// - types: Data types, type references and provisional expression types
pub mod expressions;
pub mod nodes;
pub mod types;

#[cfg(test)]
mod tests;
