//! Lowering from the concrete parse tree to the AST.
//!
//! `decl` walks the declaration rules (module, class, field, method,
//! types) and `expr` walks the expression precedence chain. Both build
//! their nodes bottom-up and abort on the first error.
//!
//! The entry points here run the whole pipeline for a single rule, so
//! callers can lower a full compile unit or any individual declaration
//! or expression.

use crate::{
    ast::{
        expressions::Expression,
        nodes::{Class, ClassMember, Field, Method, Module, Terminal},
    },
    errors::errors::{Error, ErrorImpl},
    grammar::parser::{
        parse_class_definition, parse_class_member, parse_compile_unit, Parser,
    },
    lexer::{lexer::tokenize, tokens::Token},
    SourcePosition,
};

pub mod decl;
pub mod expr;

#[cfg(test)]
mod tests;

pub(crate) fn terminal(token: &Token) -> Terminal {
    Terminal::new(token.position.clone(), token.value.clone())
}

pub(crate) fn malformed_tree(node: &str, position: &SourcePosition) -> Error {
    Error::new(
        ErrorImpl::MalformedTreeError {
            node: String::from(node),
        },
        position.clone(),
    )
}

/// Lowers a full compile unit to a Module.
pub fn parse_module(source: &str, file: Option<String>) -> Result<Module, Error> {
    let tokens = tokenize(String::from(source), file)?;
    let mut parser = Parser::new(tokens);
    let unit = parse_compile_unit(&mut parser)?;
    decl::lower_compile_unit(&unit)
}

/// Lowers a single class definition.
pub fn parse_class(source: &str, file: Option<String>) -> Result<Class, Error> {
    let tokens = tokenize(String::from(source), file)?;
    let mut parser = Parser::new(tokens);
    let class = parse_class_definition(&mut parser)?;
    decl::lower_class(&class)
}

/// Lowers a single field declaration.
pub fn parse_field(source: &str, file: Option<String>) -> Result<Field, Error> {
    let tokens = tokenize(String::from(source), file)?;
    let mut parser = Parser::new(tokens);
    let member = parse_class_member(&mut parser)?;
    match decl::lower_class_member(&member)? {
        ClassMember::Field(field) => Ok(field),
        ClassMember::Method(_) => Err(malformed_tree("field", &member.position)),
    }
}

/// Lowers a single method declaration.
pub fn parse_method(source: &str, file: Option<String>) -> Result<Method, Error> {
    let tokens = tokenize(String::from(source), file)?;
    let mut parser = Parser::new(tokens);
    let member = parse_class_member(&mut parser)?;
    match decl::lower_class_member(&member)? {
        ClassMember::Method(method) => Ok(method),
        ClassMember::Field(_) => Err(malformed_tree("method", &member.position)),
    }
}

/// Lowers a single expression.
pub fn parse_expression(source: &str, file: Option<String>) -> Result<Expression, Error> {
    let tokens = tokenize(String::from(source), file)?;
    let mut parser = Parser::new(tokens);
    let expression = crate::grammar::expr::parse_expression(&mut parser)?;
    expr::lower_expression(&expression)
}
