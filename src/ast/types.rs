use std::fmt::Display;

use crate::SourcePosition;

use super::nodes::{Terminal, Tuple};

/// A declared type with an optional `?` nullable marker.
#[derive(Debug, Clone)]
pub struct DataType {
    pub position: SourcePosition,
    pub kind: TypeKind,
    pub nullable: Option<Terminal>,
}

#[derive(Debug, Clone)]
pub enum TypeKind {
    /// `[element]`, a sequence of the element type.
    Range(Box<DataType>),
    /// A builtin type keyword written in source.
    Builtin(TypeReference),
    /// `fn (a, b) -> r`
    Function {
        parameters: Vec<DataType>,
        result: Box<DataType>,
    },
    /// `(name : type, ...)`
    Tuple(Tuple),
    /// A named, possibly module-qualified and generic, type.
    Reference(TypeReference),
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            TypeKind::Range(element) => write!(f, "[{}]", element)?,
            TypeKind::Builtin(reference) => write!(f, "{}", reference)?,
            TypeKind::Function { parameters, result } => {
                let parameters = parameters
                    .iter()
                    .map(|p| p.to_string())
                    .collect::<Vec<String>>()
                    .join(", ");
                write!(f, "fn ({}) -> {}", parameters, result)?;
            }
            TypeKind::Tuple(tuple) => write!(f, "{}", tuple)?,
            TypeKind::Reference(reference) => write!(f, "{}", reference)?,
        }

        if self.nullable.is_some() {
            write!(f, "?")?;
        }

        Ok(())
    }
}

/// A named type, such as `bar.List<int>`. The builtin constructors carry
/// the empty position and are reused wherever a literal needs a type.
#[derive(Debug, Clone)]
pub struct TypeReference {
    pub position: SourcePosition,
    pub module: Option<Terminal>,
    pub name: Terminal,
    pub generic_arguments: Vec<DataType>,
}

impl TypeReference {
    pub fn new(
        position: SourcePosition,
        module: Option<Terminal>,
        name: Terminal,
        generic_arguments: Vec<DataType>,
    ) -> Self {
        TypeReference {
            position,
            module,
            name,
            generic_arguments,
        }
    }

    fn builtin(name: &str) -> Self {
        TypeReference {
            position: SourcePosition::empty(),
            module: None,
            name: Terminal::new(SourcePosition::empty(), String::from(name)),
            generic_arguments: vec![],
        }
    }

    pub fn boolean() -> Self {
        TypeReference::builtin("bool")
    }

    pub fn integer() -> Self {
        TypeReference::builtin("int")
    }

    pub fn float() -> Self {
        TypeReference::builtin("float")
    }

    pub fn string() -> Self {
        TypeReference::builtin("string")
    }

    pub fn void() -> Self {
        TypeReference::builtin("void")
    }

    pub fn never() -> Self {
        TypeReference::builtin("never")
    }

    pub fn null() -> Self {
        TypeReference::builtin("null")
    }
}

// Structural, position is not part of identity.
impl PartialEq for TypeReference {
    fn eq(&self, other: &Self) -> bool {
        self.module == other.module
            && self.name == other.name
            && self
                .generic_arguments
                .iter()
                .map(|a| a.to_string())
                .eq(other.generic_arguments.iter().map(|a| a.to_string()))
    }
}

impl Display for TypeReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(module) = &self.module {
            write!(f, "{}.", module)?;
        }
        write!(f, "{}", self.name)?;
        if !self.generic_arguments.is_empty() {
            let arguments = self
                .generic_arguments
                .iter()
                .map(|a| a.to_string())
                .collect::<Vec<String>>()
                .join(", ");
            write!(f, "<{}>", arguments)?;
        }
        Ok(())
    }
}

/// Provisional type attached to an expression at construction time.
/// Resolution of the remaining `None` types belongs to a later phase.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprType {
    Reference(TypeReference),
    Tuple(Vec<Option<ExprType>>),
}
