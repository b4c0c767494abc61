use std::fmt::Display;
use std::hash::{Hash, Hasher};

use crate::SourcePosition;

use super::expressions::Expression;
use super::types::DataType;

/// A raw token value with its source position. Equality and hashing are
/// on the text only, so operator and keyword matching can compare
/// terminals taken from different positions.
#[derive(Debug, Clone)]
pub struct Terminal {
    pub position: SourcePosition,
    pub value: String,
}

impl Terminal {
    pub fn new(position: SourcePosition, value: String) -> Self {
        Terminal { position, value }
    }
}

impl Display for Terminal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl PartialEq for Terminal {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for Terminal {}

impl Hash for Terminal {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl PartialEq<str> for Terminal {
    fn eq(&self, other: &str) -> bool {
        self.value == other
    }
}

impl PartialEq<&str> for Terminal {
    fn eq(&self, other: &&str) -> bool {
        self.value == *other
    }
}

fn push_tabs(builder: &mut String, tab: usize) {
    for _ in 0..tab {
        builder.push('\t');
    }
}

/// Root of a lowered compile unit.
#[derive(Debug, Clone)]
pub struct Module {
    pub position: SourcePosition,
    pub name: Option<Terminal>,
    pub imports: Vec<Import>,
    pub members: Vec<Class>,
}

impl Module {
    pub fn write_indented(&self, tab: usize, builder: &mut String) {
        push_tabs(builder, tab);
        match &self.name {
            Some(name) => builder.push_str(&format!("module {}\n", name)),
            None => builder.push_str("module\n"),
        }
        for import in &self.imports {
            push_tabs(builder, tab);
            builder.push_str(&format!("{}\n", import));
        }
        builder.push('\n');
        for member in &self.members {
            member.write_indented(tab, builder);
        }
    }
}

impl Display for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut builder = String::new();
        self.write_indented(0, &mut builder);
        write!(f, "{}", builder)
    }
}

#[derive(Debug, Clone)]
pub struct Import {
    pub position: SourcePosition,
    pub target: ImportTarget,
}

/// An import either names a module defined elsewhere or carries an
/// inline module definition.
#[derive(Debug, Clone)]
pub enum ImportTarget {
    Named(Terminal),
    Inline(Box<Module>),
}

impl Display for Import {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.target {
            ImportTarget::Named(name) => write!(f, "import {}", name),
            ImportTarget::Inline(module) => write!(f, "import {}", module),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Class {
    pub position: SourcePosition,
    pub access: Option<Terminal>,
    pub storage_class: Option<Terminal>,
    pub name: Terminal,
    pub default_constructor: Option<Tuple>,
    pub generic_arguments: Vec<GenericArgument>,
    pub members: Vec<ClassMember>,
}

impl Class {
    pub fn write_indented(&self, tab: usize, builder: &mut String) {
        push_tabs(builder, tab);
        if let Some(access) = &self.access {
            builder.push_str(&format!("{} ", access));
        }
        if let Some(storage_class) = &self.storage_class {
            builder.push_str(&format!("{} ", storage_class));
        }
        builder.push_str(&format!("class {}", self.name));
        if !self.generic_arguments.is_empty() {
            let arguments = self
                .generic_arguments
                .iter()
                .map(|a| a.to_string())
                .collect::<Vec<String>>()
                .join(", ");
            builder.push_str(&format!("<{}>", arguments));
        }
        if let Some(constructor) = &self.default_constructor {
            builder.push_str(&constructor.to_string());
        }
        builder.push('\n');
        push_tabs(builder, tab);
        builder.push_str("{\n");
        for member in &self.members {
            member.write_indented(tab + 1, builder);
            builder.push('\n');
        }
        push_tabs(builder, tab);
        builder.push_str("}\n");
    }
}

impl Display for Class {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut builder = String::new();
        self.write_indented(0, &mut builder);
        write!(f, "{}", builder)
    }
}

#[derive(Debug, Clone)]
pub struct GenericArgument {
    pub position: SourcePosition,
    pub name: Terminal,
}

impl Display for GenericArgument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Clone)]
pub enum ClassMember {
    Field(Field),
    Method(Method),
}

impl ClassMember {
    pub fn write_indented(&self, tab: usize, builder: &mut String) {
        match self {
            ClassMember::Field(field) => {
                push_tabs(builder, tab);
                builder.push_str(&field.to_string());
            }
            ClassMember::Method(method) => method.write_indented(tab, builder),
        }
    }
}

impl Display for ClassMember {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClassMember::Field(field) => write!(f, "{}", field),
            ClassMember::Method(method) => write!(f, "{}", method),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Field {
    pub position: SourcePosition,
    pub access: Option<Terminal>,
    pub storage_class: Option<Terminal>,
    pub name: Terminal,
    pub data_type: DataType,
    pub expression: Option<Expression>,
}

impl Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(access) = &self.access {
            write!(f, "{} ", access)?;
        }
        if let Some(storage_class) = &self.storage_class {
            write!(f, "{} ", storage_class)?;
        }
        write!(f, "{} : {}", self.name, self.data_type)?;
        if let Some(expression) = &self.expression {
            write!(f, " <- {}", expression)?;
        }
        Ok(())
    }
}

/// A method member. `body` is `None` exactly when the source deferred
/// the implementation with the `defer` keyword.
#[derive(Debug, Clone)]
pub struct Method {
    pub position: SourcePosition,
    pub access: Option<Terminal>,
    pub pure: Option<Terminal>,
    pub name: Terminal,
    pub generic_arguments: Vec<GenericArgument>,
    pub parameters: Tuple,
    pub body: Option<Expression>,
}

impl Method {
    pub fn write_indented(&self, tab: usize, builder: &mut String) {
        push_tabs(builder, tab);
        if let Some(access) = &self.access {
            builder.push_str(&format!("{} ", access));
        }
        if let Some(pure) = &self.pure {
            builder.push_str(&format!("{} ", pure));
        }
        if self.body.is_none() {
            builder.push_str("defer ");
        }
        builder.push_str(&self.name.to_string());
        if !self.generic_arguments.is_empty() {
            let arguments = self
                .generic_arguments
                .iter()
                .map(|a| a.to_string())
                .collect::<Vec<String>>()
                .join(", ");
            builder.push_str(&format!("<{}>", arguments));
        }
        builder.push_str(&self.parameters.to_string());

        match &self.body {
            None => {}
            Some(body) if body.is_block() => {
                builder.push('\n');
                body.write_indented(tab, builder);
            }
            Some(body) => {
                builder.push_str(&format!(" => {}", body));
            }
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut builder = String::new();
        self.write_indented(0, &mut builder);
        write!(f, "{}", builder)
    }
}

/// A parenthesized member list, used for method parameters, tuple types
/// and default constructors.
#[derive(Debug, Clone)]
pub struct Tuple {
    pub position: SourcePosition,
    pub members: Vec<TupleMember>,
}

impl Display for Tuple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let members = self
            .members
            .iter()
            .map(|m| m.to_string())
            .collect::<Vec<String>>()
            .join(", ");
        write!(f, "({})", members)
    }
}

#[derive(Debug, Clone)]
pub struct TupleMember {
    pub position: SourcePosition,
    pub access: Option<Terminal>,
    pub storage_class: Option<Terminal>,
    pub name: Terminal,
    pub data_type: Option<DataType>,
    pub expression: Option<Expression>,
}

impl Display for TupleMember {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(access) = &self.access {
            write!(f, "{} ", access)?;
        }
        if let Some(storage_class) = &self.storage_class {
            write!(f, "{} ", storage_class)?;
        }
        write!(f, "{}", self.name)?;
        if let Some(data_type) = &self.data_type {
            write!(f, " : {}", data_type)?;
        }
        if let Some(expression) = &self.expression {
            write!(f, " <- {}", expression)?;
        }
        Ok(())
    }
}
