use lazy_static::lazy_static;
use std::{collections::HashMap, fmt::Display};

use crate::SourcePosition;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashMap<&'static str, TokenKind> = {
        let mut map = HashMap::new();
        map.insert("module", TokenKind::Module);
        map.insert("import", TokenKind::Import);
        map.insert("class", TokenKind::Class);
        map.insert("public", TokenKind::Public);
        map.insert("private", TokenKind::Private);
        map.insert("mutable", TokenKind::Mutable);
        map.insert("immutable", TokenKind::Immutable);
        map.insert("const", TokenKind::Const);
        map.insert("pure", TokenKind::Pure);
        map.insert("defer", TokenKind::Defer);
        map.insert("new", TokenKind::New);
        map.insert("if", TokenKind::If);
        map.insert("else", TokenKind::Else);
        map.insert("true", TokenKind::True);
        map.insert("false", TokenKind::False);
        map.insert("null", TokenKind::Null);
        map.insert("never", TokenKind::Never);
        map.insert("void", TokenKind::Void);
        map.insert("bool", TokenKind::Bool);
        map.insert("int", TokenKind::Int);
        map.insert("float", TokenKind::Float);
        map.insert("string", TokenKind::StringType);
        map.insert("fn", TokenKind::Fn);
        map
    };
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    EOF,
    Integer,
    String,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assign,    // <-
    Arrow,     // ->
    FatArrow,  // =>
    Equals,    // =
    NotEquals, // <>

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,
    Caret,

    Dot,
    Bang,
    Question,
    Comma,
    Colon,
    Semicolon,

    // Reserved
    Module,
    Import,
    Class,
    Public,
    Private,
    Mutable,
    Immutable,
    Const,
    Pure,
    Defer,
    New,
    If,
    Else,
    True,
    False,
    Null,
    Never,
    Void,
    Bool,
    Int,
    Float,
    StringType,
    Fn,
}

impl TokenKind {
    /// Keywords usable as a storage class on fields, classes and tuple
    /// members.
    pub fn is_storage_class(&self) -> bool {
        matches!(
            self,
            TokenKind::Mutable | TokenKind::Immutable | TokenKind::Const
        )
    }

    /// Keywords usable as an access modifier on declarations.
    pub fn is_access_modifier(&self) -> bool {
        matches!(self, TokenKind::Public | TokenKind::Private)
    }

    /// Keywords naming a builtin data type.
    pub fn is_builtin_type(&self) -> bool {
        matches!(
            self,
            TokenKind::Bool
                | TokenKind::Int
                | TokenKind::Float
                | TokenKind::StringType
                | TokenKind::Void
                | TokenKind::Never
        )
    }

    /// Keywords usable as a constant expression.
    pub fn is_keyword_constant(&self) -> bool {
        matches!(
            self,
            TokenKind::True
                | TokenKind::False
                | TokenKind::Null
                | TokenKind::Never
                | TokenKind::Void
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub position: SourcePosition,
    pub offset: u32,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    fn is_one_of_many(&self, tokens: Vec<TokenKind>) -> bool {
        for token in tokens {
            if token == self.kind {
                return true;
            }
        }

        false
    }

    pub fn debug(&self) {
        if self.is_one_of_many(vec![
            TokenKind::String,
            TokenKind::Identifier,
            TokenKind::Integer,
        ]) {
            println!("{} ({})", self.kind, self.value);
        } else {
            println!("{} ()", self.kind);
        }
    }
}
