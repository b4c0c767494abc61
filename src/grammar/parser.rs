use std::rc::Rc;

use crate::{
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    SourcePosition,
};

use super::{cst::*, expr::parse_expression};

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, pos: 0 }
    }

    pub fn current_token(&self) -> &Token {
        &self.tokens[self.pos]
    }

    pub fn current_token_kind(&self) -> TokenKind {
        self.tokens[self.pos].kind
    }

    pub fn peek_kind(&self, n: usize) -> TokenKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::EOF)
    }

    /// Returns the current token and moves past it. The final EOF token
    /// is never moved past.
    pub fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    pub fn expect(&mut self, kind: TokenKind) -> Result<Token, Error> {
        if self.current_token_kind() == kind {
            Ok(self.advance())
        } else {
            Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: self.current_token().value.clone(),
                },
                self.current_token().position.clone(),
            ))
        }
    }

    pub fn unexpected_token(&self, message: &str) -> Error {
        Error::new(
            ErrorImpl::UnexpectedTokenDetailed {
                token: self.current_token().value.clone(),
                message: String::from(message),
            },
            self.current_token().position.clone(),
        )
    }

    /// Position covering everything from `start` up to the last
    /// consumed token.
    pub fn span_from(&self, start: &Token) -> SourcePosition {
        let stop = if self.pos == 0 {
            start
        } else {
            &self.tokens[self.pos - 1]
        };
        let length = (stop.offset + stop.position.length).saturating_sub(start.offset);
        SourcePosition::new(
            Rc::clone(&start.position.file),
            start.position.line,
            start.position.column,
            length,
        )
    }
}

pub fn parse_compile_unit(parser: &mut Parser) -> Result<CompileUnitCtx, Error> {
    let start = parser.current_token().clone();

    let module_statement = if parser.current_token_kind() == TokenKind::Module {
        Some(parse_module_statement(parser)?)
    } else {
        None
    };

    let scope = if parser.current_token_kind() != TokenKind::EOF {
        Some(parse_module_scope(parser)?)
    } else {
        None
    };

    parser.expect(TokenKind::EOF)?;

    Ok(CompileUnitCtx {
        module_statement,
        scope,
        position: parser.span_from(&start),
    })
}

fn parse_module_statement(parser: &mut Parser) -> Result<ModuleStatementCtx, Error> {
    let start = parser.expect(TokenKind::Module)?;
    let name = parser.expect(TokenKind::Identifier)?;
    if parser.current_token_kind() == TokenKind::Semicolon {
        parser.advance();
    }

    Ok(ModuleStatementCtx {
        name,
        position: parser.span_from(&start),
    })
}

fn parse_module_scope(parser: &mut Parser) -> Result<ModuleScopeCtx, Error> {
    let start = parser.current_token().clone();
    let mut imports = vec![];
    let mut type_definitions = vec![];

    loop {
        match parser.current_token_kind() {
            TokenKind::Import => imports.push(parse_import(parser)?),
            TokenKind::EOF => break,
            _ => type_definitions.push(parse_class_definition(parser)?),
        }
    }

    Ok(ModuleScopeCtx {
        imports,
        type_definitions,
        position: parser.span_from(&start),
    })
}

fn parse_import(parser: &mut Parser) -> Result<ImportCtx, Error> {
    let start = parser.expect(TokenKind::Import)?;
    let module = parser.expect(TokenKind::Identifier)?;
    if parser.current_token_kind() == TokenKind::Semicolon {
        parser.advance();
    }

    Ok(ImportCtx {
        module,
        position: parser.span_from(&start),
    })
}

pub fn parse_class_definition(parser: &mut Parser) -> Result<ClassDefinitionCtx, Error> {
    let start = parser.current_token().clone();

    let access = if parser.current_token_kind().is_access_modifier() {
        Some(parser.advance())
    } else {
        None
    };
    let storage_class = if parser.current_token_kind().is_storage_class() {
        Some(parser.advance())
    } else {
        None
    };

    parser.expect(TokenKind::Class)?;
    let name = parser.expect(TokenKind::Identifier)?;

    let generic_arguments = if parser.current_token_kind() == TokenKind::Less {
        Some(parse_generic_arguments(parser)?)
    } else {
        None
    };
    let default_constructor = if parser.current_token_kind() == TokenKind::OpenParen {
        Some(parse_tuple_definition(parser)?)
    } else {
        None
    };

    parser.expect(TokenKind::OpenCurly)?;
    let mut members = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly
        && parser.current_token_kind() != TokenKind::EOF
    {
        members.push(parse_class_member(parser)?);
    }
    parser.expect(TokenKind::CloseCurly)?;

    Ok(ClassDefinitionCtx {
        access,
        storage_class,
        name,
        generic_arguments,
        default_constructor,
        members,
        position: parser.span_from(&start),
    })
}

fn parse_generic_arguments(parser: &mut Parser) -> Result<GenericArgumentsCtx, Error> {
    let start = parser.expect(TokenKind::Less)?;
    let mut names = vec![parser.expect(TokenKind::Identifier)?];
    while parser.current_token_kind() == TokenKind::Comma {
        parser.advance();
        names.push(parser.expect(TokenKind::Identifier)?);
    }
    parser.expect(TokenKind::Greater)?;

    Ok(GenericArgumentsCtx {
        names,
        position: parser.span_from(&start),
    })
}

pub fn parse_class_member(parser: &mut Parser) -> Result<ClassMemberCtx, Error> {
    let start = parser.current_token().clone();

    if method_ahead(parser) {
        Ok(ClassMemberCtx {
            field: None,
            method: Some(parse_method_rule(parser)?),
            position: parser.span_from(&start),
        })
    } else {
        Ok(ClassMemberCtx {
            field: Some(parse_field_rule(parser)?),
            method: None,
            position: parser.span_from(&start),
        })
    }
}

/// Fields and methods both start with an optional access modifier and a
/// name, so a little lookahead decides which rule applies.
fn method_ahead(parser: &Parser) -> bool {
    let offset = if parser.current_token_kind().is_access_modifier() {
        1
    } else {
        0
    };

    match parser.peek_kind(offset) {
        TokenKind::Pure => true,
        kind if kind.is_storage_class() => false,
        TokenKind::Identifier => matches!(
            parser.peek_kind(offset + 1),
            TokenKind::OpenParen | TokenKind::Less
        ),
        _ => false,
    }
}

pub fn parse_field_rule(parser: &mut Parser) -> Result<FieldCtx, Error> {
    let start = parser.current_token().clone();

    let access = if parser.current_token_kind().is_access_modifier() {
        Some(parser.advance())
    } else {
        None
    };
    let storage_class = if parser.current_token_kind().is_storage_class() {
        Some(parser.advance())
    } else {
        None
    };

    let name = parser.expect(TokenKind::Identifier)?;
    parser.expect(TokenKind::Colon)?;
    let data_type = parse_data_type(parser)?;

    let initializer = if parser.current_token_kind() == TokenKind::Assign {
        parser.advance();
        Some(parse_expression(parser)?)
    } else {
        None
    };

    Ok(FieldCtx {
        access,
        storage_class,
        name,
        data_type,
        initializer,
        position: parser.span_from(&start),
    })
}

pub fn parse_method_rule(parser: &mut Parser) -> Result<MethodCtx, Error> {
    let start = parser.current_token().clone();

    let access = if parser.current_token_kind().is_access_modifier() {
        Some(parser.advance())
    } else {
        None
    };
    let pure_marker = if parser.current_token_kind() == TokenKind::Pure {
        Some(parser.advance())
    } else {
        None
    };

    let name = parser.expect(TokenKind::Identifier)?;
    let generic_arguments = if parser.current_token_kind() == TokenKind::Less {
        Some(parse_generic_arguments(parser)?)
    } else {
        None
    };
    let parameters = parse_tuple_definition(parser)?;

    let return_type = if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        Some(parse_data_type(parser)?)
    } else {
        None
    };

    let (expression, block, deferred) = match parser.current_token_kind() {
        TokenKind::FatArrow => {
            parser.advance();
            (Some(parse_expression(parser)?), None, None)
        }
        TokenKind::OpenCurly => (None, Some(parse_statement_block(parser)?), None),
        TokenKind::Defer => (None, None, Some(parser.advance())),
        _ => return Err(parser.unexpected_token("expected `=>`, a block or `defer`")),
    };

    Ok(MethodCtx {
        access,
        pure_marker,
        name,
        generic_arguments,
        parameters,
        return_type,
        expression,
        block,
        deferred,
        position: parser.span_from(&start),
    })
}

pub fn parse_tuple_definition(parser: &mut Parser) -> Result<TupleDefinitionCtx, Error> {
    let start = parser.expect(TokenKind::OpenParen)?;
    let mut members = vec![];

    while parser.current_token_kind() != TokenKind::CloseParen {
        members.push(parse_tuple_member(parser)?);
        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }
    parser.expect(TokenKind::CloseParen)?;

    Ok(TupleDefinitionCtx {
        members,
        position: parser.span_from(&start),
    })
}

fn parse_tuple_member(parser: &mut Parser) -> Result<TupleMemberCtx, Error> {
    let start = parser.current_token().clone();

    let access = if parser.current_token_kind().is_access_modifier() {
        Some(parser.advance())
    } else {
        None
    };
    let storage_class = if parser.current_token_kind().is_storage_class() {
        Some(parser.advance())
    } else {
        None
    };

    let name = parser.expect(TokenKind::Identifier)?;

    let data_type = if parser.current_token_kind() == TokenKind::Colon {
        parser.advance();
        Some(parse_data_type(parser)?)
    } else {
        None
    };
    let default_value = if parser.current_token_kind() == TokenKind::Assign {
        parser.advance();
        Some(parse_expression(parser)?)
    } else {
        None
    };

    Ok(TupleMemberCtx {
        access,
        storage_class,
        name,
        data_type,
        default_value,
        position: parser.span_from(&start),
    })
}

pub fn parse_data_type(parser: &mut Parser) -> Result<DataTypeCtx, Error> {
    let start = parser.current_token().clone();

    let mut range = None;
    let mut builtin = None;
    let mut function = None;
    let mut tuple = None;
    let mut reference = None;

    match parser.current_token_kind() {
        TokenKind::OpenBracket => {
            parser.advance();
            let element = parse_data_type(parser)?;
            parser.expect(TokenKind::CloseBracket)?;
            range = Some(RangeTypeCtx {
                element: Box::new(element),
                position: parser.span_from(&start),
            });
        }
        kind if kind.is_builtin_type() => {
            builtin = Some(parser.advance());
        }
        TokenKind::Fn => {
            function = Some(parse_func_type(parser)?);
        }
        TokenKind::OpenParen => {
            tuple = Some(parse_tuple_definition(parser)?);
        }
        TokenKind::Identifier => {
            reference = Some(parse_type_reference(parser)?);
        }
        _ => return Err(parser.unexpected_token("expected a data type")),
    }

    let nullable = if parser.current_token_kind() == TokenKind::Question {
        Some(parser.advance())
    } else {
        None
    };

    Ok(DataTypeCtx {
        range,
        builtin,
        function,
        tuple,
        reference,
        nullable,
        position: parser.span_from(&start),
    })
}

fn parse_func_type(parser: &mut Parser) -> Result<FuncTypeCtx, Error> {
    let start = parser.expect(TokenKind::Fn)?;
    parser.expect(TokenKind::OpenParen)?;

    let mut parameters = vec![];
    while parser.current_token_kind() != TokenKind::CloseParen {
        parameters.push(parse_data_type(parser)?);
        if parser.current_token_kind() == TokenKind::Comma {
            parser.advance();
        } else {
            break;
        }
    }
    parser.expect(TokenKind::CloseParen)?;
    parser.expect(TokenKind::Arrow)?;
    let result = parse_data_type(parser)?;

    Ok(FuncTypeCtx {
        parameters,
        result: Box::new(result),
        position: parser.span_from(&start),
    })
}

fn parse_type_reference(parser: &mut Parser) -> Result<TypeReferenceCtx, Error> {
    let start = parser.current_token().clone();

    let first = parser.expect(TokenKind::Identifier)?;
    let (module, name) = if parser.current_token_kind() == TokenKind::Dot
        && parser.peek_kind(1) == TokenKind::Identifier
    {
        parser.advance();
        (Some(first), parser.expect(TokenKind::Identifier)?)
    } else {
        (None, first)
    };

    let mut generic_arguments = vec![];
    if parser.current_token_kind() == TokenKind::Less {
        parser.advance();
        while parser.current_token_kind() != TokenKind::Greater {
            generic_arguments.push(parse_data_type(parser)?);
            if parser.current_token_kind() == TokenKind::Comma {
                parser.advance();
            } else {
                break;
            }
        }
        parser.expect(TokenKind::Greater)?;
    }

    Ok(TypeReferenceCtx {
        module,
        name,
        generic_arguments,
        position: parser.span_from(&start),
    })
}

pub fn parse_statement_block(parser: &mut Parser) -> Result<StatementBlockCtx, Error> {
    let start = parser.expect(TokenKind::OpenCurly)?;

    let mut statements = vec![];
    while parser.current_token_kind() != TokenKind::CloseCurly
        && parser.current_token_kind() != TokenKind::EOF
    {
        statements.push(parse_expression(parser)?);
    }
    parser.expect(TokenKind::CloseCurly)?;

    Ok(StatementBlockCtx {
        statements,
        position: parser.span_from(&start),
    })
}
