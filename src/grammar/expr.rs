//! The expression rule chain, one parse function per precedence level,
//! ordered loosest to tightest binding:
//!
//! assignment `<-`, conditional, logical-or, `+ -`, `> < >= <=`,
//! `= <>`, `* / %`, `^`, `.`, unary prefix, postfix `!`/`[ ]`, primary.
//!
//! Binary levels build their context left-recursively, so operator
//! chains at one level lean left; assignment and the conditional
//! recurse on their own rule and lean right.

use crate::{
    errors::errors::Error,
    lexer::tokens::TokenKind,
};

use super::{cst::*, parser::Parser};

pub fn parse_expression(parser: &mut Parser) -> Result<ExpressionCtx, Error> {
    let start = parser.current_token().clone();
    let target = parse_conditional(parser)?;

    if parser.current_token_kind() == TokenKind::Assign {
        let operator = parser.advance();
        let value = parse_expression(parser)?;
        Ok(ExpressionCtx {
            target,
            operator: Some(operator),
            value: Some(Box::new(value)),
            position: parser.span_from(&start),
        })
    } else {
        Ok(ExpressionCtx {
            target,
            operator: None,
            value: None,
            position: parser.span_from(&start),
        })
    }
}

pub fn parse_conditional(parser: &mut Parser) -> Result<ConditionalCtx, Error> {
    let start = parser.current_token().clone();

    if parser.current_token_kind() == TokenKind::If {
        parser.advance();
        let condition = parse_or(parser)?;
        let if_true = parse_or(parser)?;
        parser.expect(TokenKind::Else)?;
        let if_false = parse_conditional(parser)?;

        Ok(ConditionalCtx {
            condition: Some(condition),
            if_true: Some(if_true),
            if_false: Some(Box::new(if_false)),
            inner: None,
            position: parser.span_from(&start),
        })
    } else {
        Ok(ConditionalCtx {
            condition: None,
            if_true: None,
            if_false: None,
            inner: Some(parse_or(parser)?),
            position: parser.span_from(&start),
        })
    }
}

pub fn parse_or(parser: &mut Parser) -> Result<OrCtx, Error> {
    let start = parser.current_token().clone();
    let inner = parse_sum(parser)?;

    Ok(OrCtx {
        inner,
        position: parser.span_from(&start),
    })
}

fn parse_infix<Inner>(
    parser: &mut Parser,
    operators: &[TokenKind],
    inner: fn(&mut Parser) -> Result<Inner, Error>,
) -> Result<InfixCtx<Inner>, Error> {
    let start = parser.current_token().clone();
    let right = inner(parser)?;
    let mut node = InfixCtx {
        left: None,
        operator: None,
        right,
        position: parser.span_from(&start),
    };

    while operators.contains(&parser.current_token_kind()) {
        let operator = parser.advance();
        let right = inner(parser)?;
        node = InfixCtx {
            left: Some(Box::new(node)),
            operator: Some(operator),
            right,
            position: parser.span_from(&start),
        };
    }

    Ok(node)
}

pub fn parse_sum(parser: &mut Parser) -> Result<SumCtx, Error> {
    parse_infix(parser, &[TokenKind::Plus, TokenKind::Dash], parse_comparison)
}

pub fn parse_comparison(parser: &mut Parser) -> Result<ComparisonCtx, Error> {
    parse_infix(
        parser,
        &[
            TokenKind::Greater,
            TokenKind::Less,
            TokenKind::GreaterEquals,
            TokenKind::LessEquals,
        ],
        parse_equivalence,
    )
}

pub fn parse_equivalence(parser: &mut Parser) -> Result<EquivalenceCtx, Error> {
    parse_infix(
        parser,
        &[TokenKind::Equals, TokenKind::NotEquals],
        parse_product,
    )
}

pub fn parse_product(parser: &mut Parser) -> Result<ProductCtx, Error> {
    parse_infix(
        parser,
        &[TokenKind::Star, TokenKind::Slash, TokenKind::Percent],
        parse_power,
    )
}

pub fn parse_power(parser: &mut Parser) -> Result<PowerCtx, Error> {
    parse_infix(parser, &[TokenKind::Caret], parse_chain)
}

pub fn parse_chain(parser: &mut Parser) -> Result<ChainCtx, Error> {
    parse_infix(parser, &[TokenKind::Dot], parse_unary)
}

pub fn parse_unary(parser: &mut Parser) -> Result<UnaryCtx, Error> {
    let start = parser.current_token().clone();

    let operator = if matches!(parser.current_token_kind(), TokenKind::Dash | TokenKind::New) {
        Some(parser.advance())
    } else {
        None
    };
    let operand = parse_postfix(parser)?;

    Ok(UnaryCtx {
        operator,
        operand,
        position: parser.span_from(&start),
    })
}

pub fn parse_postfix(parser: &mut Parser) -> Result<PostfixCtx, Error> {
    let start = parser.current_token().clone();
    let primary = parse_primary(parser)?;

    let mut node = PostfixCtx {
        base: None,
        operation: None,
        primary: Some(primary),
        position: parser.span_from(&start),
    };

    loop {
        match parser.current_token_kind() {
            TokenKind::Bang => {
                let operator = parser.advance();
                let name = parser.expect(TokenKind::Identifier)?;
                node = PostfixCtx {
                    base: Some(Box::new(node)),
                    operation: Some(PostfixOpCtx::Member { operator, name }),
                    primary: None,
                    position: parser.span_from(&start),
                };
            }
            TokenKind::OpenBracket => {
                parser.advance();
                let index = parse_expression(parser)?;
                parser.expect(TokenKind::CloseBracket)?;
                node = PostfixCtx {
                    base: Some(Box::new(node)),
                    operation: Some(PostfixOpCtx::Index {
                        index: Box::new(index),
                    }),
                    primary: None,
                    position: parser.span_from(&start),
                };
            }
            _ => break,
        }
    }

    Ok(node)
}

pub fn parse_primary(parser: &mut Parser) -> Result<PrimaryCtx, Error> {
    let start = parser.current_token().clone();
    let mut ctx = PrimaryCtx::empty(start.position.clone());

    match parser.current_token_kind() {
        TokenKind::Integer => ctx.integer = Some(parser.advance()),
        TokenKind::String => ctx.string = Some(parser.advance()),
        TokenKind::Identifier => ctx.symbol = Some(parser.advance()),
        kind if kind.is_keyword_constant() => ctx.keyword = Some(parser.advance()),
        TokenKind::OpenParen => {
            parser.advance();
            let mut elements = vec![];
            while parser.current_token_kind() != TokenKind::CloseParen {
                elements.push(parse_expression(parser)?);
                if parser.current_token_kind() == TokenKind::Comma {
                    parser.advance();
                } else {
                    break;
                }
            }
            parser.expect(TokenKind::CloseParen)?;
            ctx.elements = Some(elements);
        }
        _ => return Err(parser.unexpected_token("expected an expression")),
    }

    ctx.position = parser.span_from(&start);
    Ok(ctx)
}
