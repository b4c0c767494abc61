//! Lowering for the expression precedence chain.
//!
//! One function per level, loosest binding first. Every binary level
//! collapses to its inner expression when no operator was matched, so
//! no wrapper node exists for levels the source never used. The type
//! attached to a binary node follows the level's convention: most
//! levels copy the left operand, assignment copies the value,
//! equivalence is always boolean, and the chaining, conditional and
//! postfix levels leave the type for a later phase.

use crate::{
    ast::{
        expressions::{ExprKind, Expression},
        types::{ExprType, TypeReference},
    },
    errors::errors::{Error, ErrorImpl},
    grammar::cst::*,
};

use super::{malformed_tree, terminal};

/// Assignment `target <- value`, right-associative.
pub fn lower_expression(ctx: &ExpressionCtx) -> Result<Expression, Error> {
    match (&ctx.operator, &ctx.value) {
        (Some(operator), Some(value)) => {
            let left = lower_conditional(&ctx.target)?;
            let right = lower_expression(value)?;
            let ty = right.ty.clone();
            Ok(Expression::new(
                ctx.position.clone(),
                ty,
                ExprKind::Binary {
                    operator: terminal(operator),
                    left: Box::new(left),
                    right: Box::new(right),
                },
            ))
        }
        (None, None) => lower_conditional(&ctx.target),
        _ => Err(malformed_tree("assignment", &ctx.position)),
    }
}

pub fn lower_conditional(ctx: &ConditionalCtx) -> Result<Expression, Error> {
    if let Some(condition) = &ctx.condition {
        let if_true = ctx
            .if_true
            .as_ref()
            .ok_or_else(|| malformed_tree("conditional", &ctx.position))?;
        let if_false = ctx
            .if_false
            .as_ref()
            .ok_or_else(|| malformed_tree("conditional", &ctx.position))?;

        Ok(Expression::new(
            ctx.position.clone(),
            None,
            ExprKind::Conditional {
                condition: Box::new(lower_or(condition)?),
                if_true: Box::new(lower_or(if_true)?),
                if_false: Box::new(lower_conditional(if_false)?),
            },
        ))
    } else if let Some(inner) = &ctx.inner {
        lower_or(inner)
    } else {
        Err(malformed_tree("conditional", &ctx.position))
    }
}

/// The grammar defines no operator at the logical-or level, so lowering
/// passes straight through to the next level down.
pub fn lower_or(ctx: &OrCtx) -> Result<Expression, Error> {
    lower_sum(&ctx.inner)
}

pub fn lower_sum(ctx: &SumCtx) -> Result<Expression, Error> {
    let right = lower_comparison(&ctx.right)?;
    match (&ctx.left, &ctx.operator) {
        (Some(left), Some(operator)) => {
            let left = lower_sum(left)?;
            let ty = left.ty.clone();
            Ok(Expression::new(
                ctx.position.clone(),
                ty,
                ExprKind::Binary {
                    operator: terminal(operator),
                    left: Box::new(left),
                    right: Box::new(right),
                },
            ))
        }
        (None, None) => Ok(right),
        _ => Err(malformed_tree("sum", &ctx.position)),
    }
}

pub fn lower_comparison(ctx: &ComparisonCtx) -> Result<Expression, Error> {
    let right = lower_equivalence(&ctx.right)?;
    match (&ctx.left, &ctx.operator) {
        (Some(left), Some(operator)) => {
            let left = lower_comparison(left)?;
            let ty = left.ty.clone();
            Ok(Expression::new(
                ctx.position.clone(),
                ty,
                ExprKind::Binary {
                    operator: terminal(operator),
                    left: Box::new(left),
                    right: Box::new(right),
                },
            ))
        }
        (None, None) => Ok(right),
        _ => Err(malformed_tree("comparison", &ctx.position)),
    }
}

/// Equality and inequality always produce a boolean, whatever the
/// operands say.
pub fn lower_equivalence(ctx: &EquivalenceCtx) -> Result<Expression, Error> {
    let right = lower_product(&ctx.right)?;
    match (&ctx.left, &ctx.operator) {
        (Some(left), Some(operator)) => {
            let left = lower_equivalence(left)?;
            Ok(Expression::new(
                ctx.position.clone(),
                Some(ExprType::Reference(TypeReference::boolean())),
                ExprKind::Binary {
                    operator: terminal(operator),
                    left: Box::new(left),
                    right: Box::new(right),
                },
            ))
        }
        (None, None) => Ok(right),
        _ => Err(malformed_tree("equivalence", &ctx.position)),
    }
}

pub fn lower_product(ctx: &ProductCtx) -> Result<Expression, Error> {
    let right = lower_power(&ctx.right)?;
    match (&ctx.left, &ctx.operator) {
        (Some(left), Some(operator)) => {
            let left = lower_product(left)?;
            let ty = left.ty.clone();
            Ok(Expression::new(
                ctx.position.clone(),
                ty,
                ExprKind::Binary {
                    operator: terminal(operator),
                    left: Box::new(left),
                    right: Box::new(right),
                },
            ))
        }
        (None, None) => Ok(right),
        _ => Err(malformed_tree("product", &ctx.position)),
    }
}

/// Exponentiation is left-associative in this grammar, matching the
/// left-recursive rule shape rather than mathematical convention.
pub fn lower_power(ctx: &PowerCtx) -> Result<Expression, Error> {
    let right = lower_chain(&ctx.right)?;
    match (&ctx.left, &ctx.operator) {
        (Some(left), Some(operator)) => {
            let left = lower_power(left)?;
            let ty = left.ty.clone();
            Ok(Expression::new(
                ctx.position.clone(),
                ty,
                ExprKind::Binary {
                    operator: terminal(operator),
                    left: Box::new(left),
                    right: Box::new(right),
                },
            ))
        }
        (None, None) => Ok(right),
        _ => Err(malformed_tree("power", &ctx.position)),
    }
}

/// The `.` chaining level. The right operand decides the node built:
/// an integer literal is positional access, a bare identifier is
/// member access, anything else stays a plain binary chain.
pub fn lower_chain(ctx: &ChainCtx) -> Result<Expression, Error> {
    let right = lower_unary(&ctx.right)?;
    match (&ctx.left, &ctx.operator) {
        (Some(left), Some(operator)) => {
            let left = lower_chain(left)?;
            match &right.kind {
                ExprKind::ConstInteger(_) => Ok(Expression::new(
                    ctx.position.clone(),
                    None,
                    ExprKind::Indexer {
                        base: Box::new(left),
                        index: Box::new(right),
                    },
                )),
                ExprKind::Symbol(name) => {
                    let member = Expression::new(
                        right.position.clone(),
                        right.ty.clone(),
                        ExprKind::Member(name.clone()),
                    );
                    Ok(Expression::new(
                        ctx.position.clone(),
                        None,
                        ExprKind::Binary {
                            operator: terminal(operator),
                            left: Box::new(left),
                            right: Box::new(member),
                        },
                    ))
                }
                _ => Ok(Expression::new(
                    ctx.position.clone(),
                    None,
                    ExprKind::Binary {
                        operator: terminal(operator),
                        left: Box::new(left),
                        right: Box::new(right),
                    },
                )),
            }
        }
        (None, None) => Ok(right),
        _ => Err(malformed_tree("chain", &ctx.position)),
    }
}

pub fn lower_unary(ctx: &UnaryCtx) -> Result<Expression, Error> {
    match &ctx.operator {
        Some(operator) if operator.value == "new" => Err(Error::new(
            ErrorImpl::UnsupportedConstructError {
                construct: operator.value.clone(),
            },
            operator.position.clone(),
        )),
        Some(operator) => {
            let operand = lower_postfix(&ctx.operand)?;
            let ty = operand.ty.clone();
            Ok(Expression::new(
                ctx.position.clone(),
                ty,
                ExprKind::Unary {
                    operator: terminal(operator),
                    operand: Box::new(operand),
                },
            ))
        }
        None => lower_postfix(&ctx.operand),
    }
}

pub fn lower_postfix(ctx: &PostfixCtx) -> Result<Expression, Error> {
    if let Some(primary) = &ctx.primary {
        return lower_primary(primary);
    }

    let base = ctx
        .base
        .as_ref()
        .ok_or_else(|| malformed_tree("postfix", &ctx.position))?;
    let operation = ctx
        .operation
        .as_ref()
        .ok_or_else(|| malformed_tree("postfix", &ctx.position))?;
    let base = lower_postfix(base)?;

    match operation {
        PostfixOpCtx::Member { operator, name } => {
            let member = Expression::new(
                name.position.clone(),
                None,
                ExprKind::Member(terminal(name)),
            );
            Ok(Expression::new(
                ctx.position.clone(),
                None,
                ExprKind::Binary {
                    operator: terminal(operator),
                    left: Box::new(base),
                    right: Box::new(member),
                },
            ))
        }
        PostfixOpCtx::Index { index } => Ok(Expression::new(
            ctx.position.clone(),
            None,
            ExprKind::Indexer {
                base: Box::new(base),
                index: Box::new(lower_expression(index)?),
            },
        )),
    }
}

pub fn lower_primary(ctx: &PrimaryCtx) -> Result<Expression, Error> {
    if let Some(keyword) = &ctx.keyword {
        let ty = match keyword.value.as_str() {
            "true" | "false" => TypeReference::boolean(),
            "null" => TypeReference::null(),
            "never" => TypeReference::never(),
            "void" => TypeReference::void(),
            _ => {
                return Err(Error::new(
                    ErrorImpl::UnsupportedConstructError {
                        construct: keyword.value.clone(),
                    },
                    keyword.position.clone(),
                ))
            }
        };
        Ok(Expression::new(
            keyword.position.clone(),
            Some(ExprType::Reference(ty)),
            ExprKind::Constant(terminal(keyword)),
        ))
    } else if let Some(integer) = &ctx.integer {
        Ok(Expression::new(
            integer.position.clone(),
            Some(ExprType::Reference(TypeReference::integer())),
            ExprKind::ConstInteger(terminal(integer)),
        ))
    } else if let Some(string) = &ctx.string {
        Ok(Expression::new(
            string.position.clone(),
            Some(ExprType::Reference(TypeReference::string())),
            ExprKind::ConstString(terminal(string)),
        ))
    } else if let Some(symbol) = &ctx.symbol {
        Ok(Expression::new(
            symbol.position.clone(),
            None,
            ExprKind::Symbol(terminal(symbol)),
        ))
    } else if let Some(elements) = &ctx.elements {
        let mut lowered = vec![];
        for element in elements {
            lowered.push(lower_expression(element)?);
        }

        // A single parenthesized expression is that expression, never a
        // one-element tuple.
        if lowered.len() == 1 {
            return Ok(lowered.remove(0));
        }

        let ty = ExprType::Tuple(lowered.iter().map(|e| e.ty.clone()).collect());
        Ok(Expression::new(
            ctx.position.clone(),
            Some(ty),
            ExprKind::Tuple(lowered),
        ))
    } else {
        Err(malformed_tree("primary", &ctx.position))
    }
}
