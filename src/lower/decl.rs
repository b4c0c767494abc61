//! Lowering for declaration rules.

use crate::{
    ast::{
        expressions::{ExprKind, Expression},
        nodes::{
            Class, ClassMember, Field, GenericArgument, Import, ImportTarget, Method, Module,
            Tuple, TupleMember,
        },
        types::{DataType, TypeKind, TypeReference},
    },
    errors::errors::{Error, ErrorImpl},
    grammar::cst::*,
};

use super::{expr::lower_expression, malformed_tree, terminal};

pub fn lower_compile_unit(ctx: &CompileUnitCtx) -> Result<Module, Error> {
    let name = ctx.module_statement.as_ref().map(|m| terminal(&m.name));

    let mut imports = vec![];
    let mut members = vec![];
    if let Some(scope) = &ctx.scope {
        for import in &scope.imports {
            imports.push(lower_import(import)?);
        }
        for definition in &scope.type_definitions {
            members.push(lower_class(definition)?);
        }
    }

    Ok(Module {
        position: ctx.position.clone(),
        name,
        imports,
        members,
    })
}

pub fn lower_import(ctx: &ImportCtx) -> Result<Import, Error> {
    Ok(Import {
        position: ctx.position.clone(),
        target: ImportTarget::Named(terminal(&ctx.module)),
    })
}

pub fn lower_class(ctx: &ClassDefinitionCtx) -> Result<Class, Error> {
    let generic_arguments = match &ctx.generic_arguments {
        Some(generics) => lower_generic_arguments(generics),
        None => vec![],
    };
    let default_constructor = match &ctx.default_constructor {
        Some(constructor) => Some(lower_tuple_definition(constructor)?),
        None => None,
    };

    let mut members = vec![];
    for member in &ctx.members {
        members.push(lower_class_member(member)?);
    }

    Ok(Class {
        position: ctx.position.clone(),
        access: ctx.access.as_ref().map(terminal),
        storage_class: ctx.storage_class.as_ref().map(terminal),
        name: terminal(&ctx.name),
        default_constructor,
        generic_arguments,
        members,
    })
}

fn lower_generic_arguments(ctx: &GenericArgumentsCtx) -> Vec<GenericArgument> {
    ctx.names
        .iter()
        .map(|name| GenericArgument {
            position: name.position.clone(),
            name: terminal(name),
        })
        .collect()
}

pub fn lower_class_member(ctx: &ClassMemberCtx) -> Result<ClassMember, Error> {
    match (&ctx.field, &ctx.method) {
        (Some(field), None) => Ok(ClassMember::Field(lower_field(field)?)),
        (None, Some(method)) => Ok(ClassMember::Method(lower_method(method)?)),
        _ => Err(malformed_tree("classMember", &ctx.position)),
    }
}

pub fn lower_field(ctx: &FieldCtx) -> Result<Field, Error> {
    let expression = match &ctx.initializer {
        Some(initializer) => Some(lower_expression(initializer)?),
        None => None,
    };

    Ok(Field {
        position: ctx.position.clone(),
        access: ctx.access.as_ref().map(terminal),
        storage_class: ctx.storage_class.as_ref().map(terminal),
        name: terminal(&ctx.name),
        data_type: lower_data_type(&ctx.data_type)?,
        expression,
    })
}

pub fn lower_method(ctx: &MethodCtx) -> Result<Method, Error> {
    let generic_arguments = match &ctx.generic_arguments {
        Some(generics) => lower_generic_arguments(generics),
        None => vec![],
    };

    // The declared return type is parsed but not yet carried on the
    // node; a later resolution phase reads it from the concrete tree.
    let body = match (&ctx.expression, &ctx.block, &ctx.deferred) {
        (Some(expression), None, None) => Some(lower_expression(expression)?),
        (None, Some(block), None) => Some(lower_statement_block(block)?),
        (None, None, Some(_)) => None,
        _ => {
            return Err(Error::new(
                ErrorImpl::MalformedMethodBodyError {
                    method: ctx.name.value.clone(),
                },
                ctx.position.clone(),
            ))
        }
    };

    Ok(Method {
        position: ctx.position.clone(),
        access: ctx.access.as_ref().map(terminal),
        pure: ctx.pure_marker.as_ref().map(terminal),
        name: terminal(&ctx.name),
        generic_arguments,
        parameters: lower_tuple_definition(&ctx.parameters)?,
        body,
    })
}

pub fn lower_statement_block(ctx: &StatementBlockCtx) -> Result<Expression, Error> {
    let mut statements = vec![];
    for statement in &ctx.statements {
        statements.push(lower_expression(statement)?);
    }

    Ok(Expression::new(
        ctx.position.clone(),
        None,
        ExprKind::Block(statements),
    ))
}

pub fn lower_tuple_definition(ctx: &TupleDefinitionCtx) -> Result<Tuple, Error> {
    let mut members = vec![];
    for member in &ctx.members {
        members.push(lower_tuple_member(member)?);
    }

    Ok(Tuple {
        position: ctx.position.clone(),
        members,
    })
}

fn lower_tuple_member(ctx: &TupleMemberCtx) -> Result<TupleMember, Error> {
    let data_type = match &ctx.data_type {
        Some(data_type) => Some(lower_data_type(data_type)?),
        None => None,
    };
    let expression = match &ctx.default_value {
        Some(default_value) => Some(lower_expression(default_value)?),
        None => None,
    };

    Ok(TupleMember {
        position: ctx.position.clone(),
        access: ctx.access.as_ref().map(terminal),
        storage_class: ctx.storage_class.as_ref().map(terminal),
        name: terminal(&ctx.name),
        data_type,
        expression,
    })
}

pub fn lower_data_type(ctx: &DataTypeCtx) -> Result<DataType, Error> {
    let kind = if let Some(range) = &ctx.range {
        TypeKind::Range(Box::new(lower_data_type(&range.element)?))
    } else if let Some(builtin) = &ctx.builtin {
        TypeKind::Builtin(TypeReference::new(
            builtin.position.clone(),
            None,
            terminal(builtin),
            vec![],
        ))
    } else if let Some(function) = &ctx.function {
        let mut parameters = vec![];
        for parameter in &function.parameters {
            parameters.push(lower_data_type(parameter)?);
        }
        TypeKind::Function {
            parameters,
            result: Box::new(lower_data_type(&function.result)?),
        }
    } else if let Some(tuple) = &ctx.tuple {
        TypeKind::Tuple(lower_tuple_definition(tuple)?)
    } else if let Some(reference) = &ctx.reference {
        TypeKind::Reference(lower_type_reference(reference)?)
    } else {
        // A populated alternative is a grammar guarantee, but the tree
        // can be built by hand, so this stays a user-facing error.
        return Err(Error::new(
            ErrorImpl::ParseError {
                node: String::from("dataType"),
            },
            ctx.position.clone(),
        ));
    };

    Ok(DataType {
        position: ctx.position.clone(),
        kind,
        nullable: ctx.nullable.as_ref().map(terminal),
    })
}

fn lower_type_reference(ctx: &TypeReferenceCtx) -> Result<TypeReference, Error> {
    let mut generic_arguments = vec![];
    for argument in &ctx.generic_arguments {
        generic_arguments.push(lower_data_type(argument)?);
    }

    Ok(TypeReference::new(
        ctx.position.clone(),
        ctx.module.as_ref().map(terminal),
        terminal(&ctx.name),
        generic_arguments,
    ))
}
