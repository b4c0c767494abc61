//! Unit tests for the lowering phase, driven through the source-level
//! entry points so the lexer and concrete parser run too.

use crate::ast::expressions::{ExprKind, Expression};
use crate::ast::types::{ExprType, TypeReference};
use crate::grammar::cst::{ClassMemberCtx, DataTypeCtx, MethodCtx, TupleDefinitionCtx};
use crate::lexer::tokens::{Token, TokenKind};
use crate::SourcePosition;

use super::{decl, parse_class, parse_expression, parse_field, parse_method, parse_module};

fn expr(source: &str) -> Expression {
    parse_expression(source, None).unwrap()
}

fn binary_parts(expression: &Expression) -> (&str, &Expression, &Expression) {
    match &expression.kind {
        ExprKind::Binary {
            operator,
            left,
            right,
        } => (operator.value.as_str(), left, right),
        other => panic!("expected a binary expression, got {:?}", other),
    }
}

fn ident(value: &str) -> Token {
    Token {
        kind: TokenKind::Identifier,
        value: String::from(value),
        position: SourcePosition::empty(),
        offset: 0,
    }
}

#[test]
fn test_module_statement_name() {
    let module = parse_module("module Foo;", None).unwrap();

    assert_eq!(module.name.unwrap(), "Foo");
    assert!(module.imports.is_empty());
    assert!(module.members.is_empty());
}

#[test]
fn test_module_without_statement() {
    let module = parse_module("class Bar { }", None).unwrap();

    assert!(module.name.is_none());
    assert_eq!(module.members.len(), 1);
}

#[test]
fn test_module_imports() {
    let module = parse_module("module Foo;\nimport bar;\nimport baz;", None).unwrap();

    assert_eq!(module.imports.len(), 2);
    assert_eq!(module.imports[0].to_string(), "import bar");
    assert_eq!(module.imports[1].to_string(), "import baz");
}

#[test]
fn test_class_without_modifiers() {
    let class = parse_class("class Bar { }", None).unwrap();

    assert!(class.access.is_none());
    assert!(class.storage_class.is_none());
    assert_eq!(class.name, "Bar");
    assert!(class.members.is_empty());
}

#[test]
fn test_class_modifier_combinations() {
    for access in [Some("public"), Some("private"), None] {
        for storage in [Some("mutable"), Some("immutable"), None] {
            let mut source = String::new();
            if let Some(access) = access {
                source.push_str(access);
                source.push(' ');
            }
            if let Some(storage) = storage {
                source.push_str(storage);
                source.push(' ');
            }
            source.push_str("class Bar { }");

            let class = parse_class(&source, None).unwrap();
            assert_eq!(class.access.as_ref().map(|t| t.value.as_str()), access);
            assert_eq!(
                class.storage_class.as_ref().map(|t| t.value.as_str()),
                storage
            );
        }
    }
}

#[test]
fn test_class_generics_and_constructor() {
    let class = parse_class("public class Point<T>(x : int, y : int) { }", None).unwrap();

    assert_eq!(class.generic_arguments.len(), 1);
    assert_eq!(class.generic_arguments[0].name, "T");
    assert_eq!(class.default_constructor.unwrap().members.len(), 2);
}

#[test]
fn test_field_storage_classes() {
    for storage in ["mutable", "immutable", "const"] {
        let field = parse_field(&format!("{} baz : int", storage), None).unwrap();
        assert_eq!(field.storage_class.unwrap(), storage);
        assert_eq!(field.name, "baz");
    }

    let field = parse_field("baz : int", None).unwrap();
    assert!(field.storage_class.is_none());
}

#[test]
fn test_field_initializer() {
    let field = parse_field("public const baz : int <- 7", None).unwrap();

    assert!(matches!(
        field.expression.as_ref().unwrap().kind,
        ExprKind::ConstInteger(_)
    ));
    assert_eq!(field.to_string(), "public const baz : int <- 7");
}

#[test]
fn test_method_with_block_body() {
    let method = parse_method("foo() : int { }", None).unwrap();

    assert_eq!(method.name, "foo");
    assert!(method.parameters.members.is_empty());
    assert!(method.body.unwrap().is_block());
}

#[test]
fn test_method_with_expression_body() {
    let method = parse_method("public pure meth(const arg : int) => abc", None).unwrap();

    assert_eq!(method.access.unwrap(), "public");
    assert_eq!(method.pure.unwrap(), "pure");
    assert_eq!(method.parameters.members.len(), 1);
    assert!(matches!(
        method.body.as_ref().unwrap().kind,
        ExprKind::Symbol(_)
    ));
}

#[test]
fn test_deferred_method_has_no_body() {
    let method = parse_method("later() : int defer", None).unwrap();

    assert!(method.body.is_none());
    assert_eq!(method.to_string(), "defer later()");
}

#[test]
fn test_block_body_statements() {
    let method = parse_method("m() { abc <- 100 }", None).unwrap();

    let body = method.body.unwrap();
    let statements = match &body.kind {
        ExprKind::Block(statements) => statements,
        other => panic!("expected a block, got {:?}", other),
    };
    assert_eq!(statements.len(), 1);
    let (operator, left, right) = binary_parts(&statements[0]);
    assert_eq!(operator, "<-");
    assert!(matches!(left.kind, ExprKind::Symbol(_)));
    assert!(matches!(right.kind, ExprKind::ConstInteger(_)));
}

#[test]
fn test_operator_precedence_pairs() {
    // Looser operator paired with the next tighter one; whichever side
    // the tighter operator sits on, the looser one ends up on top.
    let pairs = [
        (".", "!"),
        ("^", "."),
        ("*", "^"),
        ("+", "*"),
        ("+", ">"),
        (">", "="),
    ];

    for (loose, tight) in pairs {
        let lowered = expr(&format!("abc {} def {} ghi", tight, loose));
        let (operator, left, _) = binary_parts(&lowered);
        assert_eq!(operator, loose, "tight-first source, pair {:?}", (loose, tight));
        assert_eq!(binary_parts(left).0, tight);

        let lowered = expr(&format!("abc {} def {} ghi", loose, tight));
        let (operator, _, right) = binary_parts(&lowered);
        assert_eq!(operator, loose, "loose-first source, pair {:?}", (loose, tight));
        assert_eq!(binary_parts(right).0, tight);
    }
}

#[test]
fn test_assignment_is_loosest_and_leans_right() {
    for operator in [">", "+", "-", "*", "."] {
        let lowered = expr(&format!("abc <- def {} ghi", operator));
        let (top, _, right) = binary_parts(&lowered);
        assert_eq!(top, "<-");
        assert_eq!(binary_parts(right).0, operator);
    }
}

#[test]
fn test_every_operator_builds_a_binary_node() {
    let operators = [
        "+", "-", "*", "/", "^", "%", ".", "!", "<-", ">", "<", ">=", "<=", "=", "<>",
    ];

    for operator in operators {
        let lowered = expr(&format!("def {} abc", operator));
        assert_eq!(binary_parts(&lowered).0, operator);
    }
}

#[test]
fn test_infix_chain_leans_left() {
    let lowered = expr("a + b - c");
    let (operator, left, _) = binary_parts(&lowered);

    assert_eq!(operator, "-");
    assert_eq!(binary_parts(left).0, "+");
}

#[test]
fn test_integer_literal() {
    let lowered = expr("123");

    assert!(matches!(lowered.kind, ExprKind::ConstInteger(_)));
    assert_eq!(lowered.to_string(), "123");
    assert_eq!(
        lowered.ty,
        Some(ExprType::Reference(TypeReference::integer()))
    );
}

#[test]
fn test_string_literal() {
    let lowered = expr("\"hello\"");

    assert!(matches!(lowered.kind, ExprKind::ConstString(_)));
    assert_eq!(
        lowered.ty,
        Some(ExprType::Reference(TypeReference::string()))
    );
}

#[test]
fn test_keyword_constants() {
    let cases = [
        ("true", TypeReference::boolean()),
        ("false", TypeReference::boolean()),
        ("null", TypeReference::null()),
        ("never", TypeReference::never()),
        ("void", TypeReference::void()),
    ];

    for (source, ty) in cases {
        let lowered = expr(source);
        assert!(matches!(lowered.kind, ExprKind::Constant(_)));
        assert_eq!(lowered.ty, Some(ExprType::Reference(ty)));
        assert_eq!(lowered.to_string(), source);
    }
}

#[test]
fn test_bare_symbol_is_untyped() {
    let lowered = expr("abc");

    assert!(matches!(lowered.kind, ExprKind::Symbol(_)));
    assert!(lowered.ty.is_none());
}

#[test]
fn test_parenthesized_single_collapses() {
    let lowered = expr("(123)");

    assert!(matches!(lowered.kind, ExprKind::ConstInteger(_)));
}

#[test]
fn test_tuple_expression_and_type() {
    let lowered = expr("(1, abc)");

    match &lowered.kind {
        ExprKind::Tuple(elements) => assert_eq!(elements.len(), 2),
        other => panic!("expected a tuple, got {:?}", other),
    }
    assert_eq!(
        lowered.ty,
        Some(ExprType::Tuple(vec![
            Some(ExprType::Reference(TypeReference::integer())),
            None,
        ]))
    );
}

#[test]
fn test_sum_takes_type_from_left() {
    assert_eq!(
        expr("1 + abc").ty,
        Some(ExprType::Reference(TypeReference::integer()))
    );
    assert!(expr("abc + 1").ty.is_none());
}

#[test]
fn test_assignment_takes_type_from_value() {
    assert_eq!(
        expr("abc <- 1").ty,
        Some(ExprType::Reference(TypeReference::integer()))
    );
}

#[test]
fn test_equivalence_is_always_boolean() {
    for source in ["abc = def", "1 <> 2"] {
        assert_eq!(
            expr(source).ty,
            Some(ExprType::Reference(TypeReference::boolean()))
        );
    }
}

#[test]
fn test_unary_negation() {
    let lowered = expr("-5");

    assert!(matches!(lowered.kind, ExprKind::Unary { .. }));
    assert_eq!(lowered.to_string(), "-5");
    assert_eq!(
        lowered.ty,
        Some(ExprType::Reference(TypeReference::integer()))
    );
}

#[test]
fn test_new_is_unsupported() {
    let error = parse_expression("new abc", None).err().unwrap();

    assert_eq!(error.get_error_name(), "UnsupportedConstructError");
}

#[test]
fn test_chain_with_integer_is_positional_index() {
    let lowered = expr("abc . 0");

    assert!(matches!(lowered.kind, ExprKind::Indexer { .. }));
    assert_eq!(lowered.to_string(), "abc.0");
}

#[test]
fn test_chain_with_symbol_is_member_access() {
    let lowered = expr("abc . def");

    let (operator, left, right) = binary_parts(&lowered);
    assert_eq!(operator, ".");
    assert!(matches!(left.kind, ExprKind::Symbol(_)));
    assert!(matches!(right.kind, ExprKind::Member(_)));
    assert!(lowered.ty.is_none());
}

#[test]
fn test_postfix_member_access() {
    let lowered = expr("abc ! def");

    let (operator, _, right) = binary_parts(&lowered);
    assert_eq!(operator, "!");
    assert!(matches!(right.kind, ExprKind::Member(_)));
    assert!(lowered.ty.is_none());
}

#[test]
fn test_postfix_index() {
    let lowered = expr("abc[def]");

    assert!(matches!(lowered.kind, ExprKind::Indexer { .. }));
    assert_eq!(lowered.to_string(), "abc[def]");
}

#[test]
fn test_conditional() {
    let lowered = expr("if abc def else ghi");

    assert!(matches!(lowered.kind, ExprKind::Conditional { .. }));
    assert!(lowered.ty.is_none());
    assert_eq!(lowered.to_string(), "if abc def else ghi");
}

#[test]
fn test_conditional_chains_right() {
    let lowered = expr("if a b else if c d else e");

    match &lowered.kind {
        ExprKind::Conditional { if_false, .. } => {
            assert!(matches!(if_false.kind, ExprKind::Conditional { .. }));
        }
        other => panic!("expected a conditional, got {:?}", other),
    }
}

#[test]
fn test_end_to_end_module() {
    let source = "\
module foo
public class bar
{
\tpublic meth(const arg : int) : bool => abc <- 100
}
";
    let module = parse_module(source, None).unwrap();

    assert_eq!(module.name.as_ref().unwrap(), "foo");
    assert_eq!(module.members.len(), 1);

    let class = &module.members[0];
    assert_eq!(class.access.as_ref().unwrap(), "public");
    assert_eq!(class.name, "bar");
    assert_eq!(class.members.len(), 1);

    let method = match &class.members[0] {
        crate::ast::nodes::ClassMember::Method(method) => method,
        other => panic!("expected a method, got {:?}", other),
    };
    assert_eq!(method.name, "meth");

    let body = method.body.as_ref().unwrap();
    let (operator, left, right) = binary_parts(body);
    assert_eq!(operator, "<-");
    match &left.kind {
        ExprKind::Symbol(name) => assert_eq!(name, "abc"),
        other => panic!("expected a symbol, got {:?}", other),
    }
    match &right.kind {
        ExprKind::ConstInteger(value) => assert_eq!(value, "100"),
        other => panic!("expected an integer, got {:?}", other),
    }

    assert_eq!(
        module.to_string(),
        "module foo\n\npublic class bar\n{\n\tpublic meth(const arg : int) => abc <- 100\n}\n"
    );
}

#[test]
fn test_empty_data_type_context_is_rejected() {
    let ctx = DataTypeCtx {
        range: None,
        builtin: None,
        function: None,
        tuple: None,
        reference: None,
        nullable: None,
        position: SourcePosition::empty(),
    };

    let error = decl::lower_data_type(&ctx).err().unwrap();
    assert_eq!(error.get_error_name(), "ParseError");
}

#[test]
fn test_method_context_without_body_is_rejected() {
    let ctx = MethodCtx {
        access: None,
        pure_marker: None,
        name: ident("broken"),
        generic_arguments: None,
        parameters: TupleDefinitionCtx {
            members: vec![],
            position: SourcePosition::empty(),
        },
        return_type: None,
        expression: None,
        block: None,
        deferred: None,
        position: SourcePosition::empty(),
    };

    let error = decl::lower_method(&ctx).err().unwrap();
    assert_eq!(error.get_error_name(), "MalformedMethodBodyError");
}

#[test]
fn test_empty_class_member_context_is_rejected() {
    let ctx = ClassMemberCtx {
        field: None,
        method: None,
        position: SourcePosition::empty(),
    };

    let error = decl::lower_class_member(&ctx).err().unwrap();
    assert_eq!(error.get_error_name(), "MalformedTreeError");
}
