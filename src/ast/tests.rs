//! Unit tests for the AST node model and pretty printer.

use crate::ast::expressions::{ExprKind, Expression};
use crate::ast::nodes::{
    Class, ClassMember, Field, Import, ImportTarget, Method, Module, Terminal, Tuple, TupleMember,
};
use crate::ast::types::{DataType, ExprType, TypeKind, TypeReference};
use crate::SourcePosition;

fn term(value: &str) -> Terminal {
    Terminal::new(SourcePosition::empty(), String::from(value))
}

fn symbol(name: &str) -> Expression {
    Expression::new(
        SourcePosition::empty(),
        None,
        ExprKind::Symbol(term(name)),
    )
}

fn integer(value: &str) -> Expression {
    Expression::new(
        SourcePosition::empty(),
        Some(ExprType::Reference(TypeReference::integer())),
        ExprKind::ConstInteger(term(value)),
    )
}

fn int_type() -> DataType {
    DataType {
        position: SourcePosition::empty(),
        kind: TypeKind::Builtin(TypeReference::integer()),
        nullable: None,
    }
}

#[test]
fn test_terminal_equality_is_value_based() {
    let a = Terminal::new(
        SourcePosition::new(std::rc::Rc::new(String::from("a.vsp")), 1, 0, 1),
        String::from("+"),
    );
    let b = Terminal::new(
        SourcePosition::new(std::rc::Rc::new(String::from("b.vsp")), 9, 4, 1),
        String::from("+"),
    );

    assert_eq!(a, b);
    assert!(a == "+");
    assert!(a != "-");
}

#[test]
fn test_builtin_type_references() {
    assert_eq!(TypeReference::boolean().to_string(), "bool");
    assert_eq!(TypeReference::integer().to_string(), "int");
    assert_eq!(TypeReference::float().to_string(), "float");
    assert_eq!(TypeReference::string().to_string(), "string");
    assert_eq!(TypeReference::void().to_string(), "void");
    assert_eq!(TypeReference::never().to_string(), "never");
    assert_eq!(TypeReference::null().to_string(), "null");
}

#[test]
fn test_type_reference_equality_ignores_position() {
    let written = TypeReference::new(
        SourcePosition::new(std::rc::Rc::new(String::from("a.vsp")), 3, 7, 3),
        None,
        term("int"),
        vec![],
    );

    assert_eq!(written, TypeReference::integer());
}

#[test]
fn test_qualified_type_reference_display() {
    let reference = TypeReference::new(
        SourcePosition::empty(),
        Some(term("bar")),
        term("List"),
        vec![int_type()],
    );

    assert_eq!(reference.to_string(), "bar.List<int>");
}

#[test]
fn test_nullable_data_type_display() {
    let data_type = DataType {
        position: SourcePosition::empty(),
        kind: TypeKind::Builtin(TypeReference::integer()),
        nullable: Some(term("?")),
    };

    assert_eq!(data_type.to_string(), "int?");
}

#[test]
fn test_range_type_display() {
    let data_type = DataType {
        position: SourcePosition::empty(),
        kind: TypeKind::Range(Box::new(int_type())),
        nullable: None,
    };

    assert_eq!(data_type.to_string(), "[int]");
}

#[test]
fn test_function_type_display() {
    let data_type = DataType {
        position: SourcePosition::empty(),
        kind: TypeKind::Function {
            parameters: vec![int_type(), int_type()],
            result: Box::new(int_type()),
        },
        nullable: None,
    };

    assert_eq!(data_type.to_string(), "fn (int, int) -> int");
}

#[test]
fn test_binary_expression_display() {
    let expression = Expression::new(
        SourcePosition::empty(),
        None,
        ExprKind::Binary {
            operator: term("+"),
            left: Box::new(symbol("abc")),
            right: Box::new(symbol("def")),
        },
    );

    assert_eq!(expression.to_string(), "abc + def");
}

#[test]
fn test_unary_expression_display() {
    let expression = Expression::new(
        SourcePosition::empty(),
        None,
        ExprKind::Unary {
            operator: term("-"),
            operand: Box::new(integer("5")),
        },
    );

    assert_eq!(expression.to_string(), "-5");
}

#[test]
fn test_conditional_expression_display() {
    let expression = Expression::new(
        SourcePosition::empty(),
        None,
        ExprKind::Conditional {
            condition: Box::new(symbol("abc")),
            if_true: Box::new(symbol("def")),
            if_false: Box::new(symbol("ghi")),
        },
    );

    assert_eq!(expression.to_string(), "if abc def else ghi");
}

#[test]
fn test_tuple_expression_display() {
    let expression = Expression::new(
        SourcePosition::empty(),
        None,
        ExprKind::Tuple(vec![symbol("a"), symbol("b")]),
    );

    assert_eq!(expression.to_string(), "(a, b)");
}

#[test]
fn test_positional_indexer_display() {
    let expression = Expression::new(
        SourcePosition::empty(),
        None,
        ExprKind::Indexer {
            base: Box::new(symbol("abc")),
            index: Box::new(integer("0")),
        },
    );

    assert_eq!(expression.to_string(), "abc.0");
}

#[test]
fn test_general_indexer_display() {
    let expression = Expression::new(
        SourcePosition::empty(),
        None,
        ExprKind::Indexer {
            base: Box::new(symbol("abc")),
            index: Box::new(symbol("def")),
        },
    );

    assert_eq!(expression.to_string(), "abc[def]");
}

#[test]
fn test_block_expression_display() {
    let expression = Expression::new(
        SourcePosition::empty(),
        None,
        ExprKind::Block(vec![integer("123")]),
    );

    assert_eq!(expression.to_string(), "{ 123 }");
}

#[test]
fn test_field_display() {
    let field = Field {
        position: SourcePosition::empty(),
        access: Some(term("public")),
        storage_class: Some(term("const")),
        name: term("baz"),
        data_type: int_type(),
        expression: Some(integer("7")),
    };

    assert_eq!(field.to_string(), "public const baz : int <- 7");
}

#[test]
fn test_tuple_member_display() {
    let member = TupleMember {
        position: SourcePosition::empty(),
        access: None,
        storage_class: Some(term("const")),
        name: term("arg"),
        data_type: Some(int_type()),
        expression: None,
    };

    assert_eq!(member.to_string(), "const arg : int");
}

#[test]
fn test_method_display_with_expression_body() {
    let method = Method {
        position: SourcePosition::empty(),
        access: Some(term("public")),
        pure: None,
        name: term("meth"),
        generic_arguments: vec![],
        parameters: Tuple {
            position: SourcePosition::empty(),
            members: vec![],
        },
        body: Some(symbol("abc")),
    };

    assert_eq!(method.to_string(), "public meth() => abc");
}

#[test]
fn test_method_display_deferred() {
    let method = Method {
        position: SourcePosition::empty(),
        access: None,
        pure: Some(term("pure")),
        name: term("later"),
        generic_arguments: vec![],
        parameters: Tuple {
            position: SourcePosition::empty(),
            members: vec![],
        },
        body: None,
    };

    assert_eq!(method.to_string(), "pure defer later()");
}

#[test]
fn test_class_write_indented() {
    let class = Class {
        position: SourcePosition::empty(),
        access: Some(term("public")),
        storage_class: None,
        name: term("bar"),
        default_constructor: None,
        generic_arguments: vec![],
        members: vec![ClassMember::Field(Field {
            position: SourcePosition::empty(),
            access: None,
            storage_class: None,
            name: term("baz"),
            data_type: int_type(),
            expression: None,
        })],
    };

    assert_eq!(class.to_string(), "public class bar\n{\n\tbaz : int\n}\n");
}

#[test]
fn test_module_display() {
    let module = Module {
        position: SourcePosition::empty(),
        name: Some(term("foo")),
        imports: vec![Import {
            position: SourcePosition::empty(),
            target: ImportTarget::Named(term("other")),
        }],
        members: vec![],
    };

    assert_eq!(module.to_string(), "module foo\nimport other\n\n");
}

#[test]
fn test_expr_type_equality() {
    let a = ExprType::Tuple(vec![
        Some(ExprType::Reference(TypeReference::integer())),
        None,
    ]);
    let b = ExprType::Tuple(vec![
        Some(ExprType::Reference(TypeReference::integer())),
        None,
    ]);

    assert_eq!(a, b);
    assert_ne!(a, ExprType::Reference(TypeReference::integer()));
}
