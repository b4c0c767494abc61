//! Rule contexts for the concrete parse tree.
//!
//! Each struct corresponds to one grammar rule. Optional slots are
//! `None` exactly when the source omitted that part; lowering inspects
//! which slots are populated to pick the matching alternative.

use crate::{lexer::tokens::Token, SourcePosition};

#[derive(Debug, Clone)]
pub struct CompileUnitCtx {
    pub module_statement: Option<ModuleStatementCtx>,
    pub scope: Option<ModuleScopeCtx>,
    pub position: SourcePosition,
}

#[derive(Debug, Clone)]
pub struct ModuleStatementCtx {
    pub name: Token,
    pub position: SourcePosition,
}

#[derive(Debug, Clone)]
pub struct ModuleScopeCtx {
    pub imports: Vec<ImportCtx>,
    pub type_definitions: Vec<ClassDefinitionCtx>,
    pub position: SourcePosition,
}

#[derive(Debug, Clone)]
pub struct ImportCtx {
    pub module: Token,
    pub position: SourcePosition,
}

#[derive(Debug, Clone)]
pub struct ClassDefinitionCtx {
    pub access: Option<Token>,
    pub storage_class: Option<Token>,
    pub name: Token,
    pub generic_arguments: Option<GenericArgumentsCtx>,
    pub default_constructor: Option<TupleDefinitionCtx>,
    pub members: Vec<ClassMemberCtx>,
    pub position: SourcePosition,
}

#[derive(Debug, Clone)]
pub struct GenericArgumentsCtx {
    pub names: Vec<Token>,
    pub position: SourcePosition,
}

/// A class member is either a field or a method. Both slots empty means
/// the parser produced a tree no grammar rule allows.
#[derive(Debug, Clone)]
pub struct ClassMemberCtx {
    pub field: Option<FieldCtx>,
    pub method: Option<MethodCtx>,
    pub position: SourcePosition,
}

#[derive(Debug, Clone)]
pub struct FieldCtx {
    pub access: Option<Token>,
    pub storage_class: Option<Token>,
    pub name: Token,
    pub data_type: DataTypeCtx,
    pub initializer: Option<ExpressionCtx>,
    pub position: SourcePosition,
}

/// A method body populates exactly one of `expression`, `block` or
/// `deferred`.
#[derive(Debug, Clone)]
pub struct MethodCtx {
    pub access: Option<Token>,
    pub pure_marker: Option<Token>,
    pub name: Token,
    pub generic_arguments: Option<GenericArgumentsCtx>,
    pub parameters: TupleDefinitionCtx,
    pub return_type: Option<DataTypeCtx>,
    pub expression: Option<ExpressionCtx>,
    pub block: Option<StatementBlockCtx>,
    pub deferred: Option<Token>,
    pub position: SourcePosition,
}

#[derive(Debug, Clone)]
pub struct TupleDefinitionCtx {
    pub members: Vec<TupleMemberCtx>,
    pub position: SourcePosition,
}

#[derive(Debug, Clone)]
pub struct TupleMemberCtx {
    pub access: Option<Token>,
    pub storage_class: Option<Token>,
    pub name: Token,
    pub data_type: Option<DataTypeCtx>,
    pub default_value: Option<ExpressionCtx>,
    pub position: SourcePosition,
}

/// A data type populates exactly one of the five alternatives, plus an
/// optional `?` marker.
#[derive(Debug, Clone)]
pub struct DataTypeCtx {
    pub range: Option<RangeTypeCtx>,
    pub builtin: Option<Token>,
    pub function: Option<FuncTypeCtx>,
    pub tuple: Option<TupleDefinitionCtx>,
    pub reference: Option<TypeReferenceCtx>,
    pub nullable: Option<Token>,
    pub position: SourcePosition,
}

#[derive(Debug, Clone)]
pub struct RangeTypeCtx {
    pub element: Box<DataTypeCtx>,
    pub position: SourcePosition,
}

#[derive(Debug, Clone)]
pub struct FuncTypeCtx {
    pub parameters: Vec<DataTypeCtx>,
    pub result: Box<DataTypeCtx>,
    pub position: SourcePosition,
}

#[derive(Debug, Clone)]
pub struct TypeReferenceCtx {
    pub module: Option<Token>,
    pub name: Token,
    pub generic_arguments: Vec<DataTypeCtx>,
    pub position: SourcePosition,
}

#[derive(Debug, Clone)]
pub struct StatementBlockCtx {
    pub statements: Vec<ExpressionCtx>,
    pub position: SourcePosition,
}

/// Top of the expression rule chain: the right-associative assignment
/// level. `operator` and `value` are populated together or not at all.
#[derive(Debug, Clone)]
pub struct ExpressionCtx {
    pub target: ConditionalCtx,
    pub operator: Option<Token>,
    pub value: Option<Box<ExpressionCtx>>,
    pub position: SourcePosition,
}

/// `if condition ifTrue else ifFalse`, right-associative through
/// `if_false`. When no `if` is present only `inner` is populated.
#[derive(Debug, Clone)]
pub struct ConditionalCtx {
    pub condition: Option<OrCtx>,
    pub if_true: Option<OrCtx>,
    pub if_false: Option<Box<ConditionalCtx>>,
    pub inner: Option<OrCtx>,
    pub position: SourcePosition,
}

/// The logical-or level. The current grammar revision defines no
/// operator here, so the rule only wraps the next level down.
#[derive(Debug, Clone)]
pub struct OrCtx {
    pub inner: SumCtx,
    pub position: SourcePosition,
}

/// A left-recursive binary level. `left` and `operator` are absent when
/// the level matched no operator and the rule collapsed to `right`.
#[derive(Debug, Clone)]
pub struct InfixCtx<Inner> {
    pub left: Option<Box<InfixCtx<Inner>>>,
    pub operator: Option<Token>,
    pub right: Inner,
    pub position: SourcePosition,
}

pub type SumCtx = InfixCtx<ComparisonCtx>;
pub type ComparisonCtx = InfixCtx<EquivalenceCtx>;
pub type EquivalenceCtx = InfixCtx<ProductCtx>;
pub type ProductCtx = InfixCtx<PowerCtx>;
pub type PowerCtx = InfixCtx<ChainCtx>;
pub type ChainCtx = InfixCtx<UnaryCtx>;

#[derive(Debug, Clone)]
pub struct UnaryCtx {
    pub operator: Option<Token>,
    pub operand: PostfixCtx,
    pub position: SourcePosition,
}

/// Left-recursive postfix chain. A leaf holds only `primary`; every
/// other link holds `base` plus one `operation`.
#[derive(Debug, Clone)]
pub struct PostfixCtx {
    pub base: Option<Box<PostfixCtx>>,
    pub operation: Option<PostfixOpCtx>,
    pub primary: Option<PrimaryCtx>,
    pub position: SourcePosition,
}

#[derive(Debug, Clone)]
pub enum PostfixOpCtx {
    /// `base ! name`
    Member { operator: Token, name: Token },
    /// `base [ index ]`
    Index { index: Box<ExpressionCtx> },
}

/// Literals, keyword constants, bare identifiers and parenthesized
/// lists.
#[derive(Debug, Clone)]
pub struct PrimaryCtx {
    pub keyword: Option<Token>,
    pub integer: Option<Token>,
    pub string: Option<Token>,
    pub symbol: Option<Token>,
    pub elements: Option<Vec<ExpressionCtx>>,
    pub position: SourcePosition,
}

impl PrimaryCtx {
    pub fn empty(position: SourcePosition) -> Self {
        PrimaryCtx {
            keyword: None,
            integer: None,
            string: None,
            symbol: None,
            elements: None,
            position,
        }
    }
}
