use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct SourceSpan {
    pub line: usize,
    pub column: usize,
    pub end_line: usize,
    pub end_column: usize,
}

impl SourceSpan {
    pub fn new(line: usize, column: usize, end_line: usize, end_column: usize) -> Self {
        Self {
            line,
            column,
            end_line,
            end_column,
        }
    }
}

impl Default for SourceSpan {
    fn default() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct Module {
    pub statements: Vec<Statement>,
}

impl Module {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }
}

#[derive(Debug, Clone)]
pub enum Statement {
    Var(VarStatement),
    Interface(InterfaceStatement),
    Block(Block),
    Expression(ExpressionStatement),
}

#[derive(Debug, Clone)]
pub struct VarStatement {
    pub is_const: bool,
    pub name: Identifier,
    pub type_annotation: Option<TypeExpression>,
    pub initializer: Option<Expression>,
    pub span: SourceSpan,
}

/// `type Shape interface { area() -> f64 }`
#[derive(Debug, Clone)]
pub struct InterfaceStatement {
    pub name: Identifier,
    pub declaration: InterfaceDeclaration,
}

#[derive(Debug, Clone)]
pub struct InterfaceDeclaration {
    pub methods: Vec<MethodSignature>,
    pub span: SourceSpan,
}

#[derive(Debug, Clone)]
pub struct MethodSignature {
    pub name: Identifier,
    pub parameters: Vec<Parameter>,
    /// `None` when the signature omits `->`, which means `void`.
    pub return_type: Option<TypeExpression>,
}

#[derive(Debug, Clone)]
pub struct Parameter {
    pub name: Identifier,
    pub is_optional: bool,
    pub type_annotation: TypeExpression,
}

#[derive(Debug, Clone, Default)]
pub struct Block {
    pub statements: Vec<Statement>,
    pub span: SourceSpan,
}

#[derive(Debug, Clone)]
pub struct ExpressionStatement {
    pub expression: Expression,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub name: String,
    pub span: SourceSpan,
}

impl Identifier {
    pub fn new(name: impl Into<String>, span: SourceSpan) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TypeExpression {
    pub span: SourceSpan,
    pub kind: TypeExpressionKind,
}

#[derive(Debug, Clone)]
pub enum TypeExpressionKind {
    /// Builtin (`i32`, `str`, ...) or user declared name.
    Named(String),
    /// `[]T`
    Array(Box<TypeExpression>),
    /// `map[K]V`
    Map {
        key: Box<TypeExpression>,
        value: Box<TypeExpression>,
    },
    /// `fn(T, U) -> R`
    Function {
        parameters: Vec<TypeExpression>,
        return_type: Option<Box<TypeExpression>>,
    },
}

#[derive(Debug, Clone)]
pub enum Literal {
    Integer(i64),
    Float(f64),
    String(String),
    Char(char),
    Boolean(bool),
    Null,
}

#[derive(Debug, Clone)]
pub struct Expression {
    pub span: SourceSpan,
    pub kind: ExpressionKind,
}

#[derive(Debug, Clone)]
pub enum ExpressionKind {
    Identifier(Identifier),
    Literal(Literal),
    Array(ArrayLiteral),
    Map(MapLiteral),
    Index(IndexExpression),
    Assignment(AssignmentExpression),
    Grouping(Box<Expression>),
}

#[derive(Debug, Clone)]
pub struct ArrayLiteral {
    pub elements: Vec<Expression>,
}

/// `map[str]i32{"a": 1}`; the annotation is part of the literal.
#[derive(Debug, Clone)]
pub struct MapLiteral {
    pub map_type: TypeExpression,
    pub entries: Vec<MapEntry>,
}

#[derive(Debug, Clone)]
pub struct MapEntry {
    pub key: Expression,
    pub value: Expression,
}

#[derive(Debug, Clone)]
pub struct IndexExpression {
    pub container: Box<Expression>,
    pub index: Box<Expression>,
}

#[derive(Debug, Clone)]
pub struct AssignmentExpression {
    pub target: Box<Expression>,
    pub value: Box<Expression>,
}
