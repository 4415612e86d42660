//! AST builders shared by the integration tests.
#![allow(dead_code)]

use walrus_compiler::{
    ArrayLiteral, AssignmentExpression, Block, Expression, ExpressionKind, ExpressionStatement,
    Identifier, IndexExpression, InterfaceDeclaration, InterfaceStatement, Literal, MapEntry,
    MapLiteral, MethodSignature, Parameter, SourceSpan, Statement, TypeExpression,
    TypeExpressionKind, VarStatement,
};

pub fn span(line: usize, column: usize) -> SourceSpan {
    SourceSpan::new(line, column, line, column + 1)
}

pub fn at(line: usize) -> SourceSpan {
    span(line, 1)
}

pub fn ident(name: &str, span: SourceSpan) -> Identifier {
    Identifier::new(name, span)
}

pub fn expr(kind: ExpressionKind, span: SourceSpan) -> Expression {
    Expression { span, kind }
}

pub fn int(value: i64, span: SourceSpan) -> Expression {
    expr(ExpressionKind::Literal(Literal::Integer(value)), span)
}

pub fn float(value: f64, span: SourceSpan) -> Expression {
    expr(ExpressionKind::Literal(Literal::Float(value)), span)
}

pub fn string(value: &str, span: SourceSpan) -> Expression {
    expr(
        ExpressionKind::Literal(Literal::String(value.to_string())),
        span,
    )
}

pub fn boolean(value: bool, span: SourceSpan) -> Expression {
    expr(ExpressionKind::Literal(Literal::Boolean(value)), span)
}

pub fn var_ref(name: &str, span: SourceSpan) -> Expression {
    expr(ExpressionKind::Identifier(ident(name, span)), span)
}

pub fn array(elements: Vec<Expression>, span: SourceSpan) -> Expression {
    expr(ExpressionKind::Array(ArrayLiteral { elements }), span)
}

pub fn array_literal(elements: Vec<Expression>) -> ArrayLiteral {
    ArrayLiteral { elements }
}

pub fn map_literal(map_type: TypeExpression, entries: Vec<(Expression, Expression)>) -> MapLiteral {
    MapLiteral {
        map_type,
        entries: entries
            .into_iter()
            .map(|(key, value)| MapEntry { key, value })
            .collect(),
    }
}

pub fn map(
    map_type: TypeExpression,
    entries: Vec<(Expression, Expression)>,
    span: SourceSpan,
) -> Expression {
    expr(ExpressionKind::Map(map_literal(map_type, entries)), span)
}

pub fn index_expression(container: Expression, index: Expression) -> IndexExpression {
    IndexExpression {
        container: Box::new(container),
        index: Box::new(index),
    }
}

pub fn index(container: Expression, index: Expression, span: SourceSpan) -> Expression {
    expr(
        ExpressionKind::Index(index_expression(container, index)),
        span,
    )
}

pub fn assign(target: Expression, value: Expression, span: SourceSpan) -> Expression {
    expr(
        ExpressionKind::Assignment(AssignmentExpression {
            target: Box::new(target),
            value: Box::new(value),
        }),
        span,
    )
}

pub fn named(name: &str, span: SourceSpan) -> TypeExpression {
    TypeExpression {
        span,
        kind: TypeExpressionKind::Named(name.to_string()),
    }
}

pub fn array_of(element: TypeExpression, span: SourceSpan) -> TypeExpression {
    TypeExpression {
        span,
        kind: TypeExpressionKind::Array(Box::new(element)),
    }
}

pub fn map_of(key: TypeExpression, value: TypeExpression, span: SourceSpan) -> TypeExpression {
    TypeExpression {
        span,
        kind: TypeExpressionKind::Map {
            key: Box::new(key),
            value: Box::new(value),
        },
    }
}

pub fn fn_of(
    parameters: Vec<TypeExpression>,
    return_type: Option<TypeExpression>,
    span: SourceSpan,
) -> TypeExpression {
    TypeExpression {
        span,
        kind: TypeExpressionKind::Function {
            parameters,
            return_type: return_type.map(Box::new),
        },
    }
}

pub fn let_stmt(
    name: &str,
    type_annotation: Option<TypeExpression>,
    initializer: Option<Expression>,
    span: SourceSpan,
) -> Statement {
    Statement::Var(VarStatement {
        is_const: false,
        name: ident(name, span),
        type_annotation,
        initializer,
        span,
    })
}

pub fn const_stmt(
    name: &str,
    type_annotation: Option<TypeExpression>,
    initializer: Option<Expression>,
    span: SourceSpan,
) -> Statement {
    Statement::Var(VarStatement {
        is_const: true,
        name: ident(name, span),
        type_annotation,
        initializer,
        span,
    })
}

pub fn expr_stmt(expression: Expression) -> Statement {
    Statement::Expression(ExpressionStatement { expression })
}

pub fn block(statements: Vec<Statement>, span: SourceSpan) -> Statement {
    Statement::Block(Block { statements, span })
}

pub fn param(name: &str, type_annotation: TypeExpression, span: SourceSpan) -> Parameter {
    Parameter {
        name: ident(name, span),
        is_optional: false,
        type_annotation,
    }
}

pub fn optional_param(name: &str, type_annotation: TypeExpression, span: SourceSpan) -> Parameter {
    Parameter {
        name: ident(name, span),
        is_optional: true,
        type_annotation,
    }
}

pub fn method(
    name: &str,
    parameters: Vec<Parameter>,
    return_type: Option<TypeExpression>,
    span: SourceSpan,
) -> MethodSignature {
    MethodSignature {
        name: ident(name, span),
        parameters,
        return_type,
    }
}

pub fn interface_decl(methods: Vec<MethodSignature>, span: SourceSpan) -> InterfaceDeclaration {
    InterfaceDeclaration { methods, span }
}

pub fn interface_stmt(name: &str, methods: Vec<MethodSignature>, span: SourceSpan) -> Statement {
    Statement::Interface(InterfaceStatement {
        name: ident(name, span),
        declaration: interface_decl(methods, span),
    })
}
