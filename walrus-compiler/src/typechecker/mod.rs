mod compatibility;
mod composite;
mod environment;
mod interface;
mod type_names;
mod types;

use std::path::PathBuf;

use tracing::{debug, instrument};

use crate::ast::{
    ArrayLiteral, AssignmentExpression, Block, Expression, ExpressionKind, IndexExpression,
    InterfaceDeclaration, InterfaceStatement, Literal, MapLiteral, Module, SourceSpan, Statement,
    TypeExpression, VarStatement,
};
use crate::diagnostics::{Diagnostic, Diagnostics, Dropped, ErrorKind};
use crate::options::AnalyzerOptions;

pub use compatibility::{match_types, TypeMismatch};
pub use environment::{
    DeclarationError, ResolutionError, Scope, ScopeId, ScopeKind, TypeEnvironment,
};
pub use types::{
    FnParam, FunctionType, IntegerType, InterfaceType, MapType, MethodDescriptor, StructType,
    Type, TypeKind,
};

/// A value produced by one checker call together with the diagnostics that
/// call reported. Reports past the diagnostic limit land in `dropped`.
#[derive(Debug, Clone, PartialEq)]
pub struct Checked<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
    pub dropped: Vec<Dropped>,
}

pub type Typed = Checked<Type>;

impl<T> Checked<T> {
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty() && self.dropped.is_empty()
    }

    /// True when the value must not be trusted by the enclosing expression.
    pub fn is_blocking(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_blocking)
            || self.dropped.iter().any(|dropped| dropped.kind.is_blocking())
    }

    pub fn count_of(&self, kind: ErrorKind) -> usize {
        let stored = self
            .diagnostics
            .iter()
            .filter(|diagnostic| diagnostic.kind == kind)
            .count();
        let dropped = self
            .dropped
            .iter()
            .filter(|dropped| dropped.kind == kind)
            .count();
        stored + dropped
    }
}

impl Typed {
    pub fn ty(&self) -> &Type {
        &self.value
    }
}

pub struct TypeChecker {
    env: TypeEnvironment,
    options: AnalyzerOptions,
    diagnostics: Diagnostics,
}

impl TypeChecker {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self::with_options(file_path, AnalyzerOptions::default())
    }

    pub fn with_options(file_path: impl Into<PathBuf>, options: AnalyzerOptions) -> Self {
        Self {
            env: TypeEnvironment::new(file_path),
            diagnostics: Diagnostics::with_limit(options.max_diagnostics),
            options,
        }
    }

    pub fn environment(&self) -> &TypeEnvironment {
        &self.env
    }

    /// Lets callers seed bindings before checking, e.g. a prelude.
    pub fn environment_mut(&mut self) -> &mut TypeEnvironment {
        &mut self.env
    }

    pub fn root_scope(&self) -> ScopeId {
        self.env.root()
    }

    pub fn options(&self) -> &AnalyzerOptions {
        &self.options
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Diagnostics {
        self.diagnostics
    }

    #[instrument(skip_all, fields(statements = module.statements.len()))]
    pub fn check_module(&mut self, module: &Module) {
        let root = self.env.root();
        self.check_statements(&module.statements, root);
        debug!(diagnostics = self.diagnostics.len(), "module checked");
    }

    /// Types an expression.
    pub fn parse_node_value(&mut self, expression: &Expression, scope: ScopeId) -> Typed {
        self.checked(|checker| checker.infer_expression(expression, scope))
    }

    pub fn evaluate_type_name(&mut self, annotation: &TypeExpression, scope: ScopeId) -> Typed {
        self.checked(|checker| checker.resolve_type_expression(annotation, scope))
    }

    pub fn check_array_literal(
        &mut self,
        literal: &ArrayLiteral,
        span: SourceSpan,
        scope: ScopeId,
    ) -> Typed {
        self.checked(|checker| checker.type_from_array(literal, span, scope))
    }

    pub fn check_map_literal(
        &mut self,
        literal: &MapLiteral,
        span: SourceSpan,
        scope: ScopeId,
    ) -> Typed {
        self.checked(|checker| checker.type_from_map(literal, span, scope))
    }

    pub fn check_index(&mut self, index: &IndexExpression, scope: ScopeId) -> Typed {
        self.checked(|checker| checker.type_from_index(index, scope))
    }

    /// Builds an interface without registering its name.
    pub fn declare_interface(
        &mut self,
        name: &str,
        declaration: &InterfaceDeclaration,
        scope: ScopeId,
    ) -> Checked<InterfaceType> {
        self.checked(|checker| checker.build_interface(name, declaration, scope))
    }

    fn checked<T>(&mut self, check: impl FnOnce(&mut Self) -> T) -> Checked<T> {
        let start = self.diagnostics.len();
        let dropped_start = self.diagnostics.dropped().len();
        let value = check(self);
        let diagnostics = self.diagnostics.entries()[start..].to_vec();
        let dropped = self.diagnostics.dropped()[dropped_start..].to_vec();
        Checked {
            value,
            diagnostics,
            dropped,
        }
    }

    fn report<S: Into<String>>(
        &mut self,
        kind: ErrorKind,
        scope: ScopeId,
        message: S,
        span: SourceSpan,
    ) {
        self.diagnostics
            .push_error_with_span(kind, self.env.file_path(scope), message, span);
    }

    fn report_critical<S: Into<String>>(
        &mut self,
        kind: ErrorKind,
        scope: ScopeId,
        message: S,
        span: SourceSpan,
    ) {
        self.diagnostics
            .push_critical_with_span(kind, self.env.file_path(scope), message, span);
    }

    fn check_statements(&mut self, statements: &[Statement], scope: ScopeId) {
        for statement in statements {
            self.check_statement(statement, scope);
        }
    }

    fn check_statement(&mut self, statement: &Statement, scope: ScopeId) {
        match statement {
            Statement::Var(var) => self.check_var(var, scope),
            Statement::Interface(interface) => self.check_interface(interface, scope),
            Statement::Block(block) => self.check_block(block, scope),
            Statement::Expression(statement) => {
                self.infer_expression(&statement.expression, scope);
            }
        }
    }

    fn check_var(&mut self, var: &VarStatement, scope: ScopeId) {
        let annotated = var
            .type_annotation
            .as_ref()
            .map(|annotation| self.resolve_type_expression(annotation, scope));
        let initial = var
            .initializer
            .as_ref()
            .map(|initializer| (self.infer_expression(initializer, scope), initializer.span));

        if var.is_const && var.initializer.is_none() {
            self.report(
                ErrorKind::MissingInitializer,
                scope,
                format!("constant '{}' must be initialized", var.name.name),
                var.span,
            );
        }

        let ty = match (annotated, initial) {
            (Some(annotated), Some((actual, span))) => {
                if let Err(mismatch) = match_types(&annotated, &actual) {
                    self.report(ErrorKind::TypeMismatch, scope, mismatch.to_string(), span);
                }
                annotated
            }
            (Some(annotated), None) => annotated,
            (None, Some((actual, _))) => actual,
            (None, None) => Type::Unknown,
        };

        if let Err(error) = self.env.declare(scope, &var.name.name, ty, var.is_const) {
            self.report(
                ErrorKind::AlreadyDeclared,
                scope,
                error.to_string(),
                var.name.span,
            );
        }
    }

    fn check_interface(&mut self, statement: &InterfaceStatement, scope: ScopeId) {
        let name = &statement.name.name;
        // Registered empty first so method signatures can name the interface.
        let placeholder = Type::Interface(InterfaceType {
            name: name.clone(),
            methods: Vec::new(),
        });
        let registered = match self.env.declare_type(scope, name, placeholder) {
            Ok(()) => true,
            Err(error) => {
                self.report(
                    ErrorKind::AlreadyDeclared,
                    scope,
                    error.to_string(),
                    statement.name.span,
                );
                false
            }
        };

        let interface = self.build_interface(name, &statement.declaration, scope);
        if registered {
            self.env.replace_type(scope, name, Type::Interface(interface));
        }
    }

    fn check_block(&mut self, block: &Block, scope: ScopeId) {
        let mark = self.env.mark();
        let child = self.env.push_scope(scope, ScopeKind::Block, "block");
        self.check_statements(&block.statements, child);
        self.env.truncate(mark);
    }

    fn infer_expression(&mut self, expression: &Expression, scope: ScopeId) -> Type {
        match &expression.kind {
            ExpressionKind::Identifier(identifier) => {
                match self.env.resolve(scope, &identifier.name) {
                    Ok(owner) => self
                        .env
                        .binding_type(owner, &identifier.name)
                        .cloned()
                        .unwrap_or(Type::Unknown),
                    Err(error) => {
                        self.report(
                            ErrorKind::NotDeclared,
                            scope,
                            error.to_string(),
                            identifier.span,
                        );
                        Type::Unknown
                    }
                }
            }
            ExpressionKind::Literal(literal) => self.type_from_literal(literal),
            ExpressionKind::Array(literal) => self.type_from_array(literal, expression.span, scope),
            ExpressionKind::Map(literal) => self.type_from_map(literal, expression.span, scope),
            ExpressionKind::Index(index) => self.type_from_index(index, scope),
            ExpressionKind::Assignment(assignment) => {
                self.type_from_assignment(assignment, expression.span, scope)
            }
            ExpressionKind::Grouping(inner) => self.infer_expression(inner, scope),
        }
    }

    fn type_from_literal(&self, literal: &Literal) -> Type {
        match literal {
            Literal::Integer(_) => Type::Integer(self.options.integer_literal),
            Literal::Float(_) => Type::float(self.options.float_literal_bits),
            Literal::String(_) => Type::String,
            Literal::Char(_) => Type::Char,
            Literal::Boolean(_) => Type::Boolean,
            Literal::Null => Type::Null,
        }
    }

    fn type_from_assignment(
        &mut self,
        assignment: &AssignmentExpression,
        _span: SourceSpan,
        scope: ScopeId,
    ) -> Type {
        let target = &assignment.target;
        match &target.kind {
            ExpressionKind::Identifier(identifier) => {
                let value_type = self.infer_expression(&assignment.value, scope);
                let owner = match self.env.resolve(scope, &identifier.name) {
                    Ok(owner) => owner,
                    Err(error) => {
                        self.report(
                            ErrorKind::NotDeclared,
                            scope,
                            error.to_string(),
                            identifier.span,
                        );
                        return Type::Unknown;
                    }
                };

                let target_type = self
                    .env
                    .binding_type(owner, &identifier.name)
                    .cloned()
                    .unwrap_or(Type::Unknown);

                if self.env.is_const(owner, &identifier.name) {
                    self.report(
                        ErrorKind::ConstAssignment,
                        scope,
                        format!("cannot assign to constant '{}'", identifier.name),
                        target.span,
                    );
                    return target_type;
                }

                if target_type.is_unknown() {
                    if value_type.is_unknown() {
                        return Type::Unknown;
                    }
                    if let Err(error) = self.env.rebind(owner, &identifier.name, value_type.clone())
                    {
                        self.report(
                            ErrorKind::NotDeclared,
                            scope,
                            error.to_string(),
                            identifier.span,
                        );
                    }
                    return value_type;
                }

                if let Err(mismatch) = match_types(&target_type, &value_type) {
                    self.report(
                        ErrorKind::TypeMismatch,
                        scope,
                        mismatch.to_string(),
                        assignment.value.span,
                    );
                }
                target_type
            }
            ExpressionKind::Index(index) => {
                let target_type = self.type_from_index(index, scope);
                let value_type = self.infer_expression(&assignment.value, scope);
                if let Err(mismatch) = match_types(&target_type, &value_type) {
                    self.report(
                        ErrorKind::TypeMismatch,
                        scope,
                        mismatch.to_string(),
                        assignment.value.span,
                    );
                }
                target_type
            }
            _ => {
                self.infer_expression(&assignment.value, scope);
                self.report(
                    ErrorKind::InvalidAssignmentTarget,
                    scope,
                    "invalid assignment target",
                    target.span,
                );
                Type::Unknown
            }
        }
    }
}
