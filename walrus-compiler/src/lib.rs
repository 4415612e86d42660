mod ast;
mod compiler;
mod diagnostics;
mod options;
mod source;
mod typechecker;

pub use crate::ast::{
    ArrayLiteral, AssignmentExpression, Block, Expression, ExpressionKind, ExpressionStatement,
    Identifier, IndexExpression, InterfaceDeclaration, InterfaceStatement, Literal, MapEntry,
    MapLiteral, MethodSignature, Module, Parameter, SourceSpan, Statement, TypeExpression,
    TypeExpressionKind, VarStatement,
};
pub use crate::compiler::{Compilation, CompileOptions, Compiler};
pub use crate::diagnostics::{Diagnostic, Diagnostics, Dropped, ErrorKind, Severity};
pub use crate::options::{AnalyzerOptions, EmptyArrayPolicy, OptionsError};
pub use crate::source::{SourceFile, SourceId};
pub use crate::typechecker::{
    match_types, Checked, DeclarationError, FnParam, FunctionType, IntegerType, InterfaceType,
    MapType, MethodDescriptor, ResolutionError, Scope, ScopeId, ScopeKind, StructType, Type,
    TypeChecker, TypeEnvironment, TypeKind, TypeMismatch, Typed,
};
