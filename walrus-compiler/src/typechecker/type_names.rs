use crate::ast::{TypeExpression, TypeExpressionKind};
use crate::diagnostics::ErrorKind;

use super::environment::ScopeId;
use super::types::{FnParam, FunctionType, Type};
use super::TypeChecker;

fn builtin_type(name: &str) -> Option<Type> {
    let ty = match name {
        "i8" => Type::int(8, true),
        "i16" => Type::int(16, true),
        "i32" => Type::int(32, true),
        "i64" => Type::int(64, true),
        "u8" => Type::int(8, false),
        "u16" => Type::int(16, false),
        "u32" => Type::int(32, false),
        "u64" => Type::int(64, false),
        "f32" => Type::float(32),
        "f64" => Type::float(64),
        "char" => Type::Char,
        "str" => Type::String,
        "bool" => Type::Boolean,
        "null" => Type::Null,
        "void" => Type::Void,
        _ => return None,
    };
    Some(ty)
}

impl TypeChecker {
    pub(super) fn resolve_type_expression(
        &mut self,
        annotation: &TypeExpression,
        scope: ScopeId,
    ) -> Type {
        match &annotation.kind {
            TypeExpressionKind::Named(name) => {
                if let Some(ty) = builtin_type(name) {
                    return ty;
                }
                if let Some(ty) = self.env.resolve_type(scope, name) {
                    return ty.clone();
                }
                self.report(
                    ErrorKind::UndefinedType,
                    scope,
                    format!("undefined type '{name}'"),
                    annotation.span,
                );
                Type::Unknown
            }
            TypeExpressionKind::Array(element) => {
                Type::array(self.resolve_type_expression(element, scope))
            }
            TypeExpressionKind::Map { key, value } => {
                let key = self.resolve_type_expression(key, scope);
                let value = self.resolve_type_expression(value, scope);
                Type::map(key, value)
            }
            TypeExpressionKind::Function {
                parameters,
                return_type,
            } => {
                let params = parameters
                    .iter()
                    .map(|parameter| FnParam {
                        name: String::new(),
                        is_optional: false,
                        ty: self.resolve_type_expression(parameter, scope),
                    })
                    .collect();
                let return_type = match return_type {
                    Some(return_type) => self.resolve_type_expression(return_type, scope),
                    None => Type::Void,
                };
                Type::Function(FunctionType::new(params, return_type))
            }
        }
    }
}
