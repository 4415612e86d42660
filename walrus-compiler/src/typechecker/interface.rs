use tracing::debug;

use crate::ast::InterfaceDeclaration;
use crate::diagnostics::ErrorKind;

use super::environment::{ScopeId, ScopeKind};
use super::types::{FnParam, FunctionType, InterfaceType, MethodDescriptor, Type};
use super::TypeChecker;

impl TypeChecker {
    /// Every method gets its own scope under `scope`. Duplicate parameters and
    /// duplicate methods are reported but still recorded, so the result always
    /// lists every signature in source order.
    pub(super) fn build_interface(
        &mut self,
        name: &str,
        declaration: &InterfaceDeclaration,
        scope: ScopeId,
    ) -> InterfaceType {
        debug!(
            interface = name,
            methods = declaration.methods.len(),
            "declare interface"
        );

        let mark = self.env.mark();
        let mut methods: Vec<MethodDescriptor> = Vec::with_capacity(declaration.methods.len());

        for signature in &declaration.methods {
            let method_name = &signature.name.name;
            let method_scope = self.env.push_scope(scope, ScopeKind::Method, method_name);

            let mut params: Vec<FnParam> = Vec::with_capacity(signature.parameters.len());
            for parameter in &signature.parameters {
                let param_name = &parameter.name.name;
                let ty = self.resolve_type_expression(&parameter.type_annotation, method_scope);

                if params.iter().any(|existing| &existing.name == param_name) {
                    self.report_critical(
                        ErrorKind::DuplicateParameter,
                        method_scope,
                        format!(
                            "parameter '{param_name}' is already defined for method '{method_name}'"
                        ),
                        parameter.name.span,
                    );
                } else {
                    // The method scope is fresh and duplicates are caught above.
                    let _ = self
                        .env
                        .declare(method_scope, param_name, ty.clone(), false);
                }

                params.push(FnParam {
                    name: param_name.clone(),
                    is_optional: parameter.is_optional,
                    ty,
                });
            }

            let return_type = match &signature.return_type {
                Some(annotation) => self.resolve_type_expression(annotation, method_scope),
                None => Type::Void,
            };

            if methods.iter().any(|method| &method.name == method_name) {
                self.report_critical(
                    ErrorKind::DuplicateMethod,
                    method_scope,
                    format!("method '{method_name}' already exists in interface '{name}'"),
                    signature.name.span,
                );
            }

            methods.push(MethodDescriptor {
                name: method_name.clone(),
                function: FunctionType::new(params, return_type),
                scope: self.env.snapshot(method_scope),
            });
        }

        self.env.truncate(mark);
        InterfaceType {
            name: name.to_string(),
            methods,
        }
    }
}
