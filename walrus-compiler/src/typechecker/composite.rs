//! Array literals, map literals and `container[index]`.
//!
//! Each check reports what it finds and still hands back a complete type so
//! the surrounding expression keeps checking.

use tracing::trace;

use crate::ast::{ArrayLiteral, IndexExpression, MapLiteral, SourceSpan};
use crate::diagnostics::ErrorKind;
use crate::options::EmptyArrayPolicy;

use super::compatibility::match_types;
use super::environment::ScopeId;
use super::types::Type;
use super::TypeChecker;

impl TypeChecker {
    /// The first element fixes the element type; later elements are matched
    /// against it one by one.
    pub(super) fn type_from_array(
        &mut self,
        literal: &ArrayLiteral,
        span: SourceSpan,
        scope: ScopeId,
    ) -> Type {
        let mut elements = literal.elements.iter();
        let Some(first) = elements.next() else {
            return self.empty_array_type(span, scope);
        };

        let element_type = self.infer_expression(first, scope);
        for element in elements {
            let actual = self.infer_expression(element, scope);
            if let Err(mismatch) = match_types(&element_type, &actual) {
                self.report(
                    ErrorKind::TypeMismatch,
                    scope,
                    format!("incorrect array element. {mismatch}"),
                    element.span,
                );
            }
        }

        trace!(element = %element_type, len = literal.elements.len(), "array literal");
        Type::array(element_type)
    }

    fn empty_array_type(&mut self, span: SourceSpan, scope: ScopeId) -> Type {
        match self.options.empty_array {
            EmptyArrayPolicy::Unknown => Type::array(Type::Unknown),
            EmptyArrayPolicy::Void => Type::array(Type::Void),
            EmptyArrayPolicy::Reject => {
                self.report(
                    ErrorKind::EmptyArrayLiteral,
                    scope,
                    "cannot infer the element type of an empty array literal",
                    span,
                );
                Type::array(Type::Unknown)
            }
        }
    }

    /// The annotation decides the type; entries are only validated against it.
    pub(super) fn type_from_map(
        &mut self,
        literal: &MapLiteral,
        _span: SourceSpan,
        scope: ScopeId,
    ) -> Type {
        let declared = self.resolve_type_expression(&literal.map_type, scope);
        let (key_type, value_type) = match &declared {
            Type::Map(map) => ((*map.key).clone(), (*map.value).clone()),
            Type::Unknown => (Type::Unknown, Type::Unknown),
            other => {
                self.report(
                    ErrorKind::TypeMismatch,
                    scope,
                    format!("expected a map type, got `{other}`"),
                    literal.map_type.span,
                );
                (Type::Unknown, Type::Unknown)
            }
        };

        for entry in &literal.entries {
            let actual_key = self.infer_expression(&entry.key, scope);
            if let Err(mismatch) = match_types(&key_type, &actual_key) {
                self.report(
                    ErrorKind::TypeMismatch,
                    scope,
                    format!("incorrect map key. {mismatch}"),
                    entry.key.span,
                );
            }

            let actual_value = self.infer_expression(&entry.value, scope);
            if let Err(mismatch) = match_types(&value_type, &actual_value) {
                self.report(
                    ErrorKind::TypeMismatch,
                    scope,
                    format!("incorrect map value. {mismatch}"),
                    entry.value.span,
                );
            }
        }

        if matches!(declared, Type::Map(_)) {
            declared
        } else {
            Type::map(Type::Unknown, Type::Unknown)
        }
    }

    pub(super) fn type_from_index(&mut self, index: &IndexExpression, scope: ScopeId) -> Type {
        let container_type = self.infer_expression(&index.container, scope);
        let index_type = self.infer_expression(&index.index, scope);

        match container_type {
            Type::Array(element_type) => {
                self.require_integer_index(&index_type, "array", index.index.span, scope);
                *element_type
            }
            Type::String => {
                self.require_integer_index(&index_type, "str", index.index.span, scope);
                Type::u8()
            }
            Type::Map(map) => {
                if map.key.is_interface() {
                    self.report(
                        ErrorKind::InterfaceKeyNotIndexable,
                        scope,
                        format!("cannot index a map with interface key type '{}'", map.key),
                        index.index.span,
                    );
                } else if let Err(mismatch) = match_types(&map.key, &index_type) {
                    self.report(
                        ErrorKind::TypeMismatch,
                        scope,
                        format!("incorrect map key. {mismatch}"),
                        index.index.span,
                    );
                }
                *map.value
            }
            Type::Unknown => Type::Unknown,
            other => {
                self.report_critical(
                    ErrorKind::NotIndexable,
                    scope,
                    format!("cannot access index of type {other}"),
                    index.container.span,
                );
                Type::Unknown
            }
        }
    }

    fn require_integer_index(
        &mut self,
        index_type: &Type,
        container: &str,
        span: SourceSpan,
        scope: ScopeId,
    ) {
        if index_type.is_integer() || index_type.is_unknown() {
            return;
        }
        self.report(
            ErrorKind::InvalidIndexType,
            scope,
            format!("cannot use type '{index_type}' to index {container}"),
            span,
        );
    }
}
