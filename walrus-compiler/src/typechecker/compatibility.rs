use thiserror::Error;

use super::types::Type;

/// Rendered forms of the two sides of a failed comparison. The caller
/// attaches the span.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("expected `{expected}`, got `{actual}`")]
pub struct TypeMismatch {
    pub expected: String,
    pub actual: String,
}

impl TypeMismatch {
    pub fn new(expected: &Type, actual: &Type) -> Self {
        Self {
            expected: expected.describe(),
            actual: actual.describe(),
        }
    }
}

/// Structural compatibility of `actual` with `expected`.
///
/// Scalars compare exactly, with no widening between integer or float
/// widths. Arrays, maps and functions compare component-wise; parameter names
/// and optionality are ignored. Structs and interfaces compare by name.
/// `Unknown` on either side matches anything.
pub fn match_types(expected: &Type, actual: &Type) -> Result<(), TypeMismatch> {
    if compatible(expected, actual) {
        Ok(())
    } else {
        Err(TypeMismatch::new(expected, actual))
    }
}

fn compatible(expected: &Type, actual: &Type) -> bool {
    match (expected, actual) {
        (Type::Unknown, _) | (_, Type::Unknown) => true,
        (Type::Integer(expected), Type::Integer(actual)) => expected == actual,
        (Type::Float { bits: expected }, Type::Float { bits: actual }) => expected == actual,
        (Type::Char, Type::Char)
        | (Type::String, Type::String)
        | (Type::Boolean, Type::Boolean)
        | (Type::Null, Type::Null)
        | (Type::Void, Type::Void) => true,
        (Type::Array(expected), Type::Array(actual)) => compatible(expected, actual),
        (Type::Map(expected), Type::Map(actual)) => {
            compatible(&expected.key, &actual.key) && compatible(&expected.value, &actual.value)
        }
        (Type::Function(expected), Type::Function(actual)) => {
            expected.params.len() == actual.params.len()
                && expected
                    .params
                    .iter()
                    .zip(&actual.params)
                    .all(|(expected, actual)| compatible(&expected.ty, &actual.ty))
                && compatible(&expected.return_type, &actual.return_type)
        }
        (Type::Struct(expected), Type::Struct(actual)) => expected.name == actual.name,
        (Type::Interface(expected), Type::Interface(actual)) => expected.name == actual.name,
        _ => false,
    }
}
