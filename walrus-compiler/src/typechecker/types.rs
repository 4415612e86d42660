use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::environment::Scope;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntegerType {
    pub bits: u8,
    pub signed: bool,
}

impl IntegerType {
    pub const fn new(bits: u8, signed: bool) -> Self {
        Self { bits, signed }
    }

    pub fn is_supported_width(bits: u8) -> bool {
        matches!(bits, 8 | 16 | 32 | 64)
    }

    fn describe(&self) -> String {
        let prefix = if self.signed { 'i' } else { 'u' };
        format!("{prefix}{}", self.bits)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FnParam {
    pub name: String,
    pub is_optional: bool,
    pub ty: Type,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionType {
    pub params: Vec<FnParam>,
    pub return_type: Box<Type>,
}

impl FunctionType {
    pub fn new(params: Vec<FnParam>, return_type: Type) -> Self {
        Self {
            params,
            return_type: Box::new(return_type),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapType {
    pub key: Box<Type>,
    pub value: Box<Type>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructType {
    pub name: String,
    pub fields: HashMap<String, Type>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceType {
    pub name: String,
    pub methods: Vec<MethodDescriptor>,
}

impl InterfaceType {
    pub fn method(&self, name: &str) -> Option<&MethodDescriptor> {
        self.methods.iter().find(|method| method.name == name)
    }
}

/// A method signature inside an interface, together with the scope its
/// parameter and return types were resolved in.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDescriptor {
    pub name: String,
    pub function: FunctionType,
    pub scope: Scope,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Integer,
    Float,
    Char,
    String,
    Boolean,
    Null,
    Void,
    Function,
    Struct,
    Array,
    Map,
    Interface,
    Unknown,
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TypeKind::Integer => "int",
            TypeKind::Float => "float",
            TypeKind::Char => "char",
            TypeKind::String => "str",
            TypeKind::Boolean => "bool",
            TypeKind::Null => "null",
            TypeKind::Void => "void",
            TypeKind::Function => "fn",
            TypeKind::Struct => "struct",
            TypeKind::Array => "array",
            TypeKind::Map => "map",
            TypeKind::Interface => "interface",
            TypeKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Type {
    Integer(IntegerType),
    Float { bits: u8 },
    Char,
    String,
    Boolean,
    Null,
    Void,
    Function(FunctionType),
    Struct(StructType),
    Array(Box<Type>),
    Map(MapType),
    Interface(InterfaceType),
    /// Stands in for a value whose error has already been reported.
    Unknown,
}

impl Type {
    pub fn int(bits: u8, signed: bool) -> Self {
        Type::Integer(IntegerType::new(bits, signed))
    }

    pub fn i32() -> Self {
        Type::int(32, true)
    }

    /// Type produced by indexing a string.
    pub fn u8() -> Self {
        Type::int(8, false)
    }

    pub fn float(bits: u8) -> Self {
        Type::Float { bits }
    }

    pub fn array(element: Type) -> Self {
        Type::Array(Box::new(element))
    }

    pub fn map(key: Type, value: Type) -> Self {
        Type::Map(MapType {
            key: Box::new(key),
            value: Box::new(value),
        })
    }

    pub fn kind(&self) -> TypeKind {
        match self {
            Type::Integer(_) => TypeKind::Integer,
            Type::Float { .. } => TypeKind::Float,
            Type::Char => TypeKind::Char,
            Type::String => TypeKind::String,
            Type::Boolean => TypeKind::Boolean,
            Type::Null => TypeKind::Null,
            Type::Void => TypeKind::Void,
            Type::Function(_) => TypeKind::Function,
            Type::Struct(_) => TypeKind::Struct,
            Type::Array(_) => TypeKind::Array,
            Type::Map(_) => TypeKind::Map,
            Type::Interface(_) => TypeKind::Interface,
            Type::Unknown => TypeKind::Unknown,
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Type::Integer(_))
    }

    pub fn is_interface(&self) -> bool {
        matches!(self, Type::Interface(_))
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Type::Unknown)
    }

    pub fn describe(&self) -> String {
        match self {
            Type::Integer(integer) => integer.describe(),
            Type::Float { bits } => format!("f{bits}"),
            Type::Char => "char".to_string(),
            Type::String => "str".to_string(),
            Type::Boolean => "bool".to_string(),
            Type::Null => "null".to_string(),
            Type::Void => "void".to_string(),
            Type::Function(function) => {
                let params = function
                    .params
                    .iter()
                    .map(|param| {
                        if param.is_optional {
                            format!("{}?", param.ty.describe())
                        } else {
                            param.ty.describe()
                        }
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("fn({params}) -> {}", function.return_type.describe())
            }
            Type::Struct(struct_type) => struct_type.name.clone(),
            Type::Array(element) => format!("[]{}", element.describe()),
            Type::Map(map) => format!("map[{}]{}", map.key.describe(), map.value.describe()),
            Type::Interface(interface) => interface.name.clone(),
            Type::Unknown => "unknown".to_string(),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
