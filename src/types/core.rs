//! Core type expressions
//!
//! Parameter and field types in the DSL are single tokens:
//! - `int`, `float`, ... primitive keywords
//! - `arr_<elem>_<dim1>_<dim2>...` arrays (`arr` alone is an untyped sequence)
//! - `struct_<Name>` structures
//! - a leading `&` marks a by-reference parameter

use serde::Serialize;

/// Marker for by-reference parameters
pub const BY_REF: char = '&';

/// Type written in a parameter, field or loop variable position
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TypeExpr {
    /// Primitive keyword, or a bare user type name
    Named(String),
    /// Array with optional element type and known dimensions
    Array {
        element: Option<String>,
        dims: Vec<String>,
    },
    /// Structure declared with `struct`
    Struct(String),
}

impl TypeExpr {
    /// Parse a type token (without the by-reference marker)
    pub fn parse(token: &str) -> Self {
        if let Some(rest) = token.strip_prefix("arr") {
            if rest.is_empty() || rest.starts_with('_') {
                let mut parts = rest.split('_').filter(|part| !part.is_empty());
                let element = parts.next().map(str::to_string);
                let dims = parts.map(str::to_string).collect();
                return TypeExpr::Array { element, dims };
            }
        }
        if let Some(name) = token.strip_prefix("struct_") {
            return TypeExpr::Struct(name.to_string());
        }
        TypeExpr::Named(token.to_string())
    }
}

/// A parameter type with its by-reference flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParamType {
    pub by_ref: bool,
    pub expr: TypeExpr,
}

impl ParamType {
    pub fn parse(token: &str) -> Self {
        match token.strip_prefix(BY_REF) {
            Some(rest) => Self {
                by_ref: true,
                expr: TypeExpr::parse(rest),
            },
            None => Self {
                by_ref: false,
                expr: TypeExpr::parse(token),
            },
        }
    }
}

/// A typed name: function parameter, structure field or loop variable
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    pub name: String,
    pub ty: ParamType,
}

impl Param {
    /// Build from a `type name` pair; `&` may sit on either token
    pub fn from_pair(ty: &str, name: &str) -> Self {
        let mut ty = ParamType::parse(ty);
        let name = match name.strip_prefix(BY_REF) {
            Some(stripped) => {
                ty.by_ref = true;
                stripped
            }
            None => name,
        };
        Self {
            name: name.to_string(),
            ty,
        }
    }
}

/// Read `type name` pairs, dropping a trailing unpaired token
pub fn parse_params(tokens: &[String]) -> Vec<Param> {
    tokens
        .chunks_exact(2)
        .map(|pair| Param::from_pair(&pair[0], &pair[1]))
        .collect()
}

/// Function or procedure header
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Signature {
    pub name: String,
    /// `None` for procedures
    pub returns: Option<TypeExpr>,
    pub params: Vec<Param>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_array_type() {
        assert_eq!(
            TypeExpr::parse("arr_int_3_3"),
            TypeExpr::Array {
                element: Some("int".into()),
                dims: vec!["3".into(), "3".into()],
            }
        );
        assert_eq!(
            TypeExpr::parse("arr"),
            TypeExpr::Array {
                element: None,
                dims: vec![],
            }
        );
    }

    #[test]
    fn test_arr_prefix_needs_separator() {
        // `arrow` is a user type, not an array
        assert_eq!(TypeExpr::parse("arrow"), TypeExpr::Named("arrow".into()));
    }

    #[test]
    fn test_parse_struct_type() {
        assert_eq!(
            TypeExpr::parse("struct_Flower"),
            TypeExpr::Struct("Flower".into())
        );
    }

    #[test]
    fn test_by_ref_on_type_or_name() {
        let a = Param::from_pair("&int", "total");
        let b = Param::from_pair("int", "&total");
        assert_eq!(a, b);
        assert!(a.ty.by_ref);
        assert_eq!(a.name, "total");
    }

    #[test]
    fn test_parse_params_drops_odd_trailing_token() {
        let tokens: Vec<String> = ["int", "a", "float", "b", "char"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let params = parse_params(&tokens);
        assert_eq!(params.len(), 2);
        assert_eq!(params[1].name, "b");
    }
}
