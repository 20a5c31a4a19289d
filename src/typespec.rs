//! A self-contained structural type representation and its provider.
//!
//! [`TypeSpec`] is a tagged tree with one variant per constructor shape of the
//! ILAsm type grammar. [`TypeSpecProvider`] implements
//! [`crate::syntax::TypeProvider`] over it, giving the crate a concrete
//! backend that needs no metadata writer: parse syntax into a `TypeSpec`,
//! inspect or rewrite it, and render it back to canonical ILAsm text via
//! [`std::fmt::Display`].
//!
//! # Example
//!
//! ```rust
//! use ilweave::{syntax::parse_type, typespec::{TypeSpec, TypeSpecProvider}};
//!
//! let parsed = parse_type("class [mscorlib]System.String", &TypeSpecProvider)?;
//! let built = TypeSpec::reference_type(Some("mscorlib"), "System", "String");
//! assert_eq!(parsed, built);
//! assert_eq!(built.to_string(), "class [mscorlib]System.String");
//! # Ok::<(), ilweave::Error>(())
//! ```

use std::fmt;

use crate::{
    syntax::{PrimitiveTypeCode, TypeProvider},
    Error, Result,
};

/// A user-defined type reference: resolution scope, dotted namespace,
/// top-level name, and nested-type chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedType {
    /// `Some(true)` for `valuetype`, `Some(false)` for `class`, `None` when
    /// the reference came from a bare type-spec owner.
    pub is_value_type: Option<bool>,
    /// Assembly moniker of the resolution scope, if the reference was
    /// `[moniker]`-qualified.
    pub assembly: Option<String>,
    /// Dotted namespace; empty for the global namespace.
    pub namespace: String,
    /// Top-level type name.
    pub name: String,
    /// Nested type names, outermost first; each may itself contain dots.
    pub nested: Vec<String>,
}

/// A structural ILAsm type tree.
///
/// One variant per constructor shape of the grammar. Postfix constructors
/// (`ByRef`, `Pointer`, `Pinned`, `Array`, `GenericInstantiation`) box their
/// element, so arbitrarily nested compositions are cheap to move around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSpec {
    /// A generic type parameter `!n`.
    GenericTypeParameter(u32),
    /// A generic method parameter `!!n`.
    GenericMethodParameter(u32),
    /// A primitive type keyword.
    Primitive(PrimitiveTypeCode),
    /// A user-defined type reference.
    Named(NamedType),
    /// A by-reference type `T&`.
    ByRef(Box<TypeSpec>),
    /// A pointer type `T*`.
    Pointer(Box<TypeSpec>),
    /// A pinned type `T pinned`.
    Pinned(Box<TypeSpec>),
    /// An array type `T[]` / `T[,]` / ... with the given rank.
    Array {
        /// Element type of the array.
        element: Box<TypeSpec>,
        /// Number of dimensions, at least 1.
        rank: u32,
    },
    /// A generic instantiation `T<A, B, ...>`.
    GenericInstantiation {
        /// The generic type definition being instantiated.
        definition: Box<TypeSpec>,
        /// Type arguments; never empty.
        arguments: Vec<TypeSpec>,
    },
}

impl TypeSpec {
    /// A `class` reference with an optional assembly moniker.
    #[must_use]
    pub fn reference_type(assembly: Option<&str>, namespace: &str, name: &str) -> TypeSpec {
        TypeSpec::Named(NamedType {
            is_value_type: Some(false),
            assembly: assembly.map(str::to_string),
            namespace: namespace.to_string(),
            name: name.to_string(),
            nested: Vec::new(),
        })
    }

    /// A `valuetype` reference with an optional assembly moniker.
    #[must_use]
    pub fn value_type(assembly: Option<&str>, namespace: &str, name: &str) -> TypeSpec {
        TypeSpec::Named(NamedType {
            is_value_type: Some(true),
            assembly: assembly.map(str::to_string),
            namespace: namespace.to_string(),
            name: name.to_string(),
            nested: Vec::new(),
        })
    }

    /// Instantiate this type with the given generic arguments.
    ///
    /// The grammar guarantees parsed instantiations carry at least one
    /// argument; hand-built ones must do the same.
    #[must_use]
    pub fn with_generic_arguments(self, arguments: Vec<TypeSpec>) -> TypeSpec {
        debug_assert!(!arguments.is_empty(), "generic instantiation without arguments");
        TypeSpec::GenericInstantiation {
            definition: Box::new(self),
            arguments,
        }
    }

    /// An array of this type with the given rank.
    #[must_use]
    pub fn array(self, rank: u32) -> TypeSpec {
        TypeSpec::Array {
            element: Box::new(self),
            rank,
        }
    }

    /// A by-reference of this type.
    #[must_use]
    pub fn byref(self) -> TypeSpec {
        TypeSpec::ByRef(Box::new(self))
    }
}

impl fmt::Display for TypeSpec {
    /// Renders canonical ILAsm syntax, parseable back into an equal tree.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeSpec::GenericTypeParameter(index) => write!(f, "!{index}"),
            TypeSpec::GenericMethodParameter(index) => write!(f, "!!{index}"),
            TypeSpec::Primitive(code) => f.write_str(code.keyword()),

            TypeSpec::Named(named) => {
                match named.is_value_type {
                    Some(true) => f.write_str("valuetype ")?,
                    Some(false) => f.write_str("class ")?,
                    None => {}
                }
                if let Some(assembly) = &named.assembly {
                    write!(f, "[{assembly}]")?;
                }
                if !named.namespace.is_empty() {
                    write!(f, "{}.", named.namespace)?;
                }
                f.write_str(&named.name)?;
                for nested in &named.nested {
                    write!(f, "/{nested}")?;
                }
                Ok(())
            }

            TypeSpec::ByRef(element) => write!(f, "{element}&"),
            TypeSpec::Pointer(element) => write!(f, "{element}*"),
            TypeSpec::Pinned(element) => write!(f, "{element} pinned"),

            TypeSpec::Array { element, rank } => {
                write!(f, "{element}[")?;
                for _ in 1..*rank {
                    f.write_str(",")?;
                }
                f.write_str("]")
            }

            TypeSpec::GenericInstantiation {
                definition,
                arguments,
            } => {
                write!(f, "{definition}<")?;
                for (index, argument) in arguments.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{argument}")?;
                }
                f.write_str(">")
            }
        }
    }
}

/// [`TypeProvider`] implementation producing [`TypeSpec`] trees.
///
/// Purely structural: no operation can fail except a generic instantiation
/// handed an empty argument list.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeSpecProvider;

impl TypeProvider for TypeSpecProvider {
    type Type = TypeSpec;

    fn generic_type_parameter(&self, index: u32) -> Result<TypeSpec> {
        Ok(TypeSpec::GenericTypeParameter(index))
    }

    fn generic_method_parameter(&self, index: u32) -> Result<TypeSpec> {
        Ok(TypeSpec::GenericMethodParameter(index))
    }

    fn primitive_type(&self, code: PrimitiveTypeCode) -> Result<TypeSpec> {
        Ok(TypeSpec::Primitive(code))
    }

    fn user_defined_type(
        &self,
        is_value_type: Option<bool>,
        assembly: Option<&str>,
        namespace: &str,
        name: &str,
        nested: &[String],
    ) -> Result<TypeSpec> {
        Ok(TypeSpec::Named(NamedType {
            is_value_type,
            assembly: assembly.map(str::to_string),
            namespace: namespace.to_string(),
            name: name.to_string(),
            nested: nested.to_vec(),
        }))
    }

    fn byref_type(&self, element: TypeSpec) -> Result<TypeSpec> {
        Ok(TypeSpec::ByRef(Box::new(element)))
    }

    fn pointer_type(&self, element: TypeSpec) -> Result<TypeSpec> {
        Ok(TypeSpec::Pointer(Box::new(element)))
    }

    fn pinned_type(&self, element: TypeSpec) -> Result<TypeSpec> {
        Ok(TypeSpec::Pinned(Box::new(element)))
    }

    fn array_type(&self, element: TypeSpec, rank: u32) -> Result<TypeSpec> {
        Ok(TypeSpec::Array {
            element: Box::new(element),
            rank,
        })
    }

    fn generic_instantiation(
        &self,
        definition: TypeSpec,
        arguments: Vec<TypeSpec>,
    ) -> Result<TypeSpec> {
        if arguments.is_empty() {
            return Err(Error::Argument { param: "arguments" });
        }
        Ok(TypeSpec::GenericInstantiation {
            definition: Box::new(definition),
            arguments,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::parse_type;

    fn roundtrip(syntax: &str) {
        let spec = parse_type(syntax, &TypeSpecProvider).unwrap();
        assert_eq!(spec.to_string(), syntax);
        let again = parse_type(&spec.to_string(), &TypeSpecProvider).unwrap();
        assert_eq!(again, spec);
    }

    #[test]
    fn canonical_rendering_roundtrips() {
        roundtrip("void");
        roundtrip("native unsigned int");
        roundtrip("!2");
        roundtrip("!!0");
        roundtrip("bool[,][][,,]");
        roundtrip("int32*&");
        roundtrip("string pinned");
        roundtrip("class [mscorlib]System.Collections.Generic.Dictionary`2<string, string>");
        roundtrip("valuetype A.B.C/D.E.F/G.H.I");
        roundtrip("class Foo/X<bool, class [a]Some.Namespace.Bar[,]<!0>>");
    }

    #[test]
    fn builders_match_parsed_structure() {
        let built = TypeSpec::reference_type(Some("corelib"), "System.Collections.Generic", "List`1")
            .with_generic_arguments(vec![TypeSpec::Primitive(PrimitiveTypeCode::I4)])
            .array(1);

        let parsed = parse_type(
            "class [corelib]System.Collections.Generic.List`1<int32>[]",
            &TypeSpecProvider,
        )
        .unwrap();

        assert_eq!(built, parsed);
    }

    #[test]
    fn bare_owner_renders_without_keyword() {
        let named = TypeSpec::Named(NamedType {
            is_value_type: None,
            assembly: None,
            namespace: String::new(),
            name: "Handler".to_string(),
            nested: vec!["Inner".to_string()],
        });
        assert_eq!(named.to_string(), "Handler/Inner");
    }

    #[test]
    fn empty_generic_instantiation_is_rejected() {
        let definition = TypeSpec::reference_type(None, "", "Foo");
        let error = TypeSpecProvider
            .generic_instantiation(definition, Vec::new())
            .unwrap_err();
        assert!(matches!(error, Error::Argument { param: "arguments" }));
    }
}
