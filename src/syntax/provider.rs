//! The type-provider capability consumed by the parser.

use crate::{syntax::PrimitiveTypeCode, Result};

/// Factory capability through which the parser materializes types.
///
/// The parser never constructs type values itself: each grammar production
/// calls exactly one of these nine operations and threads the returned value
/// forward without inspecting or comparing it. Implementations choose the
/// output representation through the associated `Type` - a formatting double
/// for tests, the structural [`crate::typespec::TypeSpec`] tree, or a real
/// binary-metadata reference builder.
///
/// Operations return [`Result`] so backends can surface their own failures
/// (an unregistered assembly moniker, for example) through the common error
/// type; a purely structural backend never fails.
///
/// Implementations must be free of hidden state observable by the parser:
/// each operation is a pure function of its arguments.
pub trait TypeProvider {
    /// The type representation this provider produces.
    type Type;

    /// Produce a generic type parameter reference (`!n`).
    fn generic_type_parameter(&self, index: u32) -> Result<Self::Type>;

    /// Produce a generic method parameter reference (`!!n`).
    fn generic_method_parameter(&self, index: u32) -> Result<Self::Type>;

    /// Produce a primitive type from its type code.
    fn primitive_type(&self, code: PrimitiveTypeCode) -> Result<Self::Type>;

    /// Produce a user-defined type reference.
    ///
    /// `is_value_type` is `Some` when the reference was introduced by a
    /// `class`/`valuetype` keyword and `None` for a bare type-spec owner.
    /// `assembly` carries the resolution-scope moniker when the reference was
    /// `[moniker]`-qualified. `namespace` is the dotted namespace (empty for
    /// the global namespace), `name` the top-level type name, and `nested`
    /// the chain of nested type names ordered outermost first.
    fn user_defined_type(
        &self,
        is_value_type: Option<bool>,
        assembly: Option<&str>,
        namespace: &str,
        name: &str,
        nested: &[String],
    ) -> Result<Self::Type>;

    /// Produce a by-reference type (`T&`).
    fn byref_type(&self, element: Self::Type) -> Result<Self::Type>;

    /// Produce a pointer type (`T*`).
    fn pointer_type(&self, element: Self::Type) -> Result<Self::Type>;

    /// Produce a pinned type (`T pinned`).
    fn pinned_type(&self, element: Self::Type) -> Result<Self::Type>;

    /// Produce an array type of the given rank (`T[]`, `T[,]`, ...).
    ///
    /// The rank is the number of dimensions and is always at least 1.
    fn array_type(&self, element: Self::Type, rank: u32) -> Result<Self::Type>;

    /// Produce a generic instantiation (`T<A, B, ...>`).
    ///
    /// `arguments` is never empty: the grammar requires at least one argument.
    fn generic_instantiation(
        &self,
        definition: Self::Type,
        arguments: Vec<Self::Type>,
    ) -> Result<Self::Type>;
}
