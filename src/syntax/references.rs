//! Field and method reference aggregates produced by the parser.

use bitflags::bitflags;

bitflags! {
    /// Calling-convention flags of a parsed method reference.
    ///
    /// The bit values mirror the ECMA-335 calling-convention byte, so a
    /// metadata backend can combine them into a real signature header
    /// without translation.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MethodCallingConvention: u8 {
        /// The method has a `this` pointer (`instance` keyword).
        const HAS_THIS = 0x20;

        /// The `this` pointer is passed explicitly as the first parameter
        /// (`instance explicit` keywords).
        const EXPLICIT_THIS = 0x40;
    }
}

/// A parsed ILAsm field reference: `FieldType DeclaringType::field_name`.
///
/// A read-only value aggregate with no lifecycle beyond the parse call that
/// produced it. The type representation `T` comes from the caller's
/// [`crate::syntax::TypeProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldReference<T> {
    /// The declared type of the field.
    pub field_type: T,
    /// The type that declares the field.
    pub declaring_type: T,
    /// The field name.
    pub field_name: String,
}

/// A parsed ILAsm method reference:
/// `[instance [explicit]] ReturnType DeclaringType::Name[<GenericArgs>](Params)`.
///
/// A read-only value aggregate with no lifecycle beyond the parse call that
/// produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodReference<T> {
    /// Calling-convention flags parsed from the leading keywords.
    pub calling_convention: MethodCallingConvention,
    /// The method return type.
    pub return_type: T,
    /// The type that declares the method.
    pub declaring_type: T,
    /// The method name: `.ctor`, `.cctor`, or a dotted identifier.
    pub method_name: String,
    /// Generic method arguments (`Name<...>`), empty for non-generic calls.
    pub generic_arguments: Vec<T>,
    /// Parameter types, in declaration order.
    pub parameters: Vec<T>,
}

impl<T> MethodReference<T> {
    /// Returns `true` when the reference was declared `instance`.
    #[must_use]
    pub fn is_instance(&self) -> bool {
        self.calling_convention
            .contains(MethodCallingConvention::HAS_THIS)
    }

    /// Returns `true` when the reference was declared `instance explicit`.
    #[must_use]
    pub fn is_explicit_instance(&self) -> bool {
        self.calling_convention
            .contains(MethodCallingConvention::EXPLICIT_THIS)
    }
}
