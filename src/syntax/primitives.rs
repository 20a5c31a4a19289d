//! Primitive type codes shared between the parser and type providers.

use strum::EnumIter;

/// ECMA-335 primitive type codes, as used in the `ELEMENT_TYPE` encoding of
/// binary signatures.
///
/// This enum is the vocabulary the parser hands to
/// [`crate::syntax::TypeProvider::primitive_type`] when it recognizes a
/// primitive keyword. The discriminants are the exact byte codes of the
/// binary format, so backends that build real metadata can emit them
/// directly.
///
/// # Examples
///
/// ```rust
/// use ilweave::syntax::PrimitiveTypeCode;
///
/// assert_eq!(PrimitiveTypeCode::Void.code(), 0x01);
/// assert_eq!(PrimitiveTypeCode::Object.code(), 0x1C);
/// assert_eq!(PrimitiveTypeCode::U.keyword(), "native unsigned int");
/// ```
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum PrimitiveTypeCode {
    /// `void` - System.Void
    Void = 0x01,
    /// `bool` - System.Boolean
    Boolean = 0x02,
    /// `char` - System.Char
    Char = 0x03,
    /// `int8` - System.SByte
    I1 = 0x04,
    /// `unsigned int8` - System.Byte
    U1 = 0x05,
    /// `int16` - System.Int16
    I2 = 0x06,
    /// `unsigned int16` - System.UInt16
    U2 = 0x07,
    /// `int32` - System.Int32
    I4 = 0x08,
    /// `unsigned int32` - System.UInt32
    U4 = 0x09,
    /// `int64` - System.Int64
    I8 = 0x0A,
    /// `unsigned int64` - System.UInt64
    U8 = 0x0B,
    /// `float32` - System.Single
    R4 = 0x0C,
    /// `float64` - System.Double
    R8 = 0x0D,
    /// `string` - System.String
    String = 0x0E,
    /// `typedref` - System.TypedReference
    TypedReference = 0x16,
    /// `native int` - System.IntPtr
    I = 0x18,
    /// `native unsigned int` - System.UIntPtr
    U = 0x19,
    /// `object` - System.Object
    Object = 0x1C,
}

impl PrimitiveTypeCode {
    /// Returns the `ELEMENT_TYPE` byte code of this primitive.
    #[must_use]
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Returns the ILAsm keyword spelling that parses to this primitive.
    #[must_use]
    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveTypeCode::Void => "void",
            PrimitiveTypeCode::Boolean => "bool",
            PrimitiveTypeCode::Char => "char",
            PrimitiveTypeCode::I1 => "int8",
            PrimitiveTypeCode::U1 => "unsigned int8",
            PrimitiveTypeCode::I2 => "int16",
            PrimitiveTypeCode::U2 => "unsigned int16",
            PrimitiveTypeCode::I4 => "int32",
            PrimitiveTypeCode::U4 => "unsigned int32",
            PrimitiveTypeCode::I8 => "int64",
            PrimitiveTypeCode::U8 => "unsigned int64",
            PrimitiveTypeCode::R4 => "float32",
            PrimitiveTypeCode::R8 => "float64",
            PrimitiveTypeCode::String => "string",
            PrimitiveTypeCode::TypedReference => "typedref",
            PrimitiveTypeCode::I => "native int",
            PrimitiveTypeCode::U => "native unsigned int",
            PrimitiveTypeCode::Object => "object",
        }
    }
}
