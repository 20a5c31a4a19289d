//! ILAsm member-syntax decoding.
//!
//! This module implements the textual side of the crate: an allocation-free
//! [`Span`] over source text, a peekable [`Lexer`], and a recursive-descent
//! parser for the ECMA-335 ILAsm type, field-reference, and method-reference
//! grammar. The parser is generic over a [`TypeProvider`] capability and
//! produces whatever type representation the provider builds.
//!
//! # Key Types
//! - [`Span`] - Bounds-checked view over source text
//! - [`SyntaxToken`] - Classified tokens, keywords included
//! - [`Lexer`] - Tokenizer with one token of lookahead
//! - [`TypeProvider`] - Nine-operation factory capability
//! - [`PrimitiveTypeCode`] - ELEMENT_TYPE byte codes
//! - [`FieldReference`] / [`MethodReference`] - Parsed member aggregates
//!
//! # Main Functions
//! - [`parse_type`] - Decode a standalone type
//! - [`parse_field_reference`] - Decode a field reference
//! - [`parse_method_reference`] - Decode a method reference
//!
//! # Example
//! ```rust
//! use ilweave::syntax::parse_type;
//! use ilweave::typespec::TypeSpecProvider;
//!
//! let ty = parse_type("int32[,]&", &TypeSpecProvider)?;
//! assert_eq!(ty.to_string(), "int32[,]&");
//! # Ok::<(), ilweave::Error>(())
//! ```

mod lexer;
mod parser;
mod primitives;
mod provider;
mod references;
mod span;
mod token;

pub use lexer::Lexer;
pub use parser::{parse_field_reference, parse_method_reference, parse_type};
pub use primitives::PrimitiveTypeCode;
pub use provider::TypeProvider;
pub use references::{FieldReference, MethodCallingConvention, MethodReference};
pub use span::Span;
pub use token::SyntaxToken;
