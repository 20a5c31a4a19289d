//! # ilweave Prelude
//!
//! This module provides a convenient prelude for the most commonly used types
//! and traits of the library. Import it to get quick access to the parsing
//! entry points, the provider capabilities, and the emission model.

// ================================================================================================
// Core Types and Error Handling
// ================================================================================================

/// The main error type for all ilweave operations
pub use crate::Error;

/// The result type used throughout ilweave
pub use crate::Result;

// ================================================================================================
// Syntax - Parsing Entry Points and Capabilities
// ================================================================================================

/// Parse entry points for types, field references, and method references
pub use crate::syntax::{parse_field_reference, parse_method_reference, parse_type};

/// The nine-operation type-provider capability
pub use crate::syntax::TypeProvider;

/// Primitive type codes shared between parser and providers
pub use crate::syntax::PrimitiveTypeCode;

/// Parsed member-reference aggregates and calling-convention flags
pub use crate::syntax::{FieldReference, MethodCallingConvention, MethodReference};

// ================================================================================================
// Structural Backend
// ================================================================================================

/// The structural type tree and its provider implementation
pub use crate::typespec::{NamedType, TypeSpec, TypeSpecProvider};

// ================================================================================================
// Emission - Program Model and Lowering
// ================================================================================================

/// The symbolic program model and try/finally builder
pub use crate::emit::{ProgramElement, TryBlock};

/// Element factory functions (`elements::ldarg`, `elements::call`, ...)
pub use crate::emit::elements;

/// Labels and their allocation pool
pub use crate::emit::{Label, LabelPool};

/// The concrete instruction model
pub use crate::emit::{FlowType, Immediate, Instruction, InstructionId, OpCode, Operand};

/// Metadata tokens and the member-resolution capability
pub use crate::emit::{MemberResolver, Token};

/// The lowering pipeline, its accumulating front-end, and its outputs
pub use crate::emit::{Emitter, ExceptionHandler, HandlerKind, LoweredProgram, ProgramBuilder};
