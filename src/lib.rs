// Copyright 2025 Johann Kempter
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// SPDX-License-Identifier: Apache-2.0

#![doc(html_no_source)]
#![deny(missing_docs)]
#![allow(dead_code)]

//! # ilweave
//!
//! A build-time framework for working with the ECMA-335 "ILAsm" textual notation,
//! built in pure Rust. `ilweave` decodes ILAsm type, field-reference, and
//! method-reference syntax into a caller-supplied type representation, and lowers
//! symbolic instruction sequences into flat, fully-resolved CIL instruction streams
//! plus exception-handler metadata - the two engines a weaver needs to synthesize
//! new executable code against symbolic member references instead of hand-built
//! metadata tokens.
//!
//! ## Features
//!
//! - **🔍 Complete ILAsm member grammar** - types, generics, arrays, nested types,
//!   assembly monikers, calling conventions, `.ctor`/`.cctor` special names
//! - **🧩 Backend-agnostic parsing** - the [`syntax::TypeProvider`] capability lets
//!   the same parser feed a formatting test double, the structural
//!   [`typespec::TypeSpec`] tree, or a real binary-metadata builder
//! - **⚡ Symbolic emission** - write instructions against labels and ILAsm member
//!   strings; a three-pass pipeline resolves regions, references, and branches
//! - **🛡️ Strict error taxonomy** - argument, format, not-supported, and structural
//!   lowering errors are never conflated
//!
//! ## Quick Start
//!
//! Add `ilweave` to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! ilweave = "0.1"
//! ```
//!
//! ### Using the Prelude
//!
//! ```rust
//! use ilweave::prelude::*;
//!
//! let ty = parse_type("class [mscorlib]System.String[]", &TypeSpecProvider)?;
//! assert_eq!(ty.to_string(), "class [mscorlib]System.String[]");
//! # Ok::<(), ilweave::Error>(())
//! ```
//!
//! ### Parsing member references
//!
//! ```rust
//! use ilweave::{syntax::parse_method_reference, typespec::TypeSpecProvider};
//!
//! let method = parse_method_reference(
//!     "instance void class System.ResolveEventHandler::.ctor(object, native int)",
//!     &TypeSpecProvider,
//! )?;
//! assert!(method.is_instance());
//! assert_eq!(method.method_name, ".ctor");
//! assert_eq!(method.parameters.len(), 2);
//! # Ok::<(), ilweave::Error>(())
//! ```
//!
//! ### Emitting instruction streams
//!
//! See the [`emit`] module documentation for the program model, the label
//! discipline, and the three-pass lowering contract.
//!
//! ## Architecture
//!
//! `ilweave` is organized into three modules:
//!
//! - [`syntax`] - Span, lexer, and the recursive-descent member-grammar parser,
//!   generic over the [`syntax::TypeProvider`] capability
//! - [`typespec`] - A self-contained structural backend that renders back to
//!   canonical ILAsm text
//! - [`emit`] - The symbolic program model and the lowering pipeline
//!
//! ## Standards Compliance
//!
//! The grammar and the instruction vocabulary follow the **ECMA-335
//! specification** (6th edition). Constructs the grammar recognizes but
//! deliberately does not implement (method pointers, custom modifiers,
//! vararg/unmanaged calling conventions, array bounds, `.module` scopes) are
//! rejected with [`Error::NotSupported`], never silently accepted.
//!
//! ## Error Handling
//!
//! All operations return [`Result<T, Error>`](Result):
//!
//! ```rust
//! use ilweave::{syntax::parse_type, typespec::TypeSpecProvider, Error};
//!
//! match parse_type("class Foo<", &TypeSpecProvider) {
//!     Err(Error::Format { message, .. }) => assert_eq!(message, "Expected valid type keyword."),
//!     other => panic!("expected a format error, got {other:?}"),
//! }
//! ```

#[macro_use]
mod error;

/// Convenient re-exports of the most commonly used types and traits.
///
/// # Example
///
/// ```rust
/// use ilweave::prelude::*;
///
/// let ty = parse_type("int32", &TypeSpecProvider)?;
/// assert_eq!(ty, TypeSpec::Primitive(PrimitiveTypeCode::I4));
/// # Ok::<(), ilweave::Error>(())
/// ```
pub mod prelude;

/// ILAsm member-syntax decoding: span, lexer, tokens, and the
/// provider-driven recursive-descent parser.
pub mod syntax;

/// A self-contained structural type representation implementing the
/// provider capability, with canonical ILAsm rendering.
pub mod typespec;

/// Symbolic CIL instruction-stream building: the program model, label
/// discipline, and the three-pass lowering pipeline.
pub mod emit;

pub use error::{Error, Result};
