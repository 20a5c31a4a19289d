//! Conformance tests for the ILAsm member-syntax parser.
//!
//! Type-grammar cases are checked through a call-tree formatting provider:
//! the expected value is built by invoking the same provider operations the
//! parser is required to make, so a test failure pinpoints the exact call
//! sequence that diverged. Member-reference cases use the structural
//! `TypeSpec` backend, which is easier to assert field-by-field.

use ilweave::syntax::{
    parse_field_reference, parse_method_reference, parse_type, PrimitiveTypeCode, TypeProvider,
};
use ilweave::typespec::{NamedType, TypeSpec, TypeSpecProvider};
use ilweave::{Error, Result};
use strum::IntoEnumIterator;

/// Formats every provider call as text, making the parser's call tree visible.
struct CallTreeProvider;

impl TypeProvider for CallTreeProvider {
    type Type = String;

    fn generic_type_parameter(&self, index: u32) -> Result<String> {
        Ok(format!("generic_type_parameter({index})"))
    }

    fn generic_method_parameter(&self, index: u32) -> Result<String> {
        Ok(format!("generic_method_parameter({index})"))
    }

    fn primitive_type(&self, code: PrimitiveTypeCode) -> Result<String> {
        Ok(format!("primitive_type({code:?})"))
    }

    fn user_defined_type(
        &self,
        is_value_type: Option<bool>,
        assembly: Option<&str>,
        namespace: &str,
        name: &str,
        nested: &[String],
    ) -> Result<String> {
        Ok(format!(
            "user_defined_type({is_value_type:?}, {assembly:?}, {namespace:?}, {name:?}, {nested:?})"
        ))
    }

    fn byref_type(&self, element: String) -> Result<String> {
        Ok(format!("byref_type({element})"))
    }

    fn pointer_type(&self, element: String) -> Result<String> {
        Ok(format!("pointer_type({element})"))
    }

    fn pinned_type(&self, element: String) -> Result<String> {
        Ok(format!("pinned_type({element})"))
    }

    fn array_type(&self, element: String, rank: u32) -> Result<String> {
        Ok(format!("array_type({element}, rank: {rank})"))
    }

    fn generic_instantiation(&self, definition: String, arguments: Vec<String>) -> Result<String> {
        Ok(format!(
            "generic_instantiation({definition}, [{}])",
            arguments.join(", ")
        ))
    }
}

const P: CallTreeProvider = CallTreeProvider;

fn assert_call_tree(syntax: &str, expected: &str) {
    assert_eq!(parse_type(syntax, &P).unwrap(), expected, "syntax: {syntax}");
}

fn format_message(result: Result<String>) -> String {
    match result {
        Err(Error::Format { message, .. }) => message,
        other => panic!("expected a format error, got {other:?}"),
    }
}

fn not_supported_feature(result: Result<String>) -> String {
    match result {
        Err(Error::NotSupported(feature)) => feature,
        other => panic!("expected a not-supported error, got {other:?}"),
    }
}

#[test]
fn argument_error_for_empty_and_whitespace_input() {
    for input in ["", " ", "\t", " \r\n "] {
        match parse_type(input, &P) {
            Err(Error::Argument { param }) => assert_eq!(param, "type_syntax"),
            other => panic!("expected an argument error for {input:?}, got {other:?}"),
        }

        match parse_field_reference(input, &TypeSpecProvider) {
            Err(Error::Argument { param }) => assert_eq!(param, "field_syntax"),
            other => panic!("expected an argument error for {input:?}, got {other:?}"),
        }

        match parse_method_reference(input, &TypeSpecProvider) {
            Err(Error::Argument { param }) => assert_eq!(param, "method_syntax"),
            other => panic!("expected an argument error for {input:?}, got {other:?}"),
        }
    }
}

#[test]
fn format_error_for_invalid_character() {
    format_message(parse_type("/", &P));
}

#[test]
fn generic_type_parameter_spellings_agree() {
    for index in [0u32, 1, u32::MAX] {
        let expected = P.generic_type_parameter(index).unwrap();
        assert_call_tree(&format!("!{index}"), &expected);
        assert_call_tree(&format!("!0x{index:x}"), &expected);
        assert_call_tree(&format!("!0x{index:X}"), &expected);
    }
}

#[test]
fn generic_method_parameter_spellings_agree() {
    for index in [0u32, 1, u32::MAX] {
        let expected = P.generic_method_parameter(index).unwrap();
        assert_call_tree(&format!("!!{index}"), &expected);
        assert_call_tree(&format!("!!0x{index:x}"), &expected);
        assert_call_tree(&format!("!!0x{index:X}"), &expected);
    }
}

#[test]
fn generic_parameter_requires_a_numeric_literal() {
    assert_eq!(
        format_message(parse_type("!x", &P)),
        "Expected numeric literal to follow '!'."
    );
    assert_eq!(
        format_message(parse_type("!!", &P)),
        "Expected numeric literal to follow '!!'."
    );
}

#[test]
fn every_primitive_keyword_maps_to_its_code() {
    for code in PrimitiveTypeCode::iter() {
        let expected = P.primitive_type(code).unwrap();
        assert_call_tree(code.keyword(), &expected);
    }
}

#[test]
fn by_reference() {
    assert_call_tree(
        "bool&",
        &P.byref_type(P.primitive_type(PrimitiveTypeCode::Boolean).unwrap())
            .unwrap(),
    );
}

#[test]
fn pointer() {
    assert_call_tree(
        "bool*",
        &P.pointer_type(P.primitive_type(PrimitiveTypeCode::Boolean).unwrap())
            .unwrap(),
    );
}

#[test]
fn pinned() {
    assert_call_tree(
        "bool pinned",
        &P.pinned_type(P.primitive_type(PrimitiveTypeCode::Boolean).unwrap())
            .unwrap(),
    );
}

#[test]
fn simple_array() {
    assert_call_tree(
        "bool[]",
        &P.array_type(P.primitive_type(PrimitiveTypeCode::Boolean).unwrap(), 1)
            .unwrap(),
    );
}

#[test]
fn multidimensional_array() {
    assert_call_tree(
        "bool[,,,]",
        &P.array_type(P.primitive_type(PrimitiveTypeCode::Boolean).unwrap(), 4)
            .unwrap(),
    );
}

#[test]
fn nested_arrays_compose_left_to_right() {
    // Innermost to outermost ranks: 2, 1, 3.
    let bool_ty = P.primitive_type(PrimitiveTypeCode::Boolean).unwrap();
    let expected = P
        .array_type(
            P.array_type(P.array_type(bool_ty, 2).unwrap(), 1).unwrap(),
            3,
        )
        .unwrap();
    assert_call_tree("bool[,][][,,]", &expected);
}

#[test]
fn array_bounds_are_not_supported() {
    for bounds in [
        "[...]", "[1]", "[1...]", "[1...2]", "[,...]", "[,,1]", "[,1...,]", "[1...2,,]",
    ] {
        let feature = not_supported_feature(parse_type(&format!("bool{bounds}"), &P));
        assert_eq!(feature, "Specifying array bounds", "bounds: {bounds}");
    }
}

#[test]
fn malformed_array_rank_is_a_format_error() {
    assert_eq!(
        format_message(parse_type("bool[x]", &P)),
        "Expected ',', ']', '...', or Int32 literal."
    );
}

#[test]
fn class_and_valuetype_with_simple_names() {
    assert_call_tree(
        "class Foo",
        &P.user_defined_type(Some(false), None, "", "Foo", &[]).unwrap(),
    );
    assert_call_tree(
        "valuetype Foo",
        &P.user_defined_type(Some(true), None, "", "Foo", &[]).unwrap(),
    );
}

#[test]
fn namespaces_fold_greedily() {
    assert_call_tree(
        "class SomeNamespace.Foo",
        &P.user_defined_type(Some(false), None, "SomeNamespace", "Foo", &[])
            .unwrap(),
    );
    assert_call_tree(
        "class Some.Namespace.With.A.Lot.Of.Dots.Foo",
        &P.user_defined_type(
            Some(false),
            None,
            "Some.Namespace.With.A.Lot.Of.Dots",
            "Foo",
            &[],
        )
        .unwrap(),
    );
}

#[test]
fn nested_type_chains() {
    assert_call_tree(
        "class Foo/Bar",
        &P.user_defined_type(Some(false), None, "", "Foo", &["Bar".to_string()])
            .unwrap(),
    );
    assert_call_tree(
        "class Foo/This.Is.Legal",
        &P.user_defined_type(Some(false), None, "", "Foo", &["This.Is.Legal".to_string()])
            .unwrap(),
    );
    assert_call_tree(
        "class Foo/Bar/Baz",
        &P.user_defined_type(
            Some(false),
            None,
            "",
            "Foo",
            &["Bar".to_string(), "Baz".to_string()],
        )
        .unwrap(),
    );
    assert_call_tree(
        "class A.B.C/D.E.F/G.H.I",
        &P.user_defined_type(
            Some(false),
            None,
            "A.B",
            "C",
            &["D.E.F".to_string(), "G.H.I".to_string()],
        )
        .unwrap(),
    );
}

#[test]
fn assembly_monikers() {
    assert_call_tree(
        "class [a]Foo",
        &P.user_defined_type(Some(false), Some("a"), "", "Foo", &[]).unwrap(),
    );
    assert_call_tree(
        "valuetype [a]Foo",
        &P.user_defined_type(Some(true), Some("a"), "", "Foo", &[]).unwrap(),
    );
    assert_call_tree(
        "class [a.b.c]Foo",
        &P.user_defined_type(Some(false), Some("a.b.c"), "", "Foo", &[])
            .unwrap(),
    );
    assert_call_tree(
        "class [a.b.c]D.E.F",
        &P.user_defined_type(Some(false), Some("a.b.c"), "D.E", "F", &[])
            .unwrap(),
    );
}

#[test]
fn module_scopes_are_not_supported() {
    let feature = not_supported_feature(parse_type("class [.module foo.netmodule]Foo", &P));
    assert_eq!(feature, "'.module' scope syntax");
}

#[test]
fn simple_generic_instantiation() {
    let foo = P.user_defined_type(Some(false), None, "", "Foo", &[]).unwrap();
    let expected = P
        .generic_instantiation(
            foo,
            vec![P.primitive_type(PrimitiveTypeCode::Boolean).unwrap()],
        )
        .unwrap();
    assert_call_tree("class Foo<bool>", &expected);
}

#[test]
fn complex_generic_instantiation() {
    let foo_x = P
        .user_defined_type(Some(false), None, "", "Foo", &["X".to_string()])
        .unwrap();
    let bar = P
        .user_defined_type(Some(false), Some("a"), "Some.Namespace", "Bar", &[])
        .unwrap();
    let inner = P
        .generic_instantiation(
            P.array_type(bar, 2).unwrap(),
            vec![P.generic_type_parameter(0).unwrap()],
        )
        .unwrap();
    let expected = P
        .generic_instantiation(
            foo_x,
            vec![P.primitive_type(PrimitiveTypeCode::Boolean).unwrap(), inner],
        )
        .unwrap();

    assert_call_tree("class Foo/X<bool,class [a]Some.Namespace.Bar[,]<!0>>", &expected);
}

#[test]
fn generic_instantiation_separator_errors() {
    assert_eq!(
        format_message(parse_type("class Foo<bool", &P)),
        "Expected ',' or '>'."
    );
    assert_eq!(
        format_message(parse_type("class Foo<bool int32>", &P)),
        "Expected ',' or '>'."
    );
    assert_eq!(
        format_message(parse_type("class Foo<>", &P)),
        "Expected valid type keyword."
    );
}

#[test]
fn modifier_and_method_pointer_keywords_are_not_supported() {
    assert_eq!(not_supported_feature(parse_type("modopt", &P)), "Custom modifiers");
    assert_eq!(not_supported_feature(parse_type("modreq", &P)), "Custom modifiers");
    assert_eq!(not_supported_feature(parse_type("method", &P)), "Method pointers");
}

#[test]
fn native_and_unsigned_require_their_suffixes() {
    assert_eq!(
        format_message(parse_type("native", &P)),
        "Expected 'int' or 'unsigned int' to follow 'native'."
    );
    assert_eq!(
        format_message(parse_type("native unsigned bool", &P)),
        "Expected 'int' to follow 'native unsigned'."
    );
    assert_eq!(
        format_message(parse_type("unsigned bool", &P)),
        "Expected 'int8', 'int16', 'int32', or 'int64' to follow 'unsigned'."
    );
}

#[test]
fn trailing_tokens_after_a_type_are_a_format_error() {
    assert_eq!(
        format_message(parse_type("bool bool", &P)),
        "Expected '&', '*', 'pinned', '[', '<', or end to follow type."
    );
}

// ------------------------------------------------------------------------------------------------
// Field references
// ------------------------------------------------------------------------------------------------

#[test]
fn field_reference_with_keyword_owner() {
    let field = parse_field_reference(
        "int32 valuetype [corelib]System.Int32::MaxValue",
        &TypeSpecProvider,
    )
    .unwrap();

    assert_eq!(field.field_type, TypeSpec::Primitive(PrimitiveTypeCode::I4));
    assert_eq!(
        field.declaring_type,
        TypeSpec::value_type(Some("corelib"), "System", "Int32")
    );
    assert_eq!(field.field_name, "MaxValue");
}

#[test]
fn field_reference_with_bare_owner() {
    let field = parse_field_reference(
        "class System.Collections.Generic.Dictionary`2<string, string> Resolver::map",
        &TypeSpecProvider,
    )
    .unwrap();

    assert_eq!(
        field.declaring_type,
        TypeSpec::Named(NamedType {
            is_value_type: None,
            assembly: None,
            namespace: String::new(),
            name: "Resolver".to_string(),
            nested: Vec::new(),
        })
    );
    assert_eq!(field.field_name, "map");
}

#[test]
fn field_reference_errors() {
    match parse_field_reference("int32", &TypeSpecProvider) {
        Err(Error::Format { message, .. }) => {
            assert_eq!(message, "Expected declaring type to follow the field type.");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }

    match parse_field_reference("int32 Foo", &TypeSpecProvider) {
        Err(Error::Format { message, .. }) => {
            assert_eq!(message, "Expected '::' to follow the declaring type.");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }

    match parse_field_reference("int32 Foo::", &TypeSpecProvider) {
        Err(Error::Format { message, .. }) => {
            assert_eq!(message, "Expected field name to follow '::'.");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }

    match parse_field_reference("int32 Foo::x y", &TypeSpecProvider) {
        Err(Error::Format { message, .. }) => {
            assert_eq!(message, "Expected end to follow the field reference.");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

// ------------------------------------------------------------------------------------------------
// Method references
// ------------------------------------------------------------------------------------------------

#[test]
fn static_method_reference() {
    let method = parse_method_reference(
        "class System.StringComparer class System.StringComparer::get_OrdinalIgnoreCase()",
        &TypeSpecProvider,
    )
    .unwrap();

    assert!(!method.is_instance());
    assert!(!method.is_explicit_instance());
    assert_eq!(
        method.return_type,
        TypeSpec::reference_type(None, "System", "StringComparer")
    );
    assert_eq!(
        method.declaring_type,
        TypeSpec::reference_type(None, "System", "StringComparer")
    );
    assert_eq!(method.method_name, "get_OrdinalIgnoreCase");
    assert!(method.generic_arguments.is_empty());
    assert!(method.parameters.is_empty());
}

#[test]
fn instance_method_on_generic_instantiation() {
    let method = parse_method_reference(
        "instance void class System.Collections.Generic.Dictionary`2<string, string>::set_Item(!0, !1)",
        &TypeSpecProvider,
    )
    .unwrap();

    assert!(method.is_instance());
    assert_eq!(method.return_type, TypeSpec::Primitive(PrimitiveTypeCode::Void));
    assert_eq!(
        method.declaring_type,
        TypeSpec::reference_type(None, "System.Collections.Generic", "Dictionary`2")
            .with_generic_arguments(vec![
                TypeSpec::Primitive(PrimitiveTypeCode::String),
                TypeSpec::Primitive(PrimitiveTypeCode::String),
            ])
    );
    assert_eq!(method.method_name, "set_Item");
    assert_eq!(
        method.parameters,
        vec![
            TypeSpec::GenericTypeParameter(0),
            TypeSpec::GenericTypeParameter(1)
        ]
    );
}

#[test]
fn constructor_reference() {
    let method = parse_method_reference(
        "instance void class System.ResolveEventHandler::.ctor(object, native int)",
        &TypeSpecProvider,
    )
    .unwrap();

    assert_eq!(method.method_name, ".ctor");
    assert_eq!(
        method.parameters,
        vec![
            TypeSpec::Primitive(PrimitiveTypeCode::Object),
            TypeSpec::Primitive(PrimitiveTypeCode::I),
        ]
    );
}

#[test]
fn class_constructor_reference() {
    let method = parse_method_reference("void class Foo::.cctor()", &TypeSpecProvider).unwrap();
    assert_eq!(method.method_name, ".cctor");
}

#[test]
fn generic_method_instantiation() {
    let method = parse_method_reference(
        "void class Helpers::Make<int32, string>(!!0)",
        &TypeSpecProvider,
    )
    .unwrap();

    assert_eq!(method.method_name, "Make");
    assert_eq!(
        method.generic_arguments,
        vec![
            TypeSpec::Primitive(PrimitiveTypeCode::I4),
            TypeSpec::Primitive(PrimitiveTypeCode::String),
        ]
    );
    assert_eq!(method.parameters, vec![TypeSpec::GenericMethodParameter(0)]);
}

#[test]
fn explicit_instance_and_default_conventions() {
    let explicit = parse_method_reference(
        "instance explicit void class Foo::Bar()",
        &TypeSpecProvider,
    )
    .unwrap();
    assert!(explicit.is_instance());
    assert!(explicit.is_explicit_instance());

    let default = parse_method_reference("default string class Foo::Get()", &TypeSpecProvider).unwrap();
    assert!(!default.is_instance());
    assert_eq!(default.return_type, TypeSpec::Primitive(PrimitiveTypeCode::String));
}

#[test]
fn dotted_method_names() {
    let method = parse_method_reference(
        "instance void class Foo::System.IDisposable.Dispose()",
        &TypeSpecProvider,
    )
    .unwrap();
    assert_eq!(method.method_name, "System.IDisposable.Dispose");
}

#[test]
fn unsupported_calling_conventions() {
    match parse_method_reference("vararg void class Foo::Bar()", &TypeSpecProvider) {
        Err(Error::NotSupported(feature)) => {
            assert_eq!(feature, "The 'vararg' calling convention");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }

    match parse_method_reference("unmanaged cdecl void class Foo::Bar()", &TypeSpecProvider) {
        Err(Error::NotSupported(feature)) => {
            assert_eq!(feature, "Unmanaged calling conventions");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn method_without_declaring_type_is_not_supported() {
    for syntax in ["void Bar()", "instance void Namespace.Bar()"] {
        match parse_method_reference(syntax, &TypeSpecProvider) {
            Err(Error::NotSupported(feature)) => {
                assert_eq!(feature, "Method references without a declaring type");
            }
            other => panic!("unexpected outcome for {syntax:?}: {other:?}"),
        }
    }
}

#[test]
fn variable_argument_lists_are_not_supported() {
    match parse_method_reference("void class Foo::Bar(string, ...)", &TypeSpecProvider) {
        Err(Error::NotSupported(feature)) => {
            assert_eq!(feature, "Variable argument lists");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[test]
fn method_reference_format_errors() {
    match parse_method_reference("void class Foo::Bar", &TypeSpecProvider) {
        Err(Error::Format { message, .. }) => {
            assert_eq!(message, "Expected '(' to follow the method name.");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }

    match parse_method_reference("void class Foo::Bar(int32", &TypeSpecProvider) {
        Err(Error::Format { message, .. }) => {
            assert_eq!(message, "Expected ',' or ')'.");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }

    match parse_method_reference("void class Foo::Bar() extra", &TypeSpecProvider) {
        Err(Error::Format { message, .. }) => {
            assert_eq!(message, "Expected end to follow the method reference.");
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}
