//! C++ code emission.
//!
//! Every emitted type `T` gets the same five helpers, declared in the scope
//! that encloses `T` (free functions at namespace level, static members
//! inside a class):
//!
//! - `void InitT(T *val)`
//! - `bool ValidateT(const T &val)`
//! - `bool ValidateT(const json &json)`
//! - `bool TToJson(const T &val, json *json)`
//! - `bool JsonToT(const json &json, T *val)`
//!
//! Object types additionally become classes with equality, string
//! conversion and a `pre_update` hook.

pub mod arrays;
pub mod objects;
pub mod references;
pub mod variables;

pub use arrays::{ArrayBounds, ArrayEmitter};
pub use objects::{MemberFragment, ObjectEmitter};
pub use references::{ReferenceEmitter, ReferenceTable};
pub use variables::VariableEmitter;

use crate::fragment::{Bucket, CodeFragment, INDENT, Line};
use crate::namespace::QualifiedName;
use crate::options::GeneratorOptions;
use configen_schema::PrimitiveType;

/// Fragment of one schema node together with the name of the type it
/// provides.
///
/// For a reference the fragment is empty and the name is the target's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedType {
    /// Code emitted for the node.
    pub fragment: CodeFragment,
    /// Qualified name of the provided type.
    pub name: QualifiedName,
}

/// Target settings shared by all emitters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CppTarget {
    /// JSON document type used in helper signatures.
    pub json_type: String,
    /// Enclosing namespaces, outermost first.
    pub namespace: Vec<String>,
}

impl CppTarget {
    /// Creates a target from generator options.
    #[must_use]
    pub fn new(options: &GeneratorOptions) -> Self {
        Self {
            json_type: options.json_type.clone(),
            namespace: options.namespace.clone(),
        }
    }

    /// Absolute spelling of `name`, safe inside any class body.
    #[must_use]
    pub fn absolute(&self, name: &QualifiedName) -> String {
        name.absolute(&self.namespace)
    }

    /// Pushes the five helper prototypes of type `name` into the
    /// declarations bucket.
    pub fn push_prototypes(&self, fragment: &mut CodeFragment, name: &str) {
        let json = &self.json_type;
        let prototypes = [
            Line::new()
                .storage()
                .text(format!("void Init{name}("))
                .scope()
                .text(format!("{name} *val);")),
            Line::new()
                .storage()
                .text(format!("bool Validate{name}(const "))
                .scope()
                .text(format!("{name} &val);")),
            Line::new()
                .storage()
                .text(format!("bool Validate{name}(const {json} &json);")),
            Line::new()
                .storage()
                .text(format!("bool {name}ToJson(const "))
                .scope()
                .text(format!("{name} &val, {json} *json);")),
            Line::new()
                .storage()
                .text(format!("bool JsonTo{name}(const {json} &json, "))
                .scope()
                .text(format!("{name} *val);")),
        ];
        for line in prototypes {
            fragment.push(Bucket::Declarations, line);
        }
    }

    /// Opening line of the `Init` definition.
    #[must_use]
    pub fn init_head(&self, name: &str) -> Line {
        Line::new()
            .text("void ")
            .scope()
            .text(format!("Init{name}("))
            .scope()
            .text(format!("{name} *val) {{"))
    }

    /// Opening line of the value `Validate` definition.
    #[must_use]
    pub fn validate_head(&self, name: &str) -> Line {
        Line::new()
            .text("bool ")
            .scope()
            .text(format!("Validate{name}(const "))
            .scope()
            .text(format!("{name} &val) {{"))
    }

    /// Opening line of the JSON `Validate` definition.
    #[must_use]
    pub fn validate_json_head(&self, name: &str) -> Line {
        Line::new().text("bool ").scope().text(format!(
            "Validate{name}(const {} &json) {{",
            self.json_type
        ))
    }

    /// Opening line of the `ToJson` definition.
    #[must_use]
    pub fn to_json_head(&self, name: &str) -> Line {
        Line::new()
            .text("bool ")
            .scope()
            .text(format!("{name}ToJson(const "))
            .scope()
            .text(format!("{name} &val, {} *json) {{", self.json_type))
    }

    /// Opening line of the `JsonTo` definition.
    #[must_use]
    pub fn json_to_head(&self, name: &str) -> Line {
        Line::new()
            .text("bool ")
            .scope()
            .text(format!("JsonTo{name}(const {} &json, ", self.json_type))
            .scope()
            .text(format!("{name} *val) {{"))
    }
}

/// Members every generated class declares besides its data members.
pub const CLASS_MEMBER_NAMES: [&str; 3] = ["ToString", "FromString", "pre_update"];

/// Names a type `name` introduces into its enclosing scope: the type itself
/// and its four helpers.
#[must_use]
pub fn scope_names(name: &str) -> Vec<String> {
    let mut names = vec![
        name.to_string(),
        format!("Init{name}"),
        format!("Validate{name}"),
        format!("{name}ToJson"),
        format!("JsonTo{name}"),
    ];
    // `JsonToJson` names both conversions of type `Json`; they overload.
    names.dedup();
    names
}

/// Identifiers a data member cannot use: C++ keywords and the names of the
/// members every generated class declares.
const RESERVED_MEMBER_NAMES: &[&str] = &[
    "alignas", "alignof", "and", "and_eq", "asm", "auto", "bitand", "bitor", "bool", "break",
    "case", "catch", "char", "char8_t", "char16_t", "char32_t", "class", "compl", "concept",
    "const", "consteval", "constexpr", "constinit", "const_cast", "continue", "co_await",
    "co_return", "co_yield", "decltype", "default", "delete", "do", "double", "dynamic_cast",
    "else", "enum", "explicit", "export", "extern", "false", "float", "for", "friend", "goto",
    "if", "inline", "int", "long", "mutable", "namespace", "new", "noexcept", "not", "not_eq",
    "nullptr", "operator", "or", "or_eq", "private", "protected", "public", "register",
    "reinterpret_cast", "requires", "return", "short", "signed", "sizeof", "static",
    "static_assert", "static_cast", "struct", "switch", "template", "this", "thread_local",
    "throw", "true", "try", "typedef", "typeid", "typename", "union", "unsigned", "using",
    "virtual", "void", "volatile", "wchar_t", "while", "xor", "xor_eq", "pre_update",
    "ToString", "FromString",
];

/// Returns true if `name` cannot be used as a data member of a generated
/// class.
#[must_use]
pub fn is_reserved_member_name(name: &str) -> bool {
    RESERVED_MEMBER_NAMES.contains(&name)
}

/// Appends a function body: indented lines, the closing brace and a blank
/// separator.
pub(crate) fn push_body<I, L>(fragment: &mut CodeFragment, body: I)
where
    I: IntoIterator<Item = L>,
    L: Into<Line>,
{
    for line in body {
        fragment.push(Bucket::Definitions, Line::text_only(INDENT).join(line.into()));
    }
    fragment.push(Bucket::Definitions, Line::text_only("}"));
    fragment.push(Bucket::Definitions, Line::text_only(""));
}

/// Renders an integer literal of the given primitive type.
///
/// 64-bit values carry a `LL`/`ULL` suffix; the most negative 64-bit value
/// is spelled as an expression since its magnitude has no signed literal.
#[must_use]
pub fn integer_literal(value: i128, primitive: PrimitiveType) -> String {
    if primitive.bits() == Some(64) {
        if primitive.is_unsigned() {
            format!("{value}ULL")
        } else if value == i128::from(i64::MIN) {
            "(-9223372036854775807LL - 1)".to_string()
        } else {
            format!("{value}LL")
        }
    } else {
        value.to_string()
    }
}

/// Renders a floating point literal.
#[must_use]
pub fn number_literal(value: f64) -> String {
    let text = format!("{value:?}");
    if text.contains(['.', 'e', 'E']) || !value.is_finite() {
        text
    } else {
        format!("{text}.0")
    }
}

/// Renders a boolean literal.
#[must_use]
pub const fn bool_literal(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Renders a quoted C++ string literal.
///
/// Quotes, backslashes and common whitespace use their short escapes; other
/// control characters use three digit octal escapes so that a following digit
/// cannot extend the escape.
#[must_use]
pub fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_ascii_control() => out.push_str(&format!("\\{:03o}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Lines rejecting a JSON node that cannot hold a value of `primitive`.
///
/// Integers are checked for their type tag and for fitting the primitive's
/// range before any extraction.
#[must_use]
pub fn json_type_check(primitive: PrimitiveType) -> Vec<String> {
    match primitive {
        PrimitiveType::Bool => vec!["if (!json.is_boolean()) return false;".to_string()],
        PrimitiveType::String => vec!["if (!json.is_string()) return false;".to_string()],
        PrimitiveType::Double => vec!["if (!json.is_number()) return false;".to_string()],
        _ => integer_type_check(primitive),
    }
}

fn integer_type_check(primitive: PrimitiveType) -> Vec<String> {
    let mut lines = vec!["if (!json.is_number_integer()) return false;".to_string()];
    let Some((min, max)) = primitive.integer_range() else {
        return lines;
    };
    let u64_max = i128::from(u64::MAX);
    let i64_min = i128::from(i64::MIN);
    let i64_max = i128::from(i64::MAX);

    if max < u64_max {
        lines.push(format!(
            "if (json.is_number_unsigned() && json.get<uint64_t>() > {}) return false;",
            integer_literal(max, PrimitiveType::Uint64)
        ));
    }
    let mut signed = Vec::new();
    if min > i64_min {
        signed.push(format!(
            "json.get<int64_t>() < {}",
            integer_literal(min, PrimitiveType::Int64)
        ));
    }
    if max < i64_max {
        signed.push(format!(
            "json.get<int64_t>() > {}",
            integer_literal(max, PrimitiveType::Int64)
        ));
    }
    if !signed.is_empty() {
        lines.push(format!(
            "if (!json.is_number_unsigned() && ({})) return false;",
            signed.join(" || ")
        ));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::Bindings;

    fn target() -> CppTarget {
        CppTarget::new(&GeneratorOptions::builder().namespace(["cfg"]).build())
    }

    #[test]
    fn test_integer_literal() {
        assert_eq!(integer_literal(5, PrimitiveType::Uint8), "5");
        assert_eq!(integer_literal(-129, PrimitiveType::Int16), "-129");
        assert_eq!(integer_literal(7, PrimitiveType::Uint64), "7ULL");
        assert_eq!(integer_literal(-7, PrimitiveType::Int64), "-7LL");
        assert_eq!(
            integer_literal(i128::from(i64::MIN), PrimitiveType::Int64),
            "(-9223372036854775807LL - 1)"
        );
    }

    #[test]
    fn test_number_literal() {
        assert_eq!(number_literal(0.0), "0.0");
        assert_eq!(number_literal(1.5), "1.5");
        assert_eq!(number_literal(-2.0), "-2.0");
        assert_eq!(number_literal(1e100), "1e100");
    }

    #[test]
    fn test_string_literal() {
        assert_eq!(string_literal("plain"), "\"plain\"");
        assert_eq!(string_literal("a\"b"), "\"a\\\"b\"");
        assert_eq!(string_literal("a\\b"), "\"a\\\\b\"");
        assert_eq!(string_literal("line\n"), "\"line\\n\"");
        assert_eq!(string_literal("\u{1}2"), "\"\\0012\"");
        assert_eq!(string_literal("héllo"), "\"héllo\"");
    }

    #[test]
    fn test_json_type_check_tags() {
        assert_eq!(
            json_type_check(PrimitiveType::Bool),
            ["if (!json.is_boolean()) return false;"]
        );
        assert_eq!(
            json_type_check(PrimitiveType::String),
            ["if (!json.is_string()) return false;"]
        );
        assert_eq!(
            json_type_check(PrimitiveType::Double),
            ["if (!json.is_number()) return false;"]
        );
    }

    #[test]
    fn test_json_type_check_integer_ranges() {
        let uint8 = json_type_check(PrimitiveType::Uint8);
        assert_eq!(uint8[0], "if (!json.is_number_integer()) return false;");
        assert!(uint8[1].contains("json.get<uint64_t>() > 255ULL"));
        assert!(uint8[2].contains("json.get<int64_t>() < 0LL || json.get<int64_t>() > 255LL"));

        let uint64 = json_type_check(PrimitiveType::Uint64);
        assert_eq!(uint64.len(), 2);
        assert!(uint64[1].contains("json.get<int64_t>() < 0LL"));

        let int64 = json_type_check(PrimitiveType::Int64);
        assert_eq!(int64.len(), 2);
        assert!(int64[1].contains("json.get<uint64_t>() > 9223372036854775807ULL"));
    }

    #[test]
    fn test_prototypes_bind_storage_and_scope() {
        let mut fragment = CodeFragment::new();
        target().push_prototypes(&mut fragment, "Value");
        let top = fragment.bind(&Bindings::top_level());
        assert_eq!(top.declarations[0], "void InitValue(Value *val);");
        assert_eq!(
            top.declarations[2],
            "bool ValidateValue(const nlohmann::ordered_json &json);"
        );

        let nested = fragment.bind(&Bindings::member("Outer::"));
        assert_eq!(nested.declarations[0], "static void InitValue(Outer::Value *val);");
        assert_eq!(
            nested.declarations[4],
            "static bool JsonToValue(const nlohmann::ordered_json &json, Outer::Value *val);"
        );
    }

    #[test]
    fn test_reserved_member_names() {
        assert!(is_reserved_member_name("class"));
        assert!(is_reserved_member_name("pre_update"));
        assert!(is_reserved_member_name("ToString"));
        assert!(!is_reserved_member_name("port"));
        assert!(!is_reserved_member_name("Class"));
    }

    #[test]
    fn test_scope_names() {
        assert_eq!(
            scope_names("Port"),
            ["Port", "InitPort", "ValidatePort", "PortToJson", "JsonToPort"]
        );
        assert_eq!(
            scope_names("Json"),
            ["Json", "InitJson", "ValidateJson", "JsonToJson"]
        );
    }

    #[test]
    fn test_absolute_names() {
        let name = QualifiedName::new(vec!["Outer".to_string()], "Inner");
        assert_eq!(target().absolute(&name), "::cfg::Outer::Inner");
    }
}
