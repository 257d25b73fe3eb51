//! Object emission.

use super::{CppTarget, EmittedType, push_body, string_literal};
use crate::fragment::{Bindings, Bucket, CodeFragment, INDENT, Line, ResolvedFragment};
use crate::namespace::QualifiedName;

/// Generated output of one object member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberFragment {
    /// Member name as written in the schema; used for the data member and
    /// the JSON field.
    pub raw_name: String,
    /// Fragment and type of the member.
    pub emitted: EmittedType,
}

impl MemberFragment {
    /// Creates a member fragment.
    #[must_use]
    pub fn new(raw_name: impl Into<String>, emitted: EmittedType) -> Self {
        Self {
            raw_name: raw_name.into(),
            emitted,
        }
    }
}

/// Emitter for object nodes.
///
/// An object becomes a class. Member fragments are bound to the class scope
/// and spliced into the class body; their definitions precede the class's
/// own.
pub struct ObjectEmitter<'a> {
    target: &'a CppTarget,
}

impl<'a> ObjectEmitter<'a> {
    /// Creates a new object emitter.
    #[must_use]
    pub fn new(target: &'a CppTarget) -> Self {
        Self { target }
    }

    /// Emits the fragment for the object `name`, written as `raw_name` in
    /// the schema.
    #[must_use]
    pub fn emit(
        &self,
        raw_name: &str,
        name: &QualifiedName,
        members: &[MemberFragment],
    ) -> CodeFragment {
        let class = name.name.as_str();
        let bindings = Bindings::member(format!("{}::", name.type_path()));
        let resolved: Vec<ResolvedFragment> = members
            .iter()
            .map(|member| member.emitted.fragment.bind(&bindings))
            .collect();

        let mut fragment = CodeFragment::new();
        fragment.push(Bucket::Predefine, Line::text_only(format!("class {class};")));

        self.push_class_body(&mut fragment, class, members, &resolved);
        self.target.push_prototypes(&mut fragment, class);

        for member in &resolved {
            fragment.push_resolved(Bucket::Definitions, &member.definitions, 0);
        }
        self.push_methods(&mut fragment, raw_name, class, members);
        self.push_helpers(&mut fragment, class, members);
        fragment
    }

    fn push_class_body(
        &self,
        fragment: &mut CodeFragment,
        class: &str,
        members: &[MemberFragment],
        resolved: &[ResolvedFragment],
    ) {
        fragment.push(Bucket::Declarations, Line::text_only(format!("class {class} {{")));
        fragment.push(Bucket::Declarations, Line::text_only(" public:"));

        let mut nested = false;
        for member in resolved {
            fragment.push_resolved(Bucket::Declarations, &member.predefine, 1);
            nested |= !member.predefine.is_empty();
        }
        for member in resolved {
            fragment.push_resolved(Bucket::Declarations, &member.declarations, 1);
            nested |= !member.declarations.is_empty();
        }
        if nested {
            fragment.push(Bucket::Declarations, Line::text_only(""));
        }

        let methods = [
            format!("{class}();"),
            format!("bool operator==(const {class} &other) const;"),
            format!("bool operator!=(const {class} &other) const;"),
            "std::string ToString() const;".to_string(),
            "bool FromString(const std::string &text, bool validate = true);".to_string(),
        ];
        for method in methods {
            fragment.push(Bucket::Declarations, Line::text_only(format!("{INDENT}{method}")));
        }
        fragment.push(Bucket::Declarations, Line::text_only(""));

        for member in members {
            fragment.push(
                Bucket::Declarations,
                Line::text_only(format!(
                    "{INDENT}{} {};",
                    self.target.absolute(&member.emitted.name),
                    member.raw_name
                )),
            );
        }
        fragment.push(
            Bucket::Declarations,
            Line::text_only(format!(
                "{INDENT}std::function<bool(const {class} &, const {class} &)> pre_update;"
            )),
        );
        fragment.push(Bucket::Declarations, Line::text_only("};"));
    }

    fn push_methods(
        &self,
        fragment: &mut CodeFragment,
        raw_name: &str,
        class: &str,
        members: &[MemberFragment],
    ) {
        let json = &self.target.json_type;
        let key = string_literal(raw_name);

        fragment.push(
            Bucket::Definitions,
            Line::new().scope().text(format!("{class}::{class}() {{")),
        );
        push_body(
            fragment,
            [Line::new().scope().text(format!("Init{class}(this);"))],
        );

        fragment.push(
            Bucket::Definitions,
            Line::new()
                .text("bool ")
                .scope()
                .text(format!("{class}::operator==(const "))
                .scope()
                .text(format!("{class} &other) const {{")),
        );
        push_body(fragment, equality_body(members));

        fragment.push(
            Bucket::Definitions,
            Line::new()
                .text("bool ")
                .scope()
                .text(format!("{class}::operator!=(const "))
                .scope()
                .text(format!("{class} &other) const {{")),
        );
        push_body(fragment, ["return !(*this == other);"]);

        fragment.push(
            Bucket::Definitions,
            Line::new()
                .text("std::string ")
                .scope()
                .text(format!("{class}::ToString() const {{")),
        );
        push_body(
            fragment,
            [
                Line::text_only(format!("{json} json = {json}::object();")),
                Line::new()
                    .text("if (!")
                    .scope()
                    .text(format!("{class}ToJson(*this, &json[{key}])) return std::string();")),
                Line::text_only("return json.dump();"),
            ],
        );

        // The destination is only assigned once every step has succeeded.
        fragment.push(
            Bucket::Definitions,
            Line::new().text("bool ").scope().text(format!(
                "{class}::FromString(const std::string &text, bool validate) {{"
            )),
        );
        push_body(
            fragment,
            [
                Line::text_only(format!("{json} json = {json}::parse(text, nullptr, false);")),
                Line::text_only(
                    "if (json.is_discarded() || !json.is_object() || json.size() != 1) return false;",
                ),
                Line::text_only(format!("auto it = json.find({key});")),
                Line::text_only("if (it == json.end()) return false;"),
                Line::new()
                    .text("if (validate && !")
                    .scope()
                    .text(format!("Validate{class}(*it)) return false;")),
                Line::new().scope().text(format!("{class} updated = *this;")),
                Line::new()
                    .text("if (!")
                    .scope()
                    .text(format!("JsonTo{class}(*it, &updated)) return false;")),
                Line::new()
                    .text("if (validate && !")
                    .scope()
                    .text(format!("Validate{class}(updated)) return false;")),
                Line::text_only("if (pre_update && !pre_update(*this, updated)) return false;"),
                Line::text_only("*this = updated;"),
                Line::text_only("return true;"),
            ],
        );
    }

    fn push_helpers(&self, fragment: &mut CodeFragment, class: &str, members: &[MemberFragment]) {
        let json = &self.target.json_type;

        fragment.push(Bucket::Definitions, self.target.init_head(class));
        if members.is_empty() {
            push_body(fragment, ["(void)val;"]);
        } else {
            push_body(
                fragment,
                members.iter().map(|member| {
                    format!(
                        "{}(&val->{});",
                        member.emitted.name.function("Init"),
                        member.raw_name
                    )
                }),
            );
        }

        fragment.push(Bucket::Definitions, self.target.validate_head(class));
        if members.is_empty() {
            push_body(fragment, ["(void)val;", "return true;"]);
        } else {
            let mut body = vec!["bool result = true;".to_string()];
            body.extend(members.iter().map(|member| {
                format!(
                    "result = result && {}(val.{});",
                    member.emitted.name.function("Validate"),
                    member.raw_name
                )
            }));
            body.push("return result;".to_string());
            push_body(fragment, body);
        }

        fragment.push(Bucket::Definitions, self.target.validate_json_head(class));
        push_body(
            fragment,
            field_dispatch(members, |member| {
                format!(
                    "if (!{}(it.value())) return false;",
                    member.emitted.name.function("Validate")
                )
            }),
        );

        fragment.push(Bucket::Definitions, self.target.to_json_head(class));
        let mut body = Vec::new();
        if members.is_empty() {
            body.push("(void)val;".to_string());
        }
        body.push(format!("*json = {json}::object();"));
        body.extend(members.iter().map(|member| {
            format!(
                "if (!{}(val.{raw}, &(*json)[{key}])) return false;",
                member.emitted.name.to_json_function(),
                raw = member.raw_name,
                key = string_literal(&member.raw_name),
            )
        }));
        body.push("return true;".to_string());
        push_body(fragment, body);

        // Fields missing from the input keep their current value.
        fragment.push(Bucket::Definitions, self.target.json_to_head(class));
        let mut body = Vec::new();
        if members.is_empty() {
            body.push("(void)val;".to_string());
        }
        body.extend(field_dispatch(members, |member| {
            format!(
                "if (!{}(it.value(), &val->{})) return false;",
                member.emitted.name.function("JsonTo"),
                member.raw_name
            )
        }));
        push_body(fragment, body);
    }
}

fn equality_body(members: &[MemberFragment]) -> Vec<String> {
    if members.is_empty() {
        return vec!["(void)other;".to_string(), "return true;".to_string()];
    }
    let mut body: Vec<String> = members
        .iter()
        .map(|member| format!(
                "if (this->{raw} != other.{raw}) return false;",
                raw = member.raw_name
            ))
        .collect();
    body.push("return true;".to_string());
    body
}

/// Body iterating the fields of a JSON object, running `action` for the
/// matching member and rejecting unknown fields.
fn field_dispatch<F>(members: &[MemberFragment], action: F) -> Vec<String>
where
    F: Fn(&MemberFragment) -> String,
{
    if members.is_empty() {
        return vec!["return json.is_object() && json.empty();".to_string()];
    }
    let mut body = vec![
        "if (!json.is_object()) return false;".to_string(),
        "for (auto it = json.begin(); it != json.end(); ++it) {".to_string(),
    ];
    for (index, member) in members.iter().enumerate() {
        let keyword = if index == 0 { "if" } else { "} else if" };
        body.push(format!(
            "  {keyword} (it.key() == {}) {{",
            string_literal(&member.raw_name)
        ));
        body.push(format!("    {}", action(member)));
    }
    body.push("  } else {".to_string());
    body.push("    return false;".to_string());
    body.push("  }".to_string());
    body.push("}".to_string());
    body.push("return true;".to_string());
    body
}
