//! Scalar variable emission.

use super::{
    CppTarget, bool_literal, integer_literal, json_type_check, number_literal, push_body,
    string_literal,
};
use crate::fragment::{Bucket, CodeFragment, Line};
use configen_schema::{IntegerNode, NumberNode, PrimitiveType, ScalarNode};

/// Emitter for scalar nodes.
///
/// A scalar becomes a typedef of its resolved primitive plus the five
/// helpers operating on it.
pub struct VariableEmitter<'a> {
    target: &'a CppTarget,
}

impl<'a> VariableEmitter<'a> {
    /// Creates a new variable emitter.
    #[must_use]
    pub fn new(target: &'a CppTarget) -> Self {
        Self { target }
    }

    /// Emits the fragment for a scalar type called `name`.
    #[must_use]
    pub fn emit(&self, name: &str, node: &ScalarNode, primitive: PrimitiveType) -> CodeFragment {
        let mut fragment = CodeFragment::new();
        fragment.push(
            Bucket::Predefine,
            Line::text_only(format!("typedef {} {name};", primitive.cpp_type())),
        );
        self.target.push_prototypes(&mut fragment, name);

        fragment.push(Bucket::Definitions, self.target.init_head(name));
        push_body(&mut fragment, [format!("*val = {};", initial_value(node, primitive))]);

        fragment.push(Bucket::Definitions, self.target.validate_head(name));
        push_body(&mut fragment, validate_body(node, primitive));

        fragment.push(Bucket::Definitions, self.target.validate_json_head(name));
        let mut body: Vec<Line> = json_type_check(primitive).into_iter().map(Line::from).collect();
        body.push(
            Line::new()
                .text("return ")
                .scope()
                .text(format!("Validate{name}(json.get<"))
                .scope()
                .text(format!("{name}>());")),
        );
        push_body(&mut fragment, body);

        fragment.push(Bucket::Definitions, self.target.to_json_head(name));
        push_body(&mut fragment, ["*json = val;", "return true;"]);

        fragment.push(Bucket::Definitions, self.target.json_to_head(name));
        let mut body: Vec<Line> = json_type_check(primitive).into_iter().map(Line::from).collect();
        body.push(
            Line::new()
                .text("*val = json.get<")
                .scope()
                .text(format!("{name}>();")),
        );
        body.push(Line::from("return true;"));
        push_body(&mut fragment, body);

        fragment
    }
}

/// Value assigned by `Init`: the declared default, otherwise zero moved into
/// the declared bounds.
fn initial_value(node: &ScalarNode, primitive: PrimitiveType) -> String {
    match node {
        ScalarNode::Bool(bool_node) => bool_literal(bool_node.default.unwrap_or(false)).to_string(),
        ScalarNode::Integer(integer) => {
            integer_literal(integer.default.unwrap_or_else(|| integer_zero(integer)), primitive)
        }
        ScalarNode::Number(number) => {
            number_literal(number.default.unwrap_or_else(|| number_zero(number)))
        }
        ScalarNode::String(string) => {
            let value = string.default.as_deref().unwrap_or("");
            if value.contains('\0') {
                format!("std::string({}, {})", string_literal(value), value.len())
            } else {
                string_literal(value)
            }
        }
    }
}

fn integer_zero(node: &IntegerNode) -> i128 {
    let mut value = 0;
    if let Some(minimum) = node.minimum {
        value = value.max(minimum);
    }
    if let Some(maximum) = node.maximum {
        value = value.min(maximum);
    }
    value
}

fn number_zero(node: &NumberNode) -> f64 {
    let mut value = 0.0_f64;
    if let Some(minimum) = node.minimum {
        value = value.max(minimum);
    }
    if let Some(maximum) = node.maximum {
        value = value.min(maximum);
    }
    value
}

fn validate_body(node: &ScalarNode, primitive: PrimitiveType) -> Vec<String> {
    let checks = bound_checks(node, primitive);
    if checks.is_empty() {
        return vec!["(void)val;".to_string(), "return true;".to_string()];
    }
    let mut body = vec!["bool result = true;".to_string()];
    body.extend(
        checks
            .into_iter()
            .map(|check| format!("result = result && ({check});")),
    );
    body.push("return result;".to_string());
    body
}

/// Independent bound checks; a bound the primitive already guarantees is
/// skipped.
fn bound_checks(node: &ScalarNode, primitive: PrimitiveType) -> Vec<String> {
    let mut checks = Vec::new();
    match node {
        ScalarNode::Integer(integer) => {
            let (type_min, type_max) = primitive.integer_range().unwrap_or((i128::MIN, i128::MAX));
            if let Some(minimum) = integer.minimum.filter(|m| *m > type_min) {
                checks.push(format!("val >= {}", integer_literal(minimum, primitive)));
            }
            if let Some(maximum) = integer.maximum.filter(|m| *m < type_max) {
                checks.push(format!("val <= {}", integer_literal(maximum, primitive)));
            }
        }
        ScalarNode::Number(number) => {
            if let Some(minimum) = number.minimum {
                checks.push(format!("val >= {}", number_literal(minimum)));
            }
            if let Some(maximum) = number.maximum {
                checks.push(format!("val <= {}", number_literal(maximum)));
            }
        }
        ScalarNode::Bool(_) | ScalarNode::String(_) => {}
    }
    checks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fragment::Bindings;
    use crate::options::GeneratorOptions;
    use configen_schema::{BoolNode, StringNode, resolve_scalar};

    fn emit(name: &str, node: ScalarNode) -> crate::fragment::ResolvedFragment {
        let target = CppTarget::new(&GeneratorOptions::default());
        let primitive = resolve_scalar(&node);
        VariableEmitter::new(&target)
            .emit(name, &node, primitive)
            .bind(&Bindings::top_level())
    }

    fn definitions(name: &str, node: ScalarNode) -> String {
        emit(name, node).definitions.join("\n")
    }

    #[test]
    fn test_typedef_and_prototypes() {
        let resolved = emit(
            "Port",
            ScalarNode::Integer(IntegerNode::new().with_minimum(0).with_maximum(200)),
        );
        assert_eq!(resolved.predefine, ["typedef uint8_t Port;"]);
        assert_eq!(resolved.declarations.len(), 5);
        assert_eq!(resolved.declarations[0], "void InitPort(Port *val);");
        assert_eq!(
            resolved.declarations[3],
            "bool PortToJson(const Port &val, nlohmann::ordered_json *json);"
        );
    }

    #[test]
    fn test_init_uses_default() {
        let code = definitions(
            "Port",
            ScalarNode::Integer(IntegerNode::new().with_minimum(0).with_default(80)),
        );
        assert!(code.contains("void InitPort(Port *val) {\n  *val = 80;\n}"));
    }

    #[test]
    fn test_init_clamps_zero_into_bounds() {
        let code = definitions(
            "Level",
            ScalarNode::Integer(IntegerNode::new().with_minimum(3).with_maximum(9)),
        );
        assert!(code.contains("*val = 3;"));

        let code = definitions(
            "Offset",
            ScalarNode::Integer(IntegerNode::new().with_minimum(-20).with_maximum(-5)),
        );
        assert!(code.contains("*val = -5;"));

        let code = definitions(
            "Ratio",
            ScalarNode::Number(NumberNode {
                minimum: Some(0.5),
                maximum: None,
                default: None,
            }),
        );
        assert!(code.contains("*val = 0.5;"));
    }

    #[test]
    fn test_validate_independent_checks() {
        let code = definitions(
            "Level",
            ScalarNode::Integer(IntegerNode::new().with_minimum(-5).with_maximum(100)),
        );
        assert!(code.contains("  result = result && (val >= -5);"));
        assert!(code.contains("  result = result && (val <= 100);"));
        assert!(code.contains("  return result;"));
    }

    #[test]
    fn test_validate_skips_implied_bounds() {
        let code = definitions(
            "Count",
            ScalarNode::Integer(IntegerNode::new().with_minimum(0).with_maximum(200)),
        );
        assert!(!code.contains("val >= 0"));
        assert!(code.contains("result = result && (val <= 200);"));

        let code = definitions("Any", ScalarNode::Integer(IntegerNode::new()));
        assert!(code.contains("bool ValidateAny(const Any &val) {\n  (void)val;\n  return true;\n}"));
    }

    #[test]
    fn test_validate_json_checks_tag_first() {
        let code = definitions("Flag", ScalarNode::Bool(BoolNode { default: Some(true) }));
        assert!(code.contains("*val = true;"));
        assert!(code.contains(
            "bool ValidateFlag(const nlohmann::ordered_json &json) {\n  if (!json.is_boolean()) return false;\n  return ValidateFlag(json.get<Flag>());\n}"
        ));
        assert!(code.contains(
            "  if (!json.is_boolean()) return false;\n  *val = json.get<Flag>();\n  return true;"
        ));
    }

    #[test]
    fn test_string_default_escaped() {
        let code = definitions(
            "Name",
            ScalarNode::String(StringNode {
                default: Some("say \"hi\"".to_string()),
            }),
        );
        assert_eq!(resolve_scalar(&ScalarNode::String(StringNode::default())), PrimitiveType::String);
        assert!(code.contains("*val = \"say \\\"hi\\\"\";"));
        assert!(code.contains("if (!json.is_string()) return false;"));
    }

    #[test]
    fn test_number_bounds() {
        let code = definitions(
            "Ratio",
            ScalarNode::Number(NumberNode {
                minimum: Some(-1.0),
                maximum: Some(1.0),
                default: Some(0.25),
            }),
        );
        assert!(code.contains("*val = 0.25;"));
        assert!(code.contains("result = result && (val >= -1.0);"));
        assert!(code.contains("result = result && (val <= 1.0);"));
        assert!(code.contains("if (!json.is_number()) return false;"));
    }

    #[test]
    fn test_member_scope_qualifies_definitions() {
        let target = CppTarget::new(&GeneratorOptions::default());
        let node = ScalarNode::Bool(BoolNode::default());
        let resolved = VariableEmitter::new(&target)
            .emit("Flag", &node, PrimitiveType::Bool)
            .bind(&Bindings::member("Outer::"));
        assert_eq!(resolved.definitions[0], "void Outer::InitFlag(Outer::Flag *val) {");
        assert_eq!(resolved.declarations[0], "static void InitFlag(Outer::Flag *val);");
        assert!(resolved
            .definitions
            .contains(&"  return Outer::ValidateFlag(json.get<Outer::Flag>());".to_string()));
        assert!(resolved
            .definitions
            .contains(&"  *val = json.get<Outer::Flag>();".to_string()));
    }
}
