//! Array emission.

use super::{CppTarget, EmittedType, push_body};
use crate::fragment::{Bucket, CodeFragment, Line};
use configen_schema::ArrayNode;

/// Item count bounds of an array.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArrayBounds {
    /// Minimum number of elements.
    pub min_items: Option<u64>,
    /// Maximum number of elements.
    pub max_items: Option<u64>,
}

impl ArrayBounds {
    /// Number of elements created by `Init`.
    #[must_use]
    pub fn initial_len(&self) -> u64 {
        self.min_items.unwrap_or(0)
    }

    /// Size checks, as C++ conditions that reject the container `subject`.
    fn violations(&self, subject: &str) -> Vec<String> {
        let mut checks = Vec::new();
        if let Some(min) = self.min_items.filter(|min| *min > 0) {
            checks.push(format!("if ({subject}.size() < {min}U) return false;"));
        }
        if let Some(max) = self.max_items {
            checks.push(format!("if ({subject}.size() > {max}U) return false;"));
        }
        checks
    }
}

impl From<&ArrayNode> for ArrayBounds {
    fn from(node: &ArrayNode) -> Self {
        Self {
            min_items: node.min_items,
            max_items: node.max_items,
        }
    }
}

/// Emitter for array nodes.
///
/// The array wraps the fragment of its item type and adds a
/// `std::vector` typedef plus element-wise helpers.
pub struct ArrayEmitter<'a> {
    target: &'a CppTarget,
}

impl<'a> ArrayEmitter<'a> {
    /// Creates a new array emitter.
    #[must_use]
    pub fn new(target: &'a CppTarget) -> Self {
        Self { target }
    }

    /// Emits the fragment for an array type called `name` holding `item`.
    #[must_use]
    pub fn emit(&self, name: &str, item: EmittedType, bounds: ArrayBounds) -> CodeFragment {
        let EmittedType {
            mut fragment,
            name: item_name,
        } = item;
        let element = item_name.type_path();

        // The item lives in the same scope and is bound together with the array.
        fragment.push(
            Bucket::Predefine,
            Line::text_only(format!(
                "typedef std::vector< {}> {name};",
                self.target.absolute(&item_name)
            )),
        );
        self.target.push_prototypes(&mut fragment, name);

        fragment.push(Bucket::Definitions, self.target.init_head(name));
        let mut body = vec!["val->clear();".to_string()];
        let count = bounds.initial_len();
        if count > 0 {
            body.push(format!("for (size_t i = 0; i < {count}U; ++i) {{"));
            body.push(format!("  {element} element = {element}();"));
            body.push(format!("  {}(&element);", item_name.function("Init")));
            body.push("  val->push_back(element);".to_string());
            body.push("}".to_string());
        }
        push_body(&mut fragment, body);

        fragment.push(Bucket::Definitions, self.target.validate_head(name));
        let mut body = bounds.violations("val");
        body.push("for (size_t i = 0; i < val.size(); ++i) {".to_string());
        body.push(format!(
            "  if (!{}(val[i])) return false;",
            item_name.function("Validate")
        ));
        body.push("}".to_string());
        body.push("return true;".to_string());
        push_body(&mut fragment, body);

        fragment.push(Bucket::Definitions, self.target.validate_json_head(name));
        let mut body = vec!["if (!json.is_array()) return false;".to_string()];
        body.extend(bounds.violations("json"));
        body.push("for (const auto &element : json) {".to_string());
        body.push(format!(
            "  if (!{}(element)) return false;",
            item_name.function("Validate")
        ));
        body.push("}".to_string());
        body.push("return true;".to_string());
        push_body(&mut fragment, body);

        let json = &self.target.json_type;
        fragment.push(Bucket::Definitions, self.target.to_json_head(name));
        push_body(
            &mut fragment,
            [
                format!("*json = {json}::array();"),
                "for (size_t i = 0; i < val.size(); ++i) {".to_string(),
                format!("  {json} element;"),
                format!(
                    "  if (!{}(val[i], &element)) return false;",
                    item_name.to_json_function()
                ),
                "  json->push_back(element);".to_string(),
                "}".to_string(),
                "return true;".to_string(),
            ],
        );

        // Elements go through a local copy so that std::vector<bool> works.
        fragment.push(Bucket::Definitions, self.target.json_to_head(name));
        push_body(
            &mut fragment,
            [
                "if (!json.is_array()) return false;".to_string(),
                "val->resize(json.size());".to_string(),
                "for (size_t i = 0; i < json.size(); ++i) {".to_string(),
                format!("  {element} element = (*val)[i];"),
                format!(
                    "  if (!{}(json[i], &element)) return false;",
                    item_name.function("JsonTo")
                ),
                "  (*val)[i] = element;".to_string(),
                "}".to_string(),
                "return true;".to_string(),
            ],
        );

        fragment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpp::VariableEmitter;
    use crate::fragment::{Bindings, ResolvedFragment};
    use crate::namespace::QualifiedName;
    use crate::options::GeneratorOptions;
    use configen_schema::{BoolNode, PrimitiveType, ScalarNode};

    fn target() -> CppTarget {
        CppTarget::new(&GeneratorOptions::builder().namespace(["cfg"]).build())
    }

    fn bool_array(scope: &[&str], bounds: ArrayBounds) -> CodeFragment {
        let target = target();
        let scope: Vec<String> = scope.iter().map(|s| s.to_string()).collect();
        let node = ScalarNode::Bool(BoolNode::default());
        let item = EmittedType {
            fragment: VariableEmitter::new(&target).emit("FlagsElement", &node, PrimitiveType::Bool),
            name: QualifiedName::new(scope, "FlagsElement"),
        };
        ArrayEmitter::new(&target).emit("Flags", item, bounds)
    }

    fn top_level(bounds: ArrayBounds) -> ResolvedFragment {
        bool_array(&[], bounds).bind(&Bindings::top_level())
    }

    #[test]
    fn test_item_precedes_array() {
        let resolved = top_level(ArrayBounds::default());
        assert_eq!(
            resolved.predefine,
            [
                "typedef bool FlagsElement;",
                "typedef std::vector< ::cfg::FlagsElement> Flags;"
            ]
        );
        assert_eq!(resolved.declarations.len(), 10);
        assert_eq!(resolved.declarations[5], "void InitFlags(Flags *val);");
    }

    #[test]
    fn test_init_creates_min_items() {
        let resolved = top_level(ArrayBounds {
            min_items: Some(3),
            max_items: Some(3),
        });
        let code = resolved.definitions.join("\n");
        assert!(code.contains(
            "void InitFlags(Flags *val) {\n  val->clear();\n  for (size_t i = 0; i < 3U; ++i) {\n    FlagsElement element = FlagsElement();\n    InitFlagsElement(&element);\n    val->push_back(element);\n  }\n}"
        ));
    }

    #[test]
    fn test_init_without_min_items_clears() {
        let code = top_level(ArrayBounds::default()).definitions.join("\n");
        assert!(code.contains("void InitFlags(Flags *val) {\n  val->clear();\n}"));
    }

    #[test]
    fn test_bounds_only_when_present() {
        let code = top_level(ArrayBounds::default()).definitions.join("\n");
        assert!(!code.contains(".size() <"));
        assert!(!code.contains(".size() >"));

        let code = top_level(ArrayBounds {
            min_items: Some(1),
            max_items: None,
        })
        .definitions
        .join("\n");
        assert!(code.contains("if (val.size() < 1U) return false;"));
        assert!(code.contains("if (json.size() < 1U) return false;"));
        assert!(!code.contains(".size() >"));

        let code = top_level(ArrayBounds {
            min_items: None,
            max_items: Some(4),
        })
        .definitions
        .join("\n");
        assert!(code.contains("if (val.size() > 4U) return false;"));
        assert!(code.contains("if (json.size() > 4U) return false;"));
    }

    #[test]
    fn test_json_conversion_is_element_wise() {
        let code = top_level(ArrayBounds::default()).definitions.join("\n");
        assert!(code.contains("  if (!json.is_array()) return false;\n  val->resize(json.size());"));
        assert!(code.contains("    FlagsElement element = (*val)[i];"));
        assert!(code.contains("    if (!JsonToFlagsElement(json[i], &element)) return false;"));
        assert!(code.contains("    if (!FlagsElementToJson(val[i], &element)) return false;"));
        assert!(code.contains("*json = nlohmann::ordered_json::array();"));
    }

    #[test]
    fn test_nested_array_qualifies_item() {
        let resolved = bool_array(&["Outer"], ArrayBounds::default()).bind(&Bindings::member("Outer::"));
        assert_eq!(
            resolved.predefine[1],
            "typedef std::vector< ::cfg::Outer::FlagsElement> Flags;"
        );
        let code = resolved.definitions.join("\n");
        assert!(code.contains("bool Outer::ValidateFlags(const Outer::Flags &val) {"));
        assert!(code.contains("    if (!Outer::ValidateFlagsElement(val[i])) return false;"));
    }
}
