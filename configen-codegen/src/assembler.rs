//! Translation unit assembly.

use crate::generator::GeneratedUnit;
use crate::options::GeneratorOptions;
use indexmap::IndexMap;

/// Banner placed at the top of both units.
const BANNER: &str = "// Generated by configen. Do not edit.";

/// Standard headers the generated code depends on.
const STANDARD_INCLUDES: [&str; 5] = ["cstddef", "cstdint", "functional", "string", "vector"];

/// Generated declaration and definition units.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratedCode {
    /// Header contents.
    pub declarations: String,
    /// Source contents.
    pub definitions: String,
}

/// Assembler concatenating generated units into a header and a source file.
pub struct Assembler<'a> {
    options: &'a GeneratorOptions,
}

impl<'a> Assembler<'a> {
    /// Creates a new assembler.
    #[must_use]
    pub fn new(options: &'a GeneratorOptions) -> Self {
        Self { options }
    }

    /// Assembles both units.
    #[must_use]
    pub fn assemble(&self, units: &IndexMap<String, GeneratedUnit>) -> GeneratedCode {
        GeneratedCode {
            declarations: self.header(units),
            definitions: self.source(units),
        }
    }

    /// Builds the header.
    #[must_use]
    pub fn header(&self, units: &IndexMap<String, GeneratedUnit>) -> String {
        let guard = self.include_guard();
        let mut output = String::new();

        output.push_str(BANNER);
        output.push_str("\n\n");
        output.push_str(&format!("#ifndef {guard}\n#define {guard}\n\n"));

        for header in STANDARD_INCLUDES {
            output.push_str(&format!("#include <{header}>\n"));
        }
        output.push('\n');
        output.push_str(&include_line(&format!("<{}>", self.options.json_header)));
        for include in &self.options.header_includes {
            output.push_str(&include_line(include));
        }
        output.push('\n');

        output.push_str(&self.namespace_open());

        let predefine: Vec<&str> = units
            .values()
            .flat_map(|unit| unit.fragment.predefine.iter().map(String::as_str))
            .collect();
        if !predefine.is_empty() {
            push_lines(&mut output, predefine);
            output.push('\n');
        }
        for unit in units.values() {
            if unit.fragment.declarations.is_empty() {
                continue;
            }
            push_lines(&mut output, unit.fragment.declarations.iter().map(String::as_str));
            output.push('\n');
        }

        output.push_str(&self.namespace_close());
        output.push_str(&format!("#endif  // {guard}\n"));
        output
    }

    /// Builds the source.
    #[must_use]
    pub fn source(&self, units: &IndexMap<String, GeneratedUnit>) -> String {
        let mut output = String::new();

        output.push_str(BANNER);
        output.push_str("\n\n");
        output.push_str(&include_line(&format!("\"{}\"", self.options.header_include())));
        if !self.options.source_includes.is_empty() {
            output.push('\n');
            for include in &self.options.source_includes {
                output.push_str(&include_line(include));
            }
        }
        output.push('\n');

        output.push_str(&self.namespace_open());
        for unit in units.values() {
            push_lines(&mut output, unit.fragment.definitions.iter().map(String::as_str));
        }
        output.push_str(&self.namespace_close());
        output
    }

    /// Include guard derived from the include path and base name.
    ///
    /// The guard only depends on the options, so regenerating identical
    /// input yields identical output.
    #[must_use]
    pub fn include_guard(&self) -> String {
        let raw = format!(
            "{}_{}_H_",
            self.options.include_path, self.options.base_name
        );
        let mut guard: String = raw
            .trim_start_matches(|c: char| !c.is_ascii_alphanumeric())
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();
        while guard.contains("__") {
            guard = guard.replace("__", "_");
        }
        if guard.starts_with(|c: char| c.is_ascii_digit()) {
            guard.insert_str(0, "CONFIG_");
        }
        guard
    }

    fn namespace_open(&self) -> String {
        self.options
            .namespace
            .iter()
            .map(|ns| format!("namespace {ns} {{\n"))
            .chain((!self.options.namespace.is_empty()).then(|| "\n".to_string()))
            .collect()
    }

    fn namespace_close(&self) -> String {
        self.options
            .namespace
            .iter()
            .rev()
            .map(|ns| format!("}}  // namespace {ns}\n"))
            .chain((!self.options.namespace.is_empty()).then(|| "\n".to_string()))
            .collect()
    }
}

/// Renders an include directive; bare names are quoted.
fn include_line(include: &str) -> String {
    if include.starts_with('<') || include.starts_with('"') {
        format!("#include {include}\n")
    } else {
        format!("#include \"{include}\"\n")
    }
}

fn push_lines<'l>(output: &mut String, lines: impl IntoIterator<Item = &'l str>) {
    for line in lines {
        output.push_str(line);
        output.push('\n');
    }
}
