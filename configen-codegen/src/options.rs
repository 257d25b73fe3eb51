//! Generator options.

use serde::Deserialize;

/// Options controlling the layout of the generated translation units.
///
/// Options can be built in code through [`GeneratorOptions::builder`] or
/// deserialized from a caller's own configuration file; missing fields take
/// their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GeneratorOptions {
    /// Enclosing C++ namespaces, outermost first.
    pub namespace: Vec<String>,
    /// Base name of the generated files, without extension.
    pub base_name: String,
    /// Directory prefix used when the source includes the header.
    pub include_path: String,
    /// Additional includes emitted in the header.
    pub header_includes: Vec<String>,
    /// Additional includes emitted in the source.
    pub source_includes: Vec<String>,
    /// JSON document type used by generated code.
    pub json_type: String,
    /// Header providing `json_type`.
    pub json_header: String,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            namespace: Vec::new(),
            base_name: "config".to_string(),
            include_path: String::new(),
            header_includes: Vec::new(),
            source_includes: Vec::new(),
            json_type: "nlohmann::ordered_json".to_string(),
            json_header: "nlohmann/json.hpp".to_string(),
        }
    }
}

impl GeneratorOptions {
    /// Returns a builder starting from the default options.
    #[must_use]
    pub fn builder() -> GeneratorOptionsBuilder {
        GeneratorOptionsBuilder::new()
    }

    /// File name of the declarations unit.
    #[must_use]
    pub fn header_file_name(&self) -> String {
        format!("{}.h", self.base_name)
    }

    /// File name of the definitions unit.
    #[must_use]
    pub fn source_file_name(&self) -> String {
        format!("{}.cc", self.base_name)
    }

    /// Path the definitions unit uses to include the header.
    #[must_use]
    pub fn header_include(&self) -> String {
        let dir = self.include_path.trim_end_matches('/');
        if dir.is_empty() {
            self.header_file_name()
        } else {
            format!("{dir}/{}", self.header_file_name())
        }
    }
}

/// Builder for [`GeneratorOptions`].
#[derive(Debug, Clone, Default)]
pub struct GeneratorOptionsBuilder {
    options: GeneratorOptions,
}

impl GeneratorOptionsBuilder {
    /// Creates a builder with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the enclosing namespaces, outermost first.
    #[must_use]
    pub fn namespace<I, S>(mut self, namespace: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.namespace = namespace.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the base file name.
    #[must_use]
    pub fn base_name(mut self, base_name: impl Into<String>) -> Self {
        self.options.base_name = base_name.into();
        self
    }

    /// Sets the include path prefix of the header.
    #[must_use]
    pub fn include_path(mut self, include_path: impl Into<String>) -> Self {
        self.options.include_path = include_path.into();
        self
    }

    /// Adds an include to the header.
    #[must_use]
    pub fn header_include(mut self, include: impl Into<String>) -> Self {
        self.options.header_includes.push(include.into());
        self
    }

    /// Adds an include to the source.
    #[must_use]
    pub fn source_include(mut self, include: impl Into<String>) -> Self {
        self.options.source_includes.push(include.into());
        self
    }

    /// Sets the JSON document type.
    #[must_use]
    pub fn json_type(mut self, json_type: impl Into<String>) -> Self {
        self.options.json_type = json_type.into();
        self
    }

    /// Sets the header providing the JSON document type.
    #[must_use]
    pub fn json_header(mut self, json_header: impl Into<String>) -> Self {
        self.options.json_header = json_header.into();
        self
    }

    /// Builds the options.
    #[must_use]
    pub fn build(self) -> GeneratorOptions {
        self.options
    }
}
