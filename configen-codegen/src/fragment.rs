//! Composable code fragments.
//!
//! Emitters produce a [`CodeFragment`]: three ordered line buckets whose
//! lines may contain named [`Hole`]s. The context that composes a fragment
//! into its parent fills every hole at once through [`CodeFragment::bind`],
//! which returns a [`ResolvedFragment`] containing plain text only. A
//! resolved fragment can no longer carry a hole, so an unresolved
//! placeholder cannot reach the assembled output.

/// Indentation unit for nested scopes.
pub const INDENT: &str = "  ";

/// Named substitution hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hole {
    /// Qualifying prefix of the enclosing class, e.g. `SubModule::`.
    Scope,
    /// Storage keyword for helper declarations (`static ` inside a class).
    Storage,
}

/// Piece of a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text.
    Text(String),
    /// Open hole.
    Hole(Hole),
}

/// One line of a fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    segments: Vec<Segment>,
}

impl Line {
    /// Creates an empty line.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a line of literal text.
    #[must_use]
    pub fn text_only(text: impl Into<String>) -> Self {
        Self::new().text(text)
    }

    /// Appends literal text.
    #[must_use]
    pub fn text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        if let Some(Segment::Text(last)) = self.segments.last_mut() {
            last.push_str(&text);
        } else if !text.is_empty() {
            self.segments.push(Segment::Text(text));
        }
        self
    }

    /// Appends the scope hole.
    #[must_use]
    pub fn scope(self) -> Self {
        self.hole(Hole::Scope)
    }

    /// Appends the storage hole.
    #[must_use]
    pub fn storage(self) -> Self {
        self.hole(Hole::Storage)
    }

    /// Appends a hole.
    #[must_use]
    pub fn hole(mut self, hole: Hole) -> Self {
        self.segments.push(Segment::Hole(hole));
        self
    }

    /// Appends every segment of `other`.
    #[must_use]
    pub fn join(mut self, other: Line) -> Self {
        for segment in other.segments {
            self = match segment {
                Segment::Text(text) => self.text(text),
                Segment::Hole(hole) => self.hole(hole),
            };
        }
        self
    }

    fn bind(&self, bindings: &Bindings) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Hole(hole) => out.push_str(bindings.value(*hole)),
            }
        }
        out
    }
}

impl From<String> for Line {
    fn from(text: String) -> Self {
        Self::text_only(text)
    }
}

impl From<&str> for Line {
    fn from(text: &str) -> Self {
        Self::text_only(text)
    }
}

/// Values for every hole kind.
///
/// A `Bindings` value always provides all holes, which makes
/// [`CodeFragment::bind`] total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bindings {
    scope: String,
    storage: String,
}

impl Bindings {
    /// Bindings for a fragment placed directly in the target namespace.
    #[must_use]
    pub fn top_level() -> Self {
        Self {
            scope: String::new(),
            storage: String::new(),
        }
    }

    /// Bindings for a fragment placed inside a class whose qualified prefix
    /// is `scope` (e.g. `Outer::Inner::`).
    #[must_use]
    pub fn member(scope: impl Into<String>) -> Self {
        Self {
            scope: scope.into(),
            storage: "static ".to_string(),
        }
    }

    /// Returns the value bound to `hole`.
    #[must_use]
    pub fn value(&self, hole: Hole) -> &str {
        match hole {
            Hole::Scope => &self.scope,
            Hole::Storage => &self.storage,
        }
    }
}

/// Output bucket of a fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    /// Forward declarations and typedefs.
    Predefine,
    /// Class bodies and helper prototypes.
    Declarations,
    /// Out-of-line function bodies.
    Definitions,
}

/// Open code fragment with three ordered buckets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeFragment {
    /// Forward declarations and typedefs.
    pub predefine: Vec<Line>,
    /// Class bodies and helper prototypes.
    pub declarations: Vec<Line>,
    /// Out-of-line function bodies.
    pub definitions: Vec<Line>,
}

impl CodeFragment {
    /// Creates an empty fragment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if every bucket is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predefine.is_empty() && self.declarations.is_empty() && self.definitions.is_empty()
    }

    /// Returns a mutable reference to a bucket.
    pub fn bucket_mut(&mut self, bucket: Bucket) -> &mut Vec<Line> {
        match bucket {
            Bucket::Predefine => &mut self.predefine,
            Bucket::Declarations => &mut self.declarations,
            Bucket::Definitions => &mut self.definitions,
        }
    }

    /// Appends a line to a bucket.
    pub fn push(&mut self, bucket: Bucket, line: Line) {
        self.bucket_mut(bucket).push(line);
    }

    /// Appends already resolved text to a bucket, indented by `levels`.
    pub fn push_resolved(&mut self, bucket: Bucket, lines: &[String], levels: usize) {
        let target = self.bucket_mut(bucket);
        for line in lines {
            target.push(Line::text_only(indent(line, levels)));
        }
    }

    /// Appends another fragment of the same scope, bucket by bucket.
    ///
    /// The holes of `other` stay open and are bound together with this
    /// fragment's own holes.
    pub fn append(&mut self, other: CodeFragment) {
        self.predefine.extend(other.predefine);
        self.declarations.extend(other.declarations);
        self.definitions.extend(other.definitions);
    }

    /// Fills every hole, producing plain text.
    #[must_use]
    pub fn bind(&self, bindings: &Bindings) -> ResolvedFragment {
        let render = |lines: &[Line]| lines.iter().map(|line| line.bind(bindings)).collect();
        ResolvedFragment {
            predefine: render(&self.predefine),
            declarations: render(&self.declarations),
            definitions: render(&self.definitions),
        }
    }
}

/// Fragment with every hole filled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedFragment {
    /// Forward declarations and typedefs.
    pub predefine: Vec<String>,
    /// Class bodies and helper prototypes.
    pub declarations: Vec<String>,
    /// Out-of-line function bodies.
    pub definitions: Vec<String>,
}

impl ResolvedFragment {
    /// Returns true if every bucket is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predefine.is_empty() && self.declarations.is_empty() && self.definitions.is_empty()
    }
}

/// Indents a line by `levels`, leaving blank lines blank.
#[must_use]
pub fn indent(line: &str, levels: usize) -> String {
    if line.is_empty() {
        String::new()
    } else {
        format!("{}{line}", INDENT.repeat(levels))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CodeFragment {
        let mut fragment = CodeFragment::new();
        fragment.push(Bucket::Predefine, Line::text_only("typedef int32_t Value;"));
        fragment.push(
            Bucket::Declarations,
            Line::new().storage().text("void InitValue(Value *val);"),
        );
        fragment.push(
            Bucket::Definitions,
            Line::new()
                .text("void ")
                .scope()
                .text("InitValue(")
                .scope()
                .text("Value *val) {"),
        );
        fragment
    }

    #[test]
    fn test_bind_top_level() {
        let resolved = sample().bind(&Bindings::top_level());
        assert_eq!(resolved.predefine, ["typedef int32_t Value;"]);
        assert_eq!(resolved.declarations, ["void InitValue(Value *val);"]);
        assert_eq!(resolved.definitions, ["void InitValue(Value *val) {"]);
    }

    #[test]
    fn test_bind_member() {
        let resolved = sample().bind(&Bindings::member("Outer::Inner::"));
        assert_eq!(resolved.declarations, ["static void InitValue(Value *val);"]);
        assert_eq!(
            resolved.definitions,
            ["void Outer::Inner::InitValue(Outer::Inner::Value *val) {"]
        );
    }

    #[test]
    fn test_text_segments_merge() {
        let line = Line::new().text("a").text("b").scope().text("c");
        assert_eq!(
            line.segments,
            [
                Segment::Text("ab".to_string()),
                Segment::Hole(Hole::Scope),
                Segment::Text("c".to_string())
            ]
        );
        assert!(!line.segments.contains(&Segment::Hole(Hole::Storage)));
    }

    #[test]
    fn test_join_lines() {
        let line = Line::text_only("  ").join(Line::new().text("x = ").scope().text("Y;"));
        let resolved = {
            let mut fragment = CodeFragment::new();
            fragment.push(Bucket::Definitions, line);
            fragment.bind(&Bindings::member("A::"))
        };
        assert_eq!(resolved.definitions, ["  x = A::Y;"]);
    }

    #[test]
    fn test_append_keeps_bucket_order() {
        let mut first = sample();
        let mut second = CodeFragment::new();
        second.push(Bucket::Predefine, Line::text_only("class Other;"));
        first.append(second);
        let resolved = first.bind(&Bindings::top_level());
        assert_eq!(resolved.predefine, ["typedef int32_t Value;", "class Other;"]);
    }

    #[test]
    fn test_push_resolved_indents() {
        let mut fragment = CodeFragment::new();
        fragment.push_resolved(
            Bucket::Declarations,
            &["int x;".to_string(), String::new()],
            2,
        );
        let resolved = fragment.bind(&Bindings::top_level());
        assert_eq!(resolved.declarations, ["    int x;", ""]);
    }

    #[test]
    fn test_empty_fragment() {
        assert!(CodeFragment::new().is_empty());
        assert!(CodeFragment::new().bind(&Bindings::top_level()).is_empty());
        assert!(!sample().is_empty());
    }
}
