// ── Value ─────────────────────────────────────────────────────────────────

/// A literal value in a property.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Quoted string: `"date,show"`
    Str(String),
    /// Floating-point literal: `16.0` or `16`
    Number(f32),
    /// Color literal, straight-alpha RGBA bytes.
    Color([u8; 4]),
    /// Unquoted identifier: part names, actions, alignment keywords.
    Ident(String),
}

// ── Prop ──────────────────────────────────────────────────────────────────

/// A single `key: value` property inside a node block.
#[derive(Debug, Clone, PartialEq)]
pub struct Prop {
    pub key: String,
    pub value: Value,
    /// 1-based line of the key, kept for diagnostics.
    pub line: usize,
}

// ── Node ──────────────────────────────────────────────────────────────────

/// One element of the layout tree.
///
/// ```text
/// Part "time_text" {
///     x: 20  y: 16
///     size: 44
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Node kind: `"Theme"`, `"Part"`, `"Region"`, `"Program"`.
    pub kind: String,
    /// Optional inline string naming the node.
    pub name: Option<String>,
    pub props: Vec<Prop>,
    pub children: Vec<Node>,
    /// 1-based line of the node keyword.
    pub line: usize,
}

impl Node {
    /// Look up a property value by key. The last occurrence wins.
    pub fn prop(&self, key: &str) -> Option<&Value> {
        self.props.iter().rev().find(|p| p.key == key).map(|p| &p.value)
    }

    pub fn prop_f32(&self, key: &str) -> Option<f32> {
        match self.prop(key)? {
            Value::Number(v) => Some(*v),
            _ => None,
        }
    }

    /// Get a property as `&str` if it is a `Str` or `Ident`.
    pub fn prop_str(&self, key: &str) -> Option<&str> {
        match self.prop(key)? {
            Value::Str(s) | Value::Ident(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn prop_color(&self, key: &str) -> Option<[u8; 4]> {
        match self.prop(key)? {
            Value::Color(c) => Some(*c),
            _ => None,
        }
    }

    /// Human-readable label used in error messages: `Part "time_text" (line 4)`.
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) => format!("{} {:?} (line {})", self.kind, name, self.line),
            None => format!("{} (line {})", self.kind, self.line),
        }
    }
}

// ── Document ──────────────────────────────────────────────────────────────

/// The top-level parse result of a `.gtheme` source: a sequence of root nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub nodes: Vec<Node>,
}

impl Document {
    /// Finds the first root node of `kind` named `name`.
    pub fn find(&self, kind: &str, name: &str) -> Option<&Node> {
        self.nodes
            .iter()
            .find(|n| n.kind == kind && n.name.as_deref() == Some(name))
    }
}
