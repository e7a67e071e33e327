//! Token flattening engine.
//!
//! Turns a nested token tree into CSS custom properties. Every scalar leaf
//! becomes one variable whose name is the path from the root joined with
//! `-` and prefixed with `--` (plus an optional user prefix):
//!
//! ```text
//! { "color": { "brand": "#ff0066" } }   ->   --color-brand: #ff0066;
//! ```
//!
//! Two views of the result are kept side by side:
//!
//! - the variable map, keyed by name, where a later leaf with the same name
//!   overwrites an earlier one in place;
//! - the declaration buffer, which records every `name: value;` visited and
//!   is never deduplicated.
//!
//! The two only disagree when a batch contains the same path more than once.
//! That divergence is long-standing observable behaviour of the CSS output
//! and is kept as is.
//!
//! Path fragments are joined verbatim. A key that itself contains `-` is
//! indistinguishable from two nested keys (`{"a-b": 1}` and `{"a": {"b": 1}}`
//! both produce `--a-b`).

pub mod batch;

use indexmap::IndexMap;

use crate::tokens::{Scalar, TokenTree};

pub use batch::{BatchReport, BatchResolver, OutputMode, OutputSink};

/// Marker that starts every CSS custom property name.
pub const VARIABLE_MARKER: &str = "--";

/// Separator between path fragments (and between prefix and path).
pub const FRAGMENT_SEPARATOR: &str = "-";

/// Flat variable name -> stringified value, in traversal order.
pub type VariableMap = IndexMap<String, String>;

/// Mutable state threaded through a traversal.
#[derive(Debug, Clone, Default)]
pub struct Accumulator {
    fragments: Vec<String>,
    variables: VariableMap,
    declarations: Vec<String>,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn variables(&self) -> &VariableMap {
        &self.variables
    }

    pub fn declarations(&self) -> &[String] {
        &self.declarations
    }

    /// Current path from the root to the node being visited.
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    fn insert(&mut self, name: String, value: &Scalar) {
        let value = value.to_string();
        self.declarations.push(format!("{}: {};", name, value));
        self.variables.insert(name, value);
    }

    fn clear(&mut self) {
        self.fragments.clear();
        self.variables.clear();
        self.declarations.clear();
    }
}

/// Build a variable name from a prefix and a path.
pub fn variable_name(prefix: &str, fragments: &[String]) -> String {
    let path = fragments.join(FRAGMENT_SEPARATOR);
    if prefix.is_empty() {
        format!("{VARIABLE_MARKER}{path}")
    } else {
        format!("{VARIABLE_MARKER}{prefix}{FRAGMENT_SEPARATOR}{path}")
    }
}

/// Visit every child of `tree`, recording leaves into `acc`.
///
/// The fragment stack is restored to its entry state when this returns.
pub fn flatten_into(tree: &TokenTree, prefix: &str, acc: &mut Accumulator) {
    match tree {
        TokenTree::Node(children) => {
            for (key, child) in children {
                visit(key.clone(), child, prefix, acc);
            }
        }
        TokenTree::Sequence(items) => {
            for (index, child) in items.iter().enumerate() {
                visit(index.to_string(), child, prefix, acc);
            }
        }
        // A bare scalar has no fields to walk.
        TokenTree::Leaf(_) => {}
    }
}

fn visit(fragment: String, child: &TokenTree, prefix: &str, acc: &mut Accumulator) {
    acc.fragments.push(fragment);
    match child {
        TokenTree::Leaf(value) => {
            let name = variable_name(prefix, &acc.fragments);
            acc.insert(name, value);
        }
        TokenTree::Node(_) | TokenTree::Sequence(_) => flatten_into(child, prefix, acc),
    }
    acc.fragments.pop();
}

/// Flatten a single tree into a fresh accumulator.
pub fn flatten(tree: &TokenTree, prefix: &str) -> Accumulator {
    let mut acc = Accumulator::new();
    flatten_into(tree, prefix, &mut acc);
    acc
}

/// Reusable flattener holding a prefix and accumulated results.
#[derive(Debug, Clone, Default)]
pub struct Flattener {
    prefix: String,
    acc: Accumulator,
}

impl Flattener {
    pub fn new() -> Self {
        Self::default()
    }

    /// Join a selector and a raw declaration block.
    pub fn wrap_with_selector(selector: &str, css: &str) -> String {
        format!("{} {}", selector, css)
    }

    /// Replace the prefix used for subsequently generated names.
    /// An empty prefix means none.
    pub fn set_prefix(&mut self, prefix: impl Into<String>) {
        self.prefix = prefix.into();
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Resolve one tree, adding its leaves to the accumulated results.
    pub fn resolve(&mut self, tree: &TokenTree) {
        debug_assert!(self.acc.fragments.is_empty());
        flatten_into(tree, &self.prefix, &mut self.acc);
        debug_assert!(self.acc.fragments.is_empty());
    }

    /// Resolve several trees into one shared result.
    ///
    /// Only the fragment stack is cleared between trees; variables and
    /// declarations keep accumulating, so a later tree overwrites colliding
    /// names in the map while the buffer keeps both declarations.
    pub fn resolve_many<'a, I>(&mut self, trees: I)
    where
        I: IntoIterator<Item = &'a TokenTree>,
    {
        for tree in trees {
            self.resolve(tree);
            self.acc.fragments.clear();
        }
    }

    /// The flat variable map.
    pub fn variables(&self) -> &VariableMap {
        self.acc.variables()
    }

    /// Every declaration visited, in order, including duplicates.
    pub fn declarations(&self) -> &[String] {
        self.acc.declarations()
    }

    /// The declaration buffer as a single `{...}` block.
    pub fn raw_string(&self) -> String {
        format!("{{{}}}", self.acc.declarations.join(" "))
    }

    /// Clear variables, declarations, the fragment stack and the prefix.
    pub fn reset(&mut self) {
        self.acc.clear();
        self.prefix.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn palette() -> TokenTree {
        TokenTree::node().with(
            "neutral",
            TokenTree::strings([
                "#808080", "#777678", "#6d6c6f", "#646367", "#5b595f", "#525057", "#49474f",
                "#413e47", "#383540", "#302d38",
            ]),
        )
    }

    fn color() -> TokenTree {
        TokenTree::node().with(
            "color",
            TokenTree::node()
                .with("saturation", TokenTree::leaf("high"))
                .with("brightness", TokenTree::leaf(500)),
        )
    }

    #[test]
    fn test_resolve_sequence_uses_indices() {
        let mut flattener = Flattener::new();
        flattener.resolve(&palette());

        let vars = flattener.variables();
        assert_eq!(vars.len(), 10);
        assert_eq!(vars["--neutral-0"], "#808080");
        assert_eq!(vars["--neutral-1"], "#777678");
        assert_eq!(vars["--neutral-9"], "#302d38");
    }

    #[test]
    fn test_raw_string_two_entries() {
        let tree = TokenTree::node().with("neutral", TokenTree::strings(["#808080", "#777678"]));
        let mut flattener = Flattener::new();
        flattener.resolve(&tree);

        let expected: VariableMap = [
            ("--neutral-0".to_string(), "#808080".to_string()),
            ("--neutral-1".to_string(), "#777678".to_string()),
        ]
        .into_iter()
        .collect();
        assert_eq!(flattener.variables(), &expected);
        insta::assert_snapshot!(
            flattener.raw_string(),
            @"{--neutral-0: #808080; --neutral-1: #777678;}"
        );
    }

    #[test]
    fn test_flat_structure_one_entry_per_field() {
        let tree = TokenTree::node()
            .with("primary", TokenTree::leaf("#0055ff"))
            .with("radius", TokenTree::leaf(4))
            .with("enabled", TokenTree::leaf(true));

        let mut flattener = Flattener::new();
        flattener.resolve(&tree);

        let names: Vec<&str> = flattener.variables().keys().map(String::as_str).collect();
        assert_eq!(names, vec!["--primary", "--radius", "--enabled"]);
        assert_eq!(flattener.variables()["--radius"], "4");
        assert_eq!(flattener.variables()["--enabled"], "true");
    }

    #[test]
    fn test_prefix() {
        let mut flattener = Flattener::new();
        flattener.set_prefix("ds");
        flattener.resolve(&color());

        let vars = flattener.variables();
        assert_eq!(vars["--ds-color-saturation"], "high");
        assert_eq!(vars["--ds-color-brightness"], "500");
    }

    #[test]
    fn test_empty_prefix_restores_bare_names() {
        let mut flattener = Flattener::new();
        flattener.set_prefix("my");
        flattener.resolve(&palette());
        assert!(flattener.variables().contains_key("--my-neutral-0"));

        flattener.reset();
        flattener.set_prefix("");
        flattener.resolve(&palette());
        assert!(flattener.variables().contains_key("--neutral-0"));
        assert!(!flattener.variables().contains_key("--my-neutral-0"));
    }

    #[test]
    fn test_declaration_count_matches_leaves() {
        let tree = TokenTree::node()
            .with("space", TokenTree::strings(["2px", "4px", "8px"]))
            .with(
                "font",
                TokenTree::node()
                    .with("family", TokenTree::strings(["Inter", "sans-serif"]))
                    .with("weight", TokenTree::node().with("bold", TokenTree::leaf(700))),
            );

        let mut flattener = Flattener::new();
        flattener.resolve(&tree);

        assert_eq!(flattener.declarations().len(), tree.leaf_count());
        assert_eq!(flattener.declarations()[5], "--font-weight-bold: 700;");
    }

    #[test]
    fn test_resolve_many_disjoint() {
        let black = TokenTree::node().with("blackShades", TokenTree::strings(["#808080", "#777678"]));

        let mut flattener = Flattener::new();
        flattener.resolve_many([&palette(), &black]);

        let vars = flattener.variables();
        assert_eq!(vars.len(), palette().leaf_count() + black.leaf_count());
        assert_eq!(vars["--neutral-0"], "#808080");
        assert_eq!(vars["--blackShades-1"], "#777678");
    }

    #[test]
    fn test_resolve_many_collision_overwrites_map_but_not_buffer() {
        let first = TokenTree::node().with("brand", TokenTree::node().with("main", TokenTree::leaf("red")));
        let second = TokenTree::node().with("brand", TokenTree::node().with("main", TokenTree::leaf("blue")));

        let mut flattener = Flattener::new();
        flattener.resolve_many([&first, &second]);

        assert_eq!(flattener.variables().len(), 1);
        assert_eq!(flattener.variables()["--brand-main"], "blue");
        assert_eq!(
            flattener.declarations(),
            &["--brand-main: red;".to_string(), "--brand-main: blue;".to_string()]
        );
    }

    #[test]
    fn test_overwrite_keeps_first_position() {
        let first = TokenTree::node()
            .with("a", TokenTree::leaf(1))
            .with("b", TokenTree::leaf(2));
        let second = TokenTree::node().with("a", TokenTree::leaf(3));

        let mut flattener = Flattener::new();
        flattener.resolve_many([&first, &second]);

        let entries: Vec<(&str, &str)> = flattener
            .variables()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(entries, vec![("--a", "3"), ("--b", "2")]);
    }

    #[test]
    fn test_prefix_persists_across_resolve_many() {
        let mut flattener = Flattener::new();
        flattener.set_prefix("p");
        flattener.resolve_many([&palette(), &color()]);

        assert!(flattener.variables().keys().all(|k| k.starts_with("--p-")));
        assert_eq!(flattener.prefix(), "p");
    }

    #[test]
    fn test_reset() {
        let mut flattener = Flattener::new();
        flattener.set_prefix("ds");
        flattener.resolve(&color());
        flattener.reset();

        assert!(flattener.variables().is_empty());
        assert!(flattener.declarations().is_empty());
        assert_eq!(flattener.raw_string(), "{}");
        assert_eq!(flattener.prefix(), "");

        // resetting twice is harmless
        flattener.reset();
        assert_eq!(flattener.raw_string(), "{}");
    }

    #[test]
    fn test_empty_structure() {
        let mut flattener = Flattener::new();
        flattener.resolve(&TokenTree::node());
        flattener.resolve(&TokenTree::leaf("bare"));

        assert!(flattener.variables().is_empty());
        assert_eq!(flattener.raw_string(), "{}");
    }

    #[test]
    fn test_deep_nesting() {
        let mut tree = TokenTree::leaf("deep");
        for _ in 0..64 {
            tree = TokenTree::node().with("n", tree);
        }

        let acc = flatten(&tree, "");
        let expected = format!("--{}", vec!["n"; 64].join("-"));
        assert_eq!(acc.variables()[&expected], "deep");
        assert!(acc.fragments().is_empty());
    }

    #[test]
    fn test_dash_in_key_merges_with_nested_path() {
        let dashed = TokenTree::node().with("a-b", TokenTree::leaf(1));
        let nested = TokenTree::node().with("a", TokenTree::node().with("b", TokenTree::leaf(2)));

        let mut flattener = Flattener::new();
        flattener.resolve_many([&dashed, &nested]);

        assert_eq!(flattener.variables().len(), 1);
        assert_eq!(flattener.variables()["--a-b"], "2");
    }

    #[test]
    fn test_variable_name() {
        let path = vec!["color".to_string(), "primary".to_string()];
        assert_eq!(variable_name("", &path), "--color-primary");
        assert_eq!(variable_name("ds", &path), "--ds-color-primary");
    }

    #[test]
    fn test_wrap_with_selector() {
        assert_eq!(
            Flattener::wrap_with_selector(":root", "{--a: 1;}"),
            ":root {--a: 1;}"
        );
    }
}
