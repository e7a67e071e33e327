//! Token tree data model.
//!
//! A token source is a tree of named groups whose leaves are scalar values.
//! Groups keep their declaration order so that generated variables come out
//! in the same order the author wrote them.

use std::fmt;

use indexmap::IndexMap;

/// A scalar leaf value in a token tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::String(s) => f.write_str(s),
            Scalar::Integer(n) => write!(f, "{}", n),
            Scalar::Float(n) => f.write_str(&format_float(*n)),
            Scalar::Bool(b) => write!(f, "{}", b),
            Scalar::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(value)
    }
}

impl From<i64> for Scalar {
    fn from(value: i64) -> Self {
        Scalar::Integer(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Integer(i64::from(value))
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Float(value)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

/// Render a float the way token authors see it in their JavaScript tooling:
/// shortest round-trip digits, plain notation for decimal exponents from
/// -6 to 20, otherwise `1e+21` / `1.5e-7`. `-0` renders as `0`.
fn format_float(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let sci = format!("{:e}", value.abs());
    let (mantissa, exponent) = match sci.split_once('e') {
        Some(parts) => parts,
        None => return format!("{}{}", sign, sci),
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    // position of the decimal point relative to the first digit
    let n = exponent + 1;

    let body = if k <= n && n <= 21 {
        format!("{}{}", digits, "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{}.{}", int, frac)
    } else if -6 < n && n <= 0 {
        format!("0.{}{}", "0".repeat((-n) as usize), digits)
    } else {
        let (first, rest) = digits.split_at(1);
        let exp_sign = if n - 1 >= 0 { "+" } else { "-" };
        if rest.is_empty() {
            format!("{}e{}{}", first, exp_sign, (n - 1).abs())
        } else {
            format!("{}.{}e{}{}", first, rest, exp_sign, (n - 1).abs())
        }
    };

    format!("{}{}", sign, body)
}

/// A node in a token tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenTree {
    /// A scalar value.
    Leaf(Scalar),
    /// Named children in declaration order.
    Node(IndexMap<String, TokenTree>),
    /// Indexed children (e.g. a colour ramp).
    Sequence(Vec<TokenTree>),
}

impl TokenTree {
    /// Create an empty group.
    pub fn node() -> Self {
        TokenTree::Node(IndexMap::new())
    }

    /// Create a leaf from anything convertible to a scalar.
    pub fn leaf(value: impl Into<Scalar>) -> Self {
        TokenTree::Leaf(value.into())
    }

    /// Builder-style insertion of a named child.
    ///
    /// Has no effect on leaves and sequences.
    pub fn with(mut self, key: impl Into<String>, child: TokenTree) -> Self {
        if let TokenTree::Node(children) = &mut self {
            children.insert(key.into(), child);
        }
        self
    }

    /// Build a sequence of string leaves.
    pub fn strings<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TokenTree::Sequence(
            values
                .into_iter()
                .map(|s| TokenTree::Leaf(Scalar::String(s.into())))
                .collect(),
        )
    }

    pub fn is_node(&self) -> bool {
        matches!(self, TokenTree::Node(_))
    }

    /// Count scalar leaves reachable from this node.
    pub fn leaf_count(&self) -> usize {
        match self {
            TokenTree::Leaf(_) => 1,
            TokenTree::Node(children) => children.values().map(TokenTree::leaf_count).sum(),
            TokenTree::Sequence(items) => items.iter().map(TokenTree::leaf_count).sum(),
        }
    }
}

impl Default for TokenTree {
    fn default() -> Self {
        TokenTree::node()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_display() {
        assert_eq!(Scalar::from("#808080").to_string(), "#808080");
        assert_eq!(Scalar::Integer(500).to_string(), "500");
        assert_eq!(Scalar::Float(1.5).to_string(), "1.5");
        assert_eq!(Scalar::Float(2.0).to_string(), "2");
        assert_eq!(Scalar::Bool(true).to_string(), "true");
        assert_eq!(Scalar::Null.to_string(), "null");
    }

    #[test]
    fn test_float_display_matches_js_number_strings() {
        let cases = [
            (0.4, "0.4"),
            (-2.5, "-2.5"),
            (123456.789, "123456.789"),
            (1e20, "100000000000000000000"),
            (1e21, "1e+21"),
            (1.5e300, "1.5e+300"),
            (0.000001, "0.000001"),
            (1.5e-7, "1.5e-7"),
            (-0.0, "0"),
            (f64::INFINITY, "Infinity"),
            (f64::NEG_INFINITY, "-Infinity"),
        ];
        for (value, expected) in cases {
            assert_eq!(Scalar::Float(value).to_string(), expected, "{:?}", value);
        }
        assert_eq!(Scalar::Float(f64::NAN).to_string(), "NaN");
    }

    #[test]
    fn test_leaf_count() {
        let tree = TokenTree::node()
            .with("neutral", TokenTree::strings(["#808080", "#777678"]))
            .with(
                "color",
                TokenTree::node()
                    .with("saturation", TokenTree::leaf("high"))
                    .with("brightness", TokenTree::leaf(500)),
            );

        assert_eq!(tree.leaf_count(), 4);
    }

    #[test]
    fn test_with_ignores_non_nodes() {
        let leaf = TokenTree::leaf(1).with("ignored", TokenTree::leaf(2));
        assert_eq!(leaf, TokenTree::leaf(1));
    }
}
