//! Rendering flattened tokens into CSS or JSON and writing them out.

mod format;
mod writer;

pub use format::{format_css, format_json, remove_quotation_marks};
pub use writer::{compose_file_path, source_out_path, FileSink};

use crate::config::{GenerationOptions, Target};
use crate::error::Result;
use crate::flatten::Flattener;

pub const CSS_FILE_EXTENSION: &str = ".css";
pub const JSON_FILE_EXTENSION: &str = ".json";

/// The artifact format produced from a flattener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    /// Custom properties wrapped in a selector block.
    Css { selector: String },
    /// A flat `name -> value` object.
    Json,
}

impl OutputFormat {
    pub fn for_options(options: &GenerationOptions) -> Self {
        match options.target {
            Target::Css => OutputFormat::Css {
                selector: options.selector.clone(),
            },
            Target::Json => OutputFormat::Json,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Css { .. } => CSS_FILE_EXTENSION,
            OutputFormat::Json => JSON_FILE_EXTENSION,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            OutputFormat::Css { .. } => "css",
            OutputFormat::Json => "json",
        }
    }

    /// Render the flattener's current state.
    ///
    /// CSS is built from the declaration buffer, JSON from the variable map,
    /// so a bundle with duplicate paths lists every declaration in CSS but
    /// only the last value in JSON.
    pub fn render(&self, flattener: &Flattener) -> Result<String> {
        match self {
            OutputFormat::Css { selector } => {
                let wrapped = Flattener::wrap_with_selector(selector, &flattener.raw_string());
                Ok(format_css(&remove_quotation_marks(&wrapped)))
            }
            OutputFormat::Json => format_json(flattener.variables()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::TokenTree;
    use pretty_assertions::assert_eq;

    fn color() -> TokenTree {
        TokenTree::node().with(
            "color",
            TokenTree::node()
                .with("saturation", TokenTree::leaf("high"))
                .with("brightness", TokenTree::leaf(500))
                .with("inrgb", TokenTree::leaf("rgb(10,10,10)")),
        )
    }

    #[test]
    fn test_render_css() {
        let mut flattener = Flattener::new();
        flattener.resolve(&color());

        let css = OutputFormat::Css {
            selector: ":root".to_string(),
        }
        .render(&flattener)
        .unwrap();

        assert_eq!(
            css,
            ":root {\n    --color-saturation: high;\n    --color-brightness: 500;\n    --color-inrgb: rgb(10,10,10);\n}\n"
        );
    }

    #[test]
    fn test_render_json() {
        let mut flattener = Flattener::new();
        flattener.set_prefix("ds");
        flattener.resolve(&color());

        let json = OutputFormat::Json.render(&flattener).unwrap();
        insta::assert_snapshot!(json.trim_end(), @r#"
        {
            "--ds-color-saturation": "high",
            "--ds-color-brightness": "500",
            "--ds-color-inrgb": "rgb(10,10,10)"
        }
        "#);
    }

    #[test]
    fn test_render_duplicates_diverge() {
        let first = TokenTree::node().with("a", TokenTree::node().with("b", TokenTree::leaf(1)));
        let second = TokenTree::node().with("a", TokenTree::node().with("b", TokenTree::leaf(2)));

        let mut flattener = Flattener::new();
        flattener.resolve_many([&first, &second]);

        let css = OutputFormat::Css {
            selector: ":root".to_string(),
        }
        .render(&flattener)
        .unwrap();
        let json = OutputFormat::Json.render(&flattener).unwrap();

        assert_eq!(css, ":root {\n    --a-b: 1;\n    --a-b: 2;\n}\n");
        assert_eq!(json, "{\n    \"--a-b\": \"2\"\n}\n");
    }

    #[test]
    fn test_render_css_strips_quotes() {
        let tree = TokenTree::node().with(
            "font",
            TokenTree::node().with("family", TokenTree::leaf("\"Inter\", sans-serif")),
        );
        let mut flattener = Flattener::new();
        flattener.resolve(&tree);

        let css = OutputFormat::Css {
            selector: ".theme".to_string(),
        }
        .render(&flattener)
        .unwrap();

        assert_eq!(css, ".theme {\n    --font-family: Inter, sans-serif;\n}\n");
    }

    #[test]
    fn test_extensions() {
        assert_eq!(OutputFormat::Json.extension(), ".json");
        assert_eq!(
            OutputFormat::Css {
                selector: ":root".to_string()
            }
            .extension(),
            ".css"
        );
    }
}
