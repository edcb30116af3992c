//! User-facing MathJax settings and the permissive resolver over them.

use serde::Serialize;
use toml::Value;

/// Script source that picks the CDN protocol from the embedding page.
pub const SOURCE_AUTO: &str = "'https:' == document.location.protocol ? 'https://c328740.ssl.cf1.rackcdn.com/mathjax/latest/MathJax.js?config=TeX-AMS-MML_HTMLorMML' : 'http://cdn.mathjax.org/mathjax/latest/MathJax.js?config=TeX-AMS-MML_HTMLorMML'";

/// Plain-HTTP script source, selected by `ssl = "off"`.
pub const SOURCE_HTTP: &str =
    "'http://cdn.mathjax.org/mathjax/latest/MathJax.js?config=TeX-AMS-MML_HTMLorMML'";

/// HTTPS script source, selected by `ssl = "force"`.
pub const SOURCE_HTTPS: &str =
    "'https://c328740.ssl.cf1.rackcdn.com/mathjax/latest/MathJax.js?config=TeX-AMS-MML_HTMLorMML'";

/// Horizontal alignment of displayed equations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Right,
    #[default]
    Center,
}

impl Align {
    /// Parse an alignment name, falling back to `Center` for anything else.
    fn from_name(name: &str) -> Self {
        match name {
            "left" => Align::Left,
            "right" => Align::Right,
            _ => Align::Center,
        }
    }
}

/// Resolved MathJax configuration.
///
/// Every field always has a value: [`MathSettings::resolve`] starts from the
/// defaults and only overwrites a field when the user-supplied value passes
/// that field's validation rule. Constructed once during host initialization
/// and read-only afterward.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MathSettings {
    /// Alignment of displayed equations.
    pub align: Align,
    /// Indent of displayed equations when `align` is not `center`.
    pub indent: String,
    /// Whether to attach the MathJax contextual menu.
    pub show_menu: bool,
    /// Whether escaped delimiters (`\$`) are processed.
    pub process_escapes: bool,
    /// What the reader sees while waiting for TeX to render.
    pub latex_preview: String,
    /// Color the math is rendered in.
    pub color: String,
    /// Tag with which detected math is wrapped in page source.
    pub math_tag_wrap: String,
    /// JavaScript expression yielding the MathJax script URL.
    pub source: String,
}

impl Default for MathSettings {
    fn default() -> Self {
        Self {
            align: Align::Center,
            indent: "0em".to_string(),
            show_menu: true,
            process_escapes: true,
            latex_preview: "TeX".to_string(),
            color: "black".to_string(),
            math_tag_wrap: "mathjax".to_string(),
            source: SOURCE_AUTO.to_string(),
        }
    }
}

impl MathSettings {
    /// Resolve user-supplied settings over the defaults.
    ///
    /// Permissive merge: anything that is not a TOML table yields the
    /// defaults unchanged, unknown keys are ignored, and a recognized key
    /// holding a wrong-typed value keeps its default. Each field is looked
    /// up explicitly, so the order of keys in the input never matters.
    /// Never fails.
    pub fn resolve(user: Option<&Value>) -> Self {
        let mut settings = Self::default();

        let Some(Value::Table(table)) = user else {
            return settings;
        };

        if let Some(Value::String(value)) = table.get("align") {
            settings.align = Align::from_name(value);
        }
        if let Some(Value::String(value)) = table.get("indent") {
            settings.indent = value.clone();
        }
        if let Some(Value::Boolean(value)) = table.get("show_menu") {
            settings.show_menu = *value;
        }
        if let Some(Value::Boolean(value)) = table.get("process_escapes") {
            settings.process_escapes = *value;
        }
        if let Some(Value::String(value)) = table.get("latex_preview") {
            settings.latex_preview = value.clone();
        }
        if let Some(Value::String(value)) = table.get("color") {
            settings.color = value.clone();
        }

        // `wrap_latex` is the legacy key name; `math_tag_wrap` wins when
        // both are present.
        if let Some(Value::String(value)) = table.get("wrap_latex") {
            settings.math_tag_wrap = value.clone();
        }
        if let Some(Value::String(value)) = table.get("math_tag_wrap") {
            settings.math_tag_wrap = value.clone();
        }

        // `ssl` has no slot of its own; it only selects the script source.
        if let Some(Value::String(value)) = table.get("ssl") {
            match value.as_str() {
                "off" => settings.source = SOURCE_HTTP.to_string(),
                "force" => settings.source = SOURCE_HTTPS.to_string(),
                _ => {}
            }
        }

        settings
    }
}
