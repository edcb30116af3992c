//! Rendering of the MathJax bootstrap script.

use std::fs;
use std::path::Path;

use minijinja::{AutoEscape, Environment, UndefinedBehavior};

use crate::error::Result;
use crate::settings::MathSettings;

/// The bundled script template, embedded at compile time. Placeholders are
/// named exactly after the [`MathSettings`] fields.
pub const MATHJAX_TEMPLATE: &str = include_str!("../templates/mathjax.js.jinja");

/// Render the bundled bootstrap script for the given settings.
pub fn render_script(settings: &MathSettings) -> Result<String> {
    render_script_from(MATHJAX_TEMPLATE, settings)
}

/// Render a bootstrap script from a caller-supplied template.
///
/// Substitution is strict: a placeholder with no matching settings field is
/// an error, since it indicates a broken template rather than a user
/// configuration problem. Values are substituted verbatim, without HTML
/// escaping; the output is a script fragment for direct embedding in
/// generated pages.
pub fn render_script_from(template: &str, settings: &MathSettings) -> Result<String> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.add_template("mathjax", template)?;

    let script = env.get_template("mathjax")?.render(settings)?;
    Ok(script)
}

/// Read a replacement template file.
///
/// An unreadable file is a broken installation; the error propagates to the
/// caller, there is no fallback to the bundled template.
pub fn load_template_override(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_script_substitutes_every_field() {
        let script = render_script(&MathSettings::default()).unwrap();

        assert!(script.contains("displayAlign: 'center'"));
        assert!(script.contains("displayIndent: '0em'"));
        assert!(script.contains("showMathMenu: true"));
        assert!(script.contains("processEscapes: true"));
        assert!(script.contains("preview: 'TeX'"));
        assert!(script.contains("color: 'black ! important'"));
        assert!(script.contains("getElementById('mathjax-bootstrap')"));
        assert!(script.contains(crate::settings::SOURCE_AUTO));
    }

    #[test]
    fn test_no_placeholder_markers_remain() {
        let script = render_script(&MathSettings::default()).unwrap();
        assert!(!script.contains("{{"));
        assert!(!script.contains("}}"));
    }

    #[test]
    fn test_custom_settings_are_substituted_verbatim() {
        let settings = MathSettings {
            color: "blue".to_string(),
            show_menu: false,
            math_tag_wrap: "mathdiv".to_string(),
            ..MathSettings::default()
        };
        let script = render_script(&settings).unwrap();

        assert!(script.contains("color: 'blue ! important'"));
        assert!(script.contains("showMathMenu: false"));
        assert!(script.contains("getElementById('mathdiv-bootstrap')"));
    }

    #[test]
    fn test_unknown_placeholder_is_fatal() {
        let result = render_script_from("var x = {{ no_such_field }};", &MathSettings::default());
        assert!(result.is_err());
    }

    #[test]
    fn test_template_may_use_a_subset_of_fields() {
        let script =
            render_script_from("align is {{ align }}", &MathSettings::default()).unwrap();
        assert_eq!(script, "align is center");
    }

    #[test]
    fn test_missing_override_file_is_fatal() {
        let result = load_template_override(Path::new("/no/such/template.jinja"));
        assert!(result.is_err());
    }

    #[test]
    fn test_override_file_round_trip() {
        let path =
            std::env::temp_dir().join(format!("mathjax-template-{}.jinja", std::process::id()));
        fs::write(&path, "src = {{ source }};").unwrap();

        let template = load_template_override(&path).unwrap();
        let script = render_script_from(&template, &MathSettings::default()).unwrap();
        fs::remove_file(&path).unwrap();

        assert!(script.starts_with("src = 'https:' == document.location.protocol"));
    }
}
