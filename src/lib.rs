//! # markdown-mathjax
//!
//! A Markdown extension for static-site generators that renders math
//! client-side with [MathJax](https://www.mathjax.org). LaTeX and MathML
//! fragments written in page source reach the generated HTML untouched,
//! wrapped in a dedicated tag that the injected MathJax bootstrap script
//! picks up in the browser. Math is a first-class citizen of the markdown
//! pipeline rather than an afterthought.
//!
//! ## How it works
//!
//! During the host generator's initialization, [`init`]:
//!
//! 1. Resolves the user's `[math]` settings over the documented defaults
//!    ([`MathSettings::resolve`], a permissive merge that never fails).
//! 2. Teaches the host's typographic post-processor, if one is installed
//!    and capable, to skip math tags
//!    ([`configure_ignore_tags`](typography::configure_ignore_tags)).
//! 3. Renders the MathJax bootstrap script from the bundled template
//!    ([`render_script`]).
//! 4. Registers a [`MathJaxExtension`] with the host's markdown pipeline.
//!    The extension wraps detected `$...$`, `$$...$$` and
//!    `\begin{...}...\end{...}` fragments before markdown compilation and
//!    appends the script to pages that contain math.
//!
//! ## Quick Start
//!
//! ```rust
//! use markdown_mathjax::{init, HostSettings};
//!
//! let mut host = HostSettings::default();
//! host.math = Some(toml::from_str(r#"color = "blue""#).unwrap());
//!
//! init(&mut host).unwrap();
//!
//! let extensions = host.markdown_extensions.as_ref().unwrap();
//! let page = extensions[0].preprocess("Euler: $e^{i\\pi} + 1 = 0$");
//! assert!(page.contains("<mathjax>$e^{i\\pi} + 1 = 0$</mathjax>"));
//! ```
//!
//! ## User Settings
//!
//! All keys of the `[math]` table are optional; an unknown key or a value
//! of the wrong type silently keeps the default.
//!
//! | Key | Default | Effect |
//! |-----|---------|--------|
//! | `align` | `"center"` | Alignment of displayed equations (`left`, `right`, `center`) |
//! | `indent` | `"0em"` | Indent of displayed equations when not centered |
//! | `show_menu` | `true` | Attach the MathJax contextual menu |
//! | `process_escapes` | `true` | Process `\$` escapes |
//! | `latex_preview` | `"TeX"` | Preview shown while TeX renders |
//! | `color` | `"black"` | Color math is rendered in |
//! | `math_tag_wrap` | `"mathjax"` | Tag detected math is wrapped in (`wrap_latex` is the legacy name) |
//! | `ssl` | (unset) | `"off"` forces the plain-HTTP CDN, `"force"` the HTTPS CDN; otherwise the protocol is auto-detected |
//!
//! ## Failure philosophy
//!
//! Features degrade with a warning rather than aborting the host's build:
//! a missing or incompatible typographic filter, or a host without the
//! expected extension hooks, turns the affected feature off. Only a broken
//! installation is fatal: an unreadable template override file or a
//! template referencing an unknown placeholder.

pub mod error;
pub mod extension;
pub mod host;
pub mod script;
pub mod settings;
pub mod typography;

// Convenience re-exports
pub use error::{Error, Result};
pub use extension::{install_extension, MarkdownExtension, MathJaxExtension};
pub use host::HostSettings;
pub use script::{render_script, render_script_from, MATHJAX_TEMPLATE};
pub use settings::{Align, MathSettings};
pub use typography::{configure_ignore_tags, FilterProbe, TextFilter};

/// Initialize math rendering against the host generator's settings.
///
/// Called once per site build, after the host has loaded its settings and
/// before any page is compiled. Runs synchronously to completion; every
/// step is fail-soft except the two fatal template error classes described
/// in [`Error`]. No retries, no rollback.
pub fn init(host: &mut HostSettings) -> Result<()> {
    let settings = MathSettings::resolve(host.math.as_ref());

    typography::configure_ignore_tags(host, &settings);

    let script = match &host.mathjax_template {
        Some(path) => {
            let template = script::load_template_override(path)?;
            script::render_script_from(&template, &settings)?
        }
        None => script::render_script(&settings)?,
    };

    extension::install_extension(host, script, &settings.math_tag_wrap);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn math(input: &str) -> Option<toml::Value> {
        Some(toml::from_str(input).unwrap())
    }

    #[test]
    fn test_end_to_end_custom_color() {
        let mut host = HostSettings {
            math: math(r#"color = "blue""#),
            typography: false,
            ..HostSettings::default()
        };

        init(&mut host).unwrap();

        // Exactly one extension was registered and its script carries the
        // custom color; the ignore-tag list was never touched because
        // typography is off.
        let extensions = host.markdown_extensions.as_ref().unwrap();
        assert_eq!(extensions.len(), 1);
        assert_eq!(host.typography_ignore_tags, Some(Vec::new()));

        let html = extensions[0].postprocess("<p><mathjax>$x$</mathjax></p>");
        assert!(html.contains("color: 'blue ! important'"));
    }

    #[test]
    fn test_end_to_end_page_flow() {
        let mut host = HostSettings::default();
        init(&mut host).unwrap();

        let extensions = host.markdown_extensions.as_ref().unwrap();
        let source = "The identity $e^{i\\pi} + 1 = 0$ holds.";

        let preprocessed = extensions[0].preprocess(source);
        assert_eq!(
            preprocessed,
            "The identity <mathjax>$e^{i\\pi} + 1 = 0$</mathjax> holds."
        );

        // The host compiles markdown in between; the math span passes
        // through as raw HTML, so postprocessing sees the same tag.
        let html = extensions[0].postprocess(&format!("<p>{preprocessed}</p>"));
        assert!(html.contains("MathJax.Hub.Config"));

        let plain = extensions[0].postprocess("<p>no math</p>");
        assert!(!plain.contains("MathJax.Hub.Config"));
    }

    #[test]
    fn test_end_to_end_custom_wrap_tag() {
        let mut host = HostSettings {
            math: math(r#"math_tag_wrap = "mathdiv""#),
            ..HostSettings::default()
        };
        init(&mut host).unwrap();

        let extensions = host.markdown_extensions.as_ref().unwrap();
        let preprocessed = extensions[0].preprocess("$x$");
        assert_eq!(preprocessed, "<mathdiv>$x$</mathdiv>");
    }

    #[test]
    fn test_template_override_is_used() {
        let path = std::env::temp_dir().join(format!(
            "markdown-mathjax-override-{}.jinja",
            std::process::id()
        ));
        std::fs::write(&path, "<script>align={{ align }}</script>").unwrap();

        let mut host = HostSettings {
            mathjax_template: Some(path.clone()),
            ..HostSettings::default()
        };
        let result = init(&mut host);
        std::fs::remove_file(&path).unwrap();
        result.unwrap();

        let extensions = host.markdown_extensions.as_ref().unwrap();
        let html = extensions[0].postprocess("<mathjax>$x$</mathjax>");
        assert!(html.contains("<script>align=center</script>"));
    }

    #[test]
    fn test_unreadable_template_override_is_fatal() {
        let mut host = HostSettings {
            mathjax_template: Some("/no/such/template.jinja".into()),
            ..HostSettings::default()
        };
        assert!(matches!(init(&mut host), Err(Error::Io(_))));
    }

    #[test]
    fn test_init_without_markdown_pipeline_still_succeeds() {
        let mut host = HostSettings {
            markdown_extensions: None,
            ..HostSettings::default()
        };
        init(&mut host).unwrap();
        assert!(host.markdown_extensions.is_none());
    }
}
