//! Adapter boundary to the host static-site generator.

use std::path::PathBuf;

use toml::Value;

use crate::extension::MarkdownExtension;
use crate::typography::TextFilter;

/// The slice of the host generator's settings that this plugin reads and
/// mutates.
///
/// Initialization runs single-threaded and to completion, so in-place
/// mutation of this struct (extension list, ignore-tag list, typography
/// flag) is an accepted side effect of [`crate::init`], not a race.
pub struct HostSettings {
    /// Raw, user-supplied math configuration (the `[math]` table of the
    /// site configuration), if any.
    pub math: Option<Value>,
    /// Whether typographic post-processing of rendered pages is enabled.
    pub typography: bool,
    /// The installed typographic filter, if any.
    pub typographer: Option<Box<dyn TextFilter>>,
    /// Tag names the typographic filter must leave untouched. `None` on
    /// host versions that predate tag exclusion.
    pub typography_ignore_tags: Option<Vec<String>>,
    /// Extensions the host applies around markdown compilation. `None` when
    /// the host has no markdown pipeline.
    pub markdown_extensions: Option<Vec<Box<dyn MarkdownExtension>>>,
    /// Replacement script template file. The bundled template is used when
    /// unset.
    pub mathjax_template: Option<PathBuf>,
}

impl Default for HostSettings {
    /// A current host: markdown pipeline and tag exclusion available,
    /// typographic post-processing off, no math configuration.
    fn default() -> Self {
        Self {
            math: None,
            typography: false,
            typographer: None,
            typography_ignore_tags: Some(Vec::new()),
            markdown_extensions: Some(Vec::new()),
            mathjax_template: None,
        }
    }
}
