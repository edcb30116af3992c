//! Integration with the host's typographic post-processor.
//!
//! Typographic filters reflow punctuation and whitespace in rendered HTML,
//! which destroys LaTeX if it runs over math markup. This module teaches a
//! capable filter to skip math tags, and turns the feature off (with a
//! warning) when the installed filter cannot cooperate. Nothing here ever
//! fails the host's build.

use tracing::warn;

use crate::host::HostSettings;
use crate::settings::MathSettings;

/// The literal tag MathML math arrives in, always excluded alongside the
/// configured wrap tag.
pub const MATH_TAG: &str = "math";

/// A typographic post-processor the host applies to rendered pages.
///
/// The host owns the filter and runs it; this crate only probes its
/// capabilities and maintains the tag-exclusion list it must honor.
pub trait TextFilter {
    /// Filter name, used in diagnostics.
    fn name(&self) -> &str;

    /// Whether the filter honors a caller-supplied tag-exclusion list.
    /// Older filters rewrite the contents of every tag and cannot be used
    /// on pages containing math.
    fn supports_ignore_tags(&self) -> bool;

    /// Apply the filter to rendered HTML, leaving the contents of
    /// `ignore_tags` elements untouched.
    fn apply(&self, html: &str, ignore_tags: &[String]) -> String;
}

/// Result of probing the host's typographic filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterProbe {
    /// No filter is installed.
    Absent,
    /// A filter is installed but cannot exclude tags.
    Incompatible,
    /// The filter honors a tag-exclusion list.
    Supported,
}

/// Probe the host's typographic filter for tag-exclusion support.
pub fn probe(host: &HostSettings) -> FilterProbe {
    match &host.typographer {
        None => FilterProbe::Absent,
        Some(filter) if !filter.supports_ignore_tags() => FilterProbe::Incompatible,
        Some(_) => FilterProbe::Supported,
    }
}

/// Teach the host's typographic filter to skip math markup.
///
/// Appends the literal `math` tag and the configured wrap tag to the host's
/// exclusion list. When the filter is missing, the exclusion list is
/// unavailable, or the filter cannot exclude tags, the feature degrades to
/// "typography off" with a warning instead of failing.
pub fn configure_ignore_tags(host: &mut HostSettings, settings: &MathSettings) {
    if !host.typography {
        return;
    }

    match probe(host) {
        FilterProbe::Absent => {
            warn!("typographic post-processing is enabled but no filter is installed; ignoring");
        }
        FilterProbe::Incompatible => {
            if let Some(filter) = &host.typographer {
                warn!(
                    "typographic filter '{}' cannot exclude tags and would mangle math; \
                     typography disabled",
                    filter.name()
                );
            }
            host.typography = false;
        }
        FilterProbe::Supported => match host.typography_ignore_tags.as_mut() {
            Some(tags) => {
                tags.push(MATH_TAG.to_string());
                tags.push(settings.math_tag_wrap.clone());
            }
            None => {
                host.typography = false;
                warn!("host does not expose a typography ignore-tag list; typography disabled");
            }
        },
    }
}
