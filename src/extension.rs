//! Markdown extension that defers math rendering to client-side MathJax.
//!
//! Markdown compilers treat `\`, `_` and `*` as markup, which corrupts
//! LaTeX before it ever reaches the browser. The extension therefore wraps
//! every detected math fragment in a dedicated tag before compilation, so
//! the compiler passes it through as raw HTML, and appends the bootstrap
//! script to pages that ended up containing math.

use nom::{
    bytes::complete::{tag, take_until, take_while1},
    character::complete::char,
    combinator::{not, peek, recognize, verify},
    sequence::{delimited, pair},
    IResult,
};
use tracing::warn;

use crate::host::HostSettings;

/// An extension the host applies around markdown compilation.
pub trait MarkdownExtension {
    /// Extension name, used in diagnostics.
    fn name(&self) -> &str;

    /// Rewrite page source before markdown compilation.
    fn preprocess(&self, source: &str) -> String;

    /// Rewrite the compiled HTML after markdown compilation.
    fn postprocess(&self, html: &str) -> String;
}

/// The MathJax markdown extension.
///
/// Holds the rendered bootstrap script and the tag detected math is wrapped
/// in; both come out of the resolved [`crate::MathSettings`].
pub struct MathJaxExtension {
    script: String,
    tag: String,
}

impl MathJaxExtension {
    pub fn new(script: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            tag: tag.into(),
        }
    }
}

impl MarkdownExtension for MathJaxExtension {
    fn name(&self) -> &str {
        "mathjax"
    }

    fn preprocess(&self, source: &str) -> String {
        wrap_math(source, &self.tag)
    }

    fn postprocess(&self, html: &str) -> String {
        if html.contains(&format!("<{}>", self.tag)) {
            format!("{}\n{}", html, self.script)
        } else {
            html.to_string()
        }
    }
}

/// Register a [`MathJaxExtension`] with the host's markdown pipeline.
///
/// A host without a markdown pipeline gets a diagnostic instead of a hard
/// failure; math is simply not rendered for that build.
pub fn install_extension(host: &mut HostSettings, script: String, tag: &str) {
    match host.markdown_extensions.as_mut() {
        Some(extensions) => extensions.push(Box::new(MathJaxExtension::new(script, tag))),
        None => {
            warn!("host exposes no markdown extension list; the mathjax extension was not configured");
        }
    }
}

/// Wrap every math fragment in `source` in `<tag>...</tag>`, delimiters
/// included. Fenced code blocks and inline code spans are copied through
/// verbatim, and `\$` never opens math.
pub fn wrap_math(source: &str, tag: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut remaining = source;
    let mut at_line_start = true;

    while !remaining.is_empty() {
        if at_line_start {
            if let Some((block, rest)) = fenced_block(remaining) {
                out.push_str(block);
                remaining = rest;
                continue;
            }
        }

        if let Some(rest) = remaining.strip_prefix("\\$") {
            out.push_str("\\$");
            remaining = rest;
            at_line_start = false;
            continue;
        }

        if let Some((span, rest)) = math_span(remaining) {
            out.push_str(&format!("<{tag}>{span}</{tag}>"));
            remaining = rest;
            at_line_start = false;
            continue;
        }

        if let Ok((rest, span)) = code_span(remaining) {
            out.push_str(span);
            remaining = rest;
            at_line_start = false;
            continue;
        }

        let c = remaining.chars().next().unwrap();
        out.push(c);
        at_line_start = c == '\n';
        remaining = &remaining[c.len_utf8()..];
    }

    out
}

/// A math fragment starting at `input`, returned as `(span, rest)`.
fn math_span(input: &str) -> Option<(&str, &str)> {
    if input.starts_with("$$") {
        if let Ok((rest, span)) = display_math(input) {
            return Some((span, rest));
        }
    } else if input.starts_with('$') {
        if let Ok((rest, span)) = inline_math(input) {
            return Some((span, rest));
        }
    } else if input.starts_with("\\begin{") {
        return latex_environment(input);
    }
    None
}

/// Display math (`$$...$$`), delimiters included.
fn display_math(input: &str) -> IResult<&str, &str> {
    recognize(delimited(
        tag("$$"),
        verify(take_until("$$"), |s: &str| !s.is_empty()),
        tag("$$"),
    ))(input)
}

/// Inline math (`$...$`), delimiters included. Single-line only, so a stray
/// dollar sign does not swallow the rest of the paragraph.
fn inline_math(input: &str) -> IResult<&str, &str> {
    recognize(delimited(
        pair(char('$'), peek(not(char('$')))),
        verify(take_until("$"), |s: &str| {
            !s.is_empty() && !s.contains('\n')
        }),
        char('$'),
    ))(input)
}

/// An inline code span (`` `...` ``), copied through verbatim.
fn code_span(input: &str) -> IResult<&str, &str> {
    recognize(delimited(
        pair(char('`'), peek(not(char('`')))),
        take_until("`"),
        char('`'),
    ))(input)
}

/// A LaTeX environment (`\begin{name}...\end{name}`), delimiters included.
fn latex_environment(input: &str) -> Option<(&str, &str)> {
    let (after_open, name) = begin_env(input).ok()?;
    let closing = format!("\\end{{{name}}}");
    let body_end = after_open.find(&closing)?;

    let end = (input.len() - after_open.len()) + body_end + closing.len();
    Some((&input[..end], &input[end..]))
}

fn begin_env(input: &str) -> IResult<&str, &str> {
    delimited(
        tag("\\begin{"),
        take_while1(|c: char| c.is_alphanumeric() || c == '*'),
        tag("}"),
    )(input)
}

/// A fenced code block starting at a line start, returned as
/// `(block, rest)`. An unclosed fence runs to the end of the input.
fn fenced_block(input: &str) -> Option<(&str, &str)> {
    let marker = if input.starts_with("```") {
        "```"
    } else if input.starts_with("~~~") {
        "~~~"
    } else {
        return None;
    };

    let first_line_end = input.find('\n')?;
    let mut line_start = first_line_end + 1;

    loop {
        let rest = &input[line_start..];
        if rest.starts_with(marker) {
            let block_end = match rest.find('\n') {
                Some(i) => line_start + i + 1,
                None => input.len(),
            };
            return Some((&input[..block_end], &input[block_end..]));
        }
        match rest.find('\n') {
            Some(i) => line_start += i + 1,
            None => return Some((input, "")),
        }
    }
}
