//! Re-indents a flat tag stream for reading.
//!
//! This only needs to handle markup the builder itself produces: it is a single left
//! to right pass over the input that never builds a tree and never reports errors.

use crate::tags;

/// Options for [`pretty_html_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrettyOptions {
    /// String used for each level of indentation. Defaults to two spaces.
    pub indent: String,
    /// Number of indentation levels for the outermost elements. Defaults to zero.
    pub initial_level: usize,
}
impl Default for PrettyOptions {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            initial_level: 0,
        }
    }
}

/// Re-indent `html` with two spaces per level.
///
/// Block elements start on their own line, one level deeper than their parent. Inline
/// elements (see [`tags::INLINE_TAGS`]) and text stay on the line they are on, and text
/// is copied exactly as it appears.
///
/// ```
/// use streamhtml::pretty::pretty_html;
///
/// assert_eq!(
///     pretty_html("<div><h1>Title</h1><p>Paragraph</p></div>"),
///     "<div>\n  <h1>Title</h1>\n  <p>Paragraph</p>\n</div>\n"
/// );
/// ```
pub fn pretty_html(html: &str) -> String {
    pretty_html_with(html, &PrettyOptions::default())
}

/// Re-indent `html` with the given options. An empty input gives an empty output;
/// anything else ends with exactly one newline.
pub fn pretty_html_with(html: &str, options: &PrettyOptions) -> String {
    let mut printer = Printer {
        out: String::with_capacity(html.len() + html.len() / 4),
        options,
        depth: 0,
        last: Last::Nothing,
    };

    let bytes = html.as_bytes();
    let mut i = 0;
    while i < html.len() {
        if !starts_tag(bytes, i) {
            // a stray `<` belongs to the text run it starts
            let from = i + usize::from(bytes[i] == b'<');
            let end = html[from..].find('<').map_or(html.len(), |n| from + n);
            printer.text(&html[i..end]);
            i = end;
            continue;
        }

        let terminator = if html[i..].starts_with("<!--") { "-->" } else { ">" };
        let Some(end) = html[i..].find(terminator).map(|n| i + n + terminator.len()) else {
            printer.text(&html[i..]);
            break;
        };
        let tag = &html[i..end];
        i = end;

        if tag.starts_with("<!") {
            printer.declaration(tag);
        } else if let Some(rest) = tag.strip_prefix("</") {
            printer.close(tag, tag_name(rest));
        } else {
            let name = tag_name(&tag[1..]);
            printer.open(tag, name);
            if is_raw_text(name) && !tag.ends_with("/>") {
                let content_end = find_closing_tag(html, i, name);
                printer.text(&html[i..content_end]);
                i = content_end;
            }
        }
    }

    let mut out = printer.out;
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Last<'h> {
    Nothing,
    Text,
    /// A block element was opened.
    Open(&'h str),
    /// Anything else: a closing tag, a void or inline tag, or a declaration.
    Tag,
}

struct Printer<'h, 'o> {
    out: String,
    options: &'o PrettyOptions,
    depth: usize,
    last: Last<'h>,
}
impl<'h> Printer<'h, '_> {
    fn at_line_start(&self) -> bool {
        self.out.is_empty() || self.out.ends_with('\n')
    }

    fn indent(&mut self) {
        for _ in 0..self.options.initial_level + self.depth {
            self.out.push_str(&self.options.indent);
        }
    }

    fn newline(&mut self) {
        if !self.at_line_start() {
            self.out.push('\n');
        }
        self.indent();
    }

    fn declaration(&mut self, tag: &str) {
        self.newline();
        self.out.push_str(tag);
        self.out.push('\n');
        self.last = Last::Tag;
    }

    fn open(&mut self, tag: &str, name: &'h str) {
        let inline = tags::is_inline(name);
        let void = tags::is_void(name) || tag.ends_with("/>");

        if self.at_line_start() || (!inline && self.last != Last::Text) {
            self.newline();
        }
        self.out.push_str(tag);

        if void || inline {
            self.last = Last::Tag;
        } else {
            self.depth += 1;
            self.last = Last::Open(name);
        }
    }

    fn close(&mut self, tag: &str, name: &str) {
        let inline = tags::is_inline(name);
        if !inline {
            self.depth = self.depth.saturating_sub(1);
        }

        let just_opened = matches!(self.last, Last::Open(open) if open.eq_ignore_ascii_case(name));
        if self.at_line_start() || (!inline && !just_opened && self.last != Last::Text) {
            self.newline();
        }
        self.out.push_str(tag);
        self.last = Last::Tag;
    }

    fn text(&mut self, text: &str) {
        if text.trim().is_empty() {
            return;
        }
        if self.at_line_start() {
            self.indent();
        }
        self.out.push_str(text);
        self.last = Last::Text;
    }
}

/// Returns `true` if the `<` at `i` starts a tag rather than being literal text.
fn starts_tag(bytes: &[u8], i: usize) -> bool {
    bytes[i] == b'<'
        && bytes
            .get(i + 1)
            .is_some_and(|&c| c.is_ascii_alphabetic() || c == b'/' || c == b'!')
}

/// The tag name at the start of `rest`, which follows `<` or `</`.
fn tag_name(rest: &str) -> &str {
    let end = rest
        .find(|c: char| c.is_whitespace() || c == '>' || c == '/')
        .unwrap_or(rest.len());
    &rest[..end]
}

fn is_raw_text(name: &str) -> bool {
    name.eq_ignore_ascii_case("script") || name.eq_ignore_ascii_case("style")
}

/// The position of `</name` at or after `from`, or the end of `html`.
fn find_closing_tag(html: &str, from: usize, name: &str) -> usize {
    let mut search = from;
    while let Some(n) = html[search..].find("</") {
        let start = search + n;
        let candidate = &html[start + 2..];
        if candidate.len() >= name.len()
            && candidate.as_bytes()[..name.len()].eq_ignore_ascii_case(name.as_bytes())
        {
            return start;
        }
        search = start + 2;
    }
    html.len()
}
