//! The tag registry: which tags are void, which are inline, and which need a closing tag.
//!
//! The tag lists are exposed as callback macros so that the per-tag constructors on
//! [`Builder`](crate::Builder) are generated from the same names as the lookup tables.

/// Invokes `$callback!` with every void tag name.
macro_rules! with_void_tags {
    ($callback:ident) => {
        $callback! {
            area, base, br, col, embed, hr, img, input, link, meta,
            param, source, track, wbr
        }
    };
}
pub(crate) use with_void_tags;

/// Invokes `$callback!` with every non-void tag name that gets a builder constructor.
macro_rules! with_non_void_tags {
    ($callback:ident) => {
        $callback! {
            html, head, body, title, style, script, noscript, main, header, footer, nav,
            section, article, aside, address, div, p, span, a, b, i, u, s, em, strong,
            small, mark, code, pre, kbd, samp, var, blockquote, q, cite, abbr, del, ins,
            sub, sup, time, h1, h2, h3, h4, h5, h6, ul, ol, li, dl, dt, dd, table, caption,
            colgroup, thead, tbody, tfoot, tr, th, td, form, fieldset, legend, label,
            button, select, option, optgroup, textarea, output, progress, meter, details,
            summary, dialog, figure, figcaption, picture, video, audio, canvas, iframe,
            template
        }
    };
}
pub(crate) use with_non_void_tags;

macro_rules! tag_names {
    ($($tag:ident),* $(,)?) => {
        &[$(stringify!($tag)),*]
    };
}

/// Tags that never have a closing tag or children.
pub const VOID_TAGS: &[&str] = with_void_tags!(tag_names);

/// Tags that require a closing tag and have a constructor on [`Builder`](crate::Builder).
pub const NON_VOID_TAGS: &[&str] = with_non_void_tags!(tag_names);

/// Tags that flow with surrounding text when pretty-printing.
pub const INLINE_TAGS: &[&str] = &[
    "a", "abbr", "acronym", "b", "bdo", "big", "br", "button", "cite", "code", "del", "dfn",
    "em", "i", "img", "input", "ins", "kbd", "label", "map", "mark", "object", "output", "pre",
    "q", "s", "samp", "script", "select", "small", "span", "strong", "sub", "sup", "textarea",
    "time", "tt", "u", "var",
];

/// How a tag behaves structurally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// Never closed, never has children (`br`, `img`, ...).
    Void,
    /// Closed normally, but flows with text when pretty-printed (`span`, `em`, ...).
    Inline,
    /// Closed normally and laid out on its own line when pretty-printed.
    Block,
}

/// Look up the [`TagKind`] of a tag name (case-insensitive).
///
/// Void takes precedence over inline, so `br` and `img` are [`TagKind::Void`].
/// Unknown tags are [`TagKind::Block`].
pub fn kind(name: &str) -> TagKind {
    if is_void(name) {
        TagKind::Void
    } else if is_inline(name) {
        TagKind::Inline
    } else {
        TagKind::Block
    }
}

/// Returns `true` if `name` is a void tag.
pub fn is_void(name: &str) -> bool {
    contains(VOID_TAGS, name)
}

/// Returns `true` if `name` is an inline tag.
pub fn is_inline(name: &str) -> bool {
    contains(INLINE_TAGS, name)
}

fn contains(list: &[&str], name: &str) -> bool {
    list.iter().any(|tag| tag.eq_ignore_ascii_case(name))
}
