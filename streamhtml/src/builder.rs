//! The [`Builder`], which owns the output of one render pass.

use std::borrow::Cow;
use std::cell::RefCell;
use std::fmt;

use bumpalo::Bump;

use crate::element::{DeferredElement, TEXT};
use crate::{pretty, Component, Diagnostics, Element, PrettyOptions, Rendered};

/// Owns the output buffer of one render pass and creates elements that write into it.
///
/// Opening tags are written as soon as an element is created and closing tags when it
/// is rendered, so the buffer is complete as soon as the outermost render call returns.
///
/// # Example
///
/// ```
/// use streamhtml::Builder;
///
/// let b = Builder::new();
/// b.html([]).r(b.body([]).r(b.div_class("container", []).r([
///     b.span([]).t("Some text"),
///     b.p([]).r(b.a(["href", "https://example.com"]).t("Example.com")),
/// ])));
/// assert_eq!(
///     b.to_string(),
///     r#"<html><body><div class="container"><span>Some text</span><p><a href="https://example.com">Example.com</a></p></div></body></html>"#
/// );
/// ```
///
/// A builder is meant for a single thread and a single pass; call [`Builder::reset`]
/// before reusing it.
pub struct Builder {
    bump: Bump,
    output: RefCell<String>,
    diagnostics: Diagnostics,
}
impl Builder {
    /// Create a builder that reports into [`Diagnostics::global`].
    pub fn new() -> Self {
        Self::with_diagnostics(Diagnostics::global().clone())
    }

    /// Create a builder that reports into the given diagnostics context.
    pub fn with_diagnostics(diagnostics: Diagnostics) -> Self {
        Self {
            bump: Bump::new(),
            output: RefCell::new(String::with_capacity(256)),
            diagnostics,
        }
    }

    /// The diagnostics context this builder reports into.
    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub(crate) fn bump(&self) -> &Bump {
        &self.bump
    }

    pub(crate) fn with_output<R>(&self, f: impl FnOnce(&mut String) -> R) -> R {
        f(&mut self.output.borrow_mut())
    }

    pub(crate) fn truncate(&self, len: usize) {
        self.output.borrow_mut().truncate(len);
    }

    /// Create an element named `name` and write its opening tag.
    ///
    /// `attributes` is a flat `key, value, key, value, ...` list. See [`Element::new`].
    #[track_caller]
    pub fn element<'s>(
        &self,
        name: &str,
        attributes: impl IntoIterator<Item = &'s str>,
    ) -> Element<'_> {
        Element::new(self, name, attributes)
    }

    /// Create an element whose opening tag is only written once
    /// [`DeferredElement::open`] is called.
    #[track_caller]
    pub fn deferred<'s>(
        &self,
        name: &str,
        attributes: impl IntoIterator<Item = &'s str>,
    ) -> DeferredElement<'_> {
        DeferredElement::new(self, name, attributes)
    }

    /// Write literal text.
    pub fn text(&self, text: &str) -> Rendered {
        self.write_str(text)
    }

    /// Write several pieces of literal text as one run.
    #[track_caller]
    pub fn texts<'s>(&self, parts: impl IntoIterator<Item = &'s str>) -> Rendered {
        self.element(TEXT, parts).r(())
    }

    /// Write text with `<`, `>` and `&` escaped.
    pub fn escaped(&self, text: &str) -> Rendered {
        self.write_str(&html_escape::encode_text(text))
    }

    /// Write formatted text.
    ///
    /// The arguments are formatted before the buffer is touched, so they may read
    /// from this builder.
    pub fn f(&self, args: fmt::Arguments<'_>) -> Rendered {
        match args.as_str() {
            Some(text) => self.write_str(text),
            None => self.write_str(&fmt::format(args)),
        }
    }

    /// Write a string to the output as is.
    pub fn write_str(&self, s: &str) -> Rendered {
        let mut output = self.output.borrow_mut();
        let start = output.len();
        output.push_str(s);
        Rendered::Written { start }
    }

    /// Write bytes to the output as is. Invalid UTF-8 is replaced with `U+FFFD`.
    pub fn write_bytes(&self, bytes: &[u8]) -> Rendered {
        let text = String::from_utf8_lossy(bytes);
        if let Cow::Owned(_) = text {
            tracing::warn!(len = bytes.len(), "replaced invalid UTF-8 in raw write");
        }
        self.write_str(&text)
    }

    /// Write the HTML5 doctype declaration.
    pub fn doctype(&self) -> Rendered {
        self.write_str("<!DOCTYPE html>")
    }

    /// Run `f`, which writes through this builder, at this point among the children.
    ///
    /// This is the way to put loops and conditionals between sibling elements:
    ///
    /// ```
    /// use streamhtml::Builder;
    ///
    /// let b = Builder::new();
    /// let logged_in = false;
    /// b.nav([]).r([
    ///     b.a(["href", "/"]).t("Home"),
    ///     b.wrap(|| {
    ///         if !logged_in {
    ///             b.a(["href", "/login"]).t("Log in");
    ///         }
    ///     }),
    /// ]);
    /// assert_eq!(
    ///     b.to_string(),
    ///     r#"<nav><a href="/">Home</a><a href="/login">Log in</a></nav>"#
    /// );
    /// ```
    pub fn wrap(&self, f: impl FnOnce()) -> Rendered {
        let start = self.len();
        f();
        self.written_since(start)
    }

    /// Call `each` for every item, in order.
    pub fn for_each<T>(
        &self,
        items: impl IntoIterator<Item = T>,
        mut each: impl FnMut(&Self, T),
    ) -> Rendered {
        let start = self.len();
        for item in items {
            each(self, item);
        }
        self.written_since(start)
    }

    /// Render a component at this point.
    pub fn component(&self, component: &dyn Component) -> Rendered {
        let start = self.len();
        component.render(self);
        self.written_since(start)
    }

    fn written_since(&self, start: usize) -> Rendered {
        if self.len() > start {
            Rendered::Written { start }
        } else {
            Rendered::Done
        }
    }

    /// Write a complete page and return the builder's contents.
    ///
    /// `head` is written raw inside `<head>`, followed by `styles` in a `<style>`
    /// element unless it is empty. `body` renders inside `<body>`.
    pub fn html_page(&self, styles: &str, head: &str, body: &dyn Component) -> String {
        self.doctype();
        self.html([]).r([
            self.head([]).r([
                self.write_str(head),
                if styles.is_empty() {
                    Rendered::Done
                } else {
                    self.style([]).t(styles)
                },
            ]),
            self.body([]).r(self.component(body)),
        ]);
        self.to_string()
    }

    /// The output as bytes.
    pub fn bytes(&self) -> Vec<u8> {
        self.output.borrow().as_bytes().to_vec()
    }

    /// Consume the builder and return its output.
    pub fn into_string(self) -> String {
        self.output.into_inner()
    }

    /// The length of the output in bytes.
    pub fn len(&self) -> usize {
        self.output.borrow().len()
    }

    /// Returns `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.output.borrow().is_empty()
    }

    /// Clear the output and free per-pass allocations. Diagnostics are left alone.
    pub fn reset(&mut self) {
        self.output.get_mut().clear();
        self.bump.reset();
    }

    /// The output re-indented for reading. See [`pretty::pretty_html`].
    pub fn pretty(&self) -> String {
        pretty::pretty_html(&self.output.borrow())
    }

    /// The output re-indented with the given options.
    pub fn pretty_with(&self, options: &PrettyOptions) -> String {
        pretty::pretty_html_with(&self.output.borrow(), options)
    }

    /// Write the output to a writer.
    pub fn write_to(&self, writer: &mut impl std::io::Write) -> std::io::Result<()> {
        writer.write_all(self.output.borrow().as_bytes())
    }
}
impl Default for Builder {
    fn default() -> Self {
        Self::new()
    }
}
impl fmt::Display for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.output.borrow())
    }
}
impl fmt::Debug for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Builder")
            .field("len", &self.len())
            .field("diagnostics", &self.diagnostics)
            .finish()
    }
}

macro_rules! non_void_builders {
    ($($tag:ident),* $(,)?) => {
        paste::paste! {
            impl Builder {
                $(
                    #[doc = "Open a `<" $tag ">` element with a flat `key, value, ...` attribute list."]
                    #[track_caller]
                    pub fn $tag<'s>(
                        &self,
                        attributes: impl IntoIterator<Item = &'s str>,
                    ) -> Element<'_> {
                        self.element(stringify!($tag), attributes)
                    }

                    #[doc = "Open a `<" $tag ">` element with a `class` followed by a flat attribute list."]
                    #[track_caller]
                    pub fn [<$tag _class>]<'s>(
                        &self,
                        class: &'s str,
                        attributes: impl IntoIterator<Item = &'s str>,
                    ) -> Element<'_> {
                        self.element(stringify!($tag), ["class", class].into_iter().chain(attributes))
                    }
                )*
            }
        }
    };
}
crate::tags::with_non_void_tags!(non_void_builders);

macro_rules! void_builders {
    ($($tag:ident),* $(,)?) => {
        paste::paste! {
            impl Builder {
                $(
                    #[doc = "Write a void `<" $tag ">` element with a flat `key, value, ...` attribute list."]
                    #[track_caller]
                    pub fn $tag<'s>(&self, attributes: impl IntoIterator<Item = &'s str>) -> Rendered {
                        self.element(stringify!($tag), attributes).into()
                    }

                    #[doc = "Write a void `<" $tag ">` element with a `class` followed by a flat attribute list."]
                    #[track_caller]
                    pub fn [<$tag _class>]<'s>(
                        &self,
                        class: &'s str,
                        attributes: impl IntoIterator<Item = &'s str>,
                    ) -> Rendered {
                        self.element(stringify!($tag), ["class", class].into_iter().chain(attributes))
                            .into()
                    }
                )*
            }
        }
    };
}
crate::tags::with_void_tags!(void_builders);

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> Builder {
        Builder::with_diagnostics(Diagnostics::new())
    }

    #[test]
    fn writes_nested_elements_in_call_order() {
        let b = builder();
        b.div(["id", "container", "class", "active"]).r([
            b.texts(["some text", " - more text"]),
            b.form(["method", "post"]).r([
                b.input(["value", "some input"]),
                b.button([]).r(b.span(["style", "background-color:wheat"]).t("My nice button")),
            ]),
            b.text("Some ending text"),
        ]);
        assert_eq!(
            b.to_string(),
            r#"<div id="container" class="active">some text - more text<form method="post"><input value="some input"><button><span style="background-color:wheat">My nice button</span></button></form>Some ending text</div>"#
        );
    }

    #[test]
    fn class_constructors_put_class_first() {
        let b = builder();
        b.li_class("animal", ["id", "cat"]).t("cat");
        b.img_class("photo", ["src", "cat.png"]);
        assert_eq!(
            b.to_string(),
            r#"<li class="animal" id="cat">cat</li><img class="photo" src="cat.png">"#
        );
    }

    #[test]
    fn raw_writes_become_children() {
        let b = builder();
        b.span([]).r(b.write_str("Testing, testing"));
        b.span([]).r(b.write_bytes(b"MyDoc: Test this"));
        assert_eq!(
            b.to_string(),
            "<span>Testing, testing</span><span>MyDoc: Test this</span>"
        );
    }

    #[test]
    fn invalid_bytes_are_replaced() {
        let b = builder();
        b.write_bytes(&[b'o', b'k', 0xff]);
        assert_eq!(b.to_string(), "ok\u{fffd}");
    }

    #[test]
    fn formatted_text() {
        let b = builder();
        b.f(format_args!("{} {} {}", "test", 123, "abc"));
        assert_eq!(b.to_string(), "test 123 abc");
    }

    #[test]
    fn formatted_text_may_read_the_builder() {
        let b = builder();
        b.write_str("ab");
        b.f(format_args!("|{}|{}", b, b.len()));
        assert_eq!(b.to_string(), "ab|ab|2");
    }

    #[test]
    fn tokens_remember_where_output_starts() {
        let b = builder();
        assert_eq!(b.text("abc"), Rendered::Written { start: 0 });
        assert_eq!(b.wrap(|| {}), Rendered::Done);
        assert_eq!(b.p([]).t("x"), Rendered::Written { start: 3 });
        assert_eq!(b.br([]), Rendered::Void { start: 11 });
        assert_eq!(b.for_each(0..2, |b, _| { b.hr([]); }), Rendered::Written { start: 15 });
    }

    #[test]
    fn escaped_text() {
        let b = builder();
        b.code([]).r(b.escaped("a < b && c"));
        assert_eq!(b.to_string(), "<code>a &lt; b &amp;&amp; c</code>");
    }

    #[test]
    fn for_each_renders_every_item() {
        let b = builder();
        let animals = ["cat", "mouse", "dog"];
        b.ul_class("list", []).r(b.for_each(animals, |b, animal| {
            b.li_class("animal", []).t(animal);
        }));
        assert_eq!(
            b.to_string(),
            r#"<ul class="list"><li class="animal">cat</li><li class="animal">mouse</li><li class="animal">dog</li></ul>"#
        );
    }

    #[test]
    fn reset_clears_output_but_not_diagnostics() {
        let diagnostics = Diagnostics::new();
        diagnostics.enable();
        let mut b = Builder::with_diagnostics(diagnostics.clone());
        let _ = b.section([]);
        assert_eq!(diagnostics.len(), 1);

        b.reset();
        assert!(b.is_empty());
        assert_eq!(diagnostics.len(), 1);

        b.span([]).t("second");
        assert_eq!(b.to_string(), r#"<span data-ele-id="2">second</span>"#);
    }

    #[test]
    fn read_back_as_bytes_and_writer() {
        let b = builder();
        b.p([]).t("Hello");
        assert_eq!(b.bytes(), b"<p>Hello</p>");
        let mut sink = Vec::new();
        b.write_to(&mut sink).unwrap();
        assert_eq!(sink, b"<p>Hello</p>");
        assert_eq!(b.len(), 12);
        assert_eq!(b.into_string(), "<p>Hello</p>");
    }

    #[test]
    fn html_page_includes_styles_only_when_given() {
        let body = |b: &Builder| b.div([]).t("Test Content");

        let b = builder();
        assert_eq!(
            b.html_page("body { color: black; }", "<title>Test</title>", &body),
            "<!DOCTYPE html><html><head><title>Test</title><style>body { color: black; }</style></head><body><div>Test Content</div></body></html>"
        );

        let b = builder();
        assert_eq!(
            b.html_page("", "", &body),
            "<!DOCTYPE html><html><head></head><body><div>Test Content</div></body></html>"
        );
    }
}
