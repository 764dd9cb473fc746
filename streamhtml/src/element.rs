use std::fmt;
use std::panic::Location;

use bumpalo::collections::Vec as BumpVec;
use bumpalo::Bump;

use crate::diagnostics::{ConcernKind, ElementInfo};
use crate::{tags, AttributeMap, Builder, Issue};

/// The reserved element name for a run of literal text.
///
/// `b.element(TEXT, ["Hello, ", "world"])` writes `Hello, world` instead of a tag.
pub const TEXT: &str = "t";

/// The attribute that carries an element's identity while diagnostics are enabled.
pub const DEBUG_ID_ATTR: &str = "data-ele-id";

/// What a finished render call hands to its enclosing element.
///
/// Children are always one of these, so literal text has to go through
/// [`Builder::text`] (or one of its siblings) before it can be passed as a child.
/// Tokens produced by the builder remember where their output starts in the buffer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Rendered {
    /// Complete, with nothing written (an empty branch, for example).
    #[default]
    Done,
    /// Complete output that starts at byte `start` of the buffer.
    Written {
        /// Buffer length before the output was written.
        start: usize,
    },
    /// A void element. It has no closing tag, so it is complete once opened.
    Void {
        /// Buffer length before the tag was written.
        start: usize,
    },
    /// A non-void element that was passed as a child without being rendered first.
    /// Its closing tag was never written.
    Unrendered {
        /// The tag of the element.
        name: String,
        /// Its identity, if diagnostics were enabled.
        id: Option<u64>,
        /// Buffer length before the opening tag was written.
        start: usize,
    },
}
impl Rendered {
    /// Returns `true` unless this is [`Rendered::Unrendered`].
    pub fn is_complete(&self) -> bool {
        !matches!(self, Rendered::Unrendered { .. })
    }

    /// Where this child's output starts, if anything was written.
    pub fn start(&self) -> Option<usize> {
        match self {
            Rendered::Done => None,
            Rendered::Written { start }
            | Rendered::Void { start }
            | Rendered::Unrendered { start, .. } => Some(*start),
        }
    }
}
impl<'a> From<Element<'a>> for Rendered {
    fn from(element: Element<'a>) -> Self {
        let start = element.start;
        match element.kind {
            ElementKind::Void => Rendered::Void { start },
            ElementKind::Text => Rendered::Written { start },
            ElementKind::Tag => Rendered::Unrendered {
                name: element.name.to_string(),
                id: element.id,
                start,
            },
        }
    }
}

/// Values that can be passed as the children of [`Element::r`].
pub trait IntoChildren {
    /// Call `f` once for every child.
    fn for_each_child(self, f: &mut dyn FnMut(Rendered));
}
impl IntoChildren for () {
    fn for_each_child(self, _f: &mut dyn FnMut(Rendered)) {}
}
impl IntoChildren for Rendered {
    fn for_each_child(self, f: &mut dyn FnMut(Rendered)) {
        f(self)
    }
}
impl IntoChildren for Element<'_> {
    fn for_each_child(self, f: &mut dyn FnMut(Rendered)) {
        f(self.into())
    }
}
impl IntoChildren for Option<Rendered> {
    fn for_each_child(self, f: &mut dyn FnMut(Rendered)) {
        if let Some(child) = self {
            f(child)
        }
    }
}
impl<const N: usize> IntoChildren for [Rendered; N] {
    fn for_each_child(self, f: &mut dyn FnMut(Rendered)) {
        for child in self {
            f(child)
        }
    }
}
impl IntoChildren for Vec<Rendered> {
    fn for_each_child(self, f: &mut dyn FnMut(Rendered)) {
        for child in self {
            f(child)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ElementKind {
    Text,
    Void,
    Tag,
}

/// An element whose opening form has already been written to its [`Builder`].
///
/// Rendering ([`Element::r`], [`Element::t`] or [`Element::f`]) writes the closing tag.
/// Because arguments are evaluated before the call they are passed to, every child
/// element is opened and closed before its parent's closing tag is written:
///
/// ```
/// use streamhtml::Builder;
///
/// let b = Builder::new();
/// b.ul(["class", "pets"]).r([
///     b.li([]).t("cat"),
///     b.li([]).t("dog"),
/// ]);
/// assert_eq!(
///     b.to_string(),
///     r#"<ul class="pets"><li>cat</li><li>dog</li></ul>"#
/// );
/// ```
#[derive(Debug)]
#[must_use = "an element stays open until `r`, `t` or `f` is called"]
pub struct Element<'a> {
    builder: &'a Builder,
    name: &'a str,
    kind: ElementKind,
    attributes: AttributeMap<'a>,
    text: BumpVec<'a, &'a str>,
    id: Option<u64>,
    site: &'static Location<'static>,
    /// Buffer length right before the opening form.
    start: usize,
    /// Buffer length right after the opening form.
    open_end: usize,
    finished: bool,
}
impl<'a> Element<'a> {
    /// Create an element and write its opening form to `builder`.
    ///
    /// `name` is lowercased. If it is [`TEXT`], `attributes` are text parts written
    /// verbatim; otherwise they are read pairwise as `key, value, ...`.
    #[track_caller]
    pub fn new<'s>(
        builder: &'a Builder,
        name: &str,
        attributes: impl IntoIterator<Item = &'s str>,
    ) -> Self {
        let site = Location::caller();
        let bump = builder.bump();
        let name = lowercase_in(bump, name);
        if name == TEXT {
            let mut text = BumpVec::new_in(bump);
            text.extend(
                attributes
                    .into_iter()
                    .map(|part| -> &'a str { bump.alloc_str(part) }),
            );
            return Self::open_text(builder, text, site);
        }
        let (attributes, dropped) = AttributeMap::from_pairs(bump, attributes);
        Self::open_tag(builder, name, attributes, dropped, site)
    }

    fn open_text(
        builder: &'a Builder,
        text: BumpVec<'a, &'a str>,
        site: &'static Location<'static>,
    ) -> Self {
        let (start, open_end) = builder.with_output(|out| {
            let start = out.len();
            for part in text.iter() {
                out.push_str(part);
            }
            (start, out.len())
        });
        Self {
            builder,
            name: TEXT,
            kind: ElementKind::Text,
            attributes: AttributeMap::new_in(builder.bump()),
            text,
            id: None,
            site,
            start,
            open_end,
            finished: false,
        }
    }

    pub(crate) fn open_tag(
        builder: &'a Builder,
        name: &'a str,
        mut attributes: AttributeMap<'a>,
        dropped: Option<&str>,
        site: &'static Location<'static>,
    ) -> Self {
        let diagnostics = builder.diagnostics();
        let id = diagnostics.is_enabled().then(|| diagnostics.next_id());
        if let Some(id) = id {
            attributes.insert(DEBUG_ID_ATTR, &id.to_string());
        }

        let (start, open_end) = builder.with_output(|out| {
            let start = out.len();
            out.push('<');
            out.push_str(name);
            attributes.write_to(out);
            out.push('>');
            (start, out.len())
        });

        let element = Self {
            builder,
            name,
            kind: if tags::is_void(name) {
                ElementKind::Void
            } else {
                ElementKind::Tag
            },
            attributes,
            text: BumpVec::new_in(builder.bump()),
            id,
            site,
            start,
            open_end,
            finished: false,
        };

        if let Some(dropped) = dropped {
            let issue = Issue::OddAttributes {
                dropped: dropped.to_string(),
                site: site.to_string(),
            };
            tracing::warn!(tag = name, "{issue}");
            element.record(ConcernKind::Other, [issue]);
        }
        if element.kind == ElementKind::Tag {
            element.record(ConcernKind::OpenTag, []);
        }
        element
    }

    /// Finish the element: write its closing tag (unless it is void) and check the
    /// children it was given.
    ///
    /// The children have already been written by the time this runs. A void element
    /// given children discards their output, since void tags cannot contain anything.
    /// Output written after the void tag by anything other than these children is kept.
    pub fn r(mut self, children: impl IntoChildren) -> Rendered {
        self.finished = true;

        let mut count = 0;
        let mut first_start: Option<usize> = None;
        let mut unrendered = Vec::new();
        children.for_each_child(&mut |child| {
            count += 1;
            if let Some(start) = child.start() {
                first_start = Some(first_start.map_or(start, |first| first.min(start)));
            }
            if let Rendered::Unrendered { name, .. } = child {
                unrendered.push(name);
            }
        });

        let mut issues = Vec::new();
        match self.kind {
            ElementKind::Void if count > 0 => {
                let discarded = match first_start {
                    Some(start) if start >= self.open_end => {
                        self.builder.truncate(start);
                        true
                    }
                    // nothing was written, or a child predates this element
                    Some(_) | None => false,
                };
                let issue = Issue::VoidChildren {
                    tag: self.name.to_string(),
                    count,
                    discarded,
                };
                tracing::warn!(site = %self.site, "{issue}");
                issues.push(issue);
            }
            ElementKind::Void => {}
            ElementKind::Text if count > 0 => {
                let issue = Issue::TextChildren { count };
                tracing::warn!(site = %self.site, "{issue}");
                issues.push(issue);
            }
            ElementKind::Text => {}
            ElementKind::Tag => {
                self.builder.with_output(|out| {
                    out.push_str("</");
                    out.push_str(self.name);
                    out.push('>');
                });
                self.record(ConcernKind::ClosedTag, []);
            }
        }

        for tag in unrendered {
            let issue = Issue::UnrenderedChild { tag };
            tracing::warn!(parent = self.name, site = %self.site, "{issue}");
            issues.push(issue);
        }
        if !issues.is_empty() {
            self.record(ConcernKind::Other, issues);
        }

        let start = self.start;
        match self.kind {
            ElementKind::Void => Rendered::Void { start },
            ElementKind::Text | ElementKind::Tag => Rendered::Written { start },
        }
    }

    /// Finish the element with a single run of literal text as its only child.
    pub fn t(self, text: &str) -> Rendered {
        let child = self.builder.text(text);
        self.r(child)
    }

    /// Finish the element with formatted text as its only child.
    ///
    /// ```
    /// use streamhtml::Builder;
    ///
    /// let b = Builder::new();
    /// b.p([]).f(format_args!("{} items", 3));
    /// assert_eq!(b.to_string(), "<p>3 items</p>");
    /// ```
    pub fn f(self, args: fmt::Arguments<'_>) -> Rendered {
        let child = self.builder.f(args);
        self.r(child)
    }

    /// The lowercased tag name, or [`TEXT`] for a text run.
    pub fn name(&self) -> &str {
        self.name
    }

    /// The attributes written in the opening tag.
    pub fn attributes(&self) -> &AttributeMap<'a> {
        &self.attributes
    }

    /// The literal parts of a text run. Empty for tags.
    pub fn text_parts(&self) -> &[&'a str] {
        &self.text
    }

    /// The identity assigned while diagnostics were enabled.
    pub fn id(&self) -> Option<u64> {
        self.id
    }

    /// Where the element was created.
    pub fn site(&self) -> &'static Location<'static> {
        self.site
    }

    /// Returns `true` if this is a void tag.
    pub fn is_void(&self) -> bool {
        self.kind == ElementKind::Void
    }

    /// Returns `true` if this is a text run.
    pub fn is_text(&self) -> bool {
        self.kind == ElementKind::Text
    }

    fn info(&self) -> Option<ElementInfo> {
        let diagnostics = self.builder.diagnostics();
        let id = match (self.id, self.kind) {
            (Some(id), _) => id,
            // text runs carry no identity attribute, so they get one once there is
            // something to record
            (None, ElementKind::Text) if diagnostics.is_enabled() => diagnostics.next_id(),
            (None, _) => return None,
        };
        Some(ElementInfo {
            name: self.name.to_string(),
            id,
            site: Some(self.site),
        })
    }

    fn record(&self, kind: ConcernKind, issues: impl IntoIterator<Item = Issue>) {
        if let Some(info) = self.info() {
            self.builder.diagnostics().upsert(kind, &info, issues);
        }
    }
}
impl Drop for Element<'_> {
    fn drop(&mut self) {
        if !self.finished && self.kind == ElementKind::Tag {
            tracing::warn!(
                tag = self.name,
                site = %self.site,
                "element dropped without writing its closing tag"
            );
        }
    }
}

/// An element whose opening tag has not been written yet, so attributes can still be
/// added. Call [`DeferredElement::open`] at the point where it belongs in the output.
#[derive(Debug)]
#[must_use = "nothing is written until `open` is called"]
pub struct DeferredElement<'a> {
    builder: &'a Builder,
    name: &'a str,
    attributes: AttributeMap<'a>,
    dropped: Option<&'a str>,
    site: &'static Location<'static>,
}
impl<'a> DeferredElement<'a> {
    #[track_caller]
    pub(crate) fn new<'s>(
        builder: &'a Builder,
        name: &str,
        attributes: impl IntoIterator<Item = &'s str>,
    ) -> Self {
        let bump = builder.bump();
        let mut element = Self {
            builder,
            name: lowercase_in(bump, name),
            attributes: AttributeMap::new_in(bump),
            dropped: None,
            site: Location::caller(),
        };
        element.add_attrs(attributes);
        element
    }

    /// Add more `key, value, ...` pairs. Later keys replace earlier ones.
    pub fn add_attrs<'s>(&mut self, attributes: impl IntoIterator<Item = &'s str>) -> &mut Self {
        if let Some(dropped) = self.attributes.extend_pairs(attributes) {
            let dropped: &'a str = self.builder.bump().alloc_str(dropped);
            self.dropped = Some(dropped);
        }
        self
    }

    /// The attributes collected so far.
    pub fn attributes(&self) -> &AttributeMap<'a> {
        &self.attributes
    }

    /// Write the opening tag and return the now open [`Element`].
    pub fn open(self) -> Element<'a> {
        Element::open_tag(
            self.builder,
            self.name,
            self.attributes,
            self.dropped,
            self.site,
        )
    }
}

fn lowercase_in<'a>(bump: &'a Bump, name: &str) -> &'a str {
    let name = bump.alloc_str(name);
    name.make_ascii_lowercase();
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Diagnostics;

    fn debug_builder() -> Builder {
        let diagnostics = Diagnostics::new();
        diagnostics.enable();
        Builder::with_diagnostics(diagnostics)
    }

    #[test]
    fn opening_tag_is_written_immediately() {
        let b = Builder::with_diagnostics(Diagnostics::new());
        let div = b.element("DIV", ["id", "main"]);
        assert_eq!(b.to_string(), r#"<div id="main">"#);
        assert_eq!(div.name(), "div");
        div.r(());
        assert_eq!(b.to_string(), r#"<div id="main"></div>"#);
    }

    #[test]
    fn text_sentinel_writes_parts_verbatim() {
        let b = Builder::with_diagnostics(Diagnostics::new());
        let text = b.element(TEXT, ["Hello, ", "<world>"]);
        assert!(text.is_text());
        assert_eq!(text.text_parts(), ["Hello, ", "<world>"]);
        assert!(text.attributes().is_empty());
        text.r(());
        assert_eq!(b.to_string(), "Hello, <world>");
    }

    #[test]
    fn void_tag_discards_children() {
        let b = debug_builder();
        b.div([]).r(b.element("br", ["class", "gap"]).t("oops"));
        assert_eq!(b.to_string(), r#"<div data-ele-id="1"><br class="gap" data-ele-id="2"></div>"#);

        let concerns = b.diagnostics().concerns();
        assert_eq!(concerns.len(), 1);
        assert_eq!(concerns[0].0, "other-2");
        assert_eq!(
            concerns[0].1.issues,
            [Issue::VoidChildren {
                tag: "br".into(),
                count: 1,
                discarded: true
            }]
        );
    }

    #[test]
    fn void_element_as_child_is_complete() {
        let b = Builder::with_diagnostics(Diagnostics::new());
        let hr = b.element("hr", []);
        assert!(hr.is_void());
        assert_eq!(Rendered::from(hr), Rendered::Void { start: 0 });
    }

    #[test]
    fn held_void_element_keeps_unrelated_output() {
        let b = debug_builder();
        let img = b.element("img", []);
        b.p([]).t("keep me");
        img.r(b.text("child"));
        assert_eq!(
            b.to_string(),
            r#"<img data-ele-id="1"><p data-ele-id="2">keep me</p>"#
        );
        assert_eq!(
            b.diagnostics().concerns()[0].1.issues,
            [Issue::VoidChildren {
                tag: "img".into(),
                count: 1,
                discarded: true
            }]
        );
    }

    #[test]
    fn void_child_written_earlier_is_kept() {
        let b = debug_builder();
        let caption = b.text("caption");
        b.element("br", []).r(caption);
        assert_eq!(b.to_string(), r#"caption<br data-ele-id="1">"#);
        assert_eq!(
            b.diagnostics().concerns()[0].1.issues,
            [Issue::VoidChildren {
                tag: "br".into(),
                count: 1,
                discarded: false
            }]
        );
    }

    #[test]
    fn text_run_with_children_is_recorded() {
        let b = debug_builder();
        b.div([]).r(b.element(TEXT, ["hi"]).r(b.span([]).t("x")));
        assert_eq!(
            b.to_string(),
            r#"<div data-ele-id="1">hi<span data-ele-id="2">x</span></div>"#
        );

        let concerns = b.diagnostics().concerns();
        assert_eq!(concerns.len(), 1);
        assert_eq!(concerns[0].1.kind, ConcernKind::Other);
        assert_eq!(concerns[0].1.element.name, TEXT);
        assert_eq!(concerns[0].1.issues, [Issue::TextChildren { count: 1 }]);
    }

    #[test]
    fn unrendered_child_of_text_run_is_recorded() {
        let b = debug_builder();
        b.element(TEXT, ["hi"]).r(b.element("em", []));
        let concerns = b.diagnostics().concerns();
        let other = concerns
            .iter()
            .find(|(_, concern)| concern.kind == ConcernKind::Other)
            .unwrap();
        assert_eq!(
            other.1.issues,
            [
                Issue::TextChildren { count: 1 },
                Issue::UnrenderedChild { tag: "em".into() }
            ]
        );
    }

    #[test]
    fn text_runs_get_no_identity_attribute() {
        let b = debug_builder();
        b.texts(["a", "b"]);
        assert_eq!(b.to_string(), "ab");
        assert!(b.diagnostics().is_empty());
    }

    #[test]
    fn unrendered_child_is_flagged_on_parent() {
        let b = debug_builder();
        b.p([]).r(b.element("em", []));
        assert_eq!(b.to_string(), r#"<p data-ele-id="1"><em data-ele-id="2"></p>"#);

        let concerns = b.diagnostics().concerns();
        let keys: Vec<&str> = concerns.iter().map(|(key, _)| key.as_str()).collect();
        assert_eq!(keys, ["open_tag-2", "other-1"]);
        assert_eq!(
            concerns[1].1.issues,
            [Issue::UnrenderedChild { tag: "em".into() }]
        );
    }

    #[test]
    fn odd_attributes_are_recorded() {
        let b = debug_builder();
        b.span(["class", "x", "title"]).r(());
        assert_eq!(b.to_string(), r#"<span class="x" data-ele-id="1"></span>"#);

        let concerns = b.diagnostics().concerns();
        assert_eq!(concerns.len(), 1);
        assert!(matches!(
            &concerns[0].1.issues[0],
            Issue::OddAttributes { dropped, .. } if dropped == "title"
        ));
    }

    #[test]
    fn deferred_element_collects_attributes_until_opened() {
        let b = Builder::with_diagnostics(Diagnostics::new());
        let mut p = b.deferred("p", []);
        p.add_attrs(["style", "color:red"]);
        assert!(b.is_empty());
        b.div([]).r(p.open().t("Hello World!"));
        assert_eq!(b.to_string(), r#"<div><p style="color:red">Hello World!</p></div>"#);
    }

    #[test]
    fn deferred_odd_attributes_are_recorded_on_open() {
        let b = debug_builder();
        let mut link = b.deferred("a", ["href", "/"]);
        link.add_attrs(["class", "nav", "target"]);
        assert_eq!(link.attributes().len(), 2);
        assert!(b.diagnostics().is_empty());

        link.open().t("home");
        assert_eq!(
            b.to_string(),
            r#"<a href="/" class="nav" data-ele-id="1">home</a>"#
        );
        let concerns = b.diagnostics().concerns();
        assert_eq!(concerns.len(), 1);
        assert_eq!(concerns[0].0, "other-1");
        assert!(matches!(
            &concerns[0].1.issues[0],
            Issue::OddAttributes { dropped, .. } if dropped == "target"
        ));
    }
}
