use crate::{Builder, Component, Rendered};

/// How many pages either side of the current one get a numbered link.
const NEIGHBOURS: u32 = 2;

/// Page navigation links.
///
/// Links are built by replacing `{page}` in [`Pagination::base_url`] with the page
/// number. Nothing is written when there is at most one page.
///
/// ```
/// use streamhtml::components::Pagination;
/// use streamhtml::Builder;
///
/// let b = Builder::new();
/// b.component(&Pagination {
///     current_page: 1,
///     total_pages: 2,
///     base_url: "/posts?page={page}".into(),
///     ..Default::default()
/// });
/// assert!(b.to_string().contains(r#"<a class="pagination-link" href="/posts?page=2">Next ›</a>"#));
/// ```
#[derive(Debug, Clone, Default)]
pub struct Pagination {
    /// The page being shown, starting at 1.
    pub current_page: u32,
    /// The number of pages.
    pub total_pages: u32,
    /// A URL containing a `{page}` placeholder.
    pub base_url: String,
    /// Adds a link to the first page.
    pub show_first: bool,
    /// Adds a link to the last page.
    pub show_last: bool,
}
impl Pagination {
    fn url(&self, page: u32) -> String {
        self.base_url.replace("{page}", &page.to_string())
    }

    fn link(&self, b: &Builder, page: u32, label: &str) -> Rendered {
        let href = self.url(page);
        b.li([]).r(b.a_class("pagination-link", ["href", href.as_str()]).t(label))
    }
}
impl Component for Pagination {
    fn render(&self, b: &Builder) -> Rendered {
        if self.total_pages <= 1 {
            return Rendered::Done;
        }
        let (current, total) = (self.current_page, self.total_pages);
        let pages = current.saturating_sub(NEIGHBOURS).max(1)..=current.saturating_add(NEIGHBOURS).min(total);

        b.nav_class("pagination", ["aria-label", "Page navigation"]).r(b
            .ul_class("pagination-list", [])
            .r([
                (self.show_first && current > 1)
                    .then(|| self.link(b, 1, "« First"))
                    .unwrap_or_default(),
                (current > 1)
                    .then(|| self.link(b, current - 1, "‹ Prev"))
                    .unwrap_or_default(),
                b.for_each(pages, |b, page| {
                    if page == current {
                        b.li_class("pagination-item active", [])
                            .r(b.span_class("pagination-current", []).f(format_args!("{page}")));
                    } else {
                        let href = self.url(page);
                        b.li_class("pagination-item", []).r(b
                            .a_class("pagination-link", ["href", href.as_str()])
                            .f(format_args!("{page}")));
                    }
                }),
                (current < total)
                    .then(|| self.link(b, current + 1, "Next ›"))
                    .unwrap_or_default(),
                (self.show_last && current < total)
                    .then(|| self.link(b, total, "Last »"))
                    .unwrap_or_default(),
            ]))
    }
}
