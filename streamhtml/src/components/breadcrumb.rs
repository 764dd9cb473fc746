use crate::{Builder, Component, Rendered};

/// One step of a [`Breadcrumb`] trail.
#[derive(Debug, Clone, Default)]
pub struct BreadcrumbItem {
    /// The text shown.
    pub label: String,
    /// Where the step links to. Steps without one are shown as the current page.
    pub href: Option<String>,
}
impl BreadcrumbItem {
    /// A step that links to `href`.
    pub fn link(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: Some(href.into()),
        }
    }

    /// A step without a link.
    pub fn current(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: None,
        }
    }
}

/// A navigation trail. The last item is always shown as the current page.
#[derive(Debug, Clone, Default)]
pub struct Breadcrumb {
    /// The steps, outermost first.
    pub items: Vec<BreadcrumbItem>,
    /// Written between linked steps. Defaults to `/`.
    pub separator: Option<String>,
}
impl Component for Breadcrumb {
    fn render(&self, b: &Builder) -> Rendered {
        let separator = self.separator.as_deref().unwrap_or("/");
        let last = self.items.len().saturating_sub(1);

        b.nav_class("breadcrumb", ["aria-label", "breadcrumb"]).r(b
            .ol_class("breadcrumb-list", [])
            .r(b.for_each(self.items.iter().enumerate(), |b, (i, item)| {
                b.li_class("breadcrumb-item", []).r(match item.href.as_deref() {
                    Some(href) if i != last => b.wrap(|| {
                        b.a(["href", href]).t(&item.label);
                        b.span_class("breadcrumb-separator", ["aria-hidden", "true"])
                            .f(format_args!(" {separator} "));
                    }),
                    _ => b
                        .span_class("breadcrumb-current", ["aria-current", "page"])
                        .t(&item.label),
                });
            })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::render;

    #[test]
    fn links_lead_to_the_current_page() {
        let html = render(&Breadcrumb {
            items: vec![
                BreadcrumbItem::link("Home", "/"),
                BreadcrumbItem::link("Products", "/products"),
                BreadcrumbItem::current("Current Page"),
            ],
            ..Default::default()
        });
        assert!(html.starts_with(
            r#"<nav class="breadcrumb" aria-label="breadcrumb"><ol class="breadcrumb-list">"#
        ));
        assert!(html.contains(
            r#"<li class="breadcrumb-item"><a href="/">Home</a><span class="breadcrumb-separator" aria-hidden="true"> / </span></li>"#
        ));
        assert!(html.contains(r#"<a href="/products">Products</a>"#));
        assert!(html.contains(
            r#"<span class="breadcrumb-current" aria-current="page">Current Page</span>"#
        ));
    }

    #[test]
    fn custom_separator() {
        let html = render(&Breadcrumb {
            separator: Some(">".into()),
            items: vec![
                BreadcrumbItem::link("Home", "/"),
                BreadcrumbItem::current("Page"),
            ],
        });
        assert!(html.contains(" > "));
    }

    #[test]
    fn last_item_is_never_a_link() {
        let html = render(&Breadcrumb {
            items: vec![
                BreadcrumbItem::link("Home", "/"),
                BreadcrumbItem::link("Current", "/current"),
            ],
            ..Default::default()
        });
        assert!(!html.contains("/current"));
        assert!(html.contains(r#"<span class="breadcrumb-current""#));
    }

    #[test]
    fn items_without_href_are_current() {
        let html = render(&Breadcrumb {
            items: vec![
                BreadcrumbItem::current("No Link"),
                BreadcrumbItem::current("Current"),
            ],
            ..Default::default()
        });
        assert_eq!(html.matches("breadcrumb-current").count(), 2);
    }

    #[test]
    fn single_item() {
        let html = render(&Breadcrumb {
            items: vec![BreadcrumbItem::link("Home", "/")],
            ..Default::default()
        });
        assert!(html.contains(
            r#"<span class="breadcrumb-current" aria-current="page">Home</span>"#
        ));
    }
}
