use super::class_list;
use crate::{Builder, Component, Rendered};

/// A link in a [`Nav`] bar.
#[derive(Debug, Clone, Default)]
pub struct NavItem {
    /// Link text.
    pub label: String,
    /// Link target.
    pub href: String,
    /// Marks the current page with an `active` class.
    pub active: bool,
}
impl NavItem {
    /// An inactive link.
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
            active: false,
        }
    }

    /// Marks this link as the current page.
    pub fn active(mut self) -> Self {
        self.active = true;
        self
    }
}

/// A navigation bar with an optional brand link.
#[derive(Debug, Clone, Default)]
pub struct Nav {
    /// The links, in order.
    pub items: Vec<NavItem>,
    /// Text of the `nav-brand` link.
    pub brand: Option<String>,
    /// Extra classes for the `<nav>`.
    pub class: Option<String>,
}
impl Component for Nav {
    fn render(&self, b: &Builder) -> Rendered {
        let class = class_list("nav", self.class.as_deref());

        b.nav_class(&class, []).r([
            self.brand
                .as_deref()
                .map(|brand| b.a_class("nav-brand", ["href", "#"]).t(brand))
                .unwrap_or_default(),
            b.ul_class("nav-list", []).r(b.for_each(&self.items, |b, item| {
                let class = if item.active { "nav-item active" } else { "nav-item" };
                b.li_class(class, [])
                    .r(b.a_class("nav-link", ["href", item.href.as_str()]).t(&item.label));
            })),
        ])
    }
}
