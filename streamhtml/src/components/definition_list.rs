use super::class_list;
use crate::{Builder, Component, Rendered};

/// A term and what it means.
#[derive(Debug, Clone, Default)]
pub struct Definition {
    /// Written in a `<dt>`.
    pub term: String,
    /// Written in a `<dd>`.
    pub definition: String,
}

/// A `<dl>` of term/definition pairs.
#[derive(Debug, Clone, Default)]
pub struct DefinitionList {
    /// The pairs, in order.
    pub items: Vec<Definition>,
    /// Extra classes for the `<dl>`.
    pub class: Option<String>,
}
impl Component for DefinitionList {
    fn render(&self, b: &Builder) -> Rendered {
        let class = class_list("definition-list", self.class.as_deref());
        b.dl_class(&class, []).r(b.for_each(&self.items, |b, item| {
            b.dt_class("definition-term", []).t(&item.term);
            b.dd_class("definition-desc", []).t(&item.definition);
        }))
    }
}
