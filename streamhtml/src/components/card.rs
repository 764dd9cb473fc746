use super::class_list;
use crate::{Builder, Component, Rendered};

/// A boxed container with an optional header and footer.
///
/// The body is either plain text, written as a paragraph, or another component,
/// which takes precedence when both are set.
#[derive(Default)]
pub struct Card {
    /// Written as an `<h4>` in the `card-header`.
    pub title: Option<String>,
    /// Text body.
    pub body: String,
    /// Rendered in place of `body`.
    pub body_component: Option<Box<dyn Component>>,
    /// Text written in the `card-footer`.
    pub footer: Option<String>,
    /// Extra classes for the outer `<div>`.
    pub class: Option<String>,
}
impl Component for Card {
    fn render(&self, b: &Builder) -> Rendered {
        let class = class_list("card", self.class.as_deref());

        b.div_class(&class, []).r([
            self.title
                .as_deref()
                .map(|title| b.div_class("card-header", []).r(b.h4_class("card-title", []).t(title)))
                .unwrap_or_default(),
            b.div_class("card-body", []).r(match &self.body_component {
                Some(component) => b.component(component.as_ref()),
                None if !self.body.is_empty() => b.p([]).t(&self.body),
                None => Rendered::Done,
            }),
            self.footer
                .as_deref()
                .map(|footer| b.div_class("card-footer", []).t(footer))
                .unwrap_or_default(),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::render;

    #[test]
    fn full_card() {
        let html = render(&Card {
            title: Some("Card Title".into()),
            body: "Card body content".into(),
            footer: Some("Card footer".into()),
            class: Some("custom-card".into()),
            ..Default::default()
        });
        assert_eq!(
            html,
            concat!(
                r#"<div class="card custom-card">"#,
                r#"<div class="card-header"><h4 class="card-title">Card Title</h4></div>"#,
                r#"<div class="card-body"><p>Card body content</p></div>"#,
                r#"<div class="card-footer">Card footer</div>"#,
                "</div>"
            )
        );
    }

    #[test]
    fn header_and_footer_are_optional() {
        let html = render(&Card {
            body: "Just body".into(),
            ..Default::default()
        });
        assert!(!html.contains("card-header"));
        assert!(!html.contains("card-footer"));
        assert!(html.contains(r#"<div class="card-body"><p>Just body</p></div>"#));
    }

    #[test]
    fn empty_body_still_has_its_container() {
        let html = render(&Card::default());
        assert_eq!(html, r#"<div class="card"><div class="card-body"></div></div>"#);
    }

    #[test]
    fn body_component_replaces_text() {
        let html = render(&Card {
            body: "ignored".into(),
            body_component: Some(Box::new(|b: &Builder| b.span([]).t("Component content"))),
            ..Default::default()
        });
        assert!(html.contains("<span>Component content</span>"));
        assert!(!html.contains("ignored"));
    }
}
