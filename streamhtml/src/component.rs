use crate::{Builder, Rendered};

/// A reusable piece of markup that renders itself into a [`Builder`].
///
/// Any `Fn(&Builder) -> Rendered` is a component, so closures work too.
///
/// # Example
///
/// ```
/// use streamhtml::{Builder, Component, Rendered};
///
/// struct Alert<'a> {
///     message: &'a str,
/// }
///
/// impl Component for Alert<'_> {
///     fn render(&self, b: &Builder) -> Rendered {
///         b.div_class("alert", ["role", "alert"]).t(self.message)
///     }
/// }
///
/// let b = Builder::new();
/// b.main([]).r(b.component(&Alert { message: "Saved" }));
/// assert_eq!(
///     b.to_string(),
///     r#"<main><div class="alert" role="alert">Saved</div></main>"#
/// );
/// ```
pub trait Component {
    /// Write this component through `b`.
    fn render(&self, b: &Builder) -> Rendered;
}
impl<F: Fn(&Builder) -> Rendered> Component for F {
    fn render(&self, b: &Builder) -> Rendered {
        self(b)
    }
}
