use crate::{Builder, Component, Rendered};

/// The severity of an [`Alert`], which picks its `alert-*` class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AlertKind {
    /// `alert-info`
    #[default]
    Info,
    /// `alert-success`
    Success,
    /// `alert-warning`
    Warning,
    /// `alert-error`
    Error,
}
impl AlertKind {
    /// The class suffix for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertKind::Info => "info",
            AlertKind::Success => "success",
            AlertKind::Warning => "warning",
            AlertKind::Error => "error",
        }
    }
}

/// A notification message with an optional bold title and close button.
#[derive(Debug, Clone, Default)]
pub struct Alert {
    /// The severity.
    pub kind: AlertKind,
    /// Written in `<strong>` before the message.
    pub title: Option<String>,
    /// The message text.
    pub message: String,
    /// Adds an `alert-close` button.
    pub dismissible: bool,
}
impl Component for Alert {
    fn render(&self, b: &Builder) -> Rendered {
        let mut class = format!("alert alert-{}", self.kind.as_str());
        if self.dismissible {
            class.push_str(" alert-dismissible");
        }

        b.div_class(&class, ["role", "alert"]).r([
            b.wrap(|| {
                if let Some(title) = &self.title {
                    b.strong([]).t(title);
                    b.text(" ");
                }
            }),
            b.text(&self.message),
            self.dismissible
                .then(|| {
                    b.button_class("alert-close", ["type", "button", "aria-label", "Close"])
                        .t("×")
                })
                .unwrap_or_default(),
        ])
    }
}
