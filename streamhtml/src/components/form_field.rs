use crate::{Builder, Component, Rendered};

/// A labelled `<input>` with optional help text and error message.
///
/// The input's `id` and `name` are both set to [`FormField::name`], and the label
/// points at it. An error replaces the help text and adds `has-error` to the field.
#[derive(Debug, Clone, Default)]
pub struct FormField {
    /// Label text.
    pub label: String,
    /// The input's `name` and `id`.
    pub name: String,
    /// The input's `type`. Defaults to `text`.
    pub input_type: Option<String>,
    /// The input's `placeholder`.
    pub placeholder: Option<String>,
    /// The input's initial `value`.
    pub value: Option<String>,
    /// Marks the label with ` *` and sets `required` on the input.
    pub required: bool,
    /// Written below the input when there is no error.
    pub help: Option<String>,
    /// Written below the input in place of the help text.
    pub error: Option<String>,
}
impl Component for FormField {
    fn render(&self, b: &Builder) -> Rendered {
        let class = if self.error.is_some() {
            "form-field has-error"
        } else {
            "form-field"
        };

        let mut input: Vec<&str> = vec![
            "type",
            self.input_type.as_deref().unwrap_or("text"),
            "id",
            self.name.as_str(),
            "name",
            self.name.as_str(),
            "class",
            "form-input",
        ];
        if let Some(placeholder) = &self.placeholder {
            input.extend(["placeholder", placeholder.as_str()]);
        }
        if let Some(value) = &self.value {
            input.extend(["value", value.as_str()]);
        }
        if self.required {
            input.extend(["required", "required"]);
        }

        b.div_class(class, []).r([
            b.label_class("form-label", ["for", self.name.as_str()]).r([
                b.text(&self.label),
                self.required
                    .then(|| b.span_class("required", []).t(" *"))
                    .unwrap_or_default(),
            ]),
            b.input(input),
            match (&self.error, &self.help) {
                (Some(error), _) => b.span_class("form-error", []).t(error),
                (None, Some(help)) => b.small_class("form-help", []).t(help),
                (None, None) => Rendered::Done,
            },
        ])
    }
}
