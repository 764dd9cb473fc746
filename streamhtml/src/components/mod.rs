//! Ready-made [`Component`](crate::Component)s for common page furniture.
//!
//! Each component is a plain struct with public fields and a [`Default`] impl, so
//! only the interesting fields need to be spelled out:
//!
//! ```
//! use streamhtml::components::{Alert, AlertKind};
//! use streamhtml::{Builder, Diagnostics};
//!
//! let b = Builder::with_diagnostics(Diagnostics::new());
//! b.component(&Alert {
//!     kind: AlertKind::Success,
//!     message: "Saved".into(),
//!     ..Default::default()
//! });
//! assert_eq!(
//!     b.to_string(),
//!     r#"<div class="alert alert-success" role="alert">Saved</div>"#
//! );
//! ```
//!
//! Class names follow a `block-element` scheme (`card-header`, `nav-link`, ...) and
//! carry no styles of their own.

mod alert;
pub use alert::{Alert, AlertKind};

mod breadcrumb;
pub use breadcrumb::{Breadcrumb, BreadcrumbItem};

mod card;
pub use card::Card;

mod definition_list;
pub use definition_list::{Definition, DefinitionList};

mod form_field;
pub use form_field::FormField;

mod nav;
pub use nav::{Nav, NavItem};

mod pagination;
pub use pagination::Pagination;

mod table;
pub use table::Table;

/// `base` followed by `extra`, if there is one.
fn class_list(base: &str, extra: Option<&str>) -> String {
    match extra {
        Some(extra) if !extra.is_empty() => format!("{base} {extra}"),
        _ => base.to_string(),
    }
}

#[cfg(test)]
fn render(component: &dyn crate::Component) -> String {
    let b = crate::Builder::with_diagnostics(crate::Diagnostics::new());
    b.component(component);
    b.into_string()
}
