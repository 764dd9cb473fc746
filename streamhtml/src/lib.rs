#![deny(missing_docs)]
//! A crate for writing HTML straight into a buffer through nested function calls.
//!
//! Creating an element with a [`Builder`] writes its opening tag immediately; rendering
//! it ([`Element::r`], [`Element::t`], [`Element::f`]) writes its closing tag. Since the
//! children of an element are the arguments of its render call, they are written in
//! between, and the output is correctly nested without ever building a tree.
//!
//! Structural mistakes (elements that are never closed, void elements given children,
//! odd attribute lists) never abort rendering. They are logged through [`tracing`] and,
//! when a [`Diagnostics`] context is enabled, recorded for a later [`Report`].
//!
//! # Example
//!
//! ```
//! use streamhtml::Builder;
//!
//! let b = Builder::new();
//! b.div_class("card", []).r([
//!     b.h1([]).t("Hello, World!"),
//!     b.p([]).r([
//!         b.text("Read the "),
//!         b.a(["href", "/docs"]).t("docs"),
//!         b.text("."),
//!     ]),
//! ]);
//!
//! assert_eq!(
//!     b.to_string(),
//!     r#"<div class="card"><h1>Hello, World!</h1><p>Read the <a href="/docs">docs</a>.</p></div>"#
//! );
//! assert_eq!(
//!     b.pretty(),
//!     "<div class=\"card\">\n  <h1>Hello, World!</h1>\n  <p>Read the <a href=\"/docs\">docs</a>.</p>\n</div>\n"
//! );
//! ```

pub mod components;
pub mod diagnostics;
pub mod pretty;
pub mod tags;

// Re-export bumpalo for convenience
pub use bumpalo;

mod attribute;
pub use attribute::{Attribute, AttributeMap};

mod builder;
pub use builder::Builder;

mod component;
pub use component::Component;

pub use diagnostics::Diagnostics;

mod element;
pub use element::{DeferredElement, Element, IntoChildren, Rendered, DEBUG_ID_ATTR, TEXT};

mod issue;
pub use issue::Issue;

pub use pretty::PrettyOptions;

mod report;
pub use report::{Report, ReportEntry, ReportFormat};
