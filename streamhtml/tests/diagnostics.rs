use streamhtml::diagnostics::ConcernKind;
use streamhtml::{Builder, Diagnostics, Issue, ReportFormat, DEBUG_ID_ATTR};

fn debug_builder() -> Builder {
    let diagnostics = Diagnostics::new();
    diagnostics.enable();
    Builder::with_diagnostics(diagnostics)
}

#[test]
fn identities_are_written_only_when_enabled() {
    let b = Builder::with_diagnostics(Diagnostics::new());
    b.div(["id", "x"]).r(b.br([]));
    assert_eq!(b.to_string(), r#"<div id="x"><br></div>"#);

    b.diagnostics().enable();
    let mut b = b;
    b.reset();
    b.div(["id", "x"]).r(b.br([]));
    assert_eq!(
        b.to_string(),
        format!(r#"<div id="x" {DEBUG_ID_ATTR}="1"><br {DEBUG_ID_ATTR}="2"></div>"#)
    );
}

#[test]
fn leaked_element_is_reported_once() {
    let b = debug_builder();
    b.main([]).r([
        b.h1([]).t("Title"),
        b.wrap(|| {
            let _leaked = b.section_class("body", []);
        }),
        b.p([]).t("after"),
    ]);

    let report = b.diagnostics().report();
    assert_eq!(report.len(), 1);
    let entry = &report.entries[0];
    assert_eq!(entry.kind, ConcernKind::OpenTag);
    assert_eq!(entry.tag, "section");
    assert_eq!(entry.issues, ["section tag not closed"]);
    assert!(entry.site.as_deref().is_some_and(|site| site.contains("diagnostics.rs")));

    let text = report.render(ReportFormat::Text);
    assert_eq!(text.matches("tag not closed").count(), 1);
}

#[test]
fn well_formed_pass_leaves_no_concerns() {
    let b = debug_builder();
    b.ul([]).r(b.for_each(["a", "b", "c"], |b, item| {
        b.li([]).t(item);
    }));
    assert!(b.diagnostics().is_empty());
    assert!(b.diagnostics().report().is_empty());
    assert_eq!(
        b.diagnostics().report().to_text(),
        "No element concerns found."
    );
}

#[test]
fn repeated_mistakes_at_one_site_are_reported_once() {
    let b = debug_builder();
    for _ in 0..5 {
        b.p([]).r(b.element("img", ["src", "x.png"]).t("caption"));
    }
    assert!(!b.to_string().contains("caption"));
    assert_eq!(b.diagnostics().len(), 5);

    let report = b.diagnostics().report();
    assert_eq!(report.len(), 1);
    assert_eq!(
        report.entries[0].issues,
        ["void tag <img> cannot have children, discarded 1"]
    );
}

#[test]
fn same_mistake_at_different_sites_is_kept_apart() {
    let b = debug_builder();
    let _first = b.div([]);
    let _second = b.div([]);
    assert_eq!(b.diagnostics().report().len(), 2);
}

#[test]
fn every_void_tag_rejects_children() {
    for &tag in streamhtml::tags::VOID_TAGS {
        let b = debug_builder();
        b.element(tag, ["class", "v"]).r([b.text("a"), b.span([]).t("b")]);

        let html = b.to_string();
        assert_eq!(html, format!(r#"<{tag} class="v" {DEBUG_ID_ATTR}="1">"#));
        assert!(!html.contains(&format!("</{tag}>")));

        let concerns = b.diagnostics().concerns();
        assert_eq!(concerns.len(), 1, "{tag}: {concerns:?}");
        assert_eq!(concerns[0].1.kind, ConcernKind::Other);
        assert_eq!(
            concerns[0].1.issues,
            [Issue::VoidChildren {
                tag: tag.to_string(),
                count: 2,
                discarded: true
            }]
        );
    }
}

#[test]
fn odd_attribute_list_matches_truncated_list() {
    let odd = Builder::with_diagnostics(Diagnostics::new());
    odd.a(["href", "/", "class", "nav", "title"]).t("home");
    let even = Builder::with_diagnostics(Diagnostics::new());
    even.a(["href", "/", "class", "nav"]).t("home");
    assert_eq!(odd.to_string(), even.to_string());

    let b = debug_builder();
    b.a(["href", "/", "title"]).t("home");
    let concerns = b.diagnostics().concerns();
    assert_eq!(concerns.len(), 1);
    assert_eq!(concerns[0].0, "other-1");
    assert!(concerns[0].1.issues[0].to_string().contains("\"title\""));
}

#[test]
fn disabling_clears_and_stops_recording() {
    let b = debug_builder();
    let _open = b.div([]);
    assert_eq!(b.diagnostics().len(), 1);

    b.diagnostics().disable();
    assert!(b.diagnostics().is_empty());
    let _ignored = b.div([]);
    assert!(b.diagnostics().is_empty());
    assert!(!b.diagnostics().report().enabled);
    assert!(b
        .diagnostics()
        .report()
        .to_text()
        .contains("not enabled"));
}

#[test]
fn html_report_is_well_formed_and_quiet() {
    let b = debug_builder();
    let _leaked = b.nav([]);
    let html = b.diagnostics().report().render(ReportFormat::Html);

    assert!(html.contains("<table class=\"tbl-element-concerns\">"));
    assert!(html.contains("<li>nav tag not closed</li>"));
    assert!(!html.contains(DEBUG_ID_ATTR));
    assert_eq!(b.diagnostics().len(), 1);
}
