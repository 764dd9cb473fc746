use streamhtml::components::{Alert, AlertKind, Nav, NavItem};
use streamhtml::{Builder, Component, Diagnostics, Rendered, ReportFormat};

struct Animal {
    name: &'static str,
    legs: u32,
}

struct AnimalList<'a> {
    animals: &'a [Animal],
}
impl Component for AnimalList<'_> {
    fn render(&self, b: &Builder) -> Rendered {
        b.ul_class("animals", []).r(b.for_each(self.animals, |b, animal| {
            b.li([]).r([
                b.strong([]).t(animal.name),
                b.f(format_args!(" has {} legs", animal.legs)),
            ]);
        }))
    }
}

fn main() {
    let diagnostics = Diagnostics::new();
    diagnostics.enable();
    let b = Builder::with_diagnostics(diagnostics.clone());

    let animals = [
        Animal { name: "cat", legs: 4 },
        Animal { name: "bird", legs: 2 },
    ];

    b.doctype();
    b.html(["lang", "en"]).r([
        b.head([]).r(b.title([]).t("Animals")),
        b.body([]).r([
            b.component(&Nav {
                brand: Some("Zoo".into()),
                items: vec![NavItem::new("Animals", "/").active(), NavItem::new("Keepers", "/keepers")],
                ..Default::default()
            }),
            b.h1([]).t("Animals"),
            b.component(&AnimalList { animals: &animals }),
            b.component(&Alert {
                kind: AlertKind::Warning,
                message: "Feeding times may change.".into(),
                dismissible: true,
                ..Default::default()
            }),
            // a void tag cannot hold text; the text is discarded and reported
            b.element("hr", []).t("end of list"),
            b.wrap(|| {
                let _footer = b.footer([]);
            }),
        ]),
    ]);

    println!("{}", b.pretty());
    println!("{}", diagnostics.report().render(ReportFormat::Text));
}
