use crate::{Builder, Component, Rendered};

/// A data table. The header row is only written when there are headers.
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Column headers.
    pub headers: Vec<String>,
    /// Body cells, row by row.
    pub rows: Vec<Vec<String>>,
    /// Replaces the default `table` class.
    pub class: Option<String>,
    /// Adds `table-striped`.
    pub striped: bool,
    /// Adds `table-bordered`.
    pub bordered: bool,
}
impl Table {
    /// A table with the given headers and rows. Cells are converted with [`ToString`].
    pub fn new<H, R, C>(headers: H, rows: R) -> Self
    where
        H: IntoIterator,
        H::Item: ToString,
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: ToString,
    {
        Self {
            headers: headers.into_iter().map(|h| h.to_string()).collect(),
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(|cell| cell.to_string()).collect())
                .collect(),
            ..Default::default()
        }
    }
}
impl Component for Table {
    fn render(&self, b: &Builder) -> Rendered {
        let mut class = self.class.clone().unwrap_or_else(|| "table".to_string());
        if self.striped {
            class.push_str(" table-striped");
        }
        if self.bordered {
            class.push_str(" table-bordered");
        }

        b.table_class(&class, []).r([
            (!self.headers.is_empty())
                .then(|| {
                    b.thead([]).r(b.tr([]).r(b.for_each(&self.headers, |b, header| {
                        b.th([]).t(header);
                    })))
                })
                .unwrap_or_default(),
            b.tbody([]).r(b.for_each(&self.rows, |b, row| {
                b.tr([]).r(b.for_each(row, |b, cell| {
                    b.td([]).t(cell);
                }));
            })),
        ])
    }
}
