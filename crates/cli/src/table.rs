//! Plain-text course table for the terminal.

use coursebook_core::{RenderRow, Renderer};
use std::io::{self, Write};

pub struct TableRenderer<W: Write> {
    out: W,
}

impl TableRenderer<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> TableRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_table(&mut self, rows: &[RenderRow]) -> io::Result<()> {
        if rows.is_empty() {
            writeln!(self.out, "(no courses)")?;
            return Ok(());
        }

        let index_width = rows
            .iter()
            .map(|r| r.index.to_string().len())
            .max()
            .unwrap_or(1)
            .max(1);
        let code_width = rows
            .iter()
            .map(|r| r.course_code.chars().count())
            .max()
            .unwrap_or(0)
            .max("Code".len());
        let name_width = rows
            .iter()
            .map(|r| r.course_name.chars().count())
            .max()
            .unwrap_or(0)
            .max("Name".len());

        writeln!(
            self.out,
            "{:>iw$}  {:<cw$}  {:<nw$}  {:>7}  {}",
            "#",
            "Code",
            "Name",
            "Credits",
            "Type",
            iw = index_width,
            cw = code_width,
            nw = name_width
        )?;
        for row in rows {
            let kind = match &row.category {
                Some(category) => format!("{} ({})", row.course_type.as_str(), category),
                None => row.course_type.as_str().to_string(),
            };
            writeln!(
                self.out,
                "{:>iw$}  {:<cw$}  {:<nw$}  {:>7}  {}",
                row.index,
                row.course_code,
                row.course_name,
                row.credits,
                kind,
                iw = index_width,
                cw = code_width,
                nw = name_width
            )?;
        }
        self.out.flush()
    }
}

impl<W: Write> Renderer for TableRenderer<W> {
    fn render(&mut self, rows: &[RenderRow]) {
        if let Err(e) = self.write_table(rows) {
            tracing::warn!(error = %e, "Failed to render course table");
        }
    }
}
