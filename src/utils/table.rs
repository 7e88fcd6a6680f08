//! Table rendering utilities for CLI outputs.

use unicode_width::UnicodeWidthStr;

pub struct Column {
    pub header: String,
    /// Upper bound for the column; longer cells wrap onto extra lines.
    pub max_width: Option<usize>,
}

impl Column {
    pub fn new(header: &str) -> Self {
        Self {
            header: header.to_string(),
            max_width: None,
        }
    }

    pub fn wrapped(header: &str, max_width: usize) -> Self {
        Self {
            header: header.to_string(),
            max_width: Some(max_width),
        }
    }
}

pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    pub separator: char,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            separator: '-',
        }
    }

    pub fn with_separator(mut self, c: char) -> Self {
        self.separator = c;
        self
    }

    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, col)| {
                let content = self
                    .rows
                    .iter()
                    .map(|r| r.get(i).map(|c| c.width()).unwrap_or(0))
                    .max()
                    .unwrap_or(0);
                let natural = content.max(col.header.width());
                match col.max_width {
                    Some(max) => natural.min(max.max(col.header.width())),
                    None => natural,
                }
            })
            .collect()
    }

    pub fn render(&self) -> String {
        let widths = self.widths();
        let mut out = String::new();

        // Header
        let header: Vec<Vec<String>> = self
            .columns
            .iter()
            .map(|c| vec![c.header.clone()])
            .collect();
        push_line(&mut out, &header, &widths);

        let total: usize = widths.iter().sum::<usize>() + 3 * widths.len().saturating_sub(1);
        out.push_str(&self.separator.to_string().repeat(total));
        out.push('\n');

        // Rows
        for row in &self.rows {
            let cells: Vec<Vec<String>> = widths
                .iter()
                .enumerate()
                .map(|(i, w)| {
                    let text = row.get(i).map(String::as_str).unwrap_or("");
                    textwrap::wrap(text, (*w).max(1))
                        .into_iter()
                        .map(|l| l.into_owned())
                        .collect()
                })
                .collect();
            push_line(&mut out, &cells, &widths);
        }

        out
    }
}

/// Append one logical row, which may span several physical lines.
fn push_line(out: &mut String, cells: &[Vec<String>], widths: &[usize]) {
    let height = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);

    for line in 0..height {
        let parts: Vec<String> = cells
            .iter()
            .zip(widths)
            .map(|(cell, w)| {
                let text = cell.get(line).map(String::as_str).unwrap_or("");
                let pad = w.saturating_sub(text.width());
                format!("{}{}", text, " ".repeat(pad))
            })
            .collect();
        out.push_str(parts.join(" | ").trim_end());
        out.push('\n');
    }
}
