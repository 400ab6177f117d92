//! Plain-text views for the terminal

use std::fmt::Write;

use pubmed_export::{COLUMN_NAMES, ResultRow};

use crate::session::SearchForm;

/// Display width of each table column, in characters
const COLUMN_WIDTHS: [usize; 7] = [40, 24, 4, 20, 18, 30, 40];
const ELLIPSIS: char = '…';

/// Shorten `text` to at most `width` characters, marking the cut
pub fn truncate(text: &str, width: usize) -> String {
    // Line breaks inside a cell would break the grid
    let flat: String = text
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();

    if flat.chars().count() <= width {
        return flat;
    }
    let mut cut: String = flat.chars().take(width.saturating_sub(1)).collect();
    cut.push(ELLIPSIS);
    cut
}

fn push_line<'a>(out: &mut String, cells: impl IntoIterator<Item = &'a str>) {
    let mut line = String::new();
    for (cell, width) in cells.into_iter().zip(COLUMN_WIDTHS) {
        if !line.is_empty() {
            line.push_str(" | ");
        }
        let _ = write!(line, "{:<width$}", truncate(cell, width));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}

/// Render rows as a fixed-width table with a header
pub fn table(rows: &[ResultRow]) -> String {
    let mut out = String::new();
    push_line(&mut out, COLUMN_NAMES);

    let rule: Vec<String> = COLUMN_WIDTHS.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');

    for row in rows {
        push_line(&mut out, row.cells());
    }
    out
}

/// Render the current form values
pub fn form_summary(form: &SearchForm) -> String {
    let optional = |value: &str| {
        if value.trim().is_empty() {
            "(vazio)".to_string()
        } else {
            value.to_string()
        }
    };
    let required = |value: &str| {
        if value.trim().is_empty() {
            "(obrigatório)".to_string()
        } else {
            value.to_string()
        }
    };

    let mut out = String::new();
    let _ = writeln!(out, "Termo de Pesquisa:  {}", required(&form.term));
    let _ = writeln!(out, "Nome da Revista:    {}", optional(&form.journal));
    let _ = writeln!(out, "Ano Inicial:        {}", required(&form.year_start));
    let _ = writeln!(out, "Ano Final:          {}", required(&form.year_end));
    let _ = writeln!(out, "Número de Artigos:  {}", form.limit);
    let _ = writeln!(out, "Delineamento:       {}", optional(&form.study_type));
    out
}
