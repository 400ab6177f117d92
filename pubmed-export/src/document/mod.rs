//! PDF report of a search
//!
//! The report holds a centred title, the search parameters, and one entry
//! per result row separated by horizontal rules. The whole document is built
//! in memory.

pub mod fonts;
pub mod layout;

use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use pubmed_client::SearchCriteria;
use tracing::debug;

use crate::error::Result;
use crate::rows::ResultRow;

pub use fonts::{FontStyle, to_latin1};
pub use layout::PageLayout;

use layout::{K, MARGIN, PAGE_HEIGHT, PAGE_WIDTH};

const REPORT_TITLE: &str = "Resultados da Pesquisa PubMed";
const NO_JOURNAL: &str = "Não especificada";
const NO_STUDY_TYPE: &str = "Não especificado";

/// Render the result rows and the criteria that produced them as PDF bytes
///
/// # Example
///
/// ```
/// use pubmed_client::SearchCriteria;
/// use pubmed_export::render_pdf;
///
/// let criteria = SearchCriteria::new("ameloblastoma", "2020", "2021");
/// let pdf = render_pdf(&[], &criteria).unwrap();
/// assert!(pdf.starts_with(b"%PDF-"));
/// ```
pub fn render_pdf(rows: &[ResultRow], criteria: &SearchCriteria) -> Result<Vec<u8>> {
    let layout = lay_out_report(rows, criteria);
    let pages = layout.into_pages();
    let page_count = pages.len();

    let bytes = assemble(pages)?;
    debug!(
        rows = rows.len(),
        pages = page_count,
        bytes = bytes.len(),
        "Rendered PDF export"
    );
    Ok(bytes)
}

/// Place every line of the report, starting new pages as needed
pub fn lay_out_report(rows: &[ResultRow], criteria: &SearchCriteria) -> PageLayout {
    let mut layout = PageLayout::new();

    layout.set_font(FontStyle::Bold, 18.0);
    layout.centered_cell(200.0, 10.0, &to_latin1(REPORT_TITLE));
    layout.line_break(10.0);

    layout.set_font(FontStyle::Regular, 12.0);
    let journal = criteria.journal.as_deref().unwrap_or(NO_JOURNAL);
    let study_type = criteria.study_type.as_deref().unwrap_or(NO_STUDY_TYPE);
    for line in [
        format!("Palavras-chave: {}", criteria.term),
        format!("Período: {} - {}", criteria.year_start, criteria.year_end),
        format!("Revista: {journal}"),
        format!("Delineamento: {study_type}"),
    ] {
        layout.multi_cell(8.0, &to_latin1(&line));
    }
    layout.line_break(10.0);

    for row in rows {
        layout.set_font(FontStyle::Bold, 14.0);
        layout.multi_cell(10.0, &to_latin1(&format!("Título: {}", row.title)));

        layout.set_font(FontStyle::Regular, 12.0);
        layout.multi_cell(8.0, &to_latin1(&format!("Autores: {}", row.authors)));
        layout.multi_cell(8.0, &to_latin1(&format!("Ano: {}", row.year)));
        layout.multi_cell(8.0, &to_latin1(&format!("Delineamento: {}", row.study_types)));
        layout.multi_cell(8.0, &to_latin1(&format!("Revista: {}", row.journal)));

        layout.set_font(FontStyle::Italic, 11.0);
        layout.multi_cell(8.0, &to_latin1(&format!("Resumo: {}", row.abstract_text)));

        layout.set_font(FontStyle::Underline, 11.0);
        layout.multi_cell(8.0, &to_latin1(&format!("Link: {}", row.link)));

        layout.line_break(5.0);
        layout.rule(MARGIN, PAGE_WIDTH - MARGIN);
        layout.line_break(5.0);
    }

    layout
}

fn assemble(pages: Vec<Vec<Operation>>) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.4");
    let pages_id = doc.new_object_id();

    let mut font_dict = Dictionary::new();
    for (name, base_font) in fonts::BASE_FONTS {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => base_font,
            "Encoding" => "WinAnsiEncoding",
        });
        font_dict.set(name, font_id);
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => font_dict,
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(PAGE_WIDTH * K),
            Object::Real(PAGE_HEIGHT * K),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}
