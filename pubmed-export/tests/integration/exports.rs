//! End-to-end export tests: MEDLINE text -> rows -> CSV / PDF

use csv::ReaderBuilder;
use lopdf::{Document, Object};
use pubmed_client::{SearchCriteria, parse_medline};
use pubmed_export::document::lay_out_report;
use pubmed_export::{COLUMN_NAMES, ResultRow, render_pdf, rows_from_records, rows_to_csv};
use rstest::rstest;
use tracing_test::traced_test;

const MEDLINE: &str = "
PMID- 36100001
DP  - 2023 Jan
TI  - Surgery; a \"new\" approach to ameloblastoma.
AU  - Gonçalves T
AU  - Müller K
PT  - Randomized Controlled Trial
TA  - Oral Oncol
AB  - Line one of the abstract
      continues here with β-catenin and 5 mm margins.

PMID- 36100002
DP  - 2022
TI  - Second record without abstract.

PMID- 36100003
";

fn rows() -> Vec<ResultRow> {
    let records = parse_medline(MEDLINE).expect("fixture parses");
    rows_from_records(&records)
}

fn reparse(bytes: &[u8]) -> Vec<Vec<String>> {
    let mut reader = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .from_reader(bytes);

    reader
        .records()
        .map(|record| {
            record
                .expect("valid CSV record")
                .iter()
                .map(str::to_string)
                .collect()
        })
        .collect()
}

#[test]
#[traced_test]
fn test_csv_round_trips_through_a_reader() {
    let rows = rows();
    let bytes = rows_to_csv(&rows).unwrap();
    let table = reparse(&bytes);

    assert_eq!(table.len(), rows.len() + 1);
    assert_eq!(table[0], COLUMN_NAMES.map(str::to_string).to_vec());

    for (parsed, row) in table[1..].iter().zip(&rows) {
        assert_eq!(parsed.len(), 7);
        assert_eq!(parsed, &row.cells().map(str::to_string).to_vec());
    }

    assert_eq!(table[1][0], "Surgery; a \"new\" approach to ameloblastoma.");
    assert_eq!(table[1][1], "Gonçalves T, Müller K");
}

#[test]
fn test_csv_is_utf8_with_placeholders() {
    let bytes = rows_to_csv(&rows()).unwrap();
    let text = String::from_utf8(bytes).expect("CSV must be UTF-8");

    assert!(text.starts_with("Título;Autores;Ano;Delineamento;Revista;Resumo;Link\n"));
    assert!(text.contains("Resumo não disponível"));
    assert!(text.contains("https://pubmed.ncbi.nlm.nih.gov/36100003/"));
    assert!(!text.contains(";;"), "no cell may be empty");
}

#[rstest]
#[case(0)]
#[case(1)]
#[case(25)]
fn test_csv_row_count(#[case] copies: usize) {
    let base = rows();
    let rows: Vec<_> = base.iter().cycle().take(copies).cloned().collect();
    let table = reparse(&rows_to_csv(&rows).unwrap());

    assert_eq!(table.len(), copies + 1);
}

#[test]
#[traced_test]
fn test_pdf_loads_and_matches_layout() {
    let criteria = SearchCriteria::new("Ameloblastoma AND Treatment", "2020", "2023")
        .with_study_type("Randomized Controlled Trial");
    let rows = rows();

    let bytes = render_pdf(&rows, &criteria).unwrap();
    let doc = Document::load_mem(&bytes).expect("generated PDF should load");

    let expected = lay_out_report(&rows, &criteria).page_count();
    assert_eq!(doc.get_pages().len(), expected);
}

#[test]
fn test_pdf_text_is_latin1_with_replacements() {
    let criteria = SearchCriteria::new("ameloblastoma", "2020", "2023");
    let layout = lay_out_report(&rows(), &criteria);

    let shown: Vec<Vec<u8>> = layout
        .into_pages()
        .into_iter()
        .flatten()
        .filter(|op| op.operator == "Tj")
        .filter_map(|op| match op.operands.first() {
            Some(Object::String(bytes, _)) => Some(bytes.clone()),
            _ => None,
        })
        .collect();

    assert!(shown.contains(&b"Per\xedodo: 2020 - 2023".to_vec()));
    assert!(shown.contains(&b"Revista: N\xe3o especificada".to_vec()));
    assert!(shown.contains(&b"Autores: Gon\xe7alves T, M\xfcller K".to_vec()));
    assert!(
        shown
            .iter()
            .any(|line| line.windows(9).any(|w| w == b"?-catenin"))
    );
}
