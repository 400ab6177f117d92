//! MEDLINE parsing tests against a realistic EFetch payload

use pubmed_client::pubmed::tags;
use pubmed_client::{MedlineField, parse_medline, sort_by_publication_date};

const EFETCH_PAYLOAD: &str = "
PMID- 33515491
OWN - NLM
STAT- MEDLINE
DCOM- 20210315
LR  - 20210315
IS  - 1399-0020 (Electronic)
IS  - 0901-5027 (Linking)
VI  - 50
IP  - 3
DP  - 2021 Mar
TI  - Recurrence of ameloblastoma after conservative and radical treatment: a
      systematic review and meta-analysis.
PG  - 321-330
LID - 10.1016/j.ijom.2020.07.012 [doi]
AB  - The aim of this study was to compare recurrence rates. A systematic search
      was conducted in PubMed, Embase and Web of Science.
FAU - Hendra, Felix Nicholas
AU  - Hendra FN
AD  - Department of Oral and Maxillofacial Surgery, Amsterdam UMC,
      Amsterdam, Netherlands.
FAU - Van Cann, Ellen M
AU  - Van Cann EM
LA  - eng
PT  - Journal Article
PT  - Meta-Analysis
PT  - Systematic Review
PL  - Denmark
TA  - Int J Oral Maxillofac Surg
JT  - International journal of oral and maxillofacial surgery
MH  - *Ameloblastoma/surgery
MH  - Humans
SO  - Int J Oral Maxillofac Surg. 2021 Mar;50(3):321-330.

PMID- 35000000
DP  - 2022
TI  - Untitled correspondence.
";

#[test]
fn test_parse_realistic_payload() {
    let records = parse_medline(EFETCH_PAYLOAD).expect("payload should parse");
    assert_eq!(records.len(), 2);

    let review = &records[0];
    assert_eq!(review.pmid(), Some("33515491"));
    assert_eq!(
        review.title(),
        Some(
            "Recurrence of ameloblastoma after conservative and radical treatment: a systematic review and meta-analysis."
        )
    );
    assert_eq!(
        review.list(tags::PUBLICATION_TYPE).unwrap(),
        &[
            "Journal Article".to_string(),
            "Meta-Analysis".to_string(),
            "Systematic Review".to_string()
        ]
    );
    // IS is a text tag: repeated values are joined
    assert_eq!(
        review.text("IS"),
        Some("1399-0020 (Electronic) 0901-5027 (Linking)")
    );
    // MH is a list tag
    assert_eq!(
        review.get("MH"),
        Some(&MedlineField::List(vec![
            "*Ameloblastoma/surgery".to_string(),
            "Humans".to_string()
        ]))
    );
    assert_eq!(
        review.text("AD"),
        Some("Department of Oral and Maxillofacial Surgery, Amsterdam UMC, Amsterdam, Netherlands.")
    );
    assert!(review.text(tags::ABSTRACT).unwrap().starts_with("The aim"));
    assert!(review.text(tags::ABSTRACT).unwrap().ends_with("Web of Science."));
}

#[test]
fn test_parse_then_sort() {
    let mut records = parse_medline(EFETCH_PAYLOAD).unwrap();
    sort_by_publication_date(&mut records);

    let pmids: Vec<_> = records.iter().filter_map(|r| r.pmid()).collect();
    assert_eq!(pmids, vec!["35000000", "33515491"]);
}

#[test]
fn test_records_serialize_as_tag_map() {
    let records = parse_medline("PMID- 1\nAU  - Lee K\n").unwrap();
    let json = serde_json::to_value(&records[0]).unwrap();

    assert_eq!(json["PMID"], "1");
    assert_eq!(json["AU"][0], "Lee K");
}
