/*!
 * Tests for the PDF and CSV exporters
 */

use flashgen::export::csv::{build_csv, UTF8_BOM};
use flashgen::export::pdf::{build_pdf, plan_document, PdfOptions};
use flashgen::export::{export_filename, write_exports, ExportFormat, ExportRequest};
use flashgen::flashcards::{Card, LanguageDecks, Section};

use crate::common;

#[test]
fn test_buildPdf_shouldStartWithPdfHeader() {
    let bytes = build_pdf("Basic SQL Joins", "English", &common::sample_cards(3), &PdfOptions::default()).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_buildPdf_withNoCards_shouldStillProduceDocument() {
    let bytes = build_pdf("Empty", "French", &[], &PdfOptions::default()).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn test_buildPdf_withMissingFont_shouldFail() {
    let options = PdfOptions {
        font_path: Some("/definitely/not/here.ttf".into()),
    };
    assert!(build_pdf("T", "Urdu", &common::sample_cards(1), &options).is_err());
}

#[test]
fn test_planDocument_pageBreaks_shouldFollowEverySixthCard() {
    assert!(plan_document("T", "English", &common::sample_cards(13)).pages.len() >= 3);
    assert!(plan_document("T", "English", &common::sample_cards(7)).pages.len() >= 2);

    let six = plan_document("T", "English", &common::sample_cards(6));
    assert!(six.pages.last().unwrap().card_count() > 0);
}

#[test]
fn test_buildCsv_shouldHaveOneRowPerCardPlusHeader() {
    let bytes = build_csv("English", &common::sample_cards(5), Section::Example).unwrap();
    let text = String::from_utf8(bytes[UTF8_BOM.len()..].to_vec()).unwrap();

    assert_eq!(text.lines().count(), 6);
    assert!(text.contains("Term 2,Example: Example for term 2.,English\n"));
}

#[test]
fn test_buildCsv_withNonLatinText_shouldKeepUtf8() {
    let card = Card {
        term: "کلید".to_string(),
        definition: "تعریف".to_string(),
        ..Default::default()
    };
    let bytes = build_csv("Urdu", &[card], Section::Definition).unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.contains("کلید,تعریف,Urdu"));
}

#[test]
fn test_exportFilename_shouldUseSectionLabel() {
    assert_eq!(
        export_filename("Romanian", 1718000000, Section::Example, ExportFormat::Csv),
        "flashcards_Romanian_1718000000_example.csv"
    );
}

#[test]
fn test_writeExports_shouldWriteEveryLanguageAndFormat() {
    let temp = common::create_temp_dir().unwrap();
    let out_dir = temp.path().join("exports");

    let mut decks = LanguageDecks::new(common::sample_cards(2));
    decks.insert("French", common::sample_cards(2));

    let request = ExportRequest {
        topic: "SQL",
        section: Section::QA,
        formats: vec![ExportFormat::Pdf, ExportFormat::Csv],
        output_dir: &out_dir,
        unix_time: 1700000000,
        pdf: PdfOptions::default(),
    };
    let written = write_exports(&decks, &request).unwrap();

    assert_eq!(written.len(), 4);
    assert!(out_dir.join("flashcards_French_1700000000_q&a.pdf").exists());

    let csv = std::fs::read_to_string(out_dir.join("flashcards_English_1700000000_q&a.csv")).unwrap();
    assert!(csv.contains("\"Q: What is term 1?\nA: Answer 1.\""));
}
