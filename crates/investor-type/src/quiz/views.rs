use serde::Serialize;

use super::axis::{Axis, LetterMeaning};
use super::catalog::{TypeCatalog, TypeRecord};
use super::code::InvestorCode;
use super::questions::{Question, QuestionId};

/// Codes with an authored result illustration.
const ILLUSTRATED_CODES: [InvestorCode; 11] = [
    InvestorCode::RALD,
    InvestorCode::RALV,
    InvestorCode::RATD,
    InvestorCode::RATV,
    InvestorCode::RCLD,
    InvestorCode::RCLV,
    InvestorCode::RCTD,
    InvestorCode::RCTV,
    InvestorCode::SALD,
    InvestorCode::SATD,
    InvestorCode::SATV,
];

pub fn type_image_path(code: InvestorCode) -> Option<String> {
    ILLUSTRATED_CODES
        .contains(&code)
        .then(|| format!("/image/{code}.png"))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum DescriptionBlock {
    Heading(String),
    Paragraph(String),
}

/// Splits authored description text into headings and paragraphs.
///
/// Blank lines are dropped; a line wrapped in `**` becomes a heading.
pub fn description_sections(description: &str) -> Vec<DescriptionBlock> {
    description
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            if line.len() > 4 && line.starts_with("**") && line.ends_with("**") {
                DescriptionBlock::Heading(line.replace("**", ""))
            } else {
                DescriptionBlock::Paragraph(line.to_string())
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SharePayload {
    pub url: String,
    pub text: String,
    /// Prefilled tweet composer link carrying `text` and `url`.
    pub intent_url: String,
}

const TWEET_INTENT_URL: &str = "https://twitter.com/intent/tweet";

impl SharePayload {
    pub fn for_type(base_url: &str, record: &TypeRecord) -> Self {
        let url = format!("{}/result/{}", base_url.trim_end_matches('/'), record.code);
        let text = format!(
            "私の投資家タイプは「{}」でした！ #投資家タイプ診断",
            record.name
        );
        let intent_url = format!(
            "{}?text={}&url={}",
            TWEET_INTENT_URL,
            encode_component(&text),
            encode_component(&url)
        );
        Self {
            url,
            text,
            intent_url,
        }
    }
}

/// Percent-encodes everything outside `A-Z a-z 0-9 - _ . ! ~ * ' ( )`, byte-wise over UTF-8.
fn encode_component(raw: &str) -> String {
    let mut encoded = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => encoded.push(char::from(byte)),
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionView {
    pub id: QuestionId,
    pub number: usize,
    pub total: usize,
    pub axis: Axis,
    pub text: &'static str,
}

impl QuestionView {
    pub fn new(question: &Question, index: usize, total: usize) -> Self {
        Self {
            id: question.id,
            number: index + 1,
            total,
            axis: question.axis,
            text: question.text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeSummaryView {
    pub code: InvestorCode,
    pub name: &'static str,
    pub short_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
}

impl From<&TypeRecord> for TypeSummaryView {
    fn from(record: &TypeRecord) -> Self {
        Self {
            code: record.code,
            name: record.name,
            short_label: record.short_label,
            image_path: type_image_path(record.code),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompatibilityView {
    pub best: Vec<TypeSummaryView>,
    pub good: Vec<TypeSummaryView>,
    pub challenge: Vec<TypeSummaryView>,
}

impl CompatibilityView {
    fn resolve(catalog: &TypeCatalog<'_>, codes: &[InvestorCode]) -> Vec<TypeSummaryView> {
        codes
            .iter()
            .filter_map(|code| catalog.get(*code))
            .map(TypeSummaryView::from)
            .collect()
    }

    pub fn for_record(catalog: &TypeCatalog<'_>, record: &TypeRecord) -> Self {
        Self {
            best: Self::resolve(catalog, record.best_matches),
            good: Self::resolve(catalog, record.good_matches),
            challenge: Self::resolve(catalog, record.challenge_matches),
        }
    }
}

/// Everything a result or type-detail page renders for one code.
#[derive(Debug, Clone, Serialize)]
pub struct TypeDetailView {
    #[serde(flatten)]
    pub summary: TypeSummaryView,
    pub sections: Vec<DescriptionBlock>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ideal_strategy: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cta_message: Option<&'static str>,
    pub letters: [LetterMeaning; 4],
    pub compatibility: CompatibilityView,
}

impl TypeDetailView {
    pub fn new(catalog: &TypeCatalog<'_>, record: &TypeRecord) -> Self {
        Self {
            summary: TypeSummaryView::from(record),
            sections: description_sections(record.description),
            ideal_strategy: record.ideal_strategy,
            cta_message: record.cta_message,
            letters: record.code.letter_meanings(),
            compatibility: CompatibilityView::for_record(catalog, record),
        }
    }
}

/// Response body for a scored quiz.
#[derive(Debug, Clone, Serialize)]
pub struct QuizResultView {
    pub code: InvestorCode,
    pub result: TypeDetailView,
    pub share: SharePayload,
}

impl QuizResultView {
    pub fn new(catalog: &TypeCatalog<'_>, record: &TypeRecord, public_url: &str) -> Self {
        Self {
            code: record.code,
            result: TypeDetailView::new(catalog, record),
            share: SharePayload::for_type(public_url, record),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quiz::catalog::lookup_type;

    #[test]
    fn sections_split_headings_from_paragraphs() {
        let blocks = description_sections("**基本性格**\nfirst line\n\n**長所と短所**\nsecond");
        assert_eq!(
            blocks,
            vec![
                DescriptionBlock::Heading("基本性格".to_string()),
                DescriptionBlock::Paragraph("first line".to_string()),
                DescriptionBlock::Heading("長所と短所".to_string()),
                DescriptionBlock::Paragraph("second".to_string()),
            ]
        );
    }

    #[test]
    fn authored_descriptions_open_with_a_heading() {
        let record = lookup_type("SALV").expect("SALV present");
        let blocks = description_sections(record.description);
        assert_eq!(
            blocks.first(),
            Some(&DescriptionBlock::Heading("基本性格".to_string()))
        );
        let headings = blocks
            .iter()
            .filter(|block| matches!(block, DescriptionBlock::Heading(_)))
            .count();
        assert_eq!(headings, 3);
    }

    #[test]
    fn image_paths_exist_only_for_illustrated_codes() {
        assert_eq!(
            type_image_path(InvestorCode::RATD).as_deref(),
            Some("/image/RATD.png")
        );
        assert_eq!(type_image_path(InvestorCode::SCLV), None);
        let illustrated = InvestorCode::ALL
            .iter()
            .filter(|code| type_image_path(**code).is_some())
            .count();
        assert_eq!(illustrated, 11);
    }

    #[test]
    fn share_payload_links_to_result_page() {
        let record = lookup_type("rcld").expect("RCLD present");
        let share = SharePayload::for_type("https://quiz.example.com/", record);
        assert_eq!(share.url, "https://quiz.example.com/result/RCLD");
        assert!(share.text.contains(record.name));
        assert!(share.text.ends_with("#投資家タイプ診断"));
    }

    #[test]
    fn share_intent_url_encodes_text_and_link() {
        let record = lookup_type("RATD").expect("RATD present");
        let share = SharePayload::for_type("https://quiz.example.com", record);
        assert!(share
            .intent_url
            .starts_with("https://twitter.com/intent/tweet?text=%E7%A7%81"));
        assert!(share
            .intent_url
            .ends_with("&url=https%3A%2F%2Fquiz.example.com%2Fresult%2FRATD"));
        assert!(share.intent_url.contains("%20%23"));
        assert!(!share.intent_url.contains(' '));
    }

    #[test]
    fn component_encoding_keeps_unreserved_marks() {
        assert_eq!(encode_component("a-b_c.d!e~f*g'h(i)"), "a-b_c.d!e~f*g'h(i)");
        assert_eq!(encode_component("a b&c=d/e?"), "a%20b%26c%3Dd%2Fe%3F");
        assert_eq!(encode_component("！"), "%EF%BC%81");
    }

    #[test]
    fn detail_view_resolves_match_names() {
        let catalog = TypeCatalog::standard();
        let record = catalog.get(InvestorCode::SCLV).expect("SCLV present");
        let view = TypeDetailView::new(&catalog, record);
        let best: Vec<InvestorCode> = view.compatibility.best.iter().map(|t| t.code).collect();
        assert_eq!(best, vec![InvestorCode::SALV, InvestorCode::RCLV]);
        assert_eq!(view.compatibility.challenge.len(), 2);
        assert_eq!(view.letters[0].letter.as_char(), 'S');
    }
}
