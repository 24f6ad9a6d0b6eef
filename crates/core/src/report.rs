//! Diagnostic report rendering.
//!
//! Consumes one persisted diagnostic (denormalized result fields included)
//! plus the owning practitioner's display name, and produces a fixed-layout
//! PDF document. Rendering is split in two: [`build_layout`] computes the
//! positioned text lines and is fully deterministic for a given record;
//! [`render_pdf`] writes that layout with `printpdf`.

use chrono::Locale;
use printpdf::{BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, Rgb};

use crate::error::CoreError;
use crate::tree::Severity;
use crate::types::{DbId, Timestamp};

/// Everything the report needs from a persisted diagnostic.
#[derive(Debug, Clone)]
pub struct ReportInput<'a> {
    pub diagnostic_id: DbId,
    pub practitioner_name: &'a str,
    pub tree_name: &'a str,
    pub created_at: Timestamp,
    pub result_title: &'a str,
    pub severity: Severity,
    pub result_description: &'a str,
    pub recommendations: &'a [String],
}

/// An RGB color in the 0.0–1.0 range.
pub type ReportColor = (f64, f64, f64);

const HEADER_BLUE: ReportColor = (0.290, 0.565, 0.886); // #4A90E2
const MUTED_GREY: ReportColor = (0.482, 0.533, 0.580); // #7B8794
const HEADING_DARK: ReportColor = (0.173, 0.243, 0.314); // #2C3E50
const BLACK: ReportColor = (0.0, 0.0, 0.0);

const SUCCESS_GREEN: ReportColor = (0.153, 0.682, 0.376); // #27AE60
const WARNING_ORANGE: ReportColor = (0.953, 0.612, 0.071); // #F39C12
const DANGER_RED: ReportColor = (0.906, 0.298, 0.235); // #E74C3C

/// Severity to title color: success green, warning orange, danger red.
pub fn severity_color(severity: Severity) -> ReportColor {
    match severity {
        Severity::Success => SUCCESS_GREEN,
        Severity::Warning => WARNING_ORANGE,
        Severity::Danger => DANGER_RED,
    }
}

// A4 geometry, in millimetres.
const PAGE_WIDTH_MM: f64 = 210.0;
const PAGE_HEIGHT_MM: f64 = 297.0;
const MARGIN_MM: f64 = 20.0;
const TOP_Y_MM: f64 = PAGE_HEIGHT_MM - MARGIN_MM;
const BOTTOM_Y_MM: f64 = MARGIN_MM;

/// Body text wraps at this many characters (11pt within A4 margins).
const WRAP_COLUMNS: usize = 90;

/// One positioned line of the report.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub page: usize,
    pub x_mm: f64,
    pub y_mm: f64,
    pub size_pt: f64,
    pub bold: bool,
    pub color: ReportColor,
    pub text: String,
}

struct LayoutCursor {
    lines: Vec<Line>,
    page: usize,
    y_mm: f64,
}

impl LayoutCursor {
    fn new() -> Self {
        LayoutCursor {
            lines: Vec::new(),
            page: 0,
            y_mm: TOP_Y_MM,
        }
    }

    fn advance(&mut self, mm: f64) {
        self.y_mm -= mm;
        if self.y_mm < BOTTOM_Y_MM {
            self.page += 1;
            self.y_mm = TOP_Y_MM;
        }
    }

    fn push(&mut self, text: &str, size_pt: f64, bold: bool, color: ReportColor) {
        // Line height: ~0.5mm per point leaves comfortable leading.
        self.advance(size_pt * 0.5);
        self.lines.push(Line {
            page: self.page,
            x_mm: MARGIN_MM,
            y_mm: self.y_mm,
            size_pt,
            bold,
            color,
            text: text.to_string(),
        });
    }

    fn push_wrapped(&mut self, text: &str, size_pt: f64, color: ReportColor) {
        for line in wrap_text(text, WRAP_COLUMNS) {
            self.push(&line, size_pt, false, color);
        }
    }

    fn gap(&mut self, mm: f64) {
        self.advance(mm);
    }
}

/// Greedy word wrap at `columns` characters. Words longer than a full line
/// are emitted unbroken.
fn wrap_text(text: &str, columns: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= columns {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Compute the full positioned layout for a report.
///
/// Deterministic: the same input always yields the same lines. The wall-clock
/// never enters here; the only date shown is the diagnostic's own creation
/// timestamp, localized for French display.
pub fn build_layout(input: &ReportInput<'_>) -> Vec<Line> {
    let mut cursor = LayoutCursor::new();

    // Header block.
    cursor.push("Clinidex", 24.0, true, HEADER_BLUE);
    cursor.push("Rapport de diagnostic", 12.0, false, MUTED_GREY);
    cursor.gap(12.0);

    // Practitioner and session information.
    cursor.push("Informations", 16.0, true, HEADING_DARK);
    cursor.gap(2.0);
    cursor.push(
        &format!("Praticien : {}", input.practitioner_name),
        11.0,
        false,
        BLACK,
    );
    let date = input
        .created_at
        .format_localized("%e %B %Y à %H:%M", Locale::fr_FR);
    cursor.push(&format!("Date : {date}"), 11.0, false, BLACK);
    cursor.push(
        &format!("Zone examinée : {}", input.tree_name),
        11.0,
        false,
        BLACK,
    );
    cursor.gap(12.0);

    // Result, title colored by severity.
    cursor.push("Résultat du diagnostic", 16.0, true, HEADING_DARK);
    cursor.gap(2.0);
    cursor.push(input.result_title, 14.0, true, severity_color(input.severity));
    cursor.gap(2.0);
    if !input.result_description.is_empty() {
        cursor.push_wrapped(input.result_description, 11.0, BLACK);
    }
    cursor.gap(12.0);

    // Numbered recommendations.
    if !input.recommendations.is_empty() {
        cursor.push("Recommandations", 16.0, true, HEADING_DARK);
        cursor.gap(2.0);
        for (index, recommendation) in input.recommendations.iter().enumerate() {
            cursor.push_wrapped(
                &format!("{}. {recommendation}", index + 1),
                11.0,
                BLACK,
            );
        }
        cursor.gap(12.0);
    }

    // Disclaimer footer.
    cursor.gap(6.0);
    cursor.push_wrapped(
        "Ce document est généré automatiquement par Clinidex et ne constitue pas \
         un document médical officiel.",
        9.0,
        MUTED_GREY,
    );

    cursor.lines
}

/// Render a diagnostic report to PDF bytes.
pub fn render_pdf(input: &ReportInput<'_>) -> Result<Vec<u8>, CoreError> {
    let layout = build_layout(input);
    let page_count = layout.iter().map(|l| l.page).max().unwrap_or(0) + 1;

    let (doc, first_page, first_layer) = PdfDocument::new(
        format!("Diagnostic {}", input.diagnostic_id),
        Mm(PAGE_WIDTH_MM as f32),
        Mm(PAGE_HEIGHT_MM as f32),
        "Calque 1",
    );
    let regular = add_font(&doc, BuiltinFont::Helvetica)?;
    let bold = add_font(&doc, BuiltinFont::HelveticaBold)?;

    let mut layers = vec![doc.get_page(first_page).get_layer(first_layer)];
    for _ in 1..page_count {
        let (page, layer) =
            doc.add_page(Mm(PAGE_WIDTH_MM as f32), Mm(PAGE_HEIGHT_MM as f32), "Calque 1");
        layers.push(doc.get_page(page).get_layer(layer));
    }

    for line in &layout {
        let layer = &layers[line.page];
        let (r, g, b) = line.color;
        layer.set_fill_color(Color::Rgb(Rgb::new(r as f32, g as f32, b as f32, None)));
        let font = if line.bold { &bold } else { &regular };
        layer.use_text(
            &line.text,
            line.size_pt as f32,
            Mm(line.x_mm as f32),
            Mm(line.y_mm as f32),
            font,
        );
    }

    doc.save_to_bytes()
        .map_err(|e| CoreError::Internal(format!("PDF serialization failed: {e}")))
}

fn add_font(
    doc: &printpdf::PdfDocumentReference,
    font: BuiltinFont,
) -> Result<IndirectFontRef, CoreError> {
    doc.add_builtin_font(font)
        .map_err(|e| CoreError::Internal(format!("PDF font error: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_input(recommendations: &[String]) -> ReportInput<'_> {
        ReportInput {
            diagnostic_id: 12,
            practitioner_name: "Dr. Sophie Laurent",
            tree_name: "Cervicale",
            created_at: chrono::Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap(),
            result_title: "Urgence",
            severity: Severity::Danger,
            result_description: "Suspicion d'atteinte sérieuse nécessitant un avis médical.",
            recommendations,
        }
    }

    #[test]
    fn layout_is_deterministic() {
        let recs = vec!["Consulter".to_string()];
        let a = build_layout(&sample_input(&recs));
        let b = build_layout(&sample_input(&recs));
        assert_eq!(a, b);
    }

    #[test]
    fn title_uses_the_severity_color() {
        let recs = vec![];
        let layout = build_layout(&sample_input(&recs));
        let title = layout.iter().find(|l| l.text == "Urgence").unwrap();
        assert_eq!(title.color, severity_color(Severity::Danger));
        assert_eq!(title.size_pt, 14.0);
    }

    #[test]
    fn severity_colors_are_fixed() {
        assert_eq!(severity_color(Severity::Success), SUCCESS_GREEN);
        assert_eq!(severity_color(Severity::Warning), WARNING_ORANGE);
        assert_eq!(severity_color(Severity::Danger), DANGER_RED);
    }

    #[test]
    fn recommendations_are_numbered_in_order() {
        let recs = vec!["Repos".to_string(), "Glace".to_string()];
        let layout = build_layout(&sample_input(&recs));
        let numbered: Vec<&str> = layout
            .iter()
            .filter(|l| l.text.starts_with("1. ") || l.text.starts_with("2. "))
            .map(|l| l.text.as_str())
            .collect();
        assert_eq!(numbered, vec!["1. Repos", "2. Glace"]);
    }

    #[test]
    fn long_descriptions_wrap() {
        let long = "mot ".repeat(120);
        let input = ReportInput {
            result_description: &long,
            ..sample_input(&[])
        };
        let layout = build_layout(&input);
        let body_lines = layout
            .iter()
            .filter(|l| l.text.starts_with("mot"))
            .count();
        assert!(body_lines > 1, "expected the description to span lines");
        for line in &layout {
            assert!(line.text.chars().count() <= WRAP_COLUMNS + 10);
        }
    }

    #[test]
    fn wrap_text_respects_word_boundaries() {
        let lines = wrap_text("un deux trois quatre", 9);
        assert_eq!(lines, vec!["un deux", "trois", "quatre"]);
        assert_eq!(wrap_text("", 10), Vec::<String>::new());
    }

    #[test]
    fn renders_pdf_bytes() {
        let recs = vec!["Consulter".to_string()];
        let bytes = render_pdf(&sample_input(&recs)).unwrap();
        assert!(bytes.starts_with(b"%PDF"), "output must be a PDF document");
    }

    #[test]
    fn footer_disclaimer_is_present() {
        let layout = build_layout(&sample_input(&[]));
        assert!(layout
            .iter()
            .any(|l| l.text.contains("document médical officiel")));
    }
}
