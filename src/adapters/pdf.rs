use crate::core::{Location, PlantRecord, RenderedReport, ReportRenderer};
use crate::utils::error::{ReportError, Result};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};

pub const REPORT_TITLE: &str = "Plant Growth Report";

// A4 in points.
const PAGE_WIDTH: i64 = 595;
const PAGE_HEIGHT: i64 = 842;

const MARGIN_LEFT: i64 = 43;
const VALUE_COLUMN: i64 = MARGIN_LEFT + 142;
const FOOTER_BASELINE: i64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
    Italic,
}

impl FontStyle {
    const ALL: [FontStyle; 3] = [FontStyle::Regular, FontStyle::Bold, FontStyle::Italic];

    fn resource(self) -> &'static str {
        match self {
            FontStyle::Regular => "F1",
            FontStyle::Bold => "F2",
            FontStyle::Italic => "F3",
        }
    }

    fn base_font(self) -> &'static str {
        match self {
            FontStyle::Regular => "Helvetica",
            FontStyle::Bold => "Helvetica-Bold",
            FontStyle::Italic => "Helvetica-Oblique",
        }
    }
}

/// One line of text placed at an absolute position on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub style: FontStyle,
    pub size: i64,
    pub x: i64,
    pub y: i64,
    pub text: String,
}

struct Cursor {
    y: i64,
    runs: Vec<TextRun>,
}

impl Cursor {
    fn new(top: i64) -> Self {
        Self {
            y: top,
            runs: Vec::new(),
        }
    }

    fn text(&mut self, style: FontStyle, size: i64, x: i64, text: impl Into<String>) {
        self.runs.push(TextRun {
            style,
            size,
            x,
            y: self.y,
            text: text.into(),
        });
    }

    fn line(&mut self, style: FontStyle, size: i64, text: impl Into<String>, advance: i64) {
        self.text(style, size, MARGIN_LEFT, text);
        self.y -= advance;
    }

    fn row(&mut self, label: &str, value: &str) {
        self.text(FontStyle::Regular, 11, MARGIN_LEFT, label);
        self.text(FontStyle::Regular, 11, VALUE_COLUMN, value);
        self.y -= 23;
    }
}

/// The fixed report layout, top to bottom.
pub fn layout(location: &Location, plant: &PlantRecord) -> Vec<TextRun> {
    let mut cursor = Cursor::new(PAGE_HEIGHT - 52);

    cursor.line(FontStyle::Bold, 14, REPORT_TITLE, 50);

    cursor.line(FontStyle::Italic, 12, format!("Report for: {}", plant.name), 23);
    cursor.line(
        FontStyle::Italic,
        12,
        format!("Location latitude: {:.6}", location.latitude),
        23,
    );
    cursor.line(
        FontStyle::Italic,
        12,
        format!("Location longitude: {:.6}", location.longitude),
        34,
    );

    cursor.line(FontStyle::Bold, 12, "Plant Information", 28);
    cursor.row("Plant Name:", &plant.name);
    cursor.row("Growing Period:", &plant.growing_period);
    cursor.row("Optimal Planting Time:", &plant.optimal_planting);
    cursor.row("Hardiness Zone:", &plant.hardiness_zone);

    cursor.y = FOOTER_BASELINE;
    cursor.text(FontStyle::Italic, 8, MARGIN_LEFT, "Page 1");

    cursor.runs
}

fn render_error(e: impl std::fmt::Display) -> ReportError {
    ReportError::RenderError {
        message: e.to_string(),
    }
}

/// WinAnsi code for the characters it places in 0x80..=0x9F.
fn win_ansi_high(c: char) -> Option<u8> {
    let code = match c {
        '\u{20AC}' => 0x80, // €
        '\u{201A}' => 0x82,
        '\u{0192}' => 0x83,
        '\u{201E}' => 0x84,
        '\u{2026}' => 0x85, // …
        '\u{2020}' => 0x86,
        '\u{2021}' => 0x87,
        '\u{02C6}' => 0x88,
        '\u{2030}' => 0x89,
        '\u{0160}' => 0x8A,
        '\u{2039}' => 0x8B,
        '\u{0152}' => 0x8C,
        '\u{017D}' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{2022}' => 0x95, // •
        '\u{2013}' => 0x96, // –
        '\u{2014}' => 0x97, // —
        '\u{02DC}' => 0x98,
        '\u{2122}' => 0x99, // ™
        '\u{0161}' => 0x9A,
        '\u{203A}' => 0x9B,
        '\u{0153}' => 0x9C,
        '\u{017E}' => 0x9E,
        '\u{0178}' => 0x9F,
        _ => return None,
    };
    Some(code)
}

/// Encodes text for the standard Type1 fonts (WinAnsi); anything the encoding lacks is rejected.
fn encode_text(text: &str) -> Result<Vec<u8>> {
    text.chars()
        .map(|c| {
            if let Some(code) = win_ansi_high(c) {
                return Ok(code);
            }
            let code = c as u32;
            if code <= 0xFF && !c.is_control() {
                Ok(code as u8)
            } else {
                Err(render_error(format!(
                    "character {:?} cannot be encoded in the report font",
                    c
                )))
            }
        })
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct PdfReportRenderer;

impl PdfReportRenderer {
    pub fn new() -> Self {
        Self
    }

    fn build_document(&self, runs: &[TextRun]) -> Result<Vec<u8>> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut fonts = Dictionary::new();
        for style in FontStyle::ALL {
            let font_id = doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => style.base_font(),
                "Encoding" => "WinAnsiEncoding",
            });
            fonts.set(style.resource(), font_id);
        }
        let resources_id = doc.add_object(dictionary! {
            "Font" => fonts,
        });

        let mut operations = Vec::with_capacity(runs.len() * 5);
        for run in runs {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new(
                "Tf",
                vec![run.style.resource().into(), Object::Integer(run.size)],
            ));
            operations.push(Operation::new(
                "Td",
                vec![Object::Integer(run.x), Object::Integer(run.y)],
            ));
            operations.push(Operation::new(
                "Tj",
                vec![Object::string_literal(encode_text(&run.text)?)],
            ));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().map_err(render_error)?,
        ));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![Object::Reference(page_id)],
            "Count" => Object::Integer(1),
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(PAGE_WIDTH),
                Object::Integer(PAGE_HEIGHT),
            ],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        let info_id = doc.add_object(dictionary! {
            "Title" => Object::string_literal(REPORT_TITLE),
            "Producer" => Object::string_literal(env!("CARGO_PKG_NAME")),
            "CreationDate" => Object::string_literal(
                chrono::Utc::now().format("D:%Y%m%d%H%M%SZ").to_string(),
            ),
        });
        doc.trailer.set("Root", catalog_id);
        doc.trailer.set("Info", info_id);

        let mut buffer = Vec::new();
        doc.save_to(&mut buffer).map_err(render_error)?;
        Ok(buffer)
    }
}

impl ReportRenderer for PdfReportRenderer {
    fn render(&self, location: &Location, plant: &PlantRecord) -> Result<RenderedReport> {
        let runs = layout(location, plant);
        let bytes = self.build_document(&runs)?;
        Ok(RenderedReport { bytes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plant() -> PlantRecord {
        PlantRecord {
            id: "1".to_string(),
            name: "Blueberry Bush".to_string(),
            growing_period: "May to August".to_string(),
            optimal_planting: "Spring".to_string(),
            hardiness_zone: "3-7".to_string(),
        }
    }

    fn location() -> Location {
        Location {
            latitude: 40.7128,
            longitude: -74.006,
        }
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn test_layout_order() {
        let texts: Vec<String> = layout(&location(), &plant())
            .into_iter()
            .map(|run| run.text)
            .collect();

        assert_eq!(
            texts,
            vec![
                "Plant Growth Report",
                "Report for: Blueberry Bush",
                "Location latitude: 40.712800",
                "Location longitude: -74.006000",
                "Plant Information",
                "Plant Name:",
                "Blueberry Bush",
                "Growing Period:",
                "May to August",
                "Optimal Planting Time:",
                "Spring",
                "Hardiness Zone:",
                "3-7",
                "Page 1",
            ]
        );
    }

    #[test]
    fn test_layout_runs_top_to_bottom_within_page() {
        let runs = layout(&location(), &plant());

        for pair in runs.windows(2) {
            assert!(pair[1].y <= pair[0].y, "{:?} above {:?}", pair[1], pair[0]);
        }
        assert!(runs.iter().all(|run| run.y > 0 && run.y < PAGE_HEIGHT));
        assert_eq!(runs[0].style, FontStyle::Bold);
    }

    #[test]
    fn test_render_produces_single_page_pdf() {
        let report = PdfReportRenderer::new()
            .render(&location(), &plant())
            .unwrap();

        assert!(!report.is_empty());
        assert!(report.bytes.starts_with(b"%PDF-1.5"));
        assert_eq!(report.content_type(), "application/pdf");
        assert!(contains(&report.bytes, b"Plant Growth Report"));
        assert!(contains(&report.bytes, b"Hardiness Zone:"));

        let doc = Document::load_mem(&report.bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_render_accepts_latin1_text() {
        let mut plant = plant();
        plant.name = "Jalapeño".to_string();

        let report = PdfReportRenderer::new().render(&location(), &plant).unwrap();

        assert!(contains(&report.bytes, b"Jalape\xF1o") || contains(&report.bytes, b"Jalape\\361o"));
    }

    #[test]
    fn test_encode_text_maps_typographic_punctuation() {
        assert_eq!(encode_text("60–80 days").unwrap(), b"60\x9680 days");
        assert_eq!(
            encode_text("“Heirloom” ’s").unwrap(),
            b"\x93Heirloom\x94 \x92s"
        );
        assert_eq!(encode_text("€5 • 2™ — …").unwrap(), b"\x805 \x95 2\x99 \x97 \x85");
    }

    #[test]
    fn test_render_accepts_typographic_punctuation() {
        let mut plant = plant();
        plant.growing_period = "60–80 days".to_string();
        plant.optimal_planting = "“Heirloom” ’s".to_string();

        let report = PdfReportRenderer::new().render(&location(), &plant).unwrap();

        let doc = Document::load_mem(&report.bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 1);
    }

    #[test]
    fn test_render_rejects_unencodable_text() {
        let mut plant = plant();
        plant.hardiness_zone = "5→7".to_string();

        let result = PdfReportRenderer::new().render(&location(), &plant);
        assert!(matches!(result, Err(ReportError::RenderError { .. })));

        plant.hardiness_zone = "蓝莓".to_string();
        let result = PdfReportRenderer::new().render(&location(), &plant);
        assert!(matches!(result, Err(ReportError::RenderError { .. })));
    }

    #[test]
    fn test_encode_text_rejects_c1_controls() {
        assert!(encode_text("\u{0085}").is_err());
    }
}
