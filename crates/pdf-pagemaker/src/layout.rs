//! Pure drawing-op builders and layout arithmetic. Nothing in here
//! touches the document object; the composition loop in `pdf.rs` calls
//! these at defined points instead of relying on engine callbacks.

use printpdf::{BuiltinFont, Mm, Op, Point, Pt, TextItem, XObjectTransform};

use crate::options::ComposeOptions;
use crate::types::FontFamily;

pub const PT_TO_MM: f32 = 0.352778;

/// Estimated rendered width of a single line, in mm. Base-14 fonts ship
/// no metrics through printpdf, so this uses the per-family average
/// advance; exact for Courier, conservative for the others.
pub fn estimate_text_width_mm(text: &str, family: FontFamily, font_size_pt: u32) -> f32 {
    text.chars().count() as f32 * font_size_pt as f32 * family.average_advance() * PT_TO_MM
}

/// Greedy word wrap against the estimated glyph width. Explicit
/// newlines are respected and blank lines preserved, so paragraph
/// structure survives. Words longer than a full line are hard-broken.
pub fn wrap_text(
    text: &str,
    family: FontFamily,
    font_size_pt: u32,
    max_width_mm: f32,
) -> Vec<String> {
    let char_width_mm = font_size_pt as f32 * family.average_advance() * PT_TO_MM;
    let max_chars = ((max_width_mm / char_width_mm) as usize).max(1);

    let mut lines = Vec::new();
    for paragraph in text.lines() {
        if paragraph.trim().is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let word_chars = word.chars().count();

            if word_chars > max_chars {
                // Flush whatever is pending, then split the word itself.
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let chunk: Vec<char> = word.chars().collect();
                for piece in chunk.chunks(max_chars) {
                    lines.push(piece.iter().collect());
                }
                continue;
            }

            let needed = if current.is_empty() {
                word_chars
            } else {
                current.chars().count() + 1 + word_chars
            };

            if needed > max_chars {
                lines.push(std::mem::take(&mut current));
                current.push_str(word);
            } else {
                if !current.is_empty() {
                    current.push(' ');
                }
                current.push_str(word);
            }
        }
        if !current.is_empty() {
            lines.push(current);
        }
    }

    lines
}

/// Display geometry for a centered image: `(x offset, display width)`
/// in mm. Width is a straight percentage of the page width, offset
/// splits the remainder evenly.
pub fn image_placement(page_width_mm: f32, size_percent: u32) -> (f32, f32) {
    let width_mm = page_width_mm * (size_percent as f32 / 100.0);
    let x_mm = (page_width_mm - width_mm) / 2.0;
    (x_mm, width_mm)
}

/// Ops for one line of text whose baseline sits `baseline_from_top_mm`
/// below the top edge (PDF coordinates grow upward, the composer's
/// cursor grows downward).
pub fn text_line_ops(
    text: &str,
    font: BuiltinFont,
    font_size_pt: u32,
    x_mm: f32,
    baseline_from_top_mm: f32,
    options: &ComposeOptions,
) -> Vec<Op> {
    vec![
        Op::StartTextSection,
        Op::SetTextCursor {
            pos: Point::new(
                Mm(x_mm),
                Mm(options.page_height_mm - baseline_from_top_mm),
            ),
        },
        Op::SetFontSizeBuiltinFont {
            font,
            size: Pt(font_size_pt as f32),
        },
        Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(text.to_string())],
            font,
        },
        Op::EndTextSection,
    ]
}

/// Header block: document title centered in bold Helvetica at the top
/// of every physical page. An empty title renders nothing.
pub fn header_ops(document_title: &str, options: &ComposeOptions) -> Vec<Op> {
    if document_title.trim().is_empty() {
        return Vec::new();
    }

    let width_mm = estimate_text_width_mm(
        document_title,
        FontFamily::Helvetica,
        options.header_font_size_pt,
    );
    let x_mm = ((options.page_width_mm - width_mm) / 2.0).max(options.margin_left_mm);
    let baseline_mm = options.margin_top_mm + options.title_line_height_mm * 0.75;

    text_line_ops(
        document_title,
        FontFamily::Helvetica.bold(),
        options.header_font_size_pt,
        x_mm,
        baseline_mm,
        options,
    )
}

/// Vertical space the header consumes, including the gap below it.
pub fn header_height_mm(document_title: &str, options: &ComposeOptions) -> f32 {
    if document_title.trim().is_empty() {
        0.0
    } else {
        options.title_line_height_mm + options.block_spacing_mm
    }
}

/// Footer block: `Page N` centered in small italic Helvetica inside the
/// bottom break margin of every physical page.
pub fn footer_ops(page_index: usize, options: &ComposeOptions) -> Vec<Op> {
    let label = format!("Page {page_index}");
    let width_mm = estimate_text_width_mm(
        &label,
        FontFamily::Helvetica,
        options.footer_font_size_pt,
    );
    let x_mm = (options.page_width_mm - width_mm) / 2.0;
    let baseline_mm = options.page_height_mm - options.break_margin_mm / 2.0;

    text_line_ops(
        &label,
        FontFamily::Helvetica.italic(),
        options.footer_font_size_pt,
        x_mm,
        baseline_mm,
        options,
    )
}

/// Transform placing a decoded image with its top-left corner at
/// (`x_mm`, `top_mm` below the top edge), scaled to `width_mm` with the
/// aspect ratio preserved. Pinning the DPI to 72 makes one pixel one
/// point, so the scale factor is exact.
pub fn image_transform(
    x_mm: f32,
    top_mm: f32,
    width_mm: f32,
    height_mm: f32,
    pixel_width: usize,
    options: &ComposeOptions,
) -> XObjectTransform {
    let scale = Mm(width_mm).into_pt().0 / pixel_width as f32;
    XObjectTransform {
        translate_x: Some(Mm(x_mm).into_pt()),
        translate_y: Some(Mm(options.page_height_mm - top_mm - height_mm).into_pt()),
        rotate: None,
        scale_x: Some(scale),
        scale_y: Some(scale),
        dpi: Some(72.0),
    }
}

/// Display height derived from the intrinsic aspect ratio.
pub fn image_display_height_mm(width_mm: f32, pixel_width: usize, pixel_height: usize) -> f32 {
    width_mm * pixel_height as f32 / pixel_width as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_respects_max_width() {
        let lines = wrap_text(
            "the quick brown fox jumps over the lazy dog",
            FontFamily::Courier,
            12,
            40.0,
        );
        assert!(lines.len() > 1);
        let char_width = 12.0 * FontFamily::Courier.average_advance() * PT_TO_MM;
        for line in &lines {
            assert!(line.chars().count() as f32 * char_width <= 40.0 + f32::EPSILON);
        }
    }

    #[test]
    fn wrap_preserves_blank_lines() {
        let lines = wrap_text("first\n\nsecond", FontFamily::Helvetica, 12, 100.0);
        assert_eq!(lines, vec!["first", "", "second"]);
    }

    #[test]
    fn wrap_hard_breaks_oversized_words() {
        let lines = wrap_text(
            "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa",
            FontFamily::Courier,
            24,
            20.0,
        );
        assert!(lines.len() > 1);
        let total: usize = lines.iter().map(|l| l.chars().count()).sum();
        assert_eq!(total, 40);
    }

    #[test]
    fn full_width_image_spans_the_page() {
        let (x, width) = image_placement(210.0, 100);
        assert_eq!(width, 210.0);
        assert_eq!(x, 0.0);
    }

    #[test]
    fn half_width_image_is_centered() {
        let (x, width) = image_placement(210.0, 50);
        assert_eq!(width, 105.0);
        assert_eq!(x, 52.5);
        // Left margin equals right margin.
        assert!((210.0 - (x + width) - x).abs() < 1e-4);
    }

    #[test]
    fn empty_header_renders_nothing() {
        let options = ComposeOptions::default();
        assert!(header_ops("", &options).is_empty());
        assert!(header_ops("   ", &options).is_empty());
        assert_eq!(header_height_mm("", &options), 0.0);
    }

    #[test]
    fn aspect_ratio_drives_display_height() {
        let height = image_display_height_mm(100.0, 200, 100);
        assert_eq!(height, 50.0);
    }
}
