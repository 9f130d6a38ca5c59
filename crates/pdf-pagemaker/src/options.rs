#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PaperType {
    Letter,
    Legal,
    A4,
    A5,
}

impl PaperType {
    pub fn dimensions_mm(&self) -> (f32, f32) {
        match self {
            PaperType::Letter => (215.9, 279.4),
            PaperType::Legal => (215.9, 355.6),
            PaperType::A4 => (210.0, 297.0),
            PaperType::A5 => (148.0, 210.0),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PaperType::Letter => "Letter",
            PaperType::Legal => "Legal",
            PaperType::A4 => "A4",
            PaperType::A5 => "A5",
        }
    }
}

/// Fixed layout parameters for composition. The defaults follow the
/// classic report layout: A4, 10 mm side margins, page break 15 mm from
/// the bottom, 8 mm body line height.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComposeOptions {
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub margin_top_mm: f32,
    pub margin_left_mm: f32,
    pub margin_right_mm: f32,
    /// Auto page break triggers when the cursor reaches this distance
    /// from the bottom edge. The footer also lives in this band.
    pub break_margin_mm: f32,
    pub header_font_size_pt: u32,
    pub footer_font_size_pt: u32,
    /// Row height of the header title and per-page title blocks.
    pub title_line_height_mm: f32,
    pub body_line_height_mm: f32,
    /// Vertical gap after the header, a title block or an image.
    pub block_spacing_mm: f32,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            page_width_mm: 210.0,
            page_height_mm: 297.0,
            margin_top_mm: 10.0,
            margin_left_mm: 10.0,
            margin_right_mm: 10.0,
            break_margin_mm: 15.0,
            header_font_size_pt: 14,
            footer_font_size_pt: 8,
            title_line_height_mm: 10.0,
            body_line_height_mm: 8.0,
            block_spacing_mm: 5.0,
        }
    }
}

impl ComposeOptions {
    pub fn for_paper(paper: PaperType) -> Self {
        let (width, height) = paper.dimensions_mm();
        Self {
            page_width_mm: width,
            page_height_mm: height,
            ..Default::default()
        }
    }

    /// Width available to text between the side margins.
    pub fn text_width_mm(&self) -> f32 {
        self.page_width_mm - self.margin_left_mm - self.margin_right_mm
    }

    /// Lowest cursor position before a page break is forced.
    pub fn break_at_mm(&self) -> f32 {
        self.page_height_mm - self.break_margin_mm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_text_width_spans_between_margins() {
        let options = ComposeOptions::default();
        assert_eq!(options.text_width_mm(), 190.0);
        assert_eq!(options.break_at_mm(), 282.0);
    }

    #[test]
    fn paper_type_sets_page_dimensions() {
        let options = ComposeOptions::for_paper(PaperType::Letter);
        assert_eq!(options.page_width_mm, 215.9);
        assert_eq!(options.page_height_mm, 279.4);
    }
}
