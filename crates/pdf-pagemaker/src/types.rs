use printpdf::BuiltinFont;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PagemakerError {
    #[error("Invalid document: {0}")]
    Validation(String),
    #[error("Page {page}: {reason}")]
    Render { page: usize, reason: String },
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, PagemakerError>;

/// Font families selectable per page. Each maps onto the PDF base-14
/// fonts, so no font files need to be embedded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FontFamily {
    #[default]
    Helvetica,
    Courier,
    Times,
}

impl FontFamily {
    pub fn name(self) -> &'static str {
        match self {
            FontFamily::Helvetica => "Helvetica",
            FontFamily::Courier => "Courier",
            FontFamily::Times => "Times",
        }
    }

    pub fn regular(self) -> BuiltinFont {
        match self {
            FontFamily::Helvetica => BuiltinFont::Helvetica,
            FontFamily::Courier => BuiltinFont::Courier,
            FontFamily::Times => BuiltinFont::TimesRoman,
        }
    }

    pub fn bold(self) -> BuiltinFont {
        match self {
            FontFamily::Helvetica => BuiltinFont::HelveticaBold,
            FontFamily::Courier => BuiltinFont::CourierBold,
            FontFamily::Times => BuiltinFont::TimesBold,
        }
    }

    pub fn italic(self) -> BuiltinFont {
        match self {
            FontFamily::Helvetica => BuiltinFont::HelveticaOblique,
            FontFamily::Courier => BuiltinFont::CourierOblique,
            FontFamily::Times => BuiltinFont::TimesItalic,
        }
    }

    /// Average glyph advance as a fraction of the font size, used for
    /// line-wrapping estimates. Courier is exact (monospace); the
    /// proportional families use a conservative average.
    pub fn average_advance(self) -> f32 {
        match self {
            FontFamily::Helvetica => 0.52,
            FontFamily::Courier => 0.60,
            FontFamily::Times => 0.50,
        }
    }
}

pub const MIN_FONT_SIZE_PT: u32 = 8;
pub const MAX_FONT_SIZE_PT: u32 = 24;
pub const MIN_IMAGE_SIZE_PERCENT: u32 = 20;
pub const MAX_IMAGE_SIZE_PERCENT: u32 = 100;
pub const MAX_PAGES: usize = 10;

/// One page of the document as described by the user. Each description
/// becomes exactly one physical page, plus any continuation pages the
/// body text overflows onto.
#[derive(Debug, Clone)]
pub struct PageDescription {
    /// Page heading; blank means no title block is rendered.
    pub title: String,
    /// Flowed body text; wraps and overflows onto continuation pages.
    pub body: String,
    pub font: FontFamily,
    pub font_size_pt: u32,
    /// Raw JPEG or PNG bytes, if the user attached an image.
    pub image_data: Option<Vec<u8>>,
    /// Image display width as a percentage of the page width.
    pub image_size_percent: u32,
}

impl Default for PageDescription {
    fn default() -> Self {
        Self {
            title: String::new(),
            body: String::new(),
            font: FontFamily::default(),
            font_size_pt: 12,
            image_data: None,
            image_size_percent: 50,
        }
    }
}

/// The full document to compose: a shared header title plus an ordered
/// list of pages. Page order is rendering order.
#[derive(Debug, Clone, Default)]
pub struct DocumentDescription {
    /// Shown centered in the header of every physical page; blank
    /// suppresses the header (the footer is still rendered).
    pub title: String,
    pub pages: Vec<PageDescription>,
}

impl DocumentDescription {
    /// Checks the bounds the UI is expected to have enforced already.
    /// A missing page list is a user error; out-of-range numerics mean
    /// a caller bypassed its own controls.
    pub fn validate(&self) -> Result<()> {
        if self.pages.is_empty() {
            return Err(PagemakerError::Validation(
                "document must contain at least one page".to_string(),
            ));
        }
        if self.pages.len() > MAX_PAGES {
            return Err(PagemakerError::Validation(format!(
                "document has {} pages, maximum is {MAX_PAGES}",
                self.pages.len()
            )));
        }

        for (index, page) in self.pages.iter().enumerate() {
            if !(MIN_FONT_SIZE_PT..=MAX_FONT_SIZE_PT).contains(&page.font_size_pt) {
                return Err(PagemakerError::Config(format!(
                    "page {}: font size {} pt outside [{MIN_FONT_SIZE_PT}, {MAX_FONT_SIZE_PT}]",
                    index + 1,
                    page.font_size_pt
                )));
            }
            if !(MIN_IMAGE_SIZE_PERCENT..=MAX_IMAGE_SIZE_PERCENT).contains(&page.image_size_percent)
            {
                return Err(PagemakerError::Config(format!(
                    "page {}: image size {}% outside [{MIN_IMAGE_SIZE_PERCENT}, {MAX_IMAGE_SIZE_PERCENT}]",
                    index + 1,
                    page.image_size_percent
                )));
            }
        }

        Ok(())
    }
}
