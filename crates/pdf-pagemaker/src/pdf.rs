use printpdf::{Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, RawImage};
use std::path::Path;

use crate::layout;
use crate::options::ComposeOptions;
use crate::types::{DocumentDescription, PagemakerError, Result};

/// Composes the document and writes it to `output_path`.
pub async fn generate_pdf(
    document: &DocumentDescription,
    options: &ComposeOptions,
    output_path: impl AsRef<Path>,
) -> Result<()> {
    let document = document.clone();
    let options = options.clone();
    let output_path = output_path.as_ref().to_owned();

    // PDF generation is CPU-bound, spawn blocking
    let bytes = tokio::task::spawn_blocking(move || compose(&document, &options)).await??;

    tokio::fs::write(&output_path, bytes).await?;

    Ok(())
}

/// Single synchronous pass from the document description to the final
/// PDF bytes. No state survives between calls; an error on any page
/// aborts the whole composition.
pub fn compose(document: &DocumentDescription, options: &ComposeOptions) -> Result<Vec<u8>> {
    document.validate()?;

    let mut doc = PdfDocument::new(&document.title);
    let mut composer = PageComposer::new(&document.title, options);

    for (index, page) in document.pages.iter().enumerate() {
        composer.begin_page();

        let title = page.title.trim();
        if !title.is_empty() {
            for line in layout::wrap_text(
                title,
                page.font,
                page.font_size_pt,
                options.text_width_mm(),
            ) {
                composer.ensure_space(options.title_line_height_mm);
                composer.text_line(
                    &line,
                    page.font.bold(),
                    page.font_size_pt,
                    options.title_line_height_mm,
                );
            }
            composer.advance(options.block_spacing_mm);
        }

        if let Some(bytes) = &page.image_data {
            let image = decode_image(bytes, index + 1)?;
            let (x_mm, width_mm) =
                layout::image_placement(options.page_width_mm, page.image_size_percent);
            let height_mm =
                layout::image_display_height_mm(width_mm, image.width, image.height);

            composer.ensure_space(height_mm + options.block_spacing_mm);
            let id = doc.add_image(&image);
            let transform = layout::image_transform(
                x_mm,
                composer.cursor_mm,
                width_mm,
                height_mm,
                image.width,
                options,
            );
            composer.ops.push(Op::UseXobject { id, transform });
            composer.advance(height_mm + options.block_spacing_mm);
        }

        for line in layout::wrap_text(
            &page.body,
            page.font,
            page.font_size_pt,
            options.text_width_mm(),
        ) {
            composer.ensure_space(options.body_line_height_mm);
            composer.text_line(
                &line,
                page.font.regular(),
                page.font_size_pt,
                options.body_line_height_mm,
            );
        }
    }

    doc.pages = composer.finish();

    let mut warnings = Vec::new();
    let bytes = doc.save(&PdfSaveOptions::default(), &mut warnings);

    Ok(bytes)
}

fn decode_image(bytes: &[u8], page: usize) -> Result<RawImage> {
    // Reject anything that is not JPEG or PNG up front; the uploads the
    // UI accepts are limited to those two formats.
    match image::guess_format(bytes) {
        Ok(image::ImageFormat::Png) | Ok(image::ImageFormat::Jpeg) => {}
        Ok(other) => {
            return Err(PagemakerError::Render {
                page,
                reason: format!("unsupported image format {other:?}, expected JPEG or PNG"),
            });
        }
        Err(error) => {
            return Err(PagemakerError::Render {
                page,
                reason: format!("unrecognized image data: {error}"),
            });
        }
    }

    let mut warnings = Vec::new();
    RawImage::decode_from_bytes(bytes, &mut warnings).map_err(|reason| PagemakerError::Render {
        page,
        reason: format!("failed to decode image: {reason}"),
    })
}

/// Builds physical pages top to bottom. The cursor measures mm from the
/// top edge; `begin_page` emits the header, `finish_page` stamps the
/// footer with the final 1-based page number.
struct PageComposer<'a> {
    document_title: &'a str,
    options: &'a ComposeOptions,
    pages: Vec<PdfPage>,
    ops: Vec<Op>,
    cursor_mm: f32,
    page_top_mm: f32,
    started: bool,
}

impl<'a> PageComposer<'a> {
    fn new(document_title: &'a str, options: &'a ComposeOptions) -> Self {
        Self {
            document_title,
            options,
            pages: Vec::new(),
            ops: Vec::new(),
            cursor_mm: 0.0,
            page_top_mm: 0.0,
            started: false,
        }
    }

    fn begin_page(&mut self) {
        if self.started {
            self.finish_page();
        }
        self.ops = layout::header_ops(self.document_title, self.options);
        self.page_top_mm = self.options.margin_top_mm
            + layout::header_height_mm(self.document_title, self.options);
        self.cursor_mm = self.page_top_mm;
        self.started = true;
    }

    fn finish_page(&mut self) {
        let page_number = self.pages.len() + 1;
        self.ops
            .extend(layout::footer_ops(page_number, self.options));
        let ops = std::mem::take(&mut self.ops);
        self.pages.push(PdfPage::new(
            Mm(self.options.page_width_mm),
            Mm(self.options.page_height_mm),
            ops,
        ));
    }

    /// Breaks to a continuation page when `height_mm` no longer fits.
    /// A block taller than an empty page is rendered anyway rather than
    /// looping forever.
    fn ensure_space(&mut self, height_mm: f32) {
        if self.cursor_mm + height_mm > self.options.break_at_mm()
            && self.cursor_mm > self.page_top_mm
        {
            self.begin_page();
        }
    }

    fn text_line(
        &mut self,
        text: &str,
        font: printpdf::BuiltinFont,
        font_size_pt: u32,
        row_height_mm: f32,
    ) {
        let baseline_mm = self.cursor_mm + row_height_mm * 0.75;
        self.ops.extend(layout::text_line_ops(
            text,
            font,
            font_size_pt,
            self.options.margin_left_mm,
            baseline_mm,
            self.options,
        ));
        self.cursor_mm += row_height_mm;
    }

    fn advance(&mut self, height_mm: f32) {
        self.cursor_mm += height_mm;
    }

    fn finish(mut self) -> Vec<PdfPage> {
        if self.started {
            self.finish_page();
        }
        self.pages
    }
}
