use eframe::egui;
use pdf_pagemaker::{
    ComposeOptions, DocumentDescription, FontFamily, MAX_FONT_SIZE_PT, MAX_IMAGE_SIZE_PERCENT,
    MAX_PAGES, MIN_FONT_SIZE_PT, MIN_IMAGE_SIZE_PERCENT, PageDescription,
    normalize_output_name,
};
use pdf_pagemaker_runtime::PagemakerCommand;
use tokio::sync::mpsc;

use crate::ui_components::{SliderBuilder, enum_selector};

pub struct PageFormState {
    pub title: String,
    pub body: String,
    pub image_name: Option<String>,
    pub image_bytes: Option<Vec<u8>>,
    pub image_preview: Option<egui::TextureHandle>,
    pub image_size_percent: u32,
    pub font: FontFamily,
    pub font_size_pt: u32,
}

impl Default for PageFormState {
    fn default() -> Self {
        Self {
            title: String::new(),
            body: String::new(),
            image_name: None,
            image_bytes: None,
            image_preview: None,
            image_size_percent: 50,
            font: FontFamily::Helvetica,
            font_size_pt: 12,
        }
    }
}

pub struct DocumentFormState {
    pub document_title: String,
    pub page_count: usize,
    pub pages: Vec<PageFormState>,
    pub output_name: String,
    pub inline_error: Option<String>,
}

impl Default for DocumentFormState {
    fn default() -> Self {
        Self {
            document_title: String::new(),
            page_count: 1,
            pages: vec![PageFormState::default()],
            output_name: String::new(),
            inline_error: None,
        }
    }
}

impl DocumentFormState {
    pub fn to_document(&self) -> DocumentDescription {
        DocumentDescription {
            title: self.document_title.clone(),
            pages: self
                .pages
                .iter()
                .map(|page| PageDescription {
                    title: page.title.clone(),
                    body: page.body.clone(),
                    font: page.font,
                    font_size_pt: page.font_size_pt,
                    image_data: page.image_bytes.clone(),
                    image_size_percent: page.image_size_percent,
                })
                .collect(),
        }
    }

    fn sync_page_count(&mut self) {
        if self.pages.len() != self.page_count {
            self.pages.resize_with(self.page_count, Default::default);
        }
    }
}

pub fn show_form(
    ui: &mut egui::Ui,
    state: &mut DocumentFormState,
    command_tx: &mpsc::UnboundedSender<PagemakerCommand>,
) {
    egui::ScrollArea::vertical().show(ui, |ui| {
        ui.heading("Document");
        ui.separator();

        ui.horizontal(|ui| {
            ui.label("Document title:");
            ui.text_edit_singleline(&mut state.document_title);
        });

        if SliderBuilder::new(&mut state.page_count, 1..=MAX_PAGES)
            .text("Pages")
            .show(ui)
        {
            state.sync_page_count();
        }

        ui.add_space(10.0);
        ui.separator();

        for index in 0..state.pages.len() {
            show_page_section(ui, state, index);
        }

        ui.add_space(10.0);
        ui.separator();

        show_output_section(ui, state, command_tx);
    });
}

fn show_page_section(ui: &mut egui::Ui, state: &mut DocumentFormState, index: usize) {
    let page = &mut state.pages[index];

    egui::CollapsingHeader::new(format!("Page {}", index + 1))
        .default_open(true)
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label("Title:");
                ui.text_edit_singleline(&mut page.title);
            });

            ui.label("Body:");
            ui.add(
                egui::TextEdit::multiline(&mut page.body)
                    .desired_rows(4)
                    .desired_width(f32::INFINITY),
            );

            ui.add_space(5.0);
            show_image_controls(ui, page, index);

            ui.add_space(5.0);
            let fonts = [
                (FontFamily::Helvetica, FontFamily::Helvetica.name()),
                (FontFamily::Courier, FontFamily::Courier.name()),
                (FontFamily::Times, FontFamily::Times.name()),
            ];
            enum_selector(ui, &format!("font_{index}"), "Font:", &mut page.font, &fonts);

            SliderBuilder::new(
                &mut page.font_size_pt,
                MIN_FONT_SIZE_PT..=MAX_FONT_SIZE_PT,
            )
            .text("Font size")
            .suffix(" pt")
            .show(ui);
        });
}

fn show_image_controls(ui: &mut egui::Ui, page: &mut PageFormState, index: usize) {
    ui.horizontal(|ui| {
        ui.label("Image:");
        if ui.button("Browse…").clicked() {
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("Images", &["jpg", "jpeg", "png"])
                .pick_file()
            {
                match std::fs::read(&path) {
                    Ok(bytes) => {
                        log::info!("Loaded image for page {}: {}", index + 1, path.display());
                        page.image_preview = make_preview(ui.ctx(), &bytes, index);
                        page.image_name = Some(
                            path.file_name()
                                .map(|n| n.to_string_lossy().into_owned())
                                .unwrap_or_else(|| path.display().to_string()),
                        );
                        page.image_bytes = Some(bytes);
                    }
                    Err(error) => {
                        log::warn!("Failed to read {}: {error}", path.display());
                    }
                }
            }
        }

        if let Some(name) = &page.image_name {
            ui.label(name.clone());
            if ui.small_button("✖").clicked() {
                page.image_name = None;
                page.image_bytes = None;
                page.image_preview = None;
            }
        } else {
            ui.label("none");
        }
    });

    if let Some(texture) = &page.image_preview {
        ui.image((texture.id(), texture.size_vec2()));
    }

    ui.add_enabled_ui(page.image_bytes.is_some(), |ui| {
        SliderBuilder::new(
            &mut page.image_size_percent,
            MIN_IMAGE_SIZE_PERCENT..=MAX_IMAGE_SIZE_PERCENT,
        )
        .text("Image size")
        .suffix(" %")
        .show(ui);
    });
}

/// Decodes a thumbnail for the form. Failures are tolerated here; the
/// composer reports undecodable data against the page when generating.
fn make_preview(
    ctx: &egui::Context,
    bytes: &[u8],
    index: usize,
) -> Option<egui::TextureHandle> {
    let decoded = match image::load_from_memory(bytes) {
        Ok(decoded) => decoded,
        Err(error) => {
            log::warn!("Cannot preview image for page {}: {error}", index + 1);
            return None;
        }
    };

    let thumbnail = decoded.thumbnail(160, 160).to_rgba8();
    let size = [thumbnail.width() as usize, thumbnail.height() as usize];
    let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &thumbnail);
    Some(ctx.load_texture(
        format!("page_image_{index}"),
        color_image,
        egui::TextureOptions::default(),
    ))
}

fn show_output_section(
    ui: &mut egui::Ui,
    state: &mut DocumentFormState,
    command_tx: &mpsc::UnboundedSender<PagemakerCommand>,
) {
    ui.horizontal(|ui| {
        ui.label("Output file name:");
        ui.text_edit_singleline(&mut state.output_name);
    });

    if ui.button("📄 Generate PDF…").clicked() {
        if state.output_name.trim().is_empty() {
            state.inline_error = Some("Enter a name for the PDF".to_string());
        } else {
            state.inline_error = None;
            let file_name = normalize_output_name(&state.output_name);
            if let Some(path) = rfd::FileDialog::new()
                .add_filter("PDF", &["pdf"])
                .set_file_name(&file_name)
                .save_file()
            {
                log::info!("Generating PDF: {}", path.display());
                let _ = command_tx.send(PagemakerCommand::Generate {
                    document: state.to_document(),
                    options: ComposeOptions::default(),
                    output_path: path,
                });
            }
        }
    }

    if let Some(error) = &state.inline_error {
        ui.colored_label(egui::Color32::RED, error);
    }
}
