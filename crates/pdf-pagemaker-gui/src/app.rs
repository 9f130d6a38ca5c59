use eframe::egui;
use pdf_pagemaker_runtime::{PagemakerCommand, PagemakerUpdate};
use tokio::sync::mpsc;

use crate::logger::AppLogger;
use crate::views::{DocumentFormState, show_form};

#[derive(Clone)]
struct ProgressState {
    operation: String,
    current: usize,
    total: usize,
}

pub struct PagemakerApp {
    form: DocumentFormState,
    status: String,

    // Async infrastructure
    command_tx: mpsc::UnboundedSender<PagemakerCommand>,
    update_rx: mpsc::UnboundedReceiver<PagemakerUpdate>,

    // Progress tracking
    progress: Option<ProgressState>,

    logger: AppLogger,
    show_log: bool,

    _tokio_handle: tokio::runtime::Handle,
}

impl PagemakerApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        tokio_handle: tokio::runtime::Handle,
        logger: AppLogger,
    ) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        // Spawn worker task
        tokio_handle.spawn(crate::worker::worker_task(command_rx, update_tx));

        Self {
            form: DocumentFormState::default(),
            status: String::new(),
            command_tx,
            update_rx,
            progress: None,
            logger,
            show_log: false,
            _tokio_handle: tokio_handle,
        }
    }
}

impl eframe::App for PagemakerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Process all pending updates from worker
        while let Ok(update) = self.update_rx.try_recv() {
            match update {
                PagemakerUpdate::Progress {
                    operation,
                    current,
                    total,
                } => {
                    self.progress = Some(ProgressState {
                        operation,
                        current,
                        total,
                    });
                    ctx.request_repaint(); // Request another frame
                }
                PagemakerUpdate::GenerateComplete { path, page_count } => {
                    self.status = format!("Generated {} pages → {}", page_count, path.display());
                    self.progress = None;
                    self.form.inline_error = None;
                }
                PagemakerUpdate::Error { message } => {
                    self.status = format!("Error: {message}");
                    self.form.inline_error = Some(message);
                    self.progress = None;
                }
            }
        }

        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Pagemaker");
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.toggle_value(&mut self.show_log, "Log");
                });
            });
        });

        if self.show_log {
            egui::TopBottomPanel::bottom("log")
                .resizable(true)
                .show(ctx, |ui| {
                    ui.horizontal(|ui| {
                        ui.label("Log");
                        if ui.small_button("Clear").clicked() {
                            self.logger.clear();
                        }
                    });
                    egui::ScrollArea::vertical()
                        .stick_to_bottom(true)
                        .show(ui, |ui| {
                            for entry in self.logger.entries() {
                                ui.label(format!(
                                    "{} [{}] {}",
                                    entry.timestamp.format("%H:%M:%S"),
                                    entry.level,
                                    entry.message
                                ));
                            }
                        });
                });
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            show_form(ui, &mut self.form, &self.command_tx);

            // Show progress bar
            if let Some(ref progress) = self.progress {
                ui.separator();
                ui.label(&progress.operation);
                ui.add(
                    egui::ProgressBar::new(progress.current as f32 / progress.total.max(1) as f32)
                        .show_percentage(),
                );
                ctx.request_repaint(); // Keep updating during operations
            }

            if !self.status.is_empty() {
                ui.separator();
                ui.label(&self.status);
            }
        });
    }
}
