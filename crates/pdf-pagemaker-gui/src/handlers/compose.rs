use pdf_pagemaker::{ComposeOptions, DocumentDescription};
use pdf_pagemaker_runtime::PagemakerUpdate;
use std::path::PathBuf;
use tokio::sync::mpsc;

pub async fn handle_generate(
    document: DocumentDescription,
    options: ComposeOptions,
    output_path: PathBuf,
    update_tx: &mpsc::UnboundedSender<PagemakerUpdate>,
) {
    let page_count = document.pages.len();
    let _ = update_tx.send(PagemakerUpdate::Progress {
        operation: "Composing PDF".to_string(),
        current: 0,
        total: page_count,
    });

    match pdf_pagemaker::generate_pdf(&document, &options, &output_path).await {
        Ok(()) => {
            let _ = update_tx.send(PagemakerUpdate::GenerateComplete {
                path: output_path,
                page_count,
            });
        }
        Err(e) => {
            let _ = update_tx.send(PagemakerUpdate::Error {
                message: format!("Failed to generate PDF: {e}"),
            });
        }
    }
}
