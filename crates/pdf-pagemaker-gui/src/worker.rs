use pdf_pagemaker_runtime::{PagemakerCommand, PagemakerUpdate};
use tokio::sync::mpsc;

use crate::handlers;

/// Async worker task that processes composition commands and sends
/// updates back to the UI thread.
pub async fn worker_task(
    mut command_rx: mpsc::UnboundedReceiver<PagemakerCommand>,
    update_tx: mpsc::UnboundedSender<PagemakerUpdate>,
) {
    while let Some(cmd) = command_rx.recv().await {
        match cmd {
            PagemakerCommand::Generate {
                document,
                options,
                output_path,
            } => {
                handlers::compose::handle_generate(document, options, output_path, &update_tx)
                    .await;
            }
        }
    }
}
