use std::path::PathBuf;

// Re-export types from the library crate
pub use pdf_pagemaker::{ComposeOptions, DocumentDescription, PageDescription, PaperType};

/// Commands sent from UI to worker
#[derive(Debug)]
pub enum PagemakerCommand {
    Generate {
        document: DocumentDescription,
        options: ComposeOptions,
        output_path: PathBuf,
    },
}

/// Updates sent from worker to UI
#[derive(Debug, Clone)]
pub enum PagemakerUpdate {
    Progress {
        operation: String,
        current: usize,
        total: usize,
    },
    GenerateComplete {
        path: PathBuf,
        page_count: usize,
    },
    Error {
        message: String,
    },
}
