use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use pdf_pagemaker::{
    ComposeOptions, DocumentDescription, FontFamily, PageDescription, PaperType,
    normalize_output_name,
};

#[derive(Parser)]
#[command(name = "pagemaker", about = "Page-by-page PDF generator", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a PDF from a JSON document description
    Generate {
        /// Input JSON file (document title + pages)
        #[arg(short, long)]
        input: PathBuf,

        /// Output PDF file (".pdf" is appended if missing)
        #[arg(short, long)]
        output: PathBuf,

        /// Paper size
        #[arg(long, default_value = "a4", value_enum)]
        paper: PaperArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PaperArg {
    A4,
    A5,
    Letter,
    Legal,
}

impl From<PaperArg> for PaperType {
    fn from(arg: PaperArg) -> Self {
        match arg {
            PaperArg::A4 => Self::A4,
            PaperArg::A5 => Self::A5,
            PaperArg::Letter => Self::Letter,
            PaperArg::Legal => Self::Legal,
        }
    }
}

/// On-disk document format. Images are referenced by path and loaded
/// into memory before composition.
#[derive(Debug, Deserialize)]
struct DocumentFile {
    #[serde(default)]
    title: String,
    pages: Vec<PageFile>,
}

#[derive(Debug, Deserialize)]
struct PageFile {
    #[serde(default)]
    title: String,
    #[serde(default)]
    body: String,
    #[serde(default)]
    font: FontFamily,
    #[serde(default = "default_font_size")]
    font_size: u32,
    image: Option<PathBuf>,
    #[serde(default = "default_image_size")]
    image_size_percent: u32,
}

fn default_font_size() -> u32 {
    12
}

fn default_image_size() -> u32 {
    50
}

async fn load_document(path: &Path) -> Result<DocumentDescription> {
    let contents = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let file: DocumentFile =
        serde_json::from_str(&contents).context("invalid document description")?;

    let base_dir = path.parent().map(Path::to_owned).unwrap_or_default();
    let mut pages = Vec::with_capacity(file.pages.len());
    for page in file.pages {
        let image_data = match &page.image {
            Some(image_path) => {
                let resolved = if image_path.is_absolute() {
                    image_path.clone()
                } else {
                    base_dir.join(image_path)
                };
                let bytes = tokio::fs::read(&resolved)
                    .await
                    .with_context(|| format!("failed to read image {}", resolved.display()))?;
                Some(bytes)
            }
            None => None,
        };

        pages.push(PageDescription {
            title: page.title,
            body: page.body,
            font: page.font,
            font_size_pt: page.font_size,
            image_data,
            image_size_percent: page.image_size_percent,
        });
    }

    Ok(DocumentDescription {
        title: file.title,
        pages,
    })
}

fn normalized_output_path(output: &Path) -> PathBuf {
    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    output.with_file_name(normalize_output_name(&name))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            input,
            output,
            paper,
        } => {
            let document = load_document(&input).await?;
            let paper: PaperType = paper.into();
            let options = ComposeOptions::for_paper(paper);
            let output = normalized_output_path(&output);

            pdf_pagemaker::generate_pdf(&document, &options, &output).await?;
            println!(
                "Generated {} {} pages → {}",
                document.pages.len(),
                paper.name(),
                output.display()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_path_gains_pdf_extension() {
        let path = normalized_output_path(Path::new("out/report"));
        assert_eq!(path, Path::new("out/report.pdf"));
    }

    #[test]
    fn uppercase_extension_is_kept() {
        let path = normalized_output_path(Path::new("report.PDF"));
        assert_eq!(path, Path::new("report.PDF"));
    }

    #[tokio::test]
    async fn document_file_round_trips_through_the_loader() {
        use std::io::Write;

        let dir = tempfile::TempDir::new().unwrap();
        let doc_path = dir.path().join("doc.json");
        let mut file = std::fs::File::create(&doc_path).unwrap();
        write!(
            file,
            r#"{{
                "title": "CLI Doc",
                "pages": [
                    {{"title": "One", "body": "hello", "font": "times", "font_size": 14}},
                    {{"body": "defaults only"}}
                ]
            }}"#
        )
        .unwrap();

        let document = load_document(&doc_path).await.unwrap();
        assert_eq!(document.title, "CLI Doc");
        assert_eq!(document.pages.len(), 2);
        assert_eq!(document.pages[0].font, FontFamily::Times);
        assert_eq!(document.pages[0].font_size_pt, 14);
        assert_eq!(document.pages[1].font, FontFamily::Helvetica);
        assert_eq!(document.pages[1].font_size_pt, 12);
        assert_eq!(document.pages[1].image_size_percent, 50);
    }
}
