use lopdf::Document;
use pdf_pagemaker::*;

fn parse(bytes: &[u8]) -> Document {
    Document::load_mem(bytes).expect("composer output should be a parseable PDF")
}

fn page_text(doc: &Document, page_number: u32) -> String {
    doc.extract_text(&[page_number]).unwrap_or_default()
}

fn tiny_png(width: u32, height: u32) -> Vec<u8> {
    let pixels = image::RgbImage::from_pixel(width, height, image::Rgb([180, 90, 45]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(pixels)
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    bytes
}

fn tiny_jpeg(width: u32, height: u32) -> Vec<u8> {
    let pixels = image::RgbImage::from_pixel(width, height, image::Rgb([60, 120, 200]));
    let mut bytes = Vec::new();
    image::DynamicImage::ImageRgb8(pixels)
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Jpeg)
        .unwrap();
    bytes
}

fn page(title: &str, body: &str) -> PageDescription {
    PageDescription {
        title: title.to_string(),
        body: body.to_string(),
        ..Default::default()
    }
}

#[test]
fn one_physical_page_per_description() {
    let document = DocumentDescription {
        title: "Quarterly Report".to_string(),
        pages: vec![
            page("Intro", "short"),
            page("Middle", "short"),
            page("End", "short"),
        ],
    };

    let bytes = compose(&document, &ComposeOptions::default()).unwrap();
    assert_eq!(parse(&bytes).get_pages().len(), 3);
}

#[test]
fn long_body_overflows_onto_continuation_pages() {
    let body = "lorem ipsum dolor sit amet consectetur adipiscing elit\n".repeat(80);
    let document = DocumentDescription {
        title: "Overflow".to_string(),
        pages: vec![page("Only Page", &body)],
    };

    let bytes = compose(&document, &ComposeOptions::default()).unwrap();
    let doc = parse(&bytes);
    let count = doc.get_pages().len();
    assert!(count > 1, "80 lines at 8 mm cannot fit one A4 page");

    // Every physical page carries its own 1-based footer number and the
    // shared header title.
    for number in 1..=count as u32 {
        let text = page_text(&doc, number);
        assert!(
            text.contains(&format!("Page {number}")),
            "page {number} footer missing in: {text}"
        );
        assert!(text.contains("Overflow"), "header missing on page {number}");
    }

    // The page title is not re-rendered on continuation pages.
    assert!(page_text(&doc, 1).contains("Only Page"));
    assert!(!page_text(&doc, 2).contains("Only Page"));
}

#[test]
fn empty_document_title_suppresses_the_header_only() {
    let document = DocumentDescription {
        title: String::new(),
        pages: vec![page("Untitled Doc Page", "body text")],
    };

    let bytes = compose(&document, &ComposeOptions::default()).unwrap();
    let doc = parse(&bytes);
    let text = page_text(&doc, 1);
    assert!(text.contains("Page 1"), "footer still renders: {text}");
    assert!(text.contains("Untitled Doc Page"));
}

#[test]
fn whitespace_page_title_renders_no_title_block() {
    let document = DocumentDescription {
        title: "Doc".to_string(),
        pages: vec![page("   ", "just the body")],
    };

    let bytes = compose(&document, &ComposeOptions::default()).unwrap();
    let text = page_text(&parse(&bytes), 1);
    assert!(text.contains("just the body"));
}

#[test]
fn page_with_image_composes() {
    let mut first = page("Picture", "caption text");
    first.image_data = Some(tiny_png(64, 32));
    first.image_size_percent = 50;

    let document = DocumentDescription {
        title: "Gallery".to_string(),
        pages: vec![first],
    };

    let bytes = compose(&document, &ComposeOptions::default()).unwrap();
    let doc = parse(&bytes);
    assert_eq!(doc.get_pages().len(), 1);
    assert!(page_text(&doc, 1).contains("caption text"));
}

#[test]
fn page_with_jpeg_image_composes() {
    let mut first = page("Photo", "jpeg caption");
    first.image_data = Some(tiny_jpeg(48, 48));
    first.image_size_percent = 100;

    let document = DocumentDescription {
        title: "Gallery".to_string(),
        pages: vec![first],
    };

    let bytes = compose(&document, &ComposeOptions::default()).unwrap();
    let doc = parse(&bytes);
    assert_eq!(doc.get_pages().len(), 1);
    assert!(page_text(&doc, 1).contains("jpeg caption"));
}

#[test]
fn undecodable_image_aborts_the_whole_composition() {
    let mut bad = page("Broken", "text");
    bad.image_data = Some(b"definitely not an image".to_vec());

    let document = DocumentDescription {
        title: "Doc".to_string(),
        pages: vec![page("Fine", "ok"), bad],
    };

    let result = compose(&document, &ComposeOptions::default());
    match result {
        Err(PagemakerError::Render { page, .. }) => assert_eq!(page, 2),
        other => panic!("expected render error for page 2, got {other:?}"),
    }
}

#[test]
fn repeated_composition_is_content_identical() {
    let document = DocumentDescription {
        title: "Stable".to_string(),
        pages: vec![page("A", "first body"), page("B", "second body")],
    };
    let options = ComposeOptions::default();

    let first = parse(&compose(&document, &options).unwrap());
    let second = parse(&compose(&document, &options).unwrap());

    assert_eq!(first.get_pages().len(), second.get_pages().len());
    for number in 1..=first.get_pages().len() as u32 {
        assert_eq!(page_text(&first, number), page_text(&second, number));
    }
}

#[tokio::test]
async fn generate_pdf_writes_the_output_file() {
    use tempfile::TempDir;

    let document = DocumentDescription {
        title: "File Output".to_string(),
        pages: vec![page("P1", "body")],
    };

    let dir = TempDir::new().unwrap();
    let path = dir.path().join(normalize_output_name("report"));
    assert!(path.to_string_lossy().ends_with("report.pdf"));

    generate_pdf(&document, &ComposeOptions::default(), &path)
        .await
        .unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(parse(&bytes).get_pages().len(), 1);
}
