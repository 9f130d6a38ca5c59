/// Appends the `.pdf` extension unless the name already carries one.
/// The check is case-insensitive, so `report.PDF` stays as typed.
pub fn normalize_output_name(name: &str) -> String {
    let trimmed = name.trim();
    if trimmed.to_lowercase().ends_with(".pdf") {
        trimmed.to_string()
    } else {
        format!("{trimmed}.pdf")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_name_gets_the_extension() {
        assert_eq!(normalize_output_name("report"), "report.pdf");
    }

    #[test]
    fn lowercase_extension_is_untouched() {
        assert_eq!(normalize_output_name("report.pdf"), "report.pdf");
    }

    #[test]
    fn uppercase_extension_is_untouched() {
        assert_eq!(normalize_output_name("report.PDF"), "report.PDF");
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(normalize_output_name("  report "), "report.pdf");
    }
}
