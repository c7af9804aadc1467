//! Text Extractor — turns an uploaded resume into normalized plain text.
//!
//! Format is inferred from the file name only. Everything that comes out of
//! here (and every job description) goes through `normalize`.

pub mod normalize;
pub mod pdf;

use thiserror::Error;

pub use normalize::normalize;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file format for '{file_name}'. Use PDF or TXT.")]
    UnsupportedFormat { file_name: String },

    #[error("Failed to read PDF: {0}")]
    Pdf(String),
}

/// Resume formats accepted at the upload boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    PlainText,
}

impl DocumentFormat {
    /// Infers the format from the extension, case-insensitively.
    pub fn from_file_name(file_name: &str) -> Result<Self, ExtractError> {
        let name = file_name.to_lowercase();
        if name.ends_with(".pdf") {
            Ok(DocumentFormat::Pdf)
        } else if name.ends_with(".txt") {
            Ok(DocumentFormat::PlainText)
        } else {
            Err(ExtractError::UnsupportedFormat {
                file_name: file_name.to_string(),
            })
        }
    }
}

/// Extracts and normalizes the text of an uploaded file.
///
/// The format check happens before the bytes are touched. Plain text is decoded
/// as UTF-8 with invalid sequences dropped.
pub fn extract_text(bytes: &[u8], file_name: &str) -> Result<String, ExtractError> {
    let raw = match DocumentFormat::from_file_name(file_name)? {
        DocumentFormat::Pdf => pdf::extract_pdf_text(bytes)?,
        DocumentFormat::PlainText => decode_utf8_lossy_dropping(bytes),
    };
    Ok(normalize(&raw))
}

/// UTF-8 decode that discards invalid byte sequences instead of substituting
/// U+FFFD.
fn decode_utf8_lossy_dropping(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes)
        .chars()
        .filter(|c| *c != char::REPLACEMENT_CHARACTER)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_file_name() {
        assert_eq!(
            DocumentFormat::from_file_name("cv.pdf").unwrap(),
            DocumentFormat::Pdf
        );
        assert_eq!(
            DocumentFormat::from_file_name("CV.PDF").unwrap(),
            DocumentFormat::Pdf
        );
        assert_eq!(
            DocumentFormat::from_file_name("resume.final.TxT").unwrap(),
            DocumentFormat::PlainText
        );
    }

    #[test]
    fn test_unsupported_extensions_fail() {
        for name in ["resume.docx", "resume", "resume.pdf.zip", "txt", ".md"] {
            let err = extract_text(b"anything", name).unwrap_err();
            match err {
                ExtractError::UnsupportedFormat { file_name } => assert_eq!(file_name, name),
                other => panic!("expected UnsupportedFormat for {name}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_txt_is_decoded_and_normalized() {
        let bytes = "Experiência:\n\n  Engenheira de Software   na Açaí Ltda.\n".as_bytes();
        assert_eq!(
            extract_text(bytes, "cv.txt").unwrap(),
            "Experiencia: Engenheira de Software na Acai Ltda."
        );
    }

    #[test]
    fn test_txt_invalid_utf8_is_dropped() {
        let mut bytes = b"Python ".to_vec();
        bytes.extend_from_slice(&[0xFF, 0xFE]);
        bytes.extend_from_slice(b"Rust");
        assert_eq!(extract_text(&bytes, "cv.txt").unwrap(), "Python Rust");
    }

    #[test]
    fn test_txt_empty_file_is_empty_text() {
        assert_eq!(extract_text(b"", "empty.txt").unwrap(), "");
    }

    #[test]
    fn test_pdf_is_extracted_and_normalized() {
        let bytes = pdf::tests::pdf_with_pages(&["Experience", "", "Education"]);
        let text = extract_text(&bytes, "cv.PDF").unwrap();
        assert_eq!(text, "Experience Education");
        assert!(text.is_ascii());
        assert!(!text.contains("  "));
    }

    #[test]
    fn test_txt_output_is_ascii_single_spaced() {
        let bytes = "Résumé\t\t—\r\n\r\nNaïve  café\u{3000}東京".as_bytes();
        let text = extract_text(bytes, "notes.txt").unwrap();
        assert!(text.is_ascii());
        assert!(!text.contains("  "));
        assert_eq!(text, "Resume Naive cafe");
    }
}
