//! Text extraction from various file formats

use crate::error::{Result, ResumeRankerError};
use crate::input::file_detector::FileType;
use crate::input::manager::UploadedFile;
use log::debug;
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};

pub trait TextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String>;
}

/// Extract raw text from an upload, dispatching on the file-name suffix.
///
/// Unsupported suffixes yield an empty string rather than an error, so the
/// document drops out of the ranking as having no text.
pub fn extract(file: &UploadedFile) -> Result<String> {
    let file_type = FileType::from_name(&file.name);
    debug!("Extracting {} ({:?}, {} bytes)", file.name, file_type, file.bytes.len());

    let text = match file_type {
        FileType::Pdf => PdfExtractor.extract(&file.bytes),
        FileType::Docx => DocxExtractor.extract(&file.bytes),
        FileType::Text => PlainTextExtractor.extract(&file.bytes),
        FileType::Unknown => Ok(String::new()),
    };

    text.map_err(|e| match e {
        ResumeRankerError::PdfExtraction(msg) => {
            ResumeRankerError::PdfExtraction(format!("'{}': {}", file.name, msg))
        }
        ResumeRankerError::DocxExtraction(msg) => {
            ResumeRankerError::DocxExtraction(format!("'{}': {}", file.name, msg))
        }
        ResumeRankerError::TextDecoding(msg) => {
            ResumeRankerError::TextDecoding(format!("'{}': {}", file.name, msg))
        }
        other => other,
    })
}

pub struct PdfExtractor;

impl TextExtractor for PdfExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        // pdf-extract panics on some malformed font tables instead of erroring
        let pages = std::panic::catch_unwind(|| pdf_extract::extract_text_from_mem_by_pages(bytes))
            .map_err(|_| ResumeRankerError::PdfExtraction("PDF parser panicked".to_string()))?
            .map_err(|e| ResumeRankerError::PdfExtraction(e.to_string()))?;

        Ok(pages.join("\n"))
    }
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        String::from_utf8(bytes.to_vec())
            .map_err(|e| ResumeRankerError::TextDecoding(format!("not valid UTF-8: {}", e)))
    }
}

pub struct DocxExtractor;

const DOCX_BODY_PART: &str = "word/document.xml";

impl TextExtractor for DocxExtractor {
    fn extract(&self, bytes: &[u8]) -> Result<String> {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes))
            .map_err(|e| ResumeRankerError::DocxExtraction(format!("not a DOCX archive: {}", e)))?;

        let mut xml = String::new();
        archive
            .by_name(DOCX_BODY_PART)
            .map_err(|e| ResumeRankerError::DocxExtraction(format!("missing {}: {}", DOCX_BODY_PART, e)))?
            .read_to_string(&mut xml)?;

        self.body_text(&xml)
    }
}

impl DocxExtractor {
    /// Collect `w:t` runs; paragraphs end with a newline.
    fn body_text(&self, xml: &str) -> Result<String> {
        let mut reader = Reader::from_str(xml);
        let mut text = String::new();
        let mut in_text_run = false;

        loop {
            let event = reader
                .read_event()
                .map_err(|e| ResumeRankerError::DocxExtraction(format!("malformed document.xml: {}", e)))?;

            match event {
                Event::Start(e) if e.name().as_ref() == b"w:t" => in_text_run = true,
                Event::End(e) => match e.name().as_ref() {
                    b"w:t" => in_text_run = false,
                    b"w:p" => text.push('\n'),
                    _ => {}
                },
                Event::Empty(e) => match e.name().as_ref() {
                    b"w:tab" => text.push('\t'),
                    b"w:br" | b"w:cr" => text.push('\n'),
                    _ => {}
                },
                Event::Text(t) if in_text_run => {
                    let unescaped = t
                        .unescape()
                        .map_err(|e| ResumeRankerError::DocxExtraction(e.to_string()))?;
                    text.push_str(&unescaped);
                }
                Event::Eof => break,
                _ => {}
            }
        }

        Ok(text.trim_end().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(name: &str, bytes: &[u8]) -> UploadedFile {
        UploadedFile::new(name, bytes.to_vec())
    }

    #[test]
    fn test_plain_text_is_decoded_as_utf8() {
        let text = extract(&upload("cv.txt", "Données & Python".as_bytes())).unwrap();
        assert_eq!(text, "Données & Python");
    }

    #[test]
    fn test_invalid_utf8_is_an_error() {
        let result = extract(&upload("cv.txt", &[0xff, 0xfe, 0x00]));
        assert!(matches!(result, Err(ResumeRankerError::TextDecoding(_))));
    }

    #[test]
    fn test_unsupported_suffix_yields_empty_text() {
        let text = extract(&upload("cv.rtf", b"{\\rtf1 hello}")).unwrap();
        assert!(text.is_empty());
    }

    #[test]
    fn test_malformed_pdf_is_an_error() {
        let result = extract(&upload("broken.pdf", b"definitely not a pdf"));
        assert!(matches!(result, Err(ResumeRankerError::PdfExtraction(_))));
    }

    #[test]
    fn test_malformed_docx_is_an_error() {
        let result = extract(&upload("broken.docx", b"PK but not really"));
        assert!(matches!(result, Err(ResumeRankerError::DocxExtraction(_))));
    }

    #[test]
    fn test_docx_body_text() {
        let xml = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Jane Doe</w:t></w:r></w:p>
    <w:p><w:r><w:t xml:space="preserve">Rust &amp; </w:t></w:r><w:r><w:t>Python</w:t></w:r></w:p>
    <w:p><w:r><w:t>Skills</w:t><w:tab/><w:t>SQL</w:t></w:r></w:p>
  </w:body>
</w:document>"#;

        let text = DocxExtractor.body_text(xml).unwrap();
        assert_eq!(text, "Jane Doe\nRust & Python\nSkills\tSQL");
    }
}
