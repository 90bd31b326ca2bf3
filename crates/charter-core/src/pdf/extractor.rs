//! PDF text extraction using lopdf and pdf-extract.

use std::path::Path;

use lopdf::Document;
use regex::Captures;
use tracing::{debug, warn};

use super::{PdfProcessor, Result};
use crate::error::PdfError;
use crate::models::config::PdfConfig;
use crate::standardize::rules::patterns::NEWLINE_RUN;

/// PDF text extractor using lopdf, with pdf-extract as whole-document fallback.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

/// Text content of a loaded PDF.
#[derive(Debug, Clone)]
pub struct PdfContent {
    /// Pages in document order.
    pub pages: Vec<PdfPage>,
    /// Assembled contract text.
    pub text: String,
}

/// Text of a single PDF page.
#[derive(Debug, Clone)]
pub struct PdfPage {
    /// Page number (1-indexed).
    pub number: u32,
    /// Extracted text from this page.
    pub text: String,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    /// Load a PDF from disk.
    pub fn load_file(&mut self, path: &Path) -> crate::error::Result<()> {
        let data = std::fs::read(path)?;
        self.load(&data)?;
        Ok(())
    }

    /// Extract every page and assemble the contract text.
    ///
    /// When lopdf yields no text for any page, the whole document is read
    /// with pdf-extract instead and treated as a single page.
    pub fn extract_all(&self, config: &PdfConfig) -> Result<PdfContent> {
        let page_count = self.page_count();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        let mut pages: Vec<PdfPage> = (1..=page_count)
            .map(|number| {
                let text = self.extract_page_text(number).unwrap_or_else(|e| {
                    warn!("Failed to extract text from page {}: {}", number, e);
                    String::new()
                });
                PdfPage { number, text }
            })
            .collect();

        if pages.iter().all(|p| p.text.trim().is_empty()) {
            debug!("No per-page text found, falling back to whole-document extraction");
            pages = vec![PdfPage {
                number: 1,
                text: self.extract_text()?,
            }];
        }

        let texts: Vec<&str> = pages.iter().map(|p| p.text.as_str()).collect();
        let text = join_pages(&texts, config);

        debug!(
            "Extracted {} chars from {} pages",
            text.len(),
            page_count
        );

        Ok(PdfContent { pages, text })
    }

    fn document(&self) -> Result<&Document> {
        self.document
            .as_ref()
            .ok_or_else(|| PdfError::Parse("No document loaded".to_string()))
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Charter parties are often "protected" with an empty user password
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self) -> Result<String> {
        self.document()?;
        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self.document()?;
        if page == 0 || page > self.page_count() {
            return Err(PdfError::InvalidPage(page));
        }

        doc.extract_text(&[page])
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }
}

/// Join page texts into one document.
///
/// Pages without text are skipped with a warning. Other pages after the
/// first are preceded by a `--- Page N ---` marker when
/// `config.page_separators` is set. Newline runs longer than
/// `config.max_blank_lines + 1` are shortened and the result is trimmed.
pub fn join_pages(pages: &[&str], config: &PdfConfig) -> String {
    let mut text = String::new();
    for (i, page) in pages.iter().enumerate() {
        let number = i + 1;
        if page.trim().is_empty() {
            warn!("No text found on page {}", number);
            continue;
        }
        if number > 1 && config.page_separators {
            text.push_str(&format!("\n--- Page {} ---\n", number));
        }
        text.push_str(page);
    }

    // The run limit comes from config, so the pattern matches every run and
    // the replacement decides.
    let max_run = config.max_blank_lines + 1;
    NEWLINE_RUN
        .replace_all(&text, |caps: &Captures| {
            let run = &caps[0];
            if run.len() > max_run {
                "\n".repeat(max_run)
            } else {
                run.to_string()
            }
        })
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::{dictionary, Object};

    fn two_page_pdf() -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let kids: Vec<Object> = (0..2)
            .map(|_| {
                doc.add_object(dictionary! {
                    "Type" => "Page",
                    "Parent" => pages_id,
                })
                .into()
            })
            .collect();

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => 2,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut data = Vec::new();
        doc.save_to(&mut data).unwrap();
        data
    }

    #[test]
    fn test_pdf_extractor_new() {
        let extractor = PdfExtractor::new();
        assert!(extractor.document.is_none());
        assert_eq!(extractor.page_count(), 0);
    }

    #[test]
    fn test_load_counts_pages() {
        let mut extractor = PdfExtractor::new();
        extractor.load(&two_page_pdf()).unwrap();
        assert_eq!(extractor.page_count(), 2);
    }

    #[test]
    fn test_invalid_page() {
        let mut extractor = PdfExtractor::new();
        extractor.load(&two_page_pdf()).unwrap();
        assert!(matches!(
            extractor.extract_page_text(3),
            Err(PdfError::InvalidPage(3))
        ));
        assert!(matches!(
            extractor.extract_page_text(0),
            Err(PdfError::InvalidPage(0))
        ));
    }

    #[test]
    fn test_rejects_garbage() {
        let mut extractor = PdfExtractor::new();
        assert!(matches!(
            extractor.load(b"not a pdf"),
            Err(PdfError::Parse(_))
        ));
    }

    #[test]
    fn test_extract_without_document() {
        let extractor = PdfExtractor::new();
        assert!(extractor.extract_text().is_err());
        assert!(matches!(
            extractor.extract_all(&PdfConfig::default()),
            Err(PdfError::NoPages)
        ));
    }

    #[test]
    fn test_join_pages_with_separators() {
        let text = join_pages(
            &["TIME CHARTER PARTY\n", "Clause 8 Hire\n", "Clause 15 Redelivery"],
            &PdfConfig::default(),
        );
        assert_eq!(
            text,
            "TIME CHARTER PARTY\n\n--- Page 2 ---\nClause 8 Hire\n\n--- Page 3 ---\nClause 15 Redelivery"
        );
    }

    #[test]
    fn test_join_pages_without_separators() {
        let config = PdfConfig {
            page_separators: false,
            ..PdfConfig::default()
        };
        assert_eq!(join_pages(&["a\n", "b"], &config), "a\nb");
    }

    #[test]
    fn test_join_pages_skips_empty_pages() {
        let text = join_pages(
            &["TIME CHARTER PARTY\n", "  \n", "Clause 15 Redelivery"],
            &PdfConfig::default(),
        );
        assert_eq!(text, "TIME CHARTER PARTY\n\n--- Page 3 ---\nClause 15 Redelivery");
        assert!(!text.contains("Page 2"));

        let text = join_pages(&["", "Clause 8 Hire"], &PdfConfig::default());
        assert_eq!(text, "--- Page 2 ---\nClause 8 Hire");
    }

    #[test]
    fn test_blank_lines_collapsed() {
        let text = join_pages(&["\n\nLine 1\n\n\n\n\nLine 2\n\n\n"], &PdfConfig::default());
        assert_eq!(text, "Line 1\n\nLine 2");

        let config = PdfConfig {
            max_blank_lines: 0,
            ..PdfConfig::default()
        };
        assert_eq!(join_pages(&["Line 1\n\n\nLine 2"], &config), "Line 1\nLine 2");
    }
}
