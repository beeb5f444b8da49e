//! OCR tier: rasterize each page via pdfium and recognize text with
//! Tesseract.
//!
//! Requires the pdfium native library at runtime; when it cannot be
//! bound the tier reports itself unavailable and the chain degrades to
//! the basic tier.

use super::ExtractionTier;
use crate::entities::EntityExtractor;
use crate::error::{ExtractError, ExtractResult};
use async_trait::async_trait;
use docstruct_core::{ExtractionMethod, ExtractionRecord};
use pdfium_render::prelude::*;
use rusty_tesseract::{Args, Image};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Second tier of the PDF chain.
pub struct OcrTier {
    entities: EntityExtractor,
    /// Render width in pixels per page.
    target_width: i32,
}

impl OcrTier {
    /// Create the tier around the given entity extractor.
    pub fn new(entities: EntityExtractor) -> Self {
        Self {
            entities,
            target_width: 1600,
        }
    }

    /// Override the per-page render width.
    pub fn with_target_width(mut self, target_width: i32) -> Self {
        self.target_width = target_width;
        self
    }

    /// Bind pdfium from `PDFIUM_LIB_PATH` (or the working directory),
    /// falling back to the system library.
    fn bind_pdfium() -> Result<Pdfium, PdfiumError> {
        let lib_dir = std::env::var("PDFIUM_LIB_PATH").unwrap_or_else(|_| "./".to_string());
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(
            &lib_dir,
        ))
        .or_else(|_| Pdfium::bind_to_system_library())?;
        Ok(Pdfium::new(bindings))
    }

    fn extract_sync(
        path: &PathBuf,
        entities: &EntityExtractor,
        target_width: i32,
    ) -> ExtractResult<Option<ExtractionRecord>> {
        let pdfium = match Self::bind_pdfium() {
            Ok(pdfium) => pdfium,
            Err(err) => {
                warn!(error = %err, "pdfium unavailable, skipping ocr tier");
                return Ok(None);
            }
        };

        let document = pdfium
            .load_pdf_from_file(path, None)
            .map_err(|err| ExtractError::Pdf(err.to_string()))?;

        let render_config = PdfRenderConfig::new().set_target_width(target_width);
        let mut recognized = String::new();

        // One page at a time, in page order.
        for page in document.pages().iter() {
            let bitmap = page
                .render_with_config(&render_config)
                .map_err(|err| ExtractError::Pdf(err.to_string()))?;

            let grayscale = image::DynamicImage::ImageLuma8(bitmap.as_image().to_luma8());
            let page_image = Image::from_dynamic_image(&grayscale)
                .map_err(|err| ExtractError::Pdf(err.to_string()))?;
            let text = rusty_tesseract::image_to_string(&page_image, &Args::default())
                .map_err(|err| ExtractError::Pdf(err.to_string()))?;

            recognized.push_str(&text);
            recognized.push('\n');
        }

        let spans = entities.extract(&recognized);
        let record = if spans.is_empty() {
            ExtractionRecord::from_lines(&recognized, ExtractionMethod::OcrLines)
        } else {
            ExtractionRecord::from_spans(&spans, ExtractionMethod::Ocr)
        };
        Ok(Some(record))
    }
}

#[async_trait]
impl ExtractionTier for OcrTier {
    fn name(&self) -> &str {
        "ocr"
    }

    async fn attempt(&self, path: &Path) -> ExtractResult<Option<ExtractionRecord>> {
        let path = path.to_path_buf();
        let entities = self.entities.clone();
        let target_width = self.target_width;
        tokio::task::spawn_blocking(move || Self::extract_sync(&path, &entities, target_width))
            .await?
    }
}
