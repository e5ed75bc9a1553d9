//! HTML format support
//!
//! Import-only: pasted HTML comes in, nothing goes back out. Markdown is
//! the storage representation, so there is no HTML serializer here.

pub mod importer;

use crate::context::Context;
use crate::dom::nodes::Document;
use crate::error::ConvertError;
use crate::format::Format;
use std::sync::Arc;

/// HTML format implementation
pub struct HtmlFormat {
    ctx: Arc<Context>,
}

impl HtmlFormat {
    pub fn new(ctx: Arc<Context>) -> Self {
        HtmlFormat { ctx }
    }
}

impl Format for HtmlFormat {
    fn name(&self) -> &str {
        "html"
    }

    fn description(&self) -> &str {
        "HTML fragments, import-only (paste support)"
    }

    fn file_extensions(&self) -> &[&str] {
        &["html", "htm"]
    }

    fn supports_parsing(&self) -> bool {
        true
    }

    fn parse(&self, source: &str) -> Result<Document, ConvertError> {
        Ok(importer::parse_from_html(&self.ctx, source))
    }
}
