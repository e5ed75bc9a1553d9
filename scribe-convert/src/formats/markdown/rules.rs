//! Markdown output conventions
//!
//! Collects the stylistic choices the serializer has to make where
//! CommonMark allows several spellings. Kept separate from the walking
//! logic so hosts can restyle output without touching the serializer.

/// Output conventions for markdown serialization.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkdownRules {
    /// Marker character for unordered list items.
    pub bullet: char,
    /// Continuation indent for nested list content.
    pub indent: String,
}

impl Default for MarkdownRules {
    fn default() -> Self {
        MarkdownRules {
            bullet: '-',
            indent: "  ".to_string(),
        }
    }
}
