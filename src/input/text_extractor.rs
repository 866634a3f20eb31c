//! Text extraction from supported file formats

use crate::error::{Result, ReviewerError};
use pulldown_cmark::{Event, Parser, Tag};
use std::path::Path;
use tokio::fs;

pub trait TextExtractor {
    fn extract(&self, path: &Path) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub struct PlainTextExtractor;

impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let content = fs::read_to_string(path).await.map_err(ReviewerError::Io)?;
        Ok(content)
    }
}

pub struct MarkdownExtractor;

impl TextExtractor for MarkdownExtractor {
    async fn extract(&self, path: &Path) -> Result<String> {
        let markdown_content = fs::read_to_string(path).await.map_err(ReviewerError::Io)?;
        Ok(markdown_to_text(&markdown_content))
    }
}

/// Render Markdown to plain text: inline markup is dropped, block elements
/// end up on their own lines.
pub fn markdown_to_text(markdown: &str) -> String {
    let mut text = String::new();

    for event in Parser::new(markdown) {
        match event {
            Event::Text(content) | Event::Code(content) => text.push_str(&content),
            Event::SoftBreak => text.push(' '),
            Event::HardBreak => text.push('\n'),
            Event::End(Tag::Paragraph)
            | Event::End(Tag::Heading(..))
            | Event::End(Tag::Item)
            | Event::End(Tag::CodeBlock(_))
            | Event::End(Tag::TableRow)
            | Event::End(Tag::TableHead) => text.push('\n'),
            Event::End(Tag::TableCell) => text.push(' '),
            _ => {}
        }
    }

    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
