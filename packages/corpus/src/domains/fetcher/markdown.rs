//! HTML to Markdown conversion for record bodies.

use htmd::HtmlToMarkdown;

/// Convert an HTML body to markdown.
///
/// No line wrapping; links, images, emphasis and tables are kept.
/// Script and style contents are dropped.
pub fn html_to_markdown(html: &str) -> std::io::Result<String> {
    let converter = HtmlToMarkdown::builder()
        .skip_tags(vec!["script", "style"])
        .build();
    Ok(converter.convert(html)?.trim().to_string())
}
