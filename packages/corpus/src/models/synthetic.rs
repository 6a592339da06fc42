use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One section of an article, as written and as deliberately degraded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Snippet {
    pub well_written_snippet: String,
    pub badly_written_snippet: String,
}

/// Model response for section-level snippet extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ArticleSnippets {
    pub snippets: Vec<Snippet>,
}

/// Model response for the full-article rewrite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SynthesisedText {
    pub poorly_written_article: String,
}

/// Generated contrast material attached to a record.
///
/// Only ever constructed from a successful rewrite; `article_snippets` is
/// `None` rather than an empty list when the model produced no sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticAugmentation {
    pub poorly_written_article: String,
    #[serde(default)]
    pub article_snippets: Option<ArticleSnippets>,
}

impl SyntheticAugmentation {
    pub fn new(rewrite: SynthesisedText, snippets: ArticleSnippets) -> Self {
        Self {
            poorly_written_article: rewrite.poorly_written_article,
            article_snippets: (!snippets.snippets.is_empty()).then_some(snippets),
        }
    }

    pub fn snippet_count(&self) -> usize {
        self.article_snippets
            .as_ref()
            .map(|s| s.snippets.len())
            .unwrap_or(0)
    }
}
