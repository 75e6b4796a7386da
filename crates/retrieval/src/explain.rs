use crate::error::Result;

/// The language-generation collaborator.
///
/// May return an empty or very short answer; presenting a fallback is up to
/// the caller.
pub trait Explainer {
    fn explain(&self, context: &str, question: &str) -> Result<String>;
}

/// Answers with the leading sentences of the cleaned context.
///
/// Stands in for a generative model when none is wired up.
#[derive(Debug, Clone, Copy)]
pub struct ExtractiveExplainer {
    max_sentences: usize,
}

impl Default for ExtractiveExplainer {
    fn default() -> Self {
        Self { max_sentences: 3 }
    }
}

impl ExtractiveExplainer {
    #[must_use]
    pub const fn new(max_sentences: usize) -> Self {
        Self { max_sentences }
    }
}

impl Explainer for ExtractiveExplainer {
    fn explain(&self, context: &str, _question: &str) -> Result<String> {
        let sentences: Vec<&str> = context
            .split(". ")
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .take(self.max_sentences)
            .collect();
        if sentences.is_empty() {
            return Ok(String::new());
        }
        Ok(format!("{}.", sentences.join(". ")))
    }
}

impl<F> Explainer for F
where
    F: Fn(&str, &str) -> Result<String>,
{
    fn explain(&self, context: &str, question: &str) -> Result<String> {
        self(context, question)
    }
}
