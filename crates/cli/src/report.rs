use docqa_retrieval::{BuildOutcome, BuildStats, Explanation};
use serde::Serialize;
use std::path::Path;

/// Heading every formatted answer opens with
pub(crate) const CORE_HEADING: &str = "### Core Idea";

/// Answers shorter than this are wrapped even when already formatted
pub(crate) const MIN_ANSWER_CHARS: usize = 50;

/// Answers this short are replaced by a placeholder
const MIN_CORE_CHARS: usize = 30;

#[derive(Debug, Serialize)]
pub(crate) struct IndexReport {
    pub root: String,
    #[serde(flatten)]
    pub stats: BuildStats,
    pub failed: Vec<String>,
}

impl IndexReport {
    pub(crate) fn new(root: &Path, outcome: &BuildOutcome) -> Self {
        Self {
            root: root.display().to_string(),
            stats: outcome.stats,
            failed: outcome.failed.clone(),
        }
    }

    pub(crate) fn render(&self) -> String {
        let mut out = format!(
            "Indexed {}/{} documents from {}: {} chunks, dimension {}",
            self.stats.indexed_documents,
            self.stats.documents,
            self.root,
            self.stats.chunks,
            self.stats.dimension
        );
        push_failed(&mut out, &self.failed);
        out
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct SourceRef {
    pub id: String,
    pub source: String,
    pub chunk: usize,
    pub start_word: usize,
    pub end_word: usize,
    pub distance: f32,
}

#[derive(Debug, Serialize)]
pub(crate) struct AskReport {
    pub question: String,
    pub answer: String,
    pub sources: Vec<SourceRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    pub failed: Vec<String>,
}

impl AskReport {
    pub(crate) fn new(
        question: &str,
        explanation: Explanation,
        failed: Vec<String>,
        show_context: bool,
    ) -> Self {
        let question = question.trim();
        let sources = explanation
            .retrieval
            .chunks
            .iter()
            .map(|hit| SourceRef {
                id: hit.chunk.id(),
                source: hit.chunk.source.clone(),
                chunk: hit.chunk.index,
                start_word: hit.chunk.start_word,
                end_word: hit.chunk.end_word,
                distance: hit.distance,
            })
            .collect();

        Self {
            question: question.to_string(),
            answer: format_answer(&explanation.answer, question),
            sources,
            context: show_context.then_some(explanation.retrieval.context),
            failed,
        }
    }

    pub(crate) fn render(&self) -> String {
        let mut out = self.answer.clone();

        if let Some(context) = &self.context {
            out.push_str("\n\nContext:\n");
            out.push_str(if context.is_empty() { "(empty)" } else { context });
        }

        out.push_str("\n\nSources:");
        if self.sources.is_empty() {
            out.push_str(" none");
        }
        for (i, source) in self.sources.iter().enumerate() {
            out.push_str(&format!(
                "\n  {}. {} [words {}-{}] (distance: {:.3})",
                i + 1,
                source.source,
                source.start_word,
                source.end_word,
                source.distance
            ));
        }

        push_failed(&mut out, &self.failed);
        out
    }
}

/// Put an answer under the [`CORE_HEADING`] section layout.
///
/// An answer of at least [`MIN_ANSWER_CHARS`] that already contains the heading
/// is kept as is. Anything else becomes the core bullet, or is replaced by a
/// placeholder when it is [`MIN_CORE_CHARS`] or shorter. Answers below
/// [`MIN_ANSWER_CHARS`] also get suggestions for a better question.
pub(crate) fn format_answer(answer: &str, question: &str) -> String {
    let answer = answer.trim();
    let chars = answer.chars().count();
    if chars >= MIN_ANSWER_CHARS && answer.contains(CORE_HEADING) {
        return answer.to_string();
    }

    let core = if chars > MIN_CORE_CHARS {
        answer.to_string()
    } else {
        format!("The indexed documents say little about \"{question}\".")
    };
    let mut out = format!("{CORE_HEADING}\n- {core}");
    if chars < MIN_ANSWER_CHARS {
        out.push_str(
            "\n\n### Next Steps\n\
             - Rephrase the question using terms from the documents.\n\
             - Add documents that cover this topic, then ask again.",
        );
    }
    out
}

fn push_failed(out: &mut String, failed: &[String]) {
    if !failed.is_empty() {
        out.push_str(&format!("\nSkipped {}: {}", failed.len(), failed.join(", ")));
    }
}
