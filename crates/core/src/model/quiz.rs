use std::collections::HashSet;

use thiserror::Error;

use crate::model::ids::QuestionId;
use crate::model::question::Question;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("quiz has no questions")]
    Empty,

    #[error("question id {0} appears more than once")]
    DuplicateQuestion(QuestionId),
}

//
// ─── CODE BLOCK ───────────────────────────────────────────────────────────────
//

/// The generated code sample, split out of its Markdown fence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    language: Option<String>,
    source: String,
}

impl CodeBlock {
    #[must_use]
    pub fn new(language: Option<String>, source: impl Into<String>) -> Self {
        let language = language
            .map(|lang| lang.trim().to_ascii_lowercase())
            .filter(|lang| !lang.is_empty());
        Self {
            language,
            source: source.into(),
        }
    }

    /// Parse a ```` ```lang ```` fenced block. Text without a leading fence is
    /// kept verbatim with no language tag; a missing closing fence is tolerated.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let Some(after_fence) = trimmed.strip_prefix("```") else {
            return Self::new(None, trimmed);
        };

        let (tag, body) = after_fence.split_once('\n').unwrap_or((after_fence, ""));
        let body = body.trim_end();
        let body = body.strip_suffix("```").unwrap_or(body);
        let language = Some(tag.trim().to_string());

        Self::new(language, body.trim_end_matches(['\n', '\r']))
    }

    #[must_use]
    pub fn language(&self) -> Option<&str> {
        self.language.as_deref()
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.source.trim().is_empty()
    }

    /// File extension matching the language tag, `txt` when unknown.
    #[must_use]
    pub fn file_extension(&self) -> &'static str {
        match self.language.as_deref() {
            Some("python" | "py") => "py",
            Some("javascript" | "js" | "node") => "js",
            Some("typescript" | "ts") => "ts",
            Some("tsx") => "tsx",
            Some("jsx") => "jsx",
            Some("rust" | "rs") => "rs",
            Some("go" | "golang") => "go",
            Some("java") => "java",
            Some("kotlin" | "kt") => "kt",
            Some("c") => "c",
            Some("cpp" | "c++" | "cxx") => "cpp",
            Some("csharp" | "c#" | "cs") => "cs",
            Some("ruby" | "rb") => "rb",
            Some("php") => "php",
            Some("swift") => "swift",
            Some("html") => "html",
            Some("css") => "css",
            Some("sql") => "sql",
            Some("bash" | "sh" | "shell" | "zsh") => "sh",
            Some("json") => "json",
            Some("yaml" | "yml") => "yaml",
            _ => "txt",
        }
    }
}

//
// ─── QUIZ ─────────────────────────────────────────────────────────────────────
//

/// Generated code plus its comprehension questions. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quiz {
    code: CodeBlock,
    questions: Vec<Question>,
}

impl Quiz {
    /// # Errors
    ///
    /// Returns `QuizError::Empty` without questions and
    /// `QuizError::DuplicateQuestion` when two questions share an id.
    pub fn new(code: CodeBlock, questions: Vec<Question>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::Empty);
        }

        let mut seen = HashSet::with_capacity(questions.len());
        for question in &questions {
            if !seen.insert(question.id()) {
                return Err(QuizError::DuplicateQuestion(question.id().clone()));
            }
        }

        Ok(Self { code, questions })
    }

    #[must_use]
    pub fn code(&self) -> &CodeBlock {
        &self.code
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn position(&self, id: &QuestionId) -> Option<usize> {
        self.questions.iter().position(|question| question.id() == id)
    }

    #[must_use]
    pub fn question(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|question| question.id() == id)
    }
}
