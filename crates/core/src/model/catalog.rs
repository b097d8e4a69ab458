use std::collections::HashSet;

use thiserror::Error;

use crate::model::data_match;
use crate::model::ids::{ATLAN, ResultId};
use crate::model::question::Question;
use crate::model::result::ResultEntry;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("question index {index} out of range (have {len})")]
    QuestionOutOfRange { index: usize, len: usize },

    #[error("result index {index} out of range (have {len})")]
    ResultOutOfRange { index: usize, len: usize },

    #[error("question bank must contain at least one question")]
    NoQuestions,

    #[error("question {index} has no options")]
    QuestionWithoutOptions { index: usize },

    #[error("result catalog must contain at least one entry")]
    NoResults,

    #[error("duplicate result id: {0}")]
    DuplicateResult(ResultId),

    #[error("default result {0} is not in the catalog")]
    UnknownDefault(ResultId),
}

//
// ─── QUESTION BANK ─────────────────────────────────────────────────────────────
//

/// Ordered, immutable list of quiz questions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// # Errors
    ///
    /// Returns `CatalogError::NoQuestions` for an empty bank and
    /// `CatalogError::QuestionWithoutOptions` if any question has no options.
    pub fn new(questions: Vec<Question>) -> Result<Self, CatalogError> {
        if questions.is_empty() {
            return Err(CatalogError::NoQuestions);
        }
        if let Some(index) = questions.iter().position(|q| q.options().is_empty()) {
            return Err(CatalogError::QuestionWithoutOptions { index });
        }
        Ok(Self { questions })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// # Errors
    ///
    /// Returns `CatalogError::QuestionOutOfRange` if `index >= len()`.
    pub fn question_at(&self, index: usize) -> Result<&Question, CatalogError> {
        self.questions
            .get(index)
            .ok_or(CatalogError::QuestionOutOfRange {
                index,
                len: self.questions.len(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }
}

//
// ─── RESULT CATALOG ────────────────────────────────────────────────────────────
//

/// Ordered, immutable list of result entries with a designated default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultCatalog {
    entries: Vec<ResultEntry>,
    default_index: usize,
}

impl ResultCatalog {
    /// # Errors
    ///
    /// Returns `CatalogError::NoResults`, `CatalogError::DuplicateResult` or
    /// `CatalogError::UnknownDefault` when the entries are unusable.
    pub fn new(entries: Vec<ResultEntry>, default_id: &str) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::NoResults);
        }
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if !seen.insert(entry.id.as_str()) {
                return Err(CatalogError::DuplicateResult(entry.id.clone()));
            }
        }
        let default_index = entries
            .iter()
            .position(|entry| entry.id.as_str() == default_id)
            .ok_or_else(|| CatalogError::UnknownDefault(ResultId::new(default_id)))?;

        Ok(Self {
            entries,
            default_index,
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// # Errors
    ///
    /// Returns `CatalogError::ResultOutOfRange` if `index >= len()`.
    pub fn result_at(&self, index: usize) -> Result<&ResultEntry, CatalogError> {
        self.entries.get(index).ok_or(CatalogError::ResultOutOfRange {
            index,
            len: self.entries.len(),
        })
    }

    /// Look up an entry by id, falling back to the default entry on a miss.
    #[must_use]
    pub fn result_by_id(&self, id: &str) -> &ResultEntry {
        self.entries
            .iter()
            .find(|entry| entry.id.as_str() == id)
            .unwrap_or_else(|| self.default_entry())
    }

    #[must_use]
    pub fn default_entry(&self) -> &ResultEntry {
        &self.entries[self.default_index]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResultEntry> {
        self.entries.iter()
    }
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Questions and results for one quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    questions: QuestionBank,
    results: ResultCatalog,
}

impl Catalog {
    #[must_use]
    pub fn new(questions: QuestionBank, results: ResultCatalog) -> Self {
        Self { questions, results }
    }

    /// The shipped data-match quiz: three questions, four results, `atlan` as default.
    #[must_use]
    pub fn data_match() -> Self {
        let entries = data_match::results();
        let default_index = entries
            .iter()
            .position(|entry| entry.id.as_str() == ATLAN)
            .unwrap_or(entries.len() - 1);
        Self {
            questions: QuestionBank {
                questions: data_match::questions(),
            },
            results: ResultCatalog {
                entries,
                default_index,
            },
        }
    }

    #[must_use]
    pub fn questions(&self) -> &QuestionBank {
        &self.questions
    }

    #[must_use]
    pub fn results(&self) -> &ResultCatalog {
        &self.results
    }
}
