//! Maps a finished answer vector (or an explicit card pick) to a result.

use crate::model::ids::{ATLAN, DATA_QUALITY, PIPELINE, SHADOW_AI};
use crate::model::{ResultCatalog, ResultEntry, ResultId};

fn answer(answers: &[Option<usize>], question: usize) -> Option<usize> {
    answers.get(question).copied().flatten()
}

/// Resolve the result for a session.
///
/// A selected card always wins. Otherwise the first matching rule applies:
/// first answer 2 is `pipeline`; first answer 3 or third answer 3 is
/// `shadow-ai`; second answer 3 is `atlan`; everything else is `data-quality`.
/// Unknown ids fall back to the catalog default.
#[must_use]
pub fn resolve<'c>(
    catalog: &'c ResultCatalog,
    answers: &[Option<usize>],
    selected: Option<&ResultId>,
) -> &'c ResultEntry {
    if let Some(selected) = selected {
        return catalog.result_by_id(selected.as_str());
    }

    let id = if answer(answers, 0) == Some(2) {
        PIPELINE
    } else if answer(answers, 0) == Some(3) || answer(answers, 2) == Some(3) {
        SHADOW_AI
    } else if answer(answers, 1) == Some(3) {
        ATLAN
    } else {
        DATA_QUALITY
    };
    catalog.result_by_id(id)
}
