mod cards;
mod lead_modal;
mod question;
mod quiz;
mod result;

pub use quiz::{QuizIntent, QuizView};
#[cfg(test)]
pub(crate) use lead_modal::modal_key_intent;
#[cfg(test)]
pub(crate) use quiz::QuizTestHandles;
