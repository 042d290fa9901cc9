use thiserror::Error;

use crate::model::content::{Filename, RichText};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizError {
    #[error("a question needs at least one answer")]
    NoAnswers,

    #[error("no answer is marked correct")]
    NoCorrectAnswer,

    #[error("{0} answers are marked correct, expected exactly one")]
    MultipleCorrectAnswers(usize),
}

/// One selectable choice of a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub label: RichText,
    pub image: Option<Filename>,
    pub is_correct: bool,
}

impl Answer {
    pub fn new(label: impl Into<RichText>, is_correct: bool) -> Self {
        Self {
            label: label.into(),
            image: None,
            is_correct,
        }
    }

    #[must_use]
    pub fn with_image(mut self, image: Option<Filename>) -> Self {
        self.image = image;
        self
    }
}

/// A prompt with exactly one correct answer among its choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizQuestion {
    prompt: RichText,
    prompt_image: Option<Filename>,
    answers: Vec<Answer>,
    correct: usize,
}

impl QuizQuestion {
    /// # Errors
    ///
    /// Returns `QuizError` unless exactly one answer is correct.
    pub fn new(
        prompt: impl Into<RichText>,
        prompt_image: Option<Filename>,
        answers: Vec<Answer>,
    ) -> Result<Self, QuizError> {
        if answers.is_empty() {
            return Err(QuizError::NoAnswers);
        }
        let mut correct = answers
            .iter()
            .enumerate()
            .filter(|(_, answer)| answer.is_correct)
            .map(|(idx, _)| idx);
        let first = correct.next().ok_or(QuizError::NoCorrectAnswer)?;
        let extra = correct.count();
        if extra > 0 {
            return Err(QuizError::MultipleCorrectAnswers(extra + 1));
        }
        Ok(Self {
            prompt: prompt.into(),
            prompt_image,
            answers,
            correct: first,
        })
    }

    #[must_use]
    pub fn prompt(&self) -> &RichText {
        &self.prompt
    }

    #[must_use]
    pub fn prompt_image(&self) -> Option<&Filename> {
        self.prompt_image.as_ref()
    }

    #[must_use]
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct
    }

    #[must_use]
    pub fn is_correct(&self, choice: usize) -> bool {
        choice == self.correct
    }
}
