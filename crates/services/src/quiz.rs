use quizcards_core::model::QuizQuestion;
use tracing::debug;

use crate::error::QuizRunnerError;

/// Feedback colour of an answer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerColor {
    Neutral,
    Correct,
    Incorrect,
}

/// Which navigation control is visible under the active question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Hidden,
    Next,
    Retry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    /// First answer to the active question.
    Answered { choice: usize, correct: bool },
    /// The question was already answered; nothing changed.
    Ignored,
}

/// Linear walk over a fixed list of questions.
///
/// Each question accepts a single answer; later clicks are ignored.
#[derive(Debug, Clone)]
pub struct QuizRunner {
    questions: Vec<QuizQuestion>,
    active: Option<usize>,
    choices: Vec<Option<usize>>,
}

impl QuizRunner {
    #[must_use]
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        let choices = vec![None; questions.len()];
        Self {
            questions,
            active: None,
            choices,
        }
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
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    #[must_use]
    pub fn active_question(&self) -> Option<&QuizQuestion> {
        self.active.and_then(|idx| self.questions.get(idx))
    }

    /// Choice made for the active question, if any.
    #[must_use]
    pub fn chosen(&self) -> Option<usize> {
        self.active.and_then(|idx| self.choices[idx])
    }

    /// Shows the next question.
    ///
    /// # Errors
    ///
    /// Returns `QuizRunnerError::Empty` for a quiz without questions,
    /// `NotAnswered` while the active question is open and `Finished` after
    /// the last question.
    pub fn show_next(&mut self) -> Result<&QuizQuestion, QuizRunnerError> {
        if self.questions.is_empty() {
            return Err(QuizRunnerError::Empty);
        }
        let next = match self.active {
            None => 0,
            Some(idx) if self.choices[idx].is_none() => return Err(QuizRunnerError::NotAnswered),
            Some(idx) if idx + 1 >= self.questions.len() => return Err(QuizRunnerError::Finished),
            Some(idx) => idx + 1,
        };
        self.active = Some(next);
        Ok(&self.questions[next])
    }

    /// Records the answer to the active question.
    ///
    /// # Errors
    ///
    /// Returns `NoActiveQuestion` before the first question is shown and
    /// `UnknownChoice` for an out-of-range answer index.
    pub fn answer(&mut self, choice: usize) -> Result<AnswerOutcome, QuizRunnerError> {
        let idx = self.active.ok_or(QuizRunnerError::NoActiveQuestion)?;
        let question = &self.questions[idx];
        if choice >= question.answers().len() {
            return Err(QuizRunnerError::UnknownChoice(choice));
        }
        if self.choices[idx].is_some() {
            return Ok(AnswerOutcome::Ignored);
        }

        let correct = question.is_correct(choice);
        self.choices[idx] = Some(choice);
        debug!(question = idx, choice, correct, "quiz answer recorded");
        if idx + 1 == self.questions.len() {
            debug!(score = self.score(), total = self.len(), "quiz finished");
        }
        Ok(AnswerOutcome::Answered { choice, correct })
    }

    /// Colours of the active question's answers.
    #[must_use]
    pub fn colors(&self) -> Vec<AnswerColor> {
        let Some(question) = self.active_question() else {
            return Vec::new();
        };
        let mut colors = vec![AnswerColor::Neutral; question.answers().len()];
        if let Some(choice) = self.chosen() {
            if question.is_correct(choice) {
                colors[choice] = AnswerColor::Correct;
            } else {
                colors[choice] = AnswerColor::Incorrect;
                colors[question.correct_index()] = AnswerColor::Correct;
            }
        }
        colors
    }

    #[must_use]
    pub fn navigation(&self) -> Navigation {
        match (self.active, self.chosen()) {
            (Some(idx), Some(_)) if idx + 1 < self.questions.len() => Navigation::Next,
            (Some(_), Some(_)) => Navigation::Retry,
            _ => Navigation::Hidden,
        }
    }

    /// Number of questions answered correctly so far.
    #[must_use]
    pub fn score(&self) -> usize {
        self.questions
            .iter()
            .zip(&self.choices)
            .filter(|(question, choice)| choice.is_some_and(|c| question.is_correct(c)))
            .count()
    }
}
