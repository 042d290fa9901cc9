use quizcards_core::page::ClassList;
use services::{AnswerColor, Navigation, QuizRunner};
use url::Url;

use super::{image_url, sanitize_html};

pub const NEUTRAL_CLASS: &str = "btn-outline-secondary";
pub const CORRECT_CLASS: &str = "btn-success";
pub const INCORRECT_CLASS: &str = "btn-danger";

const ANSWER_CLASSES: &str = "btn answer btn-outline-secondary";

#[must_use]
pub fn answer_class(color: AnswerColor) -> &'static str {
    match color {
        AnswerColor::Neutral => NEUTRAL_CLASS,
        AnswerColor::Correct => CORRECT_CLASS,
        AnswerColor::Incorrect => INCORRECT_CLASS,
    }
}

/// Classes of an answer button; a colored answer drops the neutral outline.
#[must_use]
pub fn answer_classes(color: AnswerColor) -> String {
    let mut classes = ClassList::parse(ANSWER_CLASSES);
    classes.replace(NEUTRAL_CLASS, answer_class(color));
    classes.to_string()
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerVm {
    pub index: usize,
    pub html: String,
    pub image_url: Option<String>,
    pub class: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuizVm {
    pub position: usize,
    pub total: usize,
    pub prompt_html: String,
    pub prompt_image: Option<String>,
    pub answers: Vec<AnswerVm>,
    pub navigation: Navigation,
    pub score: usize,
}

/// Render state of the active question; `None` before the quiz starts.
#[must_use]
pub fn build_quiz_vm(runner: &QuizRunner, media_url: &Url) -> Option<QuizVm> {
    let position = runner.active_index()?;
    let question = runner.active_question()?;
    let colors = runner.colors();
    let answers = question
        .answers()
        .iter()
        .zip(colors)
        .enumerate()
        .map(|(index, (answer, color))| AnswerVm {
            index,
            html: sanitize_html(answer.label.as_html()),
            image_url: image_url(answer.image.as_ref(), media_url),
            class: answer_classes(color),
        })
        .collect();

    Some(QuizVm {
        position: position + 1,
        total: runner.len(),
        prompt_html: sanitize_html(question.prompt().as_html()),
        prompt_image: image_url(question.prompt_image(), media_url),
        answers,
        navigation: runner.navigation(),
        score: runner.score(),
    })
}
