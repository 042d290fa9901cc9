use rand::Rng;
use rand::seq::{IndexedRandom, SliceRandom};

use quizcards_core::model::{Answer, Card, Face, QuizQuestion};

use crate::error::QuizRunnerError;

/// Most choices a generated question offers.
pub const MAX_CHOICES: usize = 4;

/// Builds one multiple-choice question per card.
///
/// The prompt shows `prompt_face`; the answers show the opposite face of the
/// card itself (correct) and of up to three other cards. Answers and
/// questions are shuffled.
///
/// # Errors
///
/// Returns `QuizRunnerError::Empty` when there are no cards.
pub fn generate_questions<R: Rng + ?Sized>(
    cards: &[Card],
    prompt_face: Face,
    rng: &mut R,
) -> Result<Vec<QuizQuestion>, QuizRunnerError> {
    if cards.is_empty() {
        return Err(QuizRunnerError::Empty);
    }
    let answer_face = prompt_face.opposite();
    let distractors = cards.len().min(MAX_CHOICES) - 1;

    let mut questions = Vec::with_capacity(cards.len());
    for (idx, card) in cards.iter().enumerate() {
        let others: Vec<&Card> = cards
            .iter()
            .enumerate()
            .filter(|(other, _)| *other != idx)
            .map(|(_, other)| other)
            .collect();

        let mut answers = vec![answer_for(card, answer_face, true)];
        answers.extend(
            others
                .choose_multiple(rng, distractors)
                .map(|other| answer_for(other, answer_face, false)),
        );
        answers.shuffle(rng);

        let side = card.side(prompt_face);
        questions.push(QuizQuestion::new(
            side.text.clone(),
            side.image.clone(),
            answers,
        )?);
    }
    questions.shuffle(rng);
    Ok(questions)
}

fn answer_for(card: &Card, face: Face, is_correct: bool) -> Answer {
    let side = card.side(face);
    Answer::new(side.text.clone(), is_correct).with_image(side.image.clone())
}
