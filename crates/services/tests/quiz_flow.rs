use quizcards_core::model::{Card, Face};
use rand::SeedableRng;
use rand::rngs::StdRng;
use services::{AnswerColor, Navigation, QuizRunner, QuizRunnerError, generate_questions};

fn capitals() -> Vec<Card> {
    vec![
        Card::new("France", "Paris"),
        Card::new("Italy", "Rome"),
        Card::new("Spain", "Madrid"),
    ]
}

#[test]
fn full_quiz_walk_scores_correct_answers() {
    let mut rng = StdRng::seed_from_u64(42);
    let questions = generate_questions(&capitals(), Face::Term, &mut rng).unwrap();
    let mut runner = QuizRunner::new(questions);

    for round in 0..3 {
        let correct = runner.show_next().unwrap().correct_index();
        let choice = if round == 1 { (correct + 1) % 3 } else { correct };
        runner.answer(choice).unwrap();

        let colors = runner.colors();
        let greens = colors.iter().filter(|c| **c == AnswerColor::Correct).count();
        let reds = colors.iter().filter(|c| **c == AnswerColor::Incorrect).count();
        assert_eq!(greens, 1);
        assert_eq!(reds, usize::from(round == 1));
    }

    assert_eq!(runner.navigation(), Navigation::Retry);
    assert_eq!(runner.score(), 2);
    assert_eq!(runner.show_next().unwrap_err(), QuizRunnerError::Finished);
}
