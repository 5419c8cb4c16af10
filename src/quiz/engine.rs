//! Trivia sub-engine
//!
//! A pure state machine over [`QuizSession`]: theme selection, then a loop of
//! questions where a right answer draws the next question and a wrong one
//! repeats the same question. The scene layer loads the session, calls
//! [`TriviaEngine::step`] once per turn, saves the session and renders the
//! outcome.
//!
//! The answer is always checked against the question stored in the session,
//! which is the question whose options were shown on the previous turn. The
//! next question is drawn only afterwards, so a fresh question can never be
//! compared with an answer meant for the previous one.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use super::bank::QuestionBank;
use super::cycle::QuestionCycle;
use crate::utils::helpers::normalize_utterance;

/// The question currently shown to a user, with its options frozen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveQuestion {
    pub index: usize,
    pub text: String,
    pub right_answer: String,
    /// Options in the order they were presented
    pub options: Vec<String>,
}

impl ActiveQuestion {
    fn is_answered_by(&self, normalized: &str) -> bool {
        normalize_utterance(&self.right_answer) == normalized
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum QuizPhase {
    #[default]
    ChoosingTheme,
    AwaitingAnswer {
        theme: String,
        active: ActiveQuestion,
        cycle: QuestionCycle,
    },
}

/// Per-user trivia state, persisted through the session store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSession {
    pub phase: QuizPhase,
    pub correct: u32,
    pub asked: u32,
}

impl QuizSession {
    pub fn active_question(&self) -> Option<&ActiveQuestion> {
        match &self.phase {
            QuizPhase::AwaitingAnswer { active, .. } => Some(active),
            QuizPhase::ChoosingTheme => None,
        }
    }

    pub fn theme(&self) -> Option<&str> {
        match &self.phase {
            QuizPhase::AwaitingAnswer { theme, .. } => Some(theme),
            QuizPhase::ChoosingTheme => None,
        }
    }
}

/// What the user did this turn, as far as the trivia is concerned
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizInput {
    /// The user just came into the quiz
    Enter,
    /// The user wants another theme
    ChangeTheme,
    /// A theme name or an answer, normalized
    Utterance(String),
    /// A turn that carries no answer; the current prompt is repeated
    Repeat,
}

/// Result of one trivia turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizOutcome {
    ChooseTheme { themes: Vec<String>, unrecognized: bool },
    ThemeSelected { theme: String, question: ActiveQuestion },
    Correct { next: ActiveQuestion, correct: u32, asked: u32 },
    Incorrect { retry: ActiveQuestion },
    /// The active question asked again without scoring
    Reminder { question: ActiveQuestion },
    /// The bank has no questions at all
    Unavailable,
}

pub struct TriviaEngine<'a> {
    bank: &'a QuestionBank,
}

impl<'a> TriviaEngine<'a> {
    pub fn new(bank: &'a QuestionBank) -> Self {
        Self { bank }
    }

    /// Advance the session by one turn
    pub fn step<R: Rng + ?Sized>(&self, session: &mut QuizSession, input: QuizInput, rng: &mut R) -> QuizOutcome {
        if self.bank.is_empty() {
            session.phase = QuizPhase::ChoosingTheme;
            return QuizOutcome::Unavailable;
        }

        match input {
            QuizInput::Enter => {
                *session = QuizSession::default();
                self.choose_theme(false)
            }
            QuizInput::ChangeTheme => {
                session.phase = QuizPhase::ChoosingTheme;
                self.choose_theme(false)
            }
            QuizInput::Repeat => match session.active_question() {
                Some(active) => QuizOutcome::Reminder { question: active.clone() },
                None => self.choose_theme(false),
            },
            QuizInput::Utterance(text) => match &mut session.phase {
                QuizPhase::ChoosingTheme => self.select_theme(session, &text, rng),
                QuizPhase::AwaitingAnswer { active, cycle, theme } => {
                    session.asked += 1;
                    if !active.is_answered_by(&text) {
                        return QuizOutcome::Incorrect { retry: active.clone() };
                    }

                    session.correct += 1;
                    let pool = self.bank.pool(theme);
                    match self.serve(cycle, &pool, rng) {
                        Some(next) => {
                            *active = next.clone();
                            QuizOutcome::Correct { next, correct: session.correct, asked: session.asked }
                        }
                        None => {
                            session.phase = QuizPhase::ChoosingTheme;
                            self.choose_theme(false)
                        }
                    }
                }
            },
        }
    }

    fn select_theme<R: Rng + ?Sized>(&self, session: &mut QuizSession, text: &str, rng: &mut R) -> QuizOutcome {
        let Some(theme) = self.bank.find_theme(text) else {
            return self.choose_theme(true);
        };

        let pool = self.bank.pool(theme);
        let mut cycle = QuestionCycle::new();
        match self.serve(&mut cycle, &pool, rng) {
            Some(question) => {
                session.phase = QuizPhase::AwaitingAnswer {
                    theme: theme.to_string(),
                    active: question.clone(),
                    cycle,
                };
                QuizOutcome::ThemeSelected { theme: theme.to_string(), question }
            }
            None => self.choose_theme(true),
        }
    }

    fn serve<R: Rng + ?Sized>(&self, cycle: &mut QuestionCycle, pool: &[usize], rng: &mut R) -> Option<ActiveQuestion> {
        let index = cycle.next(pool, rng)?;
        let question = self.bank.get(index)?;

        let mut options = Vec::with_capacity(question.wrong_answers.len() + 1);
        options.push(question.right_answer.clone());
        options.extend(question.wrong_answers.iter().cloned());
        options.shuffle(rng);

        Some(ActiveQuestion {
            index,
            text: question.question.clone(),
            right_answer: question.right_answer.clone(),
            options,
        })
    }

    fn choose_theme(&self, unrecognized: bool) -> QuizOutcome {
        QuizOutcome::ChooseTheme {
            themes: self.bank.themes().into_iter().map(str::to_string).collect(),
            unrecognized,
        }
    }
}
