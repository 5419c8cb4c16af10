//! Trivia module
//!
//! Question bank, shuffled question cycles and the trivia state machine
//! driven by the Quiz scene.

pub mod bank;
pub mod cycle;
pub mod engine;

pub use bank::{Question, QuestionBank};
pub use cycle::QuestionCycle;
pub use engine::{ActiveQuestion, QuizInput, QuizOutcome, QuizPhase, QuizSession, TriviaEngine};
