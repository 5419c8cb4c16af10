//! Question bank loading
//!
//! The bank is a table of rows (question, right answer, wrong answers, theme)
//! stored as JSON. A default bank is compiled into the binary.

use std::path::Path;
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, info};
use crate::utils::errors::{SkillError, Result};
use crate::utils::helpers::{mentions, normalize_utterance};

const BUILTIN_QUESTIONS: &str = include_str!("../../data/questions.json");

/// One row of the question table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub right_answer: String,
    #[serde(deserialize_with = "deserialize_answers")]
    pub wrong_answers: Vec<String>,
    pub theme: String,
}

/// Wrong answers come either as a list or as one `;`-separated cell
#[derive(Deserialize)]
#[serde(untagged)]
enum AnswerCell {
    List(Vec<String>),
    Joined(String),
}

fn deserialize_answers<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let answers = match AnswerCell::deserialize(deserializer)? {
        AnswerCell::List(list) => list,
        AnswerCell::Joined(joined) => joined.split(';').map(str::to_string).collect(),
    };
    Ok(answers
        .into_iter()
        .map(|answer| answer.trim().to_string())
        .filter(|answer| !answer.is_empty())
        .collect())
}

/// Immutable set of trivia questions
#[derive(Debug, Clone)]
pub struct QuestionBank {
    questions: Vec<Question>,
}

impl QuestionBank {
    /// Build a bank, rejecting rows that could never be answered correctly
    pub fn new(questions: Vec<Question>) -> Result<Self> {
        for (row, question) in questions.iter().enumerate() {
            if question.question.trim().is_empty() || question.theme.trim().is_empty() {
                return Err(SkillError::QuestionBank(format!("Row {} has no question text or theme", row)));
            }

            let right = normalize_utterance(&question.right_answer);
            if right.is_empty() {
                return Err(SkillError::QuestionBank(format!("Row {} has no right answer", row)));
            }

            if question.wrong_answers.iter().any(|wrong| normalize_utterance(wrong) == right) {
                return Err(SkillError::QuestionBank(format!("Row {} lists its right answer as wrong", row)));
            }
        }

        Ok(Self { questions })
    }

    /// The bank shipped with the skill
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_QUESTIONS)
    }

    pub fn from_json(data: &str) -> Result<Self> {
        let questions: Vec<Question> = serde_json::from_str(data)?;
        Self::new(questions)
    }

    /// Load a bank from a JSON file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading question bank");

        let content = fs::read_to_string(path).await?;
        let bank = Self::from_json(&content)?;

        info!(path = %path.display(), questions = bank.len(), themes = bank.themes().len(), "Question bank loaded");
        Ok(bank)
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Themes in order of first appearance
    pub fn themes(&self) -> Vec<&str> {
        let mut themes: Vec<&str> = Vec::new();
        for question in &self.questions {
            if !themes.contains(&question.theme.as_str()) {
                themes.push(&question.theme);
            }
        }
        themes
    }

    /// Find the theme a normalized utterance picks
    pub fn find_theme(&self, normalized: &str) -> Option<&str> {
        self.themes().into_iter().find(|theme| mentions(normalized, theme))
    }

    /// Indices of the questions of one theme
    pub fn pool(&self, theme: &str) -> Vec<usize> {
        self.questions
            .iter()
            .enumerate()
            .filter(|(_, question)| question.theme == theme)
            .map(|(index, _)| index)
            .collect()
    }
}
