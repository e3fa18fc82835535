//! Headless Form Rendering
//!
//! Maps each question type to an input control descriptor and keeps the
//! answer set. Every answer is a string; multi-choice answers are the
//! selected option values joined by commas, in toggle order.

use std::collections::BTreeMap;

use crate::question::{Question, QuestionOption, QuestionType};

/// Maximum accepted length for a phone answer.
pub const PHONE_MAX_LEN: usize = 10;

/// Input control a front end should render for a question.
#[derive(Clone, Debug, PartialEq)]
pub enum Control {
    Text,
    TextArea,
    Number,
    Date,
    Email,
    Phone { max_len: usize },
    Select { options: Vec<QuestionOption> },
    MultiSelect { options: Vec<QuestionOption> },
}

impl Control {
    pub fn for_question(question: &Question) -> Self {
        match question.question_type {
            QuestionType::Text => Control::Text,
            QuestionType::TextArea => Control::TextArea,
            QuestionType::Number => Control::Number,
            QuestionType::Date => Control::Date,
            QuestionType::Email => Control::Email,
            QuestionType::Phone => Control::Phone { max_len: PHONE_MAX_LEN },
            QuestionType::Choice => Control::Select {
                options: question.ordered_options().into_iter().cloned().collect(),
            },
            QuestionType::MultipleChoice => Control::MultiSelect {
                options: question.ordered_options().into_iter().cloned().collect(),
            },
        }
    }

    /// Input length cap, when the control has one.
    pub fn max_len(&self) -> Option<usize> {
        match self {
            Control::Phone { max_len } => Some(*max_len),
            _ => None,
        }
    }
}

/// Mutable answer state for one form session, keyed by question id.
///
/// Created empty, mutated on every field edit, discarded on submit success
/// or manual reset.
#[derive(Clone, Debug, Default)]
pub struct AnswerSet {
    answers: BTreeMap<u64, String>,
}

impl AnswerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an answer, applying the control's length cap.
    pub fn set(&mut self, question: &Question, value: &str) {
        let value = match Control::for_question(question).max_len() {
            Some(max) => value.chars().take(max).collect(),
            None => value.to_string(),
        };
        self.answers.insert(question.id, value);
    }

    pub fn get(&self, question_id: u64) -> Option<&str> {
        self.answers.get(&question_id).map(String::as_str)
    }

    pub fn is_blank(&self, question_id: u64) -> bool {
        self.get(question_id).map_or(true, |v| v.trim().is_empty())
    }

    /// Currently selected values of a multi-choice answer, in toggle order.
    pub fn selections(&self, question_id: u64) -> Vec<&str> {
        self.get(question_id)
            .map(|v| v.split(',').filter(|s| !s.is_empty()).collect())
            .unwrap_or_default()
    }

    /// Adds the option value if absent, removes it if present. The joined
    /// string keeps toggle order, not option order.
    pub fn toggle_option(&mut self, question: &Question, value: &str) {
        let mut selections: Vec<String> = self
            .selections(question.id)
            .into_iter()
            .map(String::from)
            .collect();
        if selections.iter().any(|s| s == value) {
            selections.retain(|s| s != value);
        } else {
            selections.push(value.to_string());
        }
        self.answers.insert(question.id, selections.join(","));
    }

    pub fn clear(&mut self) {
        self.answers.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Answers as submitted to the server (`reponses` map).
    pub fn as_map(&self) -> &BTreeMap<u64, String> {
        &self.answers
    }
}
