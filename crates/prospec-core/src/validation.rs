//! Answer Validation
//!
//! Pure, synchronous validation of a form session. The result is a map from
//! field key (`typeProspection` or `question_<id>`) to a user-facing message;
//! an empty map means the submission is valid. Each run fully replaces the
//! previous error set.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::form::AnswerSet;
use crate::question::{Question, QuestionType};

/// Field key of the prospection category selector.
pub const TYPE_PROSPECTION_FIELD: &str = "typeProspection";

/// Field key of one question.
pub fn question_field(question_id: u64) -> String {
    format!("question_{question_id}")
}

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").unwrap()
});
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(06|07)\d{8}$").unwrap());
static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").unwrap());

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}

pub fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

pub fn is_valid_number(value: &str) -> bool {
    NUMBER_RE.is_match(value)
}

/// Validates the whole form session.
///
/// Rules are applied independently per question: requiredness first, then
/// the per-type format check whenever an answer is present. The category
/// selector is always required.
pub fn validate(
    questions: &[Question],
    answers: &AnswerSet,
    type_prospection: &str,
) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();

    if type_prospection.trim().is_empty() {
        errors.insert(
            TYPE_PROSPECTION_FIELD.to_string(),
            "Le type de prospection est obligatoire".to_string(),
        );
    }

    for question in questions {
        let key = question_field(question.id);
        if question.required && answers.is_blank(question.id) {
            errors.insert(key, "Cette question est obligatoire".to_string());
            continue;
        }
        let Some(value) = answers.get(question.id) else {
            continue;
        };
        let value = value.trim();
        if value.is_empty() {
            continue;
        }
        match question.question_type {
            QuestionType::Email if !is_valid_email(value) => {
                errors.insert(key, "Format email invalide".to_string());
            }
            QuestionType::Phone if !is_valid_phone(value) => {
                errors.insert(key, question.question_type.validation_message().to_string());
            }
            QuestionType::Number if !is_valid_number(value) => {
                errors.insert(key, question.question_type.validation_message().to_string());
            }
            _ => {}
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: u64, question_type: QuestionType, required: bool) -> Question {
        Question {
            id,
            text: format!("Question {id}"),
            description: None,
            question_type,
            type_display_name: String::new(),
            order: id as u32,
            required,
            active: true,
            options: vec![],
        }
    }

    #[test]
    fn test_required_blank_answer_yields_single_error() {
        let questions = vec![question(3, QuestionType::Text, true)];
        let mut answers = AnswerSet::new();
        answers.set(&questions[0], "   ");

        let errors = validate(&questions, &answers, "PLANNING_AGENT");
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get("question_3").map(String::as_str),
            Some("Cette question est obligatoire")
        );
    }

    #[test]
    fn test_phone_pattern() {
        assert!(is_valid_phone("0612345678"));
        assert!(is_valid_phone("0712345678"));
        assert!(!is_valid_phone("0512345678"));
        assert!(!is_valid_phone("061234567"));
        assert!(!is_valid_phone("06123456789"));
        assert!(!is_valid_phone("06 12 34 56 78"));
    }

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("a@b.co"));
        assert!(is_valid_email("prenom.nom+tag@example.org"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a.b.co"));
    }

    #[test]
    fn test_number_must_be_all_digits() {
        let questions = vec![question(1, QuestionType::Number, false)];
        let mut answers = AnswerSet::new();
        answers.set(&questions[0], "12a");

        let errors = validate(&questions, &answers, "PLANNING_AGENT");
        assert_eq!(
            errors.get("question_1").map(String::as_str),
            Some("Veuillez saisir un nombre valide")
        );

        answers.set(&questions[0], "42");
        assert!(validate(&questions, &answers, "PLANNING_AGENT").is_empty());
    }

    #[test]
    fn test_format_checked_even_when_not_required() {
        let questions = vec![question(9, QuestionType::Email, false)];
        let mut answers = AnswerSet::new();
        answers.set(&questions[0], "pas-un-email");

        let errors = validate(&questions, &answers, "PLANNING_AGENT");
        assert_eq!(
            errors.get("question_9").map(String::as_str),
            Some("Format email invalide")
        );
    }

    #[test]
    fn test_optional_blank_answer_passes() {
        let questions = vec![question(5, QuestionType::Phone, false)];
        let answers = AnswerSet::new();
        assert!(validate(&questions, &answers, "PLANNING_AGENT").is_empty());
    }

    #[test]
    fn test_missing_category_and_required_question_yield_two_errors() {
        let questions = vec![
            question(1, QuestionType::Text, true),
            question(2, QuestionType::Text, false),
        ];
        let answers = AnswerSet::new();

        let errors = validate(&questions, &answers, "");
        assert_eq!(errors.len(), 2);
        assert_eq!(
            errors.get(TYPE_PROSPECTION_FIELD).map(String::as_str),
            Some("Le type de prospection est obligatoire")
        );
        assert!(errors.contains_key("question_1"));
    }

    #[test]
    fn test_rerun_replaces_stale_errors() {
        let questions = vec![question(1, QuestionType::Text, true)];
        let mut answers = AnswerSet::new();

        let first = validate(&questions, &answers, "");
        assert_eq!(first.len(), 2);

        answers.set(&questions[0], "réponse");
        let second = validate(&questions, &answers, "CAMPAGNE_PROSPECTION");
        assert!(second.is_empty());
    }
}
