//! Question Schema Model
//!
//! Read-only snapshot of the server-defined intake form: questions, their
//! options and the prospection type catalog. Field names follow the wire
//! contract (camelCase, French) via serde renames.

use serde::{Deserialize, Serialize};

/// Closed set of question types the server may declare.
///
/// Per-type metadata (display name, option requirement, validation pattern)
/// lives here so adding a type touches exactly one place.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    Text,
    Number,
    Email,
    Phone,
    Choice,
    MultipleChoice,
    Date,
    #[serde(rename = "TEXTAREA")]
    TextArea,
}

impl QuestionType {
    pub fn display_name(&self) -> &'static str {
        match self {
            QuestionType::Text => "Texte libre",
            QuestionType::Number => "Nombre entier",
            QuestionType::Email => "Adresse email",
            QuestionType::Phone => "Numéro de téléphone",
            QuestionType::Choice => "Choix unique",
            QuestionType::MultipleChoice => "Choix multiples",
            QuestionType::Date => "Date",
            QuestionType::TextArea => "Texte long",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            QuestionType::Text => "Réponse sous forme de texte",
            QuestionType::Number => "Réponse numérique",
            QuestionType::Email => "Adresse email du prospect",
            QuestionType::Phone => "Numéro de téléphone",
            QuestionType::Choice => "Une seule réponse possible parmi les options",
            QuestionType::MultipleChoice => "Plusieurs réponses possibles parmi les options",
            QuestionType::Date => "Réponse sous forme de date",
            QuestionType::TextArea => "Réponse sous forme de texte libre long",
        }
    }

    /// Choice-like types must carry a non-empty option list.
    pub fn requires_options(&self) -> bool {
        matches!(self, QuestionType::Choice | QuestionType::MultipleChoice)
    }

    pub fn validation_pattern(&self) -> Option<&'static str> {
        match self {
            QuestionType::Phone => Some(r"^(06|07)\d{8}$"),
            QuestionType::Number => Some(r"^\d+$"),
            _ => None,
        }
    }

    pub fn validation_message(&self) -> &'static str {
        match self {
            QuestionType::Phone => {
                "Le numéro doit commencer par 06 ou 07 et contenir 10 chiffres"
            }
            QuestionType::Number => "Veuillez saisir un nombre valide",
            _ => "Format invalide",
        }
    }
}

/// One selectable option of a CHOICE / MULTIPLE_CHOICE question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    #[serde(rename = "valeur")]
    pub value: String,
    #[serde(rename = "ordre")]
    pub order: u32,
}

/// A single form question, owned by the server.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Question {
    pub id: u64,
    #[serde(rename = "question")]
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    #[serde(rename = "typeDisplayName", default)]
    pub type_display_name: String,
    #[serde(rename = "ordre")]
    pub order: u32,
    #[serde(rename = "obligatoire")]
    pub required: bool,
    #[serde(rename = "actif", default = "default_active")]
    pub active: bool,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
}

fn default_active() -> bool {
    true
}

impl Question {
    /// Options in display order. The option `ordre` field drives display,
    /// not list insertion order.
    pub fn ordered_options(&self) -> Vec<&QuestionOption> {
        let mut options: Vec<&QuestionOption> = self.options.iter().collect();
        options.sort_by_key(|o| o.order);
        options
    }
}

/// Prospection category catalog entry, fetched from the server.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeProspection {
    pub value: String,
    pub label: String,
    pub description: String,
}

/// The intake form as served by `GET /prospections/formulaire`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProspectForm {
    pub questions: Vec<Question>,
    #[serde(rename = "typesProspection")]
    pub types_prospection: Vec<TypeProspection>,
}

impl ProspectForm {
    /// Questions in display order.
    pub fn ordered_questions(&self) -> Vec<&Question> {
        let mut questions: Vec<&Question> = self.questions.iter().collect();
        questions.sort_by_key(|q| q.order);
        questions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_wire_names() {
        let ser = |t: QuestionType| serde_json::to_string(&t).unwrap();
        assert_eq!(ser(QuestionType::Text), "\"TEXT\"");
        assert_eq!(ser(QuestionType::MultipleChoice), "\"MULTIPLE_CHOICE\"");
        assert_eq!(ser(QuestionType::TextArea), "\"TEXTAREA\"");

        let parsed: QuestionType = serde_json::from_str("\"PHONE\"").unwrap();
        assert_eq!(parsed, QuestionType::Phone);
    }

    #[test]
    fn test_requires_options() {
        assert!(QuestionType::Choice.requires_options());
        assert!(QuestionType::MultipleChoice.requires_options());
        assert!(!QuestionType::Text.requires_options());
        assert!(!QuestionType::Phone.requires_options());
    }

    #[test]
    fn test_question_deserializes_wire_shape() {
        let json = r#"{
            "id": 4,
            "question": "Téléphone du prospect",
            "type": "PHONE",
            "typeDisplayName": "Numéro de téléphone",
            "ordre": 2,
            "obligatoire": true
        }"#;
        let q: Question = serde_json::from_str(json).unwrap();
        assert_eq!(q.id, 4);
        assert_eq!(q.question_type, QuestionType::Phone);
        assert!(q.required);
        assert!(q.active);
        assert!(q.options.is_empty());
    }

    #[test]
    fn test_options_sorted_by_display_order() {
        let q = Question {
            id: 1,
            text: "Canal préféré".into(),
            description: None,
            question_type: QuestionType::Choice,
            type_display_name: String::new(),
            order: 1,
            required: false,
            active: true,
            options: vec![
                QuestionOption { id: Some(2), value: "Email".into(), order: 2 },
                QuestionOption { id: Some(1), value: "Téléphone".into(), order: 1 },
            ],
        };
        let ordered = q.ordered_options();
        assert_eq!(ordered[0].value, "Téléphone");
        assert_eq!(ordered[1].value, "Email");
    }
}
