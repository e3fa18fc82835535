//! Question Administration Service
//!
//! Siege-only management of the intake form: question CRUD, reordering,
//! activation, form preview and statistics. The dashboard fetches are issued
//! in parallel and treated as one unit; if any constituent fails, partial
//! results are discarded.

use std::collections::BTreeMap;

use serde::Deserialize;

use prospec_core::Question;

use crate::gateway::{Gateway, GatewayError};

/// Per-type metadata as served by `GET /questions/types`.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionTypeInfo {
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub requires_options: bool,
    #[serde(default)]
    pub validation_pattern: Option<String>,
    #[serde(default)]
    pub validation_message: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionStats {
    #[serde(default)]
    pub total_questions: u64,
    #[serde(default)]
    pub questions_actives: u64,
    #[serde(default)]
    pub repartition_types: BTreeMap<String, u64>,
}

/// Aggregate of the four admin fetches, loaded jointly.
#[derive(Clone, Debug)]
pub struct QuestionDashboard {
    pub questions: Vec<Question>,
    pub types: BTreeMap<String, QuestionTypeInfo>,
    pub preview: Vec<Question>,
    pub stats: QuestionStats,
}

/// New question payload; choice-like types need at least two options.
#[derive(Clone, Debug)]
pub struct CreateQuestion {
    pub text: String,
    pub description: String,
    pub question_type: prospec_core::QuestionType,
    pub required: bool,
    pub options: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct QuestionsEnvelope {
    #[serde(default)]
    questions: Vec<Question>,
}

#[derive(Debug, Deserialize)]
struct TypesEnvelope {
    #[serde(default)]
    types: BTreeMap<String, QuestionTypeInfo>,
}

#[derive(Debug, Deserialize)]
struct StatsEnvelope {
    statistiques: QuestionStats,
}

#[derive(Debug, Deserialize)]
struct AckEnvelope {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

pub struct QuestionService<'a> {
    gateway: &'a Gateway,
}

impl<'a> QuestionService<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    pub async fn admin_questions(&self) -> Result<Vec<Question>, GatewayError> {
        let envelope: QuestionsEnvelope = self.gateway.get("/questions/admin").await?;
        Ok(envelope.questions)
    }

    pub async fn question_types(
        &self,
    ) -> Result<BTreeMap<String, QuestionTypeInfo>, GatewayError> {
        let envelope: TypesEnvelope = self.gateway.get("/questions/types").await?;
        Ok(envelope.types)
    }

    /// The form exactly as agents will see it.
    pub async fn form_preview(&self) -> Result<Vec<Question>, GatewayError> {
        let envelope: QuestionsEnvelope = self.gateway.get("/questions/apercu").await?;
        Ok(envelope.questions)
    }

    pub async fn stats(&self) -> Result<QuestionStats, GatewayError> {
        let envelope: StatsEnvelope = self.gateway.get("/questions/stats").await?;
        Ok(envelope.statistiques)
    }

    /// All four admin fetches in parallel, all-or-nothing.
    pub async fn load_dashboard(&self) -> Result<QuestionDashboard, GatewayError> {
        let (questions, types, preview, stats) = tokio::try_join!(
            self.admin_questions(),
            self.question_types(),
            self.form_preview(),
            self.stats(),
        )?;
        Ok(QuestionDashboard { questions, types, preview, stats })
    }

    pub async fn create(&self, question: &CreateQuestion) -> Result<String, GatewayError> {
        if question.text.trim().is_empty() {
            return Err(GatewayError::Server {
                status: 400,
                message: "La question est obligatoire".to_string(),
            });
        }
        if question.question_type.requires_options() {
            let valid = question.options.iter().filter(|o| !o.trim().is_empty()).count();
            if valid < 2 {
                return Err(GatewayError::Server {
                    status: 400,
                    message: "Au moins 2 options sont requises".to_string(),
                });
            }
        }
        let body = serde_json::json!({
            "question": question.text,
            "description": question.description,
            "type": question.question_type,
            "obligatoire": question.required,
            "options": question.options,
        });
        let ack: AckEnvelope = self.gateway.post("/questions", &body).await?;
        Self::into_message(ack, "Question créée avec succès")
    }

    /// Persists a new display order for the whole question list.
    pub async fn reorder(&self, order_ids: &[u64]) -> Result<String, GatewayError> {
        let body = serde_json::json!({ "ordreIds": order_ids });
        let ack: AckEnvelope = self.gateway.put("/questions/reorder", Some(&body)).await?;
        Self::into_message(ack, "Questions réorganisées avec succès")
    }

    pub async fn set_active(&self, id: u64, active: bool) -> Result<String, GatewayError> {
        let action = if active { "activer" } else { "desactiver" };
        let ack: AckEnvelope = self
            .gateway
            .put(&format!("/questions/{id}/{action}"), None)
            .await?;
        Self::into_message(ack, "Question mise à jour")
    }

    fn into_message(ack: AckEnvelope, fallback: &str) -> Result<String, GatewayError> {
        if ack.success {
            Ok(ack.message.unwrap_or_else(|| fallback.to_string()))
        } else {
            Err(GatewayError::Server {
                status: 400,
                message: ack.message.unwrap_or_else(|| "Une erreur est survenue".to_string()),
            })
        }
    }
}
