//! Prospection Service
//!
//! Agent-facing operations: intake form, record creation with the duplicate
//! confirmation flow, the agent's own list, record details and statistics.

use std::collections::BTreeMap;

use serde::Deserialize;

use prospec_core::{AnswerSet, ProspectForm, ProspectionStatus};

use crate::gateway::{Gateway, GatewayError};

#[derive(Clone, Debug, Deserialize)]
pub struct PersonSummary {
    pub id: u64,
    #[serde(rename = "nom")]
    pub last_name: String,
    #[serde(rename = "prenom")]
    pub first_name: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct BranchSummary {
    pub id: u64,
    #[serde(rename = "nom")]
    pub name: String,
}

/// One prospect record as listed by the server. Display strings
/// (`statutDisplay`, css class) are passed through opaque.
#[derive(Clone, Debug, Deserialize)]
pub struct Prospection {
    pub id: u64,
    #[serde(rename = "dateCreation")]
    pub created_at: String,
    #[serde(rename = "typeProspection")]
    pub type_prospection: String,
    #[serde(rename = "typeProspectionDisplay", default)]
    pub type_prospection_display: String,
    #[serde(rename = "statut")]
    pub status: ProspectionStatus,
    #[serde(rename = "statutDisplay", default)]
    pub status_display: String,
    #[serde(rename = "statutCssClass", default)]
    pub status_css_class: String,
    #[serde(rename = "nomProspect", default)]
    pub prospect_last_name: Option<String>,
    #[serde(rename = "prenomProspect", default)]
    pub prospect_first_name: Option<String>,
    #[serde(rename = "telephoneProspect", default)]
    pub prospect_phone: Option<String>,
    #[serde(rename = "emailProspect", default)]
    pub prospect_email: Option<String>,
    #[serde(rename = "commentaire", default)]
    pub comment: Option<String>,
    #[serde(rename = "createur", default)]
    pub creator: Option<PersonSummary>,
    #[serde(rename = "agentAssigne", default)]
    pub assigned_agent: Option<PersonSummary>,
    #[serde(rename = "branche", default)]
    pub branch: Option<BranchSummary>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ReponseDetail {
    pub id: u64,
    #[serde(rename = "questionId")]
    pub question_id: u64,
    #[serde(rename = "questionTexte", default)]
    pub question_text: String,
    #[serde(rename = "valeur")]
    pub value: String,
    #[serde(rename = "valeurFormatee", default)]
    pub formatted_value: String,
    #[serde(rename = "dateCreation", default)]
    pub created_at: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ProspectionDetails {
    pub prospection: Prospection,
    #[serde(rename = "reponses", default)]
    pub responses: Vec<ReponseDetail>,
    #[serde(rename = "reponsesMap", default)]
    pub responses_map: BTreeMap<u64, String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Statistiques {
    #[serde(rename = "repartitionStatuts", default)]
    pub status_breakdown: BTreeMap<String, u64>,
    #[serde(rename = "totalProspections", default)]
    pub total: u64,
    #[serde(rename = "prospectionsAujourdhui", default)]
    pub today: u64,
}

#[derive(Debug, Deserialize)]
struct FormEnvelope {
    #[serde(flatten)]
    form: ProspectForm,
}

#[derive(Debug, Deserialize)]
struct CreatedEnvelope {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    id: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ListEnvelope {
    #[serde(default)]
    prospections: Vec<Prospection>,
    #[serde(default)]
    total: u64,
}

#[derive(Debug, Deserialize)]
struct StatsEnvelope {
    statistiques: Statistiques,
}

#[derive(Debug, Deserialize)]
pub struct DuplicateCheck {
    #[serde(default)]
    pub existe: bool,
    #[serde(default)]
    pub message: Option<String>,
}

pub struct ProspectionService<'a> {
    gateway: &'a Gateway,
}

impl<'a> ProspectionService<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// The dynamic intake form: questions plus the category catalog.
    pub async fn form(&self) -> Result<ProspectForm, GatewayError> {
        let envelope: FormEnvelope = self.gateway.get("/prospections/formulaire").await?;
        Ok(envelope.form)
    }

    /// Creates a prospect record from a validated answer set.
    ///
    /// A 409 `DUPLICATE_WARNING` surfaces as [`GatewayError::Duplicate`];
    /// once the user confirms, the caller resends with `force`, which asks
    /// the server to skip the duplicate check.
    pub async fn create(
        &self,
        type_prospection: &str,
        answers: &AnswerSet,
        comment: Option<&str>,
        force: bool,
    ) -> Result<(u64, String), GatewayError> {
        let mut body = serde_json::json!({
            "typeProspection": type_prospection,
            "reponses": answers.as_map(),
            "commentaire": comment.map(str::trim).filter(|c| !c.is_empty()),
        });
        if force {
            body["forcer"] = serde_json::Value::Bool(true);
        }
        let created: CreatedEnvelope = self.gateway.post("/prospections", &body).await?;
        if created.success {
            Ok((
                created.id.unwrap_or_default(),
                created
                    .message
                    .unwrap_or_else(|| "Prospection créée avec succès".to_string()),
            ))
        } else {
            Err(GatewayError::Server {
                status: 400,
                message: created
                    .message
                    .unwrap_or_else(|| "Erreur lors de l'enregistrement".to_string()),
            })
        }
    }

    pub async fn my_prospections(&self) -> Result<(Vec<Prospection>, u64), GatewayError> {
        let envelope: ListEnvelope = self.gateway.get("/prospections/mes-prospections").await?;
        Ok((envelope.prospections, envelope.total))
    }

    pub async fn details(&self, id: u64) -> Result<ProspectionDetails, GatewayError> {
        self.gateway.get(&format!("/prospections/{id}")).await
    }

    pub async fn statistics(&self) -> Result<Statistiques, GatewayError> {
        let envelope: StatsEnvelope = self.gateway.get("/prospections/statistiques").await?;
        Ok(envelope.statistiques)
    }

    pub async fn check_duplicate(&self, phone: &str) -> Result<DuplicateCheck, GatewayError> {
        let encoded: String = url::form_urlencoded::byte_serialize(phone.as_bytes()).collect();
        self.gateway
            .get(&format!("/prospections/verifier-doublon?telephone={encoded}"))
            .await
    }
}

/// "0612345678" → "06 12 34 56 78"; anything else is returned untouched.
pub fn format_phone(phone: &str) -> String {
    if phone.len() == 10 && phone.chars().all(|c| c.is_ascii_digit()) {
        phone
            .as_bytes()
            .chunks(2)
            .map(|pair| std::str::from_utf8(pair).unwrap_or_default())
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        phone.to_string()
    }
}

/// ISO timestamp → "dd/MM/yyyy HH:mm"; unparseable input is passed through.
pub fn format_date(raw: &str) -> String {
    chrono::NaiveDateTime::parse_from_str(raw.get(..19).unwrap_or(raw), "%Y-%m-%dT%H:%M:%S")
        .map(|dt| dt.format("%d/%m/%Y %H:%M").to_string())
        .unwrap_or_else(|_| raw.to_string())
}
