//! Prospection Status Workflow
//!
//! Lifecycle of a prospect record as the server drives it. The client only
//! displays statuses and their possible transitions; it never enforces them.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProspectionStatus {
    Nouveau,
    Assigne,
    EnCours,
    Converti,
    Abandonne,
}

impl ProspectionStatus {
    pub fn display_name(&self) -> &'static str {
        match self {
            ProspectionStatus::Nouveau => "Nouveau",
            ProspectionStatus::Assigne => "Assigné",
            ProspectionStatus::EnCours => "En cours",
            ProspectionStatus::Converti => "Converti",
            ProspectionStatus::Abandonne => "Abandonné",
        }
    }

    pub fn possible_transitions(&self) -> &'static [ProspectionStatus] {
        use ProspectionStatus::*;
        match self {
            Nouveau => &[Assigne, Abandonne],
            Assigne => &[EnCours, Converti, Abandonne],
            EnCours => &[Converti, Abandonne],
            Converti => &[],
            // un prospect abandonné peut être relancé
            Abandonne => &[EnCours],
        }
    }

    pub fn can_transition_to(&self, next: ProspectionStatus) -> bool {
        self.possible_transitions().contains(&next)
    }

    pub fn is_final(&self) -> bool {
        matches!(self, ProspectionStatus::Converti)
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, ProspectionStatus::Converti | ProspectionStatus::Abandonne)
    }
}
