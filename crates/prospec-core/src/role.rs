//! Roles and View Gating
//!
//! Single source of truth for the role catalog: display names, hierarchy
//! levels, which organizational fields each role must provide at
//! registration, and which views each role may enter. Both the registration
//! form and the navigation gate consume these mappings.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Agent,
    ChefBranche,
    Superviseur,
    ChefAnimationRegional,
    Siege,
}

impl Role {
    pub const ALL: [Role; 5] = [
        Role::Agent,
        Role::ChefBranche,
        Role::Superviseur,
        Role::ChefAnimationRegional,
        Role::Siege,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Agent => "Agent",
            Role::ChefBranche => "Chef de branche",
            Role::Superviseur => "Superviseur",
            Role::ChefAnimationRegional => "Chef animation régional",
            Role::Siege => "SIEGE",
        }
    }

    pub fn hierarchy_level(&self) -> u8 {
        match self {
            Role::Agent => 1,
            Role::ChefBranche => 2,
            Role::Superviseur => 3,
            Role::ChefAnimationRegional => 4,
            Role::Siege => 5,
        }
    }

    pub fn is_higher_than(&self, other: Role) -> bool {
        self.hierarchy_level() > other.hierarchy_level()
    }

    /// Registration must carry a branch id (implies supervision and region).
    pub fn needs_branch(&self) -> bool {
        matches!(self, Role::Agent | Role::ChefBranche)
    }

    /// Registration must carry a supervision id (implies region).
    pub fn needs_supervision(&self) -> bool {
        self.needs_branch() || matches!(self, Role::Superviseur)
    }

    /// Registration must carry a region id.
    pub fn needs_region(&self) -> bool {
        self.needs_supervision() || matches!(self, Role::ChefAnimationRegional)
    }
}

/// The navigable views of the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum View {
    Overview,
    AgentIntake,
    AgentList,
    AgentStats,
    QuestionManagement,
}

impl View {
    pub fn label(&self) -> &'static str {
        match self {
            View::Overview => "Vue d'ensemble",
            View::AgentIntake => "Nouvelle prospection",
            View::AgentList => "Mes prospections",
            View::AgentStats => "Statistiques",
            View::QuestionManagement => "Gestion des questions",
        }
    }

    /// Whether a role may enter this view. Roles with no dedicated view only
    /// get the generic overview.
    pub fn allowed_for(&self, role: Role) -> bool {
        match self {
            View::Overview => true,
            View::AgentIntake | View::AgentList | View::AgentStats => role == Role::Agent,
            View::QuestionManagement => role == Role::Siege,
        }
    }
}

/// Navigation state machine: starts on the overview; an unauthorized
/// transition request is simply not applied, never an error.
#[derive(Clone, Copy, Debug)]
pub struct Navigator {
    role: Role,
    current: View,
}

impl Navigator {
    pub fn new(role: Role) -> Self {
        Self { role, current: View::Overview }
    }

    pub fn current(&self) -> View {
        self.current
    }

    /// Navigation entries offered to this role, in menu order.
    pub fn available_views(&self) -> Vec<View> {
        [
            View::Overview,
            View::AgentIntake,
            View::AgentList,
            View::AgentStats,
            View::QuestionManagement,
        ]
        .into_iter()
        .filter(|v| v.allowed_for(self.role))
        .collect()
    }

    /// Attempts a transition; returns whether it happened.
    pub fn go_to(&mut self, view: View) -> bool {
        if view.allowed_for(self.role) {
            self.current = view;
            true
        } else {
            false
        }
    }
}
