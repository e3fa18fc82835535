//! Prospec Domain Model
//!
//! Pure domain layer for the prospection tracking client: question schema,
//! headless form controls, answer validation, role-based view gating and the
//! organizational hierarchy cascade. No I/O lives here; everything is
//! synchronous and string-based, matching the wire contract of the server.

pub mod form;
pub mod question;
pub mod role;
pub mod status;
pub mod structure;
pub mod validation;

pub use form::{AnswerSet, Control};
pub use question::{ProspectForm, Question, QuestionOption, QuestionType, TypeProspection};
pub use role::{Navigator, Role, View};
pub use status::ProspectionStatus;
pub use structure::{Branche, HierarchySelection, Region, Supervision};
