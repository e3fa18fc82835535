//! Prospec API Client
//!
//! HTTP/JSON client for the prospection tracking server: explicit session
//! object (identity + access/refresh tokens), a gateway that attaches the
//! bearer token and performs a single refresh-and-retry on 401, and the
//! typed services built on top of it.

pub mod auth;
pub mod gateway;
pub mod prospections;
pub mod questions;
pub mod session;
pub mod structure;

pub use auth::{AuthService, RegisterRequest};
pub use gateway::{Gateway, GatewayError};
pub use prospections::{format_date, format_phone, ProspectionService};
pub use questions::QuestionService;
pub use session::{FileStorage, Identity, MemoryStorage, Session, SessionStorage};
pub use structure::StructureService;
