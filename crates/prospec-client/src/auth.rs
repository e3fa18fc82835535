//! Authentication Service
//!
//! Login, registration and logout against `/auth/*`. Login stores the
//! access/refresh token pair and the identity in the session; logout is
//! best-effort on the wire and always clears local state.

use serde::{Deserialize, Serialize};

use prospec_core::Role;

use crate::gateway::{Gateway, GatewayError};
use crate::session::Identity;

#[derive(Debug, Deserialize)]
struct LoginResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(rename = "accessToken", default)]
    access_token: Option<String>,
    #[serde(rename = "refreshToken", default)]
    refresh_token: Option<String>,
    #[serde(rename = "utilisateur", default)]
    user: Option<Identity>,
}

#[derive(Debug, Deserialize)]
struct RegisterResponse {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

/// Registration payload. Hierarchy ids are required per role, monotonically:
/// branch implies supervision implies region.
#[derive(Clone, Debug, Serialize)]
pub struct RegisterRequest {
    #[serde(rename = "nom")]
    pub last_name: String,
    #[serde(rename = "prenom")]
    pub first_name: String,
    pub email: String,
    #[serde(rename = "motDePasse")]
    pub password: String,
    pub role: Role,
    #[serde(rename = "regionId")]
    pub region_id: Option<u64>,
    #[serde(rename = "supervisionId")]
    pub supervision_id: Option<u64>,
    #[serde(rename = "brancheId")]
    pub branch_id: Option<u64>,
}

impl RegisterRequest {
    /// Fields still missing before the form is submit-eligible.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.last_name.trim().is_empty() {
            missing.push("nom");
        }
        if self.first_name.trim().is_empty() {
            missing.push("prenom");
        }
        if self.email.trim().is_empty() {
            missing.push("email");
        }
        if self.password.trim().is_empty() {
            missing.push("motDePasse");
        }
        if self.role.needs_region() && self.region_id.is_none() {
            missing.push("regionId");
        }
        if self.role.needs_supervision() && self.supervision_id.is_none() {
            missing.push("supervisionId");
        }
        if self.role.needs_branch() && self.branch_id.is_none() {
            missing.push("brancheId");
        }
        missing
    }

    pub fn is_submit_eligible(&self) -> bool {
        self.missing_fields().is_empty()
    }
}

pub struct AuthService<'a> {
    gateway: &'a Gateway,
}

impl<'a> AuthService<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    /// Authenticates and stores tokens plus identity on success.
    pub async fn login(&self, email: &str, password: &str) -> Result<Identity, GatewayError> {
        let body = serde_json::json!({ "email": email, "motDePasse": password });
        let response: LoginResponse = self.gateway.post("/auth/login", &body).await?;

        match response {
            LoginResponse {
                success: true,
                access_token: Some(access),
                refresh_token: Some(refresh),
                user: Some(identity),
                ..
            } => {
                self.gateway
                    .session()
                    .store_login(identity.clone(), &access, &refresh);
                tracing::debug!(email, "login succeeded");
                Ok(identity)
            }
            LoginResponse { message, .. } => Err(GatewayError::Unauthorized(
                message.unwrap_or_else(|| "Identifiants invalides".to_string()),
            )),
        }
    }

    /// Registers a new account. The role's hierarchy requirement is checked
    /// client-side before anything goes on the wire.
    pub async fn register(&self, request: &RegisterRequest) -> Result<String, GatewayError> {
        if !request.is_submit_eligible() {
            return Err(GatewayError::Server {
                status: 400,
                message: format!(
                    "Champs obligatoires manquants: {}",
                    request.missing_fields().join(", ")
                ),
            });
        }
        let body = serde_json::to_value(request)
            .map_err(|e| GatewayError::Parse(e.to_string()))?;
        let response: RegisterResponse = self.gateway.post("/auth/register", &body).await?;
        if response.success {
            Ok(response
                .message
                .unwrap_or_else(|| "Compte créé avec succès".to_string()))
        } else {
            Err(GatewayError::Server {
                status: 400,
                message: response
                    .message
                    .unwrap_or_else(|| "Une erreur est survenue".to_string()),
            })
        }
    }

    /// Notifies the server best-effort, then clears the session
    /// unconditionally.
    pub async fn logout(&self) {
        let session = self.gateway.session();
        let body = serde_json::json!({
            "accessToken": session.access_token(),
            "refreshToken": session.refresh_token(),
        });
        self.gateway.post_best_effort("/auth/logout", &body).await;
        session.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemoryStorage, Session};
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn request(role: Role) -> RegisterRequest {
        RegisterRequest {
            last_name: "Alaoui".into(),
            first_name: "Sara".into(),
            email: "sara@exemple.ma".into(),
            password: "secret".into(),
            role,
            region_id: None,
            supervision_id: None,
            branch_id: None,
        }
    }

    fn gateway(server_uri: &str) -> Gateway {
        Gateway::new(
            server_uri.to_string(),
            Arc::new(Session::new(Box::new(MemoryStorage::new()))),
        )
    }

    #[test]
    fn test_register_requirements_follow_role() {
        assert!(request(Role::Siege).is_submit_eligible());

        let agent = request(Role::Agent);
        assert_eq!(agent.missing_fields(), vec!["regionId", "supervisionId", "brancheId"]);

        let mut superviseur = request(Role::Superviseur);
        superviseur.region_id = Some(1);
        assert_eq!(superviseur.missing_fields(), vec!["supervisionId"]);

        let mut regional = request(Role::ChefAnimationRegional);
        regional.region_id = Some(1);
        assert!(regional.is_submit_eligible());
    }

    #[test]
    fn test_register_always_requires_name_and_credentials() {
        let mut req = request(Role::Siege);
        req.email = "  ".into();
        req.password = String::new();
        assert_eq!(req.missing_fields(), vec!["email", "motDePasse"]);
    }

    #[tokio::test]
    async fn test_login_stores_tokens_and_identity() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .and(body_partial_json(json!({"email": "sara@exemple.ma", "motDePasse": "secret"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": true,
                "message": "Connexion réussie",
                "accessToken": "acc-1",
                "refreshToken": "ref-1",
                "expiresIn": 900,
                "utilisateur": {
                    "id": 7,
                    "nom": "Alaoui",
                    "prenom": "Sara",
                    "email": "sara@exemple.ma",
                    "role": "AGENT",
                    "roleDisplayName": "Agent"
                }
            })))
            .mount(&server)
            .await;

        let gateway = gateway(&server.uri());
        let identity = AuthService::new(&gateway)
            .login("sara@exemple.ma", "secret")
            .await
            .unwrap();
        assert_eq!(identity.first_name, "Sara");
        assert!(gateway.session().is_authenticated());
        assert_eq!(gateway.session().refresh_token().as_deref(), Some("ref-1"));
    }

    #[tokio::test]
    async fn test_login_failure_surfaces_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "success": false,
                "message": "Email ou mot de passe incorrect"
            })))
            .mount(&server)
            .await;

        let gateway = gateway(&server.uri());
        let err = AuthService::new(&gateway)
            .login("sara@exemple.ma", "mauvais")
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Unauthorized(m) if m == "Email ou mot de passe incorrect"));
        assert!(!gateway.session().is_authenticated());
    }

    #[tokio::test]
    async fn test_ineligible_register_never_hits_the_wire() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/register"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let gateway = gateway(&server.uri());
        let err = AuthService::new(&gateway)
            .register(&request(Role::Agent))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Server { status: 400, .. }));
    }

    #[tokio::test]
    async fn test_logout_clears_session_even_when_server_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/logout"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let gateway = gateway(&server.uri());
        gateway.session().store_login(
            Identity {
                id: 1,
                last_name: "Alaoui".into(),
                first_name: "Sara".into(),
                email: "sara@exemple.ma".into(),
                role: Role::Agent,
                role_display_name: "Agent".into(),
            },
            "acc",
            "ref",
        );

        AuthService::new(&gateway).logout().await;
        assert!(!gateway.session().is_authenticated());
        assert!(gateway.session().identity().is_none());
    }
}
