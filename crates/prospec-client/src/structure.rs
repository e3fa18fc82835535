//! Organizational Structure Lookups
//!
//! The three cascading lists behind the registration form. The caller feeds
//! the results into `HierarchySelection`, whose tagging discards responses
//! for selections that are no longer current.

use prospec_core::{Branche, Region, Supervision};

use crate::gateway::{Gateway, GatewayError};

pub struct StructureService<'a> {
    gateway: &'a Gateway,
}

impl<'a> StructureService<'a> {
    pub fn new(gateway: &'a Gateway) -> Self {
        Self { gateway }
    }

    pub async fn regions(&self) -> Result<Vec<Region>, GatewayError> {
        self.gateway.get("/structure/regions").await
    }

    pub async fn supervisions(&self, region_id: u64) -> Result<Vec<Supervision>, GatewayError> {
        self.gateway
            .get(&format!("/structure/supervisions?regionId={region_id}"))
            .await
    }

    pub async fn branches(&self, supervision_id: u64) -> Result<Vec<Branche>, GatewayError> {
        self.gateway
            .get(&format!("/structure/branches?supervisionId={supervision_id}"))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemoryStorage, Session};
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_cascading_lookups() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/structure/regions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 1, "nom": "Casablanca-Settat", "code": "CS"}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/structure/supervisions"))
            .and(query_param("regionId", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 10, "nom": "Supervision Centre", "code": "SC"}
            ])))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/structure/branches"))
            .and(query_param("supervisionId", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"id": 100, "nom": "Branche Maarif", "code": "BM"}
            ])))
            .mount(&server)
            .await;

        let gateway = Gateway::new(
            server.uri(),
            Arc::new(Session::new(Box::new(MemoryStorage::new()))),
        );
        let service = StructureService::new(&gateway);

        let regions = service.regions().await.unwrap();
        assert_eq!(regions[0].name, "Casablanca-Settat");

        let supervisions = service.supervisions(regions[0].id).await.unwrap();
        assert_eq!(supervisions[0].id, 10);

        let branches = service.branches(supervisions[0].id).await.unwrap();
        assert_eq!(branches[0].code, "BM");
    }
}
