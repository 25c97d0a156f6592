//! Second step of a contract-scoped write: regenerate the contract document
//! when the contract is already published.
//!
//! The primary write has been committed by the time this runs. Nothing here
//! rolls it back; the outcome is reported next to it instead.

use shared::domain::ContratId;
use tracing::{info, warn};

use crate::{
    entities::contrat::{fetch_contrat, update_pdf_path},
    session::Session,
    transport::RestClient,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SideEffectStatus {
    NotApplicable,
    SkippedUnpublished,
    SkippedMissingParent,
    Completed,
    Failed(String),
}

impl SideEffectStatus {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

pub async fn regenerate_contract_document(
    client: &RestClient,
    session: &Session,
    contrat_id: &ContratId,
) -> SideEffectStatus {
    let contrat = match fetch_contrat(client, session, contrat_id).await {
        Ok(contrat) => contrat,
        Err(err) => {
            warn!(contrat = %contrat_id, error = %err, "side effect: contract lookup failed");
            return SideEffectStatus::Failed(err.user_message());
        }
    };

    if !contrat.published {
        info!(contrat = %contrat_id, "side effect: contract not published, document untouched");
        return SideEffectStatus::SkippedUnpublished;
    }

    match client.put_empty(session, update_pdf_path(contrat_id)).await {
        Ok(()) => {
            info!(contrat = %contrat_id, "side effect: document regenerated");
            SideEffectStatus::Completed
        }
        Err(err) => {
            warn!(contrat = %contrat_id, error = %err, "side effect: document regeneration failed");
            SideEffectStatus::Failed(err.user_message())
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::test_support::connected;

    #[tokio::test]
    async fn published_contract_triggers_exactly_one_regeneration() {
        let (client, session, backend) = connected().await;
        backend
            .respond("GET", "/api/contrats/c1", 200, json!({"id": "c1", "published": true}))
            .await;
        backend
            .respond("PUT", "/api/contrats/c1/update-pdf", 200, Value::Null)
            .await;

        let status = regenerate_contract_document(&client, &session, &ContratId::from("c1")).await;
        assert_eq!(status, SideEffectStatus::Completed);
        assert_eq!(backend.count("PUT", "/api/contrats/c1/update-pdf").await, 1);
    }

    #[tokio::test]
    async fn unpublished_contract_is_a_no_op() {
        let (client, session, backend) = connected().await;
        backend
            .respond("GET", "/api/contrats/c2", 200, json!({"id": "c2", "published": false}))
            .await;

        let status = regenerate_contract_document(&client, &session, &ContratId::from("c2")).await;
        assert_eq!(status, SideEffectStatus::SkippedUnpublished);
        assert_eq!(backend.count("PUT", "/api/contrats/c2/update-pdf").await, 0);
    }

    #[tokio::test]
    async fn contract_lookup_failure_skips_regeneration() {
        let (client, session, backend) = connected().await;
        backend
            .respond(
                "GET",
                "/api/contrats/c4",
                404,
                json!({"message": "Contrat introuvable"}),
            )
            .await;

        let status = regenerate_contract_document(&client, &session, &ContratId::from("c4")).await;
        assert_eq!(status, SideEffectStatus::Failed("Contrat introuvable".to_string()));
        assert_eq!(backend.count("PUT", "/api/contrats/c4/update-pdf").await, 0);
    }

    #[tokio::test]
    async fn regeneration_failure_is_reported_not_raised() {
        let (client, session, backend) = connected().await;
        backend
            .respond("GET", "/api/contrats/c3", 200, json!({"id": "c3", "published": true}))
            .await;
        backend
            .respond(
                "PUT",
                "/api/contrats/c3/update-pdf",
                500,
                json!({"message": "Génération PDF impossible"}),
            )
            .await;

        let status = regenerate_contract_document(&client, &session, &ContratId::from("c3")).await;
        assert_eq!(
            status,
            SideEffectStatus::Failed("Génération PDF impossible".to_string())
        );
        assert!(status.is_failure());
    }
}
