use chrono::NaiveDate;
use shared::{
    domain::{ContratId, MissionId},
    protocol::{Contrat, Mission},
};
use tracing::info;

use crate::{
    error::{ClientError, ClientResult},
    form::{blank, EntityScope, FormEntity, FormMode},
    transport::ApiPath,
};

impl FormEntity for Mission {
    type Id = MissionId;

    const LABEL: &'static str = "Mission";
    const SCOPE: EntityScope = EntityScope::Contract {
        regenerates_document: false,
    };
    const CHECKS_CONTRAT: bool = true;

    fn collection_path() -> ApiPath {
        ApiPath::new("/api/missions")
    }

    fn item_path(id: &MissionId) -> ApiPath {
        ApiPath::new("/api/missions").join(id)
    }

    fn id(&self) -> Option<&MissionId> {
        self.id.as_ref()
    }

    fn missing_required(&self, _mode: &FormMode<MissionId>) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if blank(&self.titre) {
            missing.push("titre");
        }
        if blank(&self.description) {
            missing.push("description");
        }
        missing
    }

    fn contrat_id(&self) -> Option<&ContratId> {
        self.contrat_id.as_ref()
    }

    fn attach_contrat(&mut self, contrat: ContratId) {
        self.contrat_id = Some(contrat);
    }

    /// A mission can only be written once its contract has started.
    fn check_preconditions(&self, contrat: Option<&Contrat>, today: NaiveDate) -> ClientResult<()> {
        let Some(contrat_id) = &self.contrat_id else {
            return Err(ClientError::Validation {
                missing: vec!["contratId"],
            });
        };
        let Some(contrat) = contrat else {
            return Err(ClientError::MissingParent(Self::LABEL));
        };

        match contrat.date_debut {
            Some(start) if today < start => {
                info!(contrat = %contrat_id, %start, %today, "mission: contract not started");
                Err(ClientError::Precondition(format!(
                    "Le contrat n'a pas encore commencé (début le {})",
                    start.format("%d/%m/%Y")
                )))
            }
            _ => Ok(()),
        }
    }
}
