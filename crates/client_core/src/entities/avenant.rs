use shared::{
    domain::{AvenantId, ContratId},
    protocol::Avenant,
};

use crate::{
    form::{blank, EntityScope, FormEntity, FormMode},
    transport::ApiPath,
};

impl FormEntity for Avenant {
    type Id = AvenantId;

    const LABEL: &'static str = "Avenant";
    const SCOPE: EntityScope = EntityScope::Contract {
        regenerates_document: true,
    };

    fn collection_path() -> ApiPath {
        ApiPath::new("/api/avenants")
    }

    fn item_path(id: &AvenantId) -> ApiPath {
        ApiPath::new("/api/avenants").join(id)
    }

    fn id(&self) -> Option<&AvenantId> {
        self.id.as_ref()
    }

    fn missing_required(&self, _mode: &FormMode<AvenantId>) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if blank(&self.titre) {
            missing.push("titre");
        }
        if self.date_effet.is_none() {
            missing.push("dateEffet");
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
}
