use shared::{
    domain::{ArticleId, ContratId},
    protocol::Article,
};

use crate::{
    form::{blank, EntityScope, FormEntity, FormMode},
    transport::ApiPath,
};

impl FormEntity for Article {
    type Id = ArticleId;

    const LABEL: &'static str = "Article";
    const SCOPE: EntityScope = EntityScope::Contract {
        regenerates_document: true,
    };

    fn collection_path() -> ApiPath {
        ApiPath::new("/api/articles")
    }

    fn item_path(id: &ArticleId) -> ApiPath {
        ApiPath::new("/api/articles").join(id)
    }

    fn id(&self) -> Option<&ArticleId> {
        self.id.as_ref()
    }

    fn missing_required(&self, _mode: &FormMode<ArticleId>) -> Vec<&'static str> {
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
}
