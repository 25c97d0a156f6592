use shared::{domain::ProfilId, protocol::Profil};

use crate::{
    form::{blank, EntityScope, FormEntity, FormMode},
    list::Listable,
    navigation::Route,
    transport::ApiPath,
};

impl FormEntity for Profil {
    type Id = ProfilId;

    const LABEL: &'static str = "Profil";
    const SCOPE: EntityScope = EntityScope::Standalone {
        list: Route::Profils,
    };

    fn collection_path() -> ApiPath {
        ApiPath::new("/api/profils")
    }

    fn item_path(id: &ProfilId) -> ApiPath {
        ApiPath::new("/api/profils").join(id)
    }

    fn id(&self) -> Option<&ProfilId> {
        self.id.as_ref()
    }

    fn missing_required(&self, _mode: &FormMode<ProfilId>) -> Vec<&'static str> {
        [("nom", &self.nom), ("prenom", &self.prenom), ("email", &self.email)]
            .into_iter()
            .filter(|(_, value)| blank(value))
            .map(|(name, _)| name)
            .collect()
    }
}

impl Listable for Profil {
    type Id = ProfilId;

    fn collection_path() -> ApiPath {
        ApiPath::new("/api/profils")
    }

    fn list_id(&self) -> Option<&ProfilId> {
        self.id.as_ref()
    }

    fn edit_route(id: &ProfilId) -> Option<Route> {
        Some(Route::ProfilEdit(id.clone()))
    }
}
