use shared::{domain::UserId, protocol::User};

use crate::{
    form::{blank, EntityScope, FormEntity, FormMode},
    navigation::Route,
    transport::{ApiPath, AuthPolicy},
};

impl FormEntity for User {
    type Id = UserId;

    const LABEL: &'static str = "Utilisateur";
    const SCOPE: EntityScope = EntityScope::Standalone { list: Route::Users };

    /// New accounts go through registration rather than the users resource.
    fn collection_path() -> ApiPath {
        ApiPath::new("/api/register")
    }

    fn item_path(id: &UserId) -> ApiPath {
        ApiPath::new("/api/users").join(id)
    }

    fn create_auth() -> AuthPolicy {
        AuthPolicy::Optional
    }

    fn id(&self) -> Option<&UserId> {
        self.id.as_ref()
    }

    fn missing_required(&self, mode: &FormMode<UserId>) -> Vec<&'static str> {
        let mut missing: Vec<&'static str> =
            [("nom", &self.nom), ("prenom", &self.prenom), ("email", &self.email)]
                .into_iter()
                .filter(|(_, value)| blank(value))
                .map(|(name, _)| name)
                .collect();
        let has_password = self.password.as_deref().is_some_and(|value| !blank(value));
        if !mode.is_edit() && !has_password {
            missing.push("password");
        }
        missing
    }
}
