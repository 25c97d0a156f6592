//! Menu administration and the current user's navigation tree.

use shared::{
    domain::{AuthProfilId, MenuId, SousMenuId},
    protocol::{AuthProfil, Menu, NewMenu},
};
use tracing::info;

use crate::{
    error::{ClientError, ClientResult},
    form::blank,
    list::{Deletable, ListView, Listable, PendingDeletion},
    notification::Notification,
    session::Session,
    transport::{ApiPath, AuthPolicy, RestClient},
};

impl Listable for Menu {
    type Id = MenuId;

    fn collection_path() -> ApiPath {
        ApiPath::new("/api/menu")
    }

    fn list_id(&self) -> Option<&MenuId> {
        Some(&self.id)
    }
}

impl Deletable for Menu {
    fn delete_path(id: &MenuId) -> ApiPath {
        ApiPath::new("/api/menu").join(id)
    }
}

impl Listable for AuthProfil {
    type Id = AuthProfilId;

    fn collection_path() -> ApiPath {
        ApiPath::new("/api/auth/profils")
    }

    fn list_id(&self) -> Option<&AuthProfilId> {
        Some(&self.id)
    }
}

pub fn sous_menu_delete_path(id: &SousMenuId) -> ApiPath {
    ApiPath::new("/api/menu/sousMenu").join(id)
}

pub type MenuListView = ListView<Menu>;

impl ListView<Menu> {
    pub fn request_delete_sous_menu(
        &self,
        id: &SousMenuId,
    ) -> ClientResult<PendingDeletion<SousMenuId>> {
        self.items
            .iter()
            .flat_map(|menu| menu.sous_menus.iter())
            .find(|sous_menu| &sous_menu.id == id)
            .map(|_| PendingDeletion::new(id.clone()))
            .ok_or_else(|| ClientError::UnknownItem(id.to_string()))
    }

    /// Removes the sub-menu from its parent row once the server accepted it.
    pub async fn confirm_delete_sous_menu(
        &mut self,
        client: &RestClient,
        session: &Session,
        pending: PendingDeletion<SousMenuId>,
    ) -> ClientResult<()> {
        let id = pending.id().clone();
        if let Err(err) = client.delete(session, sous_menu_delete_path(&id)).await {
            self.record_failure(&err);
            return Err(err);
        }

        for menu in &mut self.items {
            menu.sous_menus.retain(|sous_menu| sous_menu.id != id);
        }
        self.last_error = None;
        self.notifications
            .push(Notification::success("Sous-menu supprimé"));
        info!(id = %id, "menus: sub-menu deleted");
        Ok(())
    }
}

/// Menus the signed-in user is allowed to see.
pub async fn fetch_my_menus(client: &RestClient, session: &Session) -> ClientResult<Vec<Menu>> {
    client.get_json(session, "/api/auth/mes-menus").await
}

pub async fn fetch_auth_profils(
    client: &RestClient,
    session: &Session,
) -> ClientResult<Vec<AuthProfil>> {
    client.get_json(session, AuthProfil::collection_path()).await
}

pub async fn create_menu(
    client: &RestClient,
    session: &Session,
    menu: &NewMenu,
) -> ClientResult<Option<Menu>> {
    if blank(&menu.libelle) {
        return Err(ClientError::Validation {
            missing: vec!["libelle"],
        });
    }

    let created = client
        .post_json(session, "/api/auth/menus", menu, AuthPolicy::Required)
        .await?;
    info!(libelle = %menu.libelle, parent = ?menu.parent_id, "menus: created");
    Ok(created)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationEntry {
    pub depth: usize,
    pub libelle: String,
    pub url: Option<String>,
}

/// Flattens the menu tree in display order: each menu followed by its
/// sub-menus.
pub fn flatten_navigation(menus: &[Menu]) -> Vec<NavigationEntry> {
    menus
        .iter()
        .flat_map(|menu| {
            std::iter::once(NavigationEntry {
                depth: 0,
                libelle: menu.libelle.clone(),
                url: menu.url.clone(),
            })
            .chain(menu.sous_menus.iter().map(|sous_menu| NavigationEntry {
                depth: 1,
                libelle: sous_menu.libelle.clone(),
                url: sous_menu.url.clone(),
            }))
        })
        .collect()
}

#[cfg(test)]
#[path = "tests/menus_tests.rs"]
mod tests;
