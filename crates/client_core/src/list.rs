use std::fmt::Display;

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::{
    error::{ClientError, ClientResult},
    navigation::Route,
    in_flight::InFlight,
    notification::Notification,
    session::Session,
    transport::{ApiPath, RestClient},
};

pub trait Listable: DeserializeOwned + Clone + Send + Sync + 'static {
    type Id: Clone + PartialEq + Display + Send + Sync;

    fn collection_path() -> ApiPath;

    fn list_id(&self) -> Option<&Self::Id>;

    fn edit_route(_id: &Self::Id) -> Option<Route> {
        None
    }
}

pub trait Deletable: Listable {
    fn delete_path(id: &Self::Id) -> ApiPath;
}

/// A delete the user asked for but has not confirmed yet. Dropping it is
/// the cancel path.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use = "a pending deletion does nothing until confirmed"]
pub struct PendingDeletion<Id> {
    id: Id,
}

impl<Id> PendingDeletion<Id> {
    pub(crate) fn new(id: Id) -> Self {
        Self { id }
    }

    pub fn id(&self) -> &Id {
        &self.id
    }
}

pub struct ListView<T: Listable> {
    pub(crate) items: Vec<T>,
    loading: InFlight,
    expanded: Option<T::Id>,
    pub(crate) last_error: Option<String>,
    pub(crate) notifications: Vec<Notification>,
}

impl<T: Listable> Default for ListView<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: InFlight::default(),
            expanded: None,
            last_error: None,
            notifications: Vec::new(),
        }
    }
}

impl<T: Listable> ListView<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn load(&mut self, client: &RestClient, session: &Session) -> ClientResult<()> {
        let path = T::collection_path();
        let result = {
            let _loading = self.loading.start();
            client.get_json::<Vec<T>>(session, path.clone()).await
        };

        match result {
            Ok(items) => {
                info!(path = %path, count = items.len(), "list: loaded");
                self.items = items;
                self.last_error = None;
                Ok(())
            }
            Err(err) => {
                self.record_failure(&err);
                Err(err)
            }
        }
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_active()
    }

    /// Handle that stays readable while [`ListView::load`] holds the view.
    pub fn loading_flag(&self) -> InFlight {
        self.loading.clone()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub fn find(&self, id: &T::Id) -> Option<&T> {
        self.items.iter().find(|item| item.list_id() == Some(id))
    }

    pub fn edit_destination(&self, id: &T::Id) -> Option<Route> {
        T::edit_route(id)
    }

    /// Expands `id`, or collapses it if it was the expanded row. At most one
    /// row is expanded.
    pub fn toggle_expanded(&mut self, id: &T::Id) {
        if self.expanded.as_ref() == Some(id) {
            self.expanded = None;
        } else {
            self.expanded = Some(id.clone());
        }
    }

    pub fn expanded(&self) -> Option<&T::Id> {
        self.expanded.as_ref()
    }

    pub fn is_expanded(&self, id: &T::Id) -> bool {
        self.expanded.as_ref() == Some(id)
    }

    pub(crate) fn record_failure(&mut self, err: &ClientError) {
        warn!(error = %err, "list: operation failed");
        self.last_error = Some(err.user_message());
        self.notifications.push(Notification::from(err));
    }
}

impl<T: Deletable> ListView<T> {
    pub fn request_delete(&self, id: &T::Id) -> ClientResult<PendingDeletion<T::Id>> {
        self.find(id)
            .map(|_| PendingDeletion::new(id.clone()))
            .ok_or_else(|| ClientError::UnknownItem(id.to_string()))
    }

    /// Issues the DELETE and drops the row only once the server accepted it.
    pub async fn confirm_delete(
        &mut self,
        client: &RestClient,
        session: &Session,
        pending: PendingDeletion<T::Id>,
    ) -> ClientResult<()> {
        let PendingDeletion { id } = pending;
        if let Err(err) = client.delete(session, T::delete_path(&id)).await {
            self.record_failure(&err);
            return Err(err);
        }

        self.items.retain(|item| item.list_id() != Some(&id));
        if self.expanded.as_ref() == Some(&id) {
            self.expanded = None;
        }
        self.last_error = None;
        self.notifications
            .push(Notification::success("Élément supprimé"));
        info!(id = %id, "list: item deleted");
        Ok(())
    }
}
