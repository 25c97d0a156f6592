//! Create/edit lifecycle shared by every entity form.
//!
//! A form is mounted from a [`FormContext`], edited in place, then submitted.
//! Submission validates required fields, runs entity preconditions, writes
//! through POST or PUT, runs the contract side effect when the entity asks
//! for it, and finally computes where the user should go next.
//!
//! Entities that check their parent contract before writing get it loaded
//! once at mount, so a rejected submit costs no round trip.

use std::{
    fmt::{Debug, Display},
    sync::Arc,
};

use chrono::{Local, NaiveDate};
use serde::{de::DeserializeOwned, Serialize};
use shared::{domain::ContratId, protocol::Contrat};
use tracing::{info, warn};

use crate::{
    entities::contrat::fetch_contrat,
    error::{ClientError, ClientResult},
    in_flight::InFlight,
    navigation::{Navigation, Route},
    notification::Notification,
    session::Session,
    side_effect::{regenerate_contract_document, SideEffectStatus},
    transport::{ApiPath, AuthPolicy, RestClient},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode<Id> {
    Create,
    Edit(Id),
}

impl<Id: From<String>> FormMode<Id> {
    /// Reads the optional identifier carried by the navigation context.
    pub fn from_route_param(param: Option<&str>) -> Self {
        match param.map(str::trim).filter(|value| !value.is_empty()) {
            Some(id) => Self::Edit(Id::from(id.to_string())),
            None => Self::Create,
        }
    }
}

impl<Id> FormMode<Id> {
    pub fn is_edit(&self) -> bool {
        matches!(self, Self::Edit(_))
    }

    pub fn id(&self) -> Option<&Id> {
        match self {
            Self::Create => None,
            Self::Edit(id) => Some(id),
        }
    }
}

/// Everything the navigation layer hands to a form when it opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormContext<Id> {
    pub mode: FormMode<Id>,
    pub parent: Option<ContratId>,
}

impl<Id> FormContext<Id> {
    pub fn create() -> Self {
        Self {
            mode: FormMode::Create,
            parent: None,
        }
    }

    pub fn edit(id: Id) -> Self {
        Self {
            mode: FormMode::Edit(id),
            parent: None,
        }
    }

    pub fn with_parent(mut self, parent: ContratId) -> Self {
        self.parent = Some(parent);
        self
    }
}

pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityScope {
    /// Child of a contract; the form lands on the contract page afterwards.
    Contract { regenerates_document: bool },
    Standalone { list: Route },
}

pub trait FormEntity: Clone + Default + Serialize + DeserializeOwned + Send + Sync + 'static {
    type Id: Clone + Debug + Display + PartialEq + From<String> + Send + Sync;

    /// Human readable name used in logs and notifications.
    const LABEL: &'static str;
    const SCOPE: EntityScope;
    /// Whether [`FormEntity::check_preconditions`] reads the parent contract.
    const CHECKS_CONTRAT: bool = false;

    fn collection_path() -> ApiPath;
    fn item_path(id: &Self::Id) -> ApiPath;

    fn create_auth() -> AuthPolicy {
        AuthPolicy::Required
    }

    fn id(&self) -> Option<&Self::Id>;

    fn missing_required(&self, mode: &FormMode<Self::Id>) -> Vec<&'static str>;

    fn contrat_id(&self) -> Option<&ContratId> {
        None
    }

    fn attach_contrat(&mut self, _contrat: ContratId) {}

    /// Runs on every submit, after required fields. No I/O: `contrat` is the
    /// parent loaded beforehand when `CHECKS_CONTRAT` is set.
    fn check_preconditions(&self, _contrat: Option<&Contrat>, _today: NaiveDate) -> ClientResult<()> {
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SubmitOutcome<E> {
    pub saved: E,
    pub side_effect: SideEffectStatus,
    pub navigation: Navigation,
}

impl<E> SubmitOutcome<E> {
    /// True when the write, its side effect and the navigation all went through.
    pub fn is_complete(&self) -> bool {
        !self.side_effect.is_failure() && self.navigation.route().is_some()
    }
}

pub struct EntityForm<E: FormEntity> {
    mode: FormMode<E::Id>,
    parent: Option<ContratId>,
    fields: E,
    /// Parent contract as loaded, keyed by the id it was requested with.
    contrat: Option<(ContratId, Contrat)>,
    clock: Arc<dyn Clock>,
    submitting: InFlight,
    last_error: Option<String>,
    notifications: Vec<Notification>,
}

pub(crate) fn blank(value: &str) -> bool {
    value.trim().is_empty()
}

impl<E: FormEntity> EntityForm<E> {
    pub async fn mount(
        client: &RestClient,
        session: &Session,
        context: FormContext<E::Id>,
    ) -> ClientResult<Self> {
        let FormContext { mode, parent } = context;
        let fields = match &mode {
            FormMode::Edit(id) => {
                let fetched: E = client.get_json(session, E::item_path(id)).await?;
                info!(entity = E::LABEL, id = %id, "form: loaded for edit");
                fetched
            }
            FormMode::Create => {
                let mut fields = E::default();
                if let Some(parent) = &parent {
                    fields.attach_contrat(parent.clone());
                }
                fields
            }
        };

        let contrat = match parent.as_ref().or_else(|| fields.contrat_id()) {
            Some(contrat_id) if E::CHECKS_CONTRAT => Some((
                contrat_id.clone(),
                fetch_contrat(client, session, contrat_id).await?,
            )),
            _ => None,
        };

        Ok(Self {
            mode,
            parent,
            fields,
            contrat,
            clock: Arc::new(SystemClock),
            submitting: InFlight::default(),
            last_error: None,
            notifications: Vec::new(),
        })
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn mode(&self) -> &FormMode<E::Id> {
        &self.mode
    }

    pub fn parent(&self) -> Option<&ContratId> {
        self.parent.as_ref()
    }

    pub fn fields(&self) -> &E {
        &self.fields
    }

    pub fn edit(&mut self, apply: impl FnOnce(&mut E)) {
        apply(&mut self.fields);
    }

    /// Parent contract loaded at mount, for entities that check it.
    pub fn contrat(&self) -> Option<&Contrat> {
        self.contrat.as_ref().map(|(_, contrat)| contrat)
    }

    /// Front ends disable the submit control while this is true.
    pub fn is_submitting(&self) -> bool {
        self.submitting.is_active()
    }

    /// Clone of the submitting flag, readable while [`EntityForm::submit`]
    /// holds the form.
    pub fn submitting_flag(&self) -> InFlight {
        self.submitting.clone()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    pub async fn submit(
        &mut self,
        client: &RestClient,
        session: &Session,
    ) -> ClientResult<SubmitOutcome<E>> {
        self.last_error = None;
        let result = {
            let _submitting = self.submitting.start();
            self.write_and_follow_up(client, session).await
        };

        match &result {
            Ok(outcome) => {
                self.notifications
                    .push(Notification::success(format!("{} enregistré(e)", E::LABEL)));
                if let SideEffectStatus::Failed(reason) = &outcome.side_effect {
                    self.notifications.push(Notification::warning(format!(
                        "{} enregistré(e), mais la régénération du document a échoué : {reason}",
                        E::LABEL
                    )));
                }
                if let Navigation::Skipped(reason) = &outcome.navigation {
                    self.last_error = Some(reason.clone());
                    self.notifications.push(Notification::error(reason.clone()));
                }
            }
            Err(err) => {
                warn!(entity = E::LABEL, error = %err, "form: submit failed");
                self.last_error = Some(err.user_message());
                self.notifications.push(Notification::from(err));
            }
        }

        result
    }

    async fn write_and_follow_up(
        &mut self,
        client: &RestClient,
        session: &Session,
    ) -> ClientResult<SubmitOutcome<E>> {
        let missing = self.fields.missing_required(&self.mode);
        if !missing.is_empty() {
            return Err(ClientError::Validation { missing });
        }

        let mut payload = self.fields.clone();
        if let Some(parent) = &self.parent {
            payload.attach_contrat(parent.clone());
        }
        if E::CHECKS_CONTRAT {
            self.refresh_contrat(client, session, payload.contrat_id())
                .await?;
        }
        payload.check_preconditions(self.contrat(), self.clock.today())?;

        let response = match &self.mode {
            FormMode::Create => {
                client
                    .post_json::<E, E>(session, E::collection_path(), &payload, E::create_auth())
                    .await
            }
            FormMode::Edit(id) => {
                client
                    .put_json::<E, E>(session, E::item_path(id), &payload)
                    .await
            }
        };
        // Past this point the server has committed the write.
        let saved = match response {
            Ok(Some(saved)) => saved,
            Ok(None) => payload.clone(),
            Err(ClientError::Decode { path, source }) => {
                warn!(
                    entity = E::LABEL,
                    %path,
                    error = %source,
                    "form: write accepted but response unreadable, keeping submitted values"
                );
                payload.clone()
            }
            Err(err) => return Err(err),
        };
        info!(
            entity = E::LABEL,
            edit = self.mode.is_edit(),
            id = ?saved.id(),
            "form: saved"
        );

        let parent = self
            .parent
            .clone()
            .or_else(|| saved.contrat_id().cloned())
            .or_else(|| payload.contrat_id().cloned());

        if !self.mode.is_edit() {
            if let Some(id) = saved.id() {
                self.mode = FormMode::Edit(id.clone());
            }
        }
        self.fields = saved.clone();

        let (side_effect, navigation) = match E::SCOPE {
            EntityScope::Contract {
                regenerates_document,
            } => {
                let side_effect = match (&parent, regenerates_document) {
                    (_, false) => SideEffectStatus::NotApplicable,
                    (Some(contrat_id), true) => {
                        regenerate_contract_document(client, session, contrat_id).await
                    }
                    (None, true) => SideEffectStatus::SkippedMissingParent,
                };
                let navigation = match parent {
                    Some(contrat_id) => Navigation::To(Route::ContratDetail(contrat_id)),
                    None => {
                        let err = ClientError::MissingParent(E::LABEL);
                        warn!(entity = E::LABEL, "form: navigation skipped, {err}");
                        Navigation::Skipped(err.user_message())
                    }
                };
                (side_effect, navigation)
            }
            EntityScope::Standalone { list } => (SideEffectStatus::NotApplicable, Navigation::To(list)),
        };

        Ok(SubmitOutcome {
            saved,
            side_effect,
            navigation,
        })
    }

    /// Only hits the network when the contract on the payload is not the
    /// one loaded at mount, e.g. after the user picked another contract.
    async fn refresh_contrat(
        &mut self,
        client: &RestClient,
        session: &Session,
        contrat_id: Option<&ContratId>,
    ) -> ClientResult<()> {
        let Some(contrat_id) = contrat_id else {
            return Ok(());
        };
        if self.contrat.as_ref().map(|(loaded, _)| loaded) != Some(contrat_id) {
            let contrat = fetch_contrat(client, session, contrat_id).await?;
            self.contrat = Some((contrat_id.clone(), contrat));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
