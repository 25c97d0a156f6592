//! Headless client for the HR dashboard backend: typed REST transport,
//! entity form controllers, list views, menus and dashboard counters.

pub mod dashboard;
pub mod entities;
pub mod error;
pub mod form;
pub mod in_flight;
pub mod list;
pub mod menus;
pub mod navigation;
pub mod notification;
pub mod session;
pub mod side_effect;
pub mod transport;

pub use error::{ClientError, ClientResult, GENERIC_FAILURE_MESSAGE};
pub use form::{
    Clock, EntityForm, EntityScope, FixedClock, FormContext, FormEntity, FormMode, SubmitOutcome,
    SystemClock,
};
pub use in_flight::InFlight;
pub use list::{Deletable, ListView, Listable, PendingDeletion};
pub use navigation::{Navigation, Route};
pub use notification::{Notification, NotificationLevel};
pub use session::{FileTokenStore, MemoryTokenStore, Session, TokenStore};
pub use side_effect::SideEffectStatus;
pub use transport::{ApiPath, AuthPolicy, RestClient};

#[cfg(test)]
#[path = "tests/support.rs"]
pub(crate) mod test_support;
