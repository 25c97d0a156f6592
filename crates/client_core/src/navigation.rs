use std::fmt;

use shared::domain::{ContratId, ProfilId, UserId};

/// Pages a controller can send the user to once its work is done.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Dashboard,
    ContratDetail(ContratId),
    Profils,
    ProfilEdit(ProfilId),
    Users,
    UserEdit(UserId),
    Menus,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Self::Dashboard => "/dashboard".to_string(),
            Self::ContratDetail(id) => format!("/contrats/{id}"),
            Self::Profils => "/profils".to_string(),
            Self::ProfilEdit(id) => format!("/profils/edit/{id}"),
            Self::Users => "/users".to_string(),
            Self::UserEdit(id) => format!("/users/edit/{id}"),
            Self::Menus => "/menus".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

/// What a form decided after a successful write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    To(Route),
    /// The write went through but the destination could not be computed.
    Skipped(String),
}

impl Navigation {
    pub fn route(&self) -> Option<&Route> {
        match self {
            Self::To(route) => Some(route),
            Self::Skipped(_) => None,
        }
    }
}
