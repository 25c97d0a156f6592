use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

id_newtype!(ArticleId);
id_newtype!(AvenantId);
id_newtype!(MissionId);
id_newtype!(ContratId);
id_newtype!(ProfilId);
id_newtype!(UserId);
id_newtype!(MenuId);
id_newtype!(SousMenuId);
id_newtype!(AuthProfilId);

/// Status given to a mission that has not been persisted yet.
pub const MISSION_INITIAL_STATUS: &str = "EN_ATTENTE";
