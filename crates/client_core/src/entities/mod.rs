//! Per-entity wiring of the generic form lifecycle.

pub mod article;
pub mod avenant;
pub mod contrat;
pub mod mission;
pub mod profil;
pub mod user;

use crate::form::EntityForm;
use shared::protocol::{Article, Avenant, Mission, Profil, User};

pub type ArticleForm = EntityForm<Article>;
pub type AvenantForm = EntityForm<Avenant>;
pub type MissionForm = EntityForm<Mission>;
pub type ProfilForm = EntityForm<Profil>;
pub type UserForm = EntityForm<User>;
