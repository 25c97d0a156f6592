use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::{
    ArticleId, AuthProfilId, AvenantId, ContratId, MenuId, MissionId, ProfilId, SousMenuId,
    UserId, MISSION_INITIAL_STATUS,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ArticleId>,
    #[serde(default)]
    pub titre: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contrat_id: Option<ContratId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Avenant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<AvenantId>,
    #[serde(default)]
    pub titre: String,
    #[serde(default)]
    pub date_effet: Option<NaiveDate>,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contrat_id: Option<ContratId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mission {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<MissionId>,
    #[serde(default)]
    pub titre: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date_debut: Option<NaiveDate>,
    #[serde(default)]
    pub date_fin: Option<NaiveDate>,
    #[serde(default = "initial_mission_status")]
    pub statut: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contrat_id: Option<ContratId>,
}

fn initial_mission_status() -> String {
    MISSION_INITIAL_STATUS.to_string()
}

impl Default for Mission {
    fn default() -> Self {
        Self {
            id: None,
            titre: String::new(),
            description: String::new(),
            date_debut: None,
            date_fin: None,
            statut: initial_mission_status(),
            contrat_id: None,
        }
    }
}

/// Parent contract as far as the client cares: publication gates document
/// regeneration, the start date gates mission creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contrat {
    pub id: ContratId,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub date_debut: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profil {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ProfilId>,
    #[serde(default)]
    pub nom: String,
    #[serde(default)]
    pub prenom: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub telephone: String,
    #[serde(default)]
    pub competences: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    #[serde(default)]
    pub nom: String,
    #[serde(default)]
    pub prenom: String,
    #[serde(default)]
    pub email: String,
    /// Only sent when set; the backend never returns it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profil_id: Option<AuthProfilId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SousMenu {
    pub id: SousMenuId,
    #[serde(default)]
    pub libelle: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub menu_id: Option<MenuId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Menu {
    pub id: MenuId,
    #[serde(default)]
    pub libelle: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub icone: Option<String>,
    #[serde(default)]
    pub sous_menus: Vec<SousMenu>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMenu {
    pub libelle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icone: Option<String>,
    /// Set when the new entry is a sub-menu of an existing menu.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<MenuId>,
    #[serde(default)]
    pub profil_ids: Vec<AuthProfilId>,
}

/// Role profile used to scope menus, distinct from candidate [`Profil`]s.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthProfil {
    pub id: AuthProfilId,
    #[serde(default)]
    pub libelle: String,
}

/// Counter endpoints answer either with a bare number or a small object.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CounterPayload {
    Bare(f64),
    Count { count: f64 },
    Total { total: f64 },
    Rate {
        #[serde(alias = "hiringRate")]
        rate: f64,
    },
}

impl CounterPayload {
    pub fn value(self) -> f64 {
        match self {
            Self::Bare(value)
            | Self::Count { count: value }
            | Self::Total { total: value }
            | Self::Rate { rate: value } => value,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardCounts {
    pub users: u64,
    pub active_offers: u64,
    pub pending_candidatures: u64,
    pub hiring_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mission_defaults_to_initial_status() {
        assert_eq!(Mission::default().statut, MISSION_INITIAL_STATUS);
        let decoded: Mission =
            serde_json::from_str(r#"{"id":"m1","titre":"Audit"}"#).expect("decode");
        assert_eq!(decoded.statut, MISSION_INITIAL_STATUS);
        assert_eq!(decoded.id, Some(MissionId::from("m1")));
    }

    #[test]
    fn article_uses_camel_case_and_omits_missing_id() {
        let article = Article {
            id: None,
            titre: "Kickoff".into(),
            description: "Initial sync".into(),
            contrat_id: Some(ContratId::from("c1")),
        };
        let json = serde_json::to_value(&article).expect("encode");
        assert_eq!(
            json,
            serde_json::json!({"titre": "Kickoff", "description": "Initial sync", "contratId": "c1"})
        );
    }

    #[test]
    fn contrat_decodes_start_date_and_defaults_publication() {
        let contrat: Contrat =
            serde_json::from_str(r#"{"id":"c1","dateDebut":"2026-01-15"}"#).expect("decode");
        assert!(!contrat.published);
        assert_eq!(contrat.date_debut, NaiveDate::from_ymd_opt(2026, 1, 15));
    }

    #[test]
    fn counters_accept_several_shapes() {
        let bare: CounterPayload = serde_json::from_str("12").expect("bare");
        let wrapped: CounterPayload = serde_json::from_str(r#"{"count":4}"#).expect("count");
        let rate: CounterPayload = serde_json::from_str(r#"{"hiringRate":0.25}"#).expect("rate");
        assert_eq!(bare.value(), 12.0);
        assert_eq!(wrapped.value(), 4.0);
        assert_eq!(rate.value(), 0.25);
    }

    #[test]
    fn menu_tree_decodes_nested_sub_menus() {
        let menus: Vec<Menu> = serde_json::from_str(
            r#"[{"id":"m1","libelle":"RH","sousMenus":[{"id":"s1","libelle":"Contrats","url":"/contrats"}]},
                {"id":"m2","libelle":"Admin"}]"#,
        )
        .expect("decode");
        assert_eq!(menus[0].sous_menus.len(), 1);
        assert!(menus[1].sous_menus.is_empty());
    }
}
