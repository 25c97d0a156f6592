use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "hrdash", about = "HR dashboard client")]
pub struct Args {
    /// TOML file with `base_url` and `token_path`.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
    #[arg(long, global = true)]
    pub base_url: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage the stored bearer token.
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
    /// Show the headline counters.
    Dashboard,
    Article {
        #[command(subcommand)]
        action: ArticleAction,
    },
    Avenant {
        #[command(subcommand)]
        action: AvenantAction,
    },
    Mission {
        #[command(subcommand)]
        action: MissionAction,
    },
    Profil {
        #[command(subcommand)]
        action: ProfilAction,
    },
    User {
        #[command(subcommand)]
        action: UserAction,
    },
    Menu {
        #[command(subcommand)]
        action: MenuAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum TokenAction {
    Set { token: String },
    Clear,
    Status,
}

/// Target of a save: `--id` edits an existing record, otherwise a new one is
/// created. `--contrat` is the parent contract from the navigation context.
#[derive(ClapArgs, Debug, Default)]
pub struct Target {
    #[arg(long)]
    pub id: Option<String>,
    #[arg(long)]
    pub contrat: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ArticleAction {
    Save {
        #[command(flatten)]
        target: Target,
        #[arg(long)]
        titre: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum AvenantAction {
    Save {
        #[command(flatten)]
        target: Target,
        #[arg(long)]
        titre: Option<String>,
        /// Effective date, YYYY-MM-DD.
        #[arg(long)]
        date_effet: Option<NaiveDate>,
        #[arg(long)]
        description: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum MissionAction {
    Save {
        #[command(flatten)]
        target: Target,
        #[arg(long)]
        titre: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        date_debut: Option<NaiveDate>,
        #[arg(long)]
        date_fin: Option<NaiveDate>,
        #[arg(long)]
        statut: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProfilAction {
    List,
    Save {
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        nom: Option<String>,
        #[arg(long)]
        prenom: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        telephone: Option<String>,
        #[arg(long)]
        competences: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum UserAction {
    Show {
        id: String,
    },
    Save {
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        nom: Option<String>,
        #[arg(long)]
        prenom: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
        #[arg(long)]
        profil: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum MenuAction {
    /// All menus with their sub-menus.
    List,
    /// Menus visible to the signed-in user.
    Mine,
    /// Role profiles menus can be scoped to.
    Profiles,
    Create {
        #[arg(long)]
        libelle: String,
        #[arg(long)]
        url: Option<String>,
        #[arg(long)]
        icone: Option<String>,
        #[arg(long)]
        parent: Option<String>,
        #[arg(long = "profil")]
        profils: Vec<String>,
    },
    Delete {
        id: String,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
    DeleteSub {
        id: String,
        #[arg(long)]
        yes: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_article_save_in_create_mode() {
        let args = Args::try_parse_from([
            "hrdash",
            "article",
            "save",
            "--contrat",
            "c1",
            "--titre",
            "Kickoff",
            "--description",
            "Initial sync",
        ])
        .expect("parse");
        match args.command {
            Command::Article {
                action:
                    ArticleAction::Save {
                        target,
                        titre,
                        description,
                    },
            } => {
                assert_eq!(target.id, None);
                assert_eq!(target.contrat.as_deref(), Some("c1"));
                assert_eq!(titre.as_deref(), Some("Kickoff"));
                assert_eq!(description.as_deref(), Some("Initial sync"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_dates_and_rejects_garbage() {
        let args = Args::try_parse_from([
            "hrdash",
            "avenant",
            "save",
            "--id",
            "av1",
            "--date-effet",
            "2026-03-01",
        ])
        .expect("parse");
        match args.command {
            Command::Avenant {
                action: AvenantAction::Save { date_effet, .. },
            } => assert_eq!(date_effet, NaiveDate::from_ymd_opt(2026, 3, 1)),
            other => panic!("unexpected command: {other:?}"),
        }

        assert!(Args::try_parse_from(["hrdash", "avenant", "save", "--date-effet", "soon"]).is_err());
    }

    #[test]
    fn menu_delete_defaults_to_confirmation() {
        let args = Args::try_parse_from(["hrdash", "menu", "delete", "m1"]).expect("parse");
        match args.command {
            Command::Menu {
                action: MenuAction::Delete { id, yes },
            } => {
                assert_eq!(id, "m1");
                assert!(!yes);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
