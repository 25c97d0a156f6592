//! Executes parsed commands against the backend.

use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};
use client_core::{
    dashboard::fetch_counts,
    menus::{create_menu, fetch_auth_profils, fetch_my_menus, flatten_navigation, MenuListView},
    ClientError, EntityForm, FileTokenStore, FormContext, FormEntity, FormMode, ListView, Navigation,
    Notification, NotificationLevel, RestClient, Session, SideEffectStatus, TokenStore,
};
use shared::{
    domain::{AuthProfilId, ContratId, MenuId, SousMenuId, UserId},
    protocol::{Article, Avenant, Mission, NewMenu, Profil, User},
};
use tracing::info;

use crate::cli::{
    ArticleAction, AvenantAction, Command, MenuAction, MissionAction, ProfilAction, Target,
    TokenAction, UserAction,
};

pub struct AppContext {
    pub client: RestClient,
    pub session: Session,
    pub store: FileTokenStore,
}

const LOGIN_HINT: &str = "Session absente ou expirée : lancez `hrdash token set <jeton>`.";

pub async fn run(ctx: &AppContext, command: Command) -> Result<()> {
    let result = dispatch(ctx, command).await;
    if let Some(hint) = result.as_ref().err().and_then(login_hint) {
        eprintln!("{hint}");
    }
    result
}

fn login_hint(err: &anyhow::Error) -> Option<&'static str> {
    err.downcast_ref::<ClientError>()
        .filter(|err| err.is_missing_token())
        .map(|_| LOGIN_HINT)
}

async fn dispatch(ctx: &AppContext, command: Command) -> Result<()> {
    match command {
        Command::Token { action } => run_token(ctx, action).await,
        Command::Dashboard => {
            let counts = fetch_counts(&ctx.client, &ctx.session).await?;
            println!("Utilisateurs            {}", counts.users);
            println!("Offres actives          {}", counts.active_offers);
            println!("Candidatures en attente {}", counts.pending_candidatures);
            println!("Taux d'embauche         {:.1}", counts.hiring_rate);
            Ok(())
        }
        Command::Article {
            action:
                ArticleAction::Save {
                    target,
                    titre,
                    description,
                },
        } => {
            save::<Article>(ctx, target, |article| {
                set(&mut article.titre, titre);
                set(&mut article.description, description);
            })
            .await
        }
        Command::Avenant {
            action:
                AvenantAction::Save {
                    target,
                    titre,
                    date_effet,
                    description,
                },
        } => {
            save::<Avenant>(ctx, target, |avenant| {
                set(&mut avenant.titre, titre);
                set(&mut avenant.description, description);
                if date_effet.is_some() {
                    avenant.date_effet = date_effet;
                }
            })
            .await
        }
        Command::Mission {
            action:
                MissionAction::Save {
                    target,
                    titre,
                    description,
                    date_debut,
                    date_fin,
                    statut,
                },
        } => {
            save::<Mission>(ctx, target, |mission| {
                set(&mut mission.titre, titre);
                set(&mut mission.description, description);
                set(&mut mission.statut, statut);
                if date_debut.is_some() {
                    mission.date_debut = date_debut;
                }
                if date_fin.is_some() {
                    mission.date_fin = date_fin;
                }
            })
            .await
        }
        Command::Profil { action } => run_profil(ctx, action).await,
        Command::User { action } => run_user(ctx, action).await,
        Command::Menu { action } => run_menu(ctx, action).await,
    }
}

fn set(field: &mut String, value: Option<String>) {
    if let Some(value) = value {
        *field = value;
    }
}

async fn run_token(ctx: &AppContext, action: TokenAction) -> Result<()> {
    match action {
        TokenAction::Set { token } => {
            ctx.store.save(&token).await?;
            info!(path = %ctx.store.path().display(), "token: stored");
            println!("Jeton enregistré.");
        }
        TokenAction::Clear => {
            ctx.store.clear().await?;
            println!("Jeton supprimé.");
        }
        TokenAction::Status => {
            if ctx.session.is_authenticated() {
                println!("Authentifié ({}).", ctx.store.path().display());
            } else {
                println!("Aucun jeton enregistré.");
            }
        }
    }
    Ok(())
}

async fn save<E>(ctx: &AppContext, target: Target, apply: impl FnOnce(&mut E)) -> Result<()>
where
    E: FormEntity,
{
    let context = FormContext {
        mode: FormMode::<E::Id>::from_route_param(target.id.as_deref()),
        parent: target.contrat.map(ContratId::from),
    };
    let mut form = EntityForm::<E>::mount(&ctx.client, &ctx.session, context).await?;
    info!(
        entity = E::LABEL,
        id = ?form.mode().id(),
        contrat = ?form.parent(),
        "form: opened"
    );
    form.edit(apply);

    let result = form.submit(&ctx.client, &ctx.session).await;
    print_notifications(form.take_notifications());
    let outcome = result?;

    if let Some(id) = form.mode().id() {
        println!("{} {id}", E::LABEL);
    }
    if let SideEffectStatus::Completed = outcome.side_effect {
        println!("Document du contrat régénéré.");
    }
    match &outcome.navigation {
        Navigation::To(route) => println!("-> {route}"),
        Navigation::Skipped(_) => bail!("{} saved but no destination could be computed", E::LABEL),
    }
    Ok(())
}

async fn run_profil(ctx: &AppContext, action: ProfilAction) -> Result<()> {
    match action {
        ProfilAction::List => {
            let mut view = ListView::<Profil>::new();
            let result = view.load(&ctx.client, &ctx.session).await;
            print_notifications(view.take_notifications());
            result?;
            for profil in view.items() {
                let id = profil.id.as_ref().map(|id| id.to_string()).unwrap_or_default();
                println!("{id:<12} {} {} <{}>", profil.prenom, profil.nom, profil.email);
            }
            Ok(())
        }
        ProfilAction::Save {
            id,
            nom,
            prenom,
            email,
            telephone,
            competences,
        } => {
            let target = Target { id, contrat: None };
            save::<Profil>(ctx, target, |profil| {
                set(&mut profil.nom, nom);
                set(&mut profil.prenom, prenom);
                set(&mut profil.email, email);
                set(&mut profil.telephone, telephone);
                set(&mut profil.competences, competences);
            })
            .await
        }
    }
}

async fn run_user(ctx: &AppContext, action: UserAction) -> Result<()> {
    match action {
        UserAction::Show { id } => {
            let form = EntityForm::<User>::mount(
                &ctx.client,
                &ctx.session,
                FormContext::edit(UserId::from(id)),
            )
            .await?;
            let user = form.fields();
            println!("{} {} <{}>", user.prenom, user.nom, user.email);
            if let Some(profil) = &user.profil_id {
                println!("profil: {profil}");
            }
            Ok(())
        }
        UserAction::Save {
            id,
            nom,
            prenom,
            email,
            password,
            profil,
        } => {
            let target = Target { id, contrat: None };
            save::<User>(ctx, target, |user| {
                set(&mut user.nom, nom);
                set(&mut user.prenom, prenom);
                set(&mut user.email, email);
                if password.is_some() {
                    user.password = password;
                }
                if let Some(profil) = profil {
                    user.profil_id = Some(AuthProfilId::from(profil));
                }
            })
            .await
        }
    }
}

async fn run_menu(ctx: &AppContext, action: MenuAction) -> Result<()> {
    match action {
        MenuAction::List => {
            let view = load_menus(ctx).await?;
            for menu in view.items() {
                println!("{:<10} {}", menu.id, menu.libelle);
                for sous_menu in &menu.sous_menus {
                    println!(
                        "  {:<8} {} {}",
                        sous_menu.id,
                        sous_menu.libelle,
                        sous_menu.url.as_deref().unwrap_or("")
                    );
                }
            }
            Ok(())
        }
        MenuAction::Mine => {
            let menus = fetch_my_menus(&ctx.client, &ctx.session).await?;
            for entry in flatten_navigation(&menus) {
                println!(
                    "{}{} {}",
                    "  ".repeat(entry.depth),
                    entry.libelle,
                    entry.url.as_deref().unwrap_or("")
                );
            }
            Ok(())
        }
        MenuAction::Profiles => {
            for profil in fetch_auth_profils(&ctx.client, &ctx.session).await? {
                println!("{:<12} {}", profil.id, profil.libelle);
            }
            Ok(())
        }
        MenuAction::Create {
            libelle,
            url,
            icone,
            parent,
            profils,
        } => {
            let menu = NewMenu {
                libelle,
                url,
                icone,
                parent_id: parent.map(MenuId::from),
                profil_ids: profils.into_iter().map(AuthProfilId::from).collect(),
            };
            match create_menu(&ctx.client, &ctx.session, &menu).await {
                Ok(_) => {
                    print_notifications(vec![Notification::success("Menu créé")]);
                    Ok(())
                }
                Err(err) => {
                    print_notifications(vec![Notification::from(&err)]);
                    Err(err.into())
                }
            }
        }
        MenuAction::Delete { id, yes } => {
            let mut view = load_menus(ctx).await?;
            let pending = view.request_delete(&MenuId::from(id))?;
            if !confirm(&format!("Supprimer le menu {} ?", pending.id()), yes)? {
                println!("Annulé.");
                return Ok(());
            }
            let result = view.confirm_delete(&ctx.client, &ctx.session, pending).await;
            print_notifications(view.take_notifications());
            Ok(result?)
        }
        MenuAction::DeleteSub { id, yes } => {
            let mut view = load_menus(ctx).await?;
            let pending = view.request_delete_sous_menu(&SousMenuId::from(id))?;
            if !confirm(&format!("Supprimer le sous-menu {} ?", pending.id()), yes)? {
                println!("Annulé.");
                return Ok(());
            }
            let result = view
                .confirm_delete_sous_menu(&ctx.client, &ctx.session, pending)
                .await;
            print_notifications(view.take_notifications());
            Ok(result?)
        }
    }
}

async fn load_menus(ctx: &AppContext) -> Result<MenuListView> {
    let mut view = MenuListView::new();
    let result = view.load(&ctx.client, &ctx.session).await;
    print_notifications(view.take_notifications());
    result?;
    Ok(view)
}

fn confirm(prompt: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }
    print!("{prompt} [o/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(is_affirmative(&answer))
}

fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "o" | "oui" | "y" | "yes"
    )
}

fn print_notifications(notifications: Vec<Notification>) {
    for notification in notifications {
        let tag = match notification.level {
            NotificationLevel::Success => "ok",
            NotificationLevel::Warning => "attention",
            NotificationLevel::Error => "erreur",
        };
        if notification.is_error() {
            eprintln!("[{tag}] {}", notification.message);
        } else {
            println!("[{tag}] {}", notification.message);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_french_and_english_confirmations() {
        assert!(is_affirmative("o\n"));
        assert!(is_affirmative(" Oui "));
        assert!(is_affirmative("yes"));
        assert!(!is_affirmative(""));
        assert!(!is_affirmative("non"));
    }

    #[test]
    fn set_only_overwrites_provided_values() {
        let mut field = "kept".to_string();
        set(&mut field, None);
        assert_eq!(field, "kept");
        set(&mut field, Some("new".into()));
        assert_eq!(field, "new");
    }

    #[test]
    fn login_hint_only_for_missing_token() {
        let missing = anyhow::Error::new(ClientError::MissingToken);
        assert_eq!(login_hint(&missing), Some(LOGIN_HINT));

        let other = anyhow::Error::new(ClientError::Precondition("trop tôt".into()));
        assert_eq!(login_hint(&other), None);
        assert_eq!(login_hint(&anyhow::anyhow!("io")), None);
    }

    #[test]
    fn confirmation_is_skipped_with_yes_flag() {
        assert!(confirm("unused", true).expect("confirm"));
    }
}
