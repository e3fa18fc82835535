//! Authentication and registration commands

use colored::Colorize;

use prospec_client::{AuthService, RegisterRequest, StructureService};
use prospec_core::{HierarchySelection, Navigator, Role};

use super::Context;

pub async fn login(ctx: &Context, email: &str, password: &str) -> Result<(), String> {
    let identity = AuthService::new(&ctx.gateway)
        .login(email, password)
        .await
        .map_err(|e| e.to_string())?;

    println!(
        "{} {} {} ({})",
        "Bienvenue,".green(),
        identity.first_name,
        identity.last_name,
        identity.role_display_name
    );
    let navigator = Navigator::new(identity.role);
    for view in navigator.available_views() {
        println!("  - {}", view.label());
    }
    Ok(())
}

pub struct RegisterArgs {
    pub nom: String,
    pub prenom: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub region_id: Option<u64>,
    pub supervision_id: Option<u64>,
    pub branche_id: Option<u64>,
}

pub async fn register(ctx: &Context, args: RegisterArgs) -> Result<(), String> {
    let role: Role = serde_json::from_value(serde_json::Value::String(args.role.clone()))
        .map_err(|_| format!("Rôle inconnu: {}", args.role))?;

    // the parent chain must be selected in order, like the cascading form
    let mut selection = HierarchySelection::new();
    selection.select_region(args.region_id);
    if let Some(supervision_id) = args.supervision_id {
        if !selection.select_supervision(Some(supervision_id)) {
            return Err("Une supervision nécessite une région".to_string());
        }
    }
    if let Some(branche_id) = args.branche_id {
        if !selection.select_branch(Some(branche_id)) {
            return Err("Une branche nécessite une supervision".to_string());
        }
    }
    if !selection.satisfies(role) {
        return Err(format!(
            "Le rôle {} nécessite une sélection hiérarchique complète",
            role.display_name()
        ));
    }

    let request = RegisterRequest {
        last_name: args.nom,
        first_name: args.prenom,
        email: args.email,
        password: args.password,
        role,
        region_id: args.region_id,
        supervision_id: args.supervision_id,
        branch_id: args.branche_id,
    };
    let message = AuthService::new(&ctx.gateway)
        .register(&request)
        .await
        .map_err(|e| e.to_string())?;
    println!("{}", message.green());
    Ok(())
}

pub async fn logout(ctx: &Context) -> Result<(), String> {
    AuthService::new(&ctx.gateway).logout().await;
    println!("Déconnexion effectuée");
    Ok(())
}

pub fn whoami(ctx: &Context) -> Result<(), String> {
    let session = ctx.gateway.session();
    let Some(identity) = session.identity() else {
        println!("Non connecté");
        return Ok(());
    };
    if ctx.format.is_json() {
        ctx.format.print_json(&identity);
        return Ok(());
    }
    println!(
        "{} {} <{}> — {}",
        identity.first_name, identity.last_name, identity.email, identity.role_display_name
    );
    let navigator = Navigator::new(identity.role);
    for view in navigator.available_views() {
        println!("  - {}", view.label());
    }
    Ok(())
}

pub async fn regions(ctx: &Context) -> Result<(), String> {
    let regions = StructureService::new(&ctx.gateway)
        .regions()
        .await
        .map_err(|e| e.to_string())?;
    if ctx.format.is_json() {
        ctx.format.print_json(&regions);
        return Ok(());
    }
    for region in regions {
        println!("{:>4}  {} ({})", region.id, region.name, region.code);
    }
    Ok(())
}

pub async fn supervisions(ctx: &Context, region_id: u64) -> Result<(), String> {
    let supervisions = StructureService::new(&ctx.gateway)
        .supervisions(region_id)
        .await
        .map_err(|e| e.to_string())?;
    if ctx.format.is_json() {
        ctx.format.print_json(&supervisions);
        return Ok(());
    }
    for supervision in supervisions {
        println!("{:>4}  {} ({})", supervision.id, supervision.name, supervision.code);
    }
    Ok(())
}

pub async fn branches(ctx: &Context, supervision_id: u64) -> Result<(), String> {
    let branches = StructureService::new(&ctx.gateway)
        .branches(supervision_id)
        .await
        .map_err(|e| e.to_string())?;
    if ctx.format.is_json() {
        ctx.format.print_json(&branches);
        return Ok(());
    }
    for branche in branches {
        println!("{:>4}  {} ({})", branche.id, branche.name, branche.code);
    }
    Ok(())
}
