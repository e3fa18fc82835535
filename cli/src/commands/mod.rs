//! CLI Commands

pub mod auth;
pub mod prospections;
pub mod questions;

use std::sync::Arc;

use prospec_client::{FileStorage, Gateway, MemoryStorage, Session};
use prospec_core::{Navigator, Role, View};

use crate::config::Config;
use crate::output::OutputFormat;

/// Shared command context: the restored session behind a gateway, plus the
/// requested output format.
pub struct Context {
    pub gateway: Gateway,
    pub format: OutputFormat,
}

impl Context {
    pub fn new(api_url: &str, format: OutputFormat) -> Self {
        let session = match FileStorage::default_dir() {
            Some(storage) => Session::restore(Box::new(storage)),
            None => Session::new(Box::new(MemoryStorage::new())),
        };
        Self {
            gateway: Gateway::new(api_url, Arc::new(session)),
            format,
        }
    }

    pub fn role(&self) -> Option<Role> {
        self.gateway.session().identity().map(|i| i.role)
    }

    /// Navigation gate: returns whether the current role may enter the view.
    /// An unauthorized view is not an error; the command tells the role what
    /// it is offered and does nothing, like the dashboard staying on its
    /// overview. Only a missing login is an error.
    pub fn enter(&self, view: View) -> Result<bool, String> {
        let Some(role) = self.role() else {
            return Err("Veuillez vous connecter d'abord (prospec login)".to_string());
        };
        let mut navigator = Navigator::new(role);
        if navigator.go_to(view) {
            return Ok(true);
        }
        let offered: Vec<&str> = navigator.available_views().iter().map(|v| v.label()).collect();
        println!(
            "Vue non disponible pour le rôle {}. Vues accessibles: {}",
            role.display_name(),
            offered.join(", ")
        );
        Ok(false)
    }
}

pub fn config_show(config: &Config) -> Result<(), String> {
    println!(
        "api_url = {}",
        config.api_url.as_deref().unwrap_or("(non défini)")
    );
    Ok(())
}

pub fn config_set_url(mut config: Config, url: String) -> Result<(), String> {
    config.api_url = Some(url);
    config.save()?;
    println!("Configuration enregistrée");
    Ok(())
}
