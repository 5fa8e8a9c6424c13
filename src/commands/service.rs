use anyhow::{anyhow, Result};
use clap::Subcommand;
use dialoguer::{Input, Password, Select};

use crate::config::{load_services, save_services, ServiceConfig};

#[derive(Subcommand, Debug)]
pub enum ServiceCommands {
    /// List saved services
    List,
    /// Add a service entry (interactive)
    Add { name: String },
    /// Remove a service entry by name
    Remove { name: String },
}

pub fn run(cmd: ServiceCommands) -> Result<()> {
    let mut file = load_services()?;

    match cmd {
        ServiceCommands::List => {
            if file.services.is_empty() {
                println!("(no services configured)");
            } else {
                for (name, svc) in &file.services {
                    println!(" - {} → {} (auth={})", name, svc.url, auth_kind(svc));
                }
            }
        }
        ServiceCommands::Add { name } => {
            if file.services.contains_key(&name) {
                return Err(anyhow!("service '{}' already exists", name));
            }
            let url: String = Input::new().with_prompt("Redmine base URL").interact_text()?;

            let auth_options = vec!["api key", "username/password"];
            let selection = Select::new()
                .with_prompt("Auth style")
                .items(&auth_options)
                .default(0)
                .interact()?;

            let svc = match auth_options[selection] {
                "api key" => ServiceConfig {
                    url,
                    key: Some(Input::new().with_prompt("API key").interact_text()?),
                    user: None,
                    password: None,
                },
                _ => {
                    let user: String = Input::new().with_prompt("Username").interact_text()?;
                    let password = Password::new()
                        .with_prompt("Password (leave empty to be prompted at run time)")
                        .allow_empty_password(true)
                        .interact()?;
                    ServiceConfig {
                        url,
                        key: None,
                        user: Some(user),
                        password: if password.is_empty() {
                            None
                        } else {
                            Some(password)
                        },
                    }
                }
            };
            file.services.insert(name.clone(), svc);
            save_services(&file)?;
            println!("✅ Added service '{name}'");
        }
        ServiceCommands::Remove { name } => {
            if file.services.remove(&name).is_none() {
                println!("no such service '{name}'");
            } else {
                save_services(&file)?;
                println!("removed '{name}'");
            }
        }
    }

    Ok(())
}

fn auth_kind(svc: &ServiceConfig) -> &'static str {
    match (&svc.key, &svc.user) {
        (Some(_), _) => "key",
        (None, Some(_)) => "login",
        (None, None) => "prompt",
    }
}
