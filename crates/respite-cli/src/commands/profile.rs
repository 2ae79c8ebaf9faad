use std::io::Write;

use clap::Subcommand;
use respite_core::storage::{Store, DEFAULT_CLIENT_ID};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the stored profile
    Show,
    /// Set the display name
    SetName { name: String },
    /// Set a custom streaming client id
    SetClientId { client_id: String },
}

pub fn run(action: ProfileAction) -> Result<(), Box<dyn std::error::Error>> {
    let store = Store::open()?;
    match action {
        ProfileAction::Show => {
            match store.user_name()? {
                Some(name) => println!("name: {name}"),
                None => println!("name: (not set -- run `respite-cli run` to onboard)"),
            }
            let client_id = store.client_id()?;
            if client_id == DEFAULT_CLIENT_ID {
                println!("client id: {client_id} (default)");
            } else {
                println!("client id: {client_id}");
            }
        }
        ProfileAction::SetName { name } => {
            let name = name.trim();
            if name.is_empty() {
                return Err("name must not be empty".into());
            }
            store.set_user_name(name)?;
            println!("name set to {name}");
        }
        ProfileAction::SetClientId { client_id } => {
            store.set_client_id(client_id.trim())?;
            println!("client id updated");
        }
    }
    Ok(())
}

/// Onboarding gate: everything else waits until a name is stored.
/// Prompts on stdin the first time and persists the answers.
pub fn ensure(store: &Store) -> Result<String, Box<dyn std::error::Error>> {
    if let Some(name) = store.user_name()? {
        return Ok(name);
    }

    let stdin = std::io::stdin();
    let name = loop {
        print!("your name: ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        stdin.read_line(&mut line)?;
        let name = line.trim();
        if !name.is_empty() {
            break name.to_string();
        }
    };
    store.set_user_name(&name)?;

    print!("streaming client id (leave blank for the default): ");
    std::io::stdout().flush()?;
    let mut line = String::new();
    stdin.read_line(&mut line)?;
    let client_id = line.trim();
    if !client_id.is_empty() {
        store.set_client_id(client_id)?;
    }

    Ok(name)
}
