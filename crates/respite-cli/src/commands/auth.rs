use clap::Subcommand;
use respite_core::integrations::{KeyringTokenStore, TokenStore};
use respite_core::playback::PlaybackController;
use respite_core::storage::Store;

#[derive(Subcommand)]
pub enum AuthAction {
    /// Open the authorization page in the browser
    Login,
    /// Complete authorization with the redirect URL the browser landed on
    Callback { redirect: String },
    /// Show whether a credential is held
    Status,
    /// Forget the stored credential
    Logout,
}

pub fn run(action: AuthAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        AuthAction::Login => {
            let store = Store::open()?;
            let controller = PlaybackController::new(Box::new(KeyringTokenStore));
            controller.begin_authorization(&store.client_id()?)?;
            println!("authorization page opened in your browser.");
            println!("after approving, paste the address you were redirected to:");
            println!("  respite-cli auth callback '<redirect url>'");
        }
        AuthAction::Callback { redirect } => {
            let mut controller = PlaybackController::new(Box::new(KeyringTokenStore));
            if controller.complete_authorization(&redirect) {
                println!("authorized.");
            } else {
                println!("no access token found in that redirect; nothing stored.");
            }
        }
        AuthAction::Status => {
            if KeyringTokenStore.load().is_some() {
                println!("authorized");
            } else {
                println!("not authorized");
            }
        }
        AuthAction::Logout => {
            let mut controller = PlaybackController::new(Box::new(KeyringTokenStore));
            controller.disconnect();
            println!("credential cleared.");
        }
    }
    Ok(())
}
