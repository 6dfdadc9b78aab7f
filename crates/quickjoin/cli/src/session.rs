//! Login flow

use crate::error::{CliError, CliResult};
use dialoguer::Input;
use quickjoin_client::{LoginState, PlatformClient, TwoFactorMethod};
use quickjoin_types::CurrentUser;
use tracing::{info, warn};

/// Log in, verifying a second factor when the platform asks for one.
///
/// `code` is used for the first verification attempt; without it the user is
/// prompted.
pub async fn login(
    client: &PlatformClient,
    code: Option<&str>,
    totp_secret_configured: bool,
) -> CliResult<CurrentUser> {
    info!("Logging in");
    let user = match client.login().await? {
        LoginState::LoggedIn(user) => user,
        LoginState::TwoFactorRequired(methods) => {
            let method = LoginState::preferred_method(&methods).ok_or_else(|| {
                CliError::Auth("no supported second factor offered".to_string())
            })?;
            if method == TwoFactorMethod::Totp && totp_secret_configured {
                warn!("TOTPSecret is set but codes are not generated; enter the code manually");
            }

            let code = match code {
                Some(code) => code.to_string(),
                None => prompt_code(method)?,
            };
            if !client.verify_two_factor(method, &code).await? {
                return Err(CliError::Auth(format!("{} was rejected", method)));
            }
            info!(%method, "Second factor verified");
            client.current_user().await?
        }
    };

    info!(user = %user.display_name, id = %user.id, "Logged in");
    Ok(user)
}

fn prompt_code(method: TwoFactorMethod) -> CliResult<String> {
    let code: String = Input::new()
        .with_prompt(format!("Enter {}", method))
        .interact_text()?;
    Ok(code)
}

/// Block until the user presses Enter
pub fn wait_for_enter() -> CliResult<()> {
    let _: String = Input::new()
        .with_prompt("Press Enter to exit")
        .allow_empty(true)
        .interact_text()?;
    Ok(())
}
