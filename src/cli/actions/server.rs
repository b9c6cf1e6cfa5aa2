use crate::{
    cli::{actions::Action, globals::GlobalArgs},
    eniro,
};
use anyhow::Result;
use secrecy::SecretString;
use url::Url;

/// Handle the server action
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server {
            port,
            dsn,
            gateway_url,
            gateway_token,
        } => {
            // Reject malformed DSNs before a pool ever dials out
            let dsn = Url::parse(&dsn)?.to_string();

            let mut globals = GlobalArgs::new(gateway_url);

            if let Some(token) = gateway_token {
                globals.set_token(SecretString::from(token));
            }

            eniro::new(port, dsn, &globals).await?;
        }
    }

    Ok(())
}
