//! `bw-cli login`.

use secrecy::{ExposeSecret, SecretString};

use bluewater_admin::api::ApiClients;

use super::CliError;

/// Sign in and print the bearer token on stdout.
#[allow(clippy::print_stdout)]
pub async fn login(
    clients: &ApiClients,
    email: &str,
    password: SecretString,
) -> Result<(), CliError> {
    tracing::info!("Signing in as {email}...");
    let admin = clients
        .auth()
        .login(email, password.expose_secret())
        .await?;

    tracing::info!("Signed in as {} (id {})", admin.name, admin.id);
    println!("{}", admin.token.expose());
    Ok(())
}
