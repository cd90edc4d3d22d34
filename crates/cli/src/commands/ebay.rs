//! `bw-cli ebay status` and `bw-cli ebay sync`.

use bluewater_admin::{
    api::ApiClients,
    services::{probe_connection, run_sync},
};

use super::{CliError, SessionArgs};

/// Print the eBay connection state.
#[allow(clippy::print_stdout)]
pub async fn status(clients: &ApiClients, auth: &SessionArgs) {
    let connection = probe_connection(&clients.ebay(&auth.credentials())).await;
    println!("{}", connection.label());
}

/// Run the product sync, printing one line per page.
#[allow(clippy::print_stdout)]
pub async fn sync(clients: &ApiClients, auth: &SessionArgs) -> Result<(), CliError> {
    let ebay = clients.ebay(&auth.credentials());
    let report = run_sync(&ebay, |progress| println!("{progress}")).await?;
    println!("{}", report.summary());
    Ok(())
}
