use crate::clients::{AccountClient, MenuClient, OrderClient};
use crate::config::Config;
use crate::{account_actor, menu_actor, order_actor};
use tokio::task::JoinHandle;
use tracing::{error, info};

/// The running marketplace: one actor per store plus their clients.
pub struct Marketplace {
    pub account_client: AccountClient,
    pub menu_client: MenuClient,
    pub order_client: OrderClient,
    handles: Vec<JoinHandle<()>>,
}

impl Marketplace {
    /// Creates and starts all actors. Must be called inside a Tokio runtime.
    pub fn new(config: &Config) -> Self {
        info!(buffer = config.actor_buffer, "Starting marketplace actors");

        let (account_actor, account_client) = account_actor::new(config.actor_buffer);
        let account_client = account_client.with_password_cost(config.password_cost);
        let (menu_actor, menu_client) = menu_actor::new(config.actor_buffer);
        let (order_actor, order_client) =
            order_actor::new(config.actor_buffer, account_client.clone());

        let handles = vec![
            tokio::spawn(account_actor.run(config.email_namespace)),
            tokio::spawn(menu_actor.run(())),
            tokio::spawn(order_actor.run((account_client.clone(), menu_client.clone()))),
        ];

        Self {
            account_client,
            menu_client,
            order_client,
            handles,
        }
    }

    /// Drops the clients and waits for every actor to stop. Every handle is
    /// awaited even if one fails; the first failure is reported.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down marketplace");
        let Self {
            account_client,
            menu_client,
            order_client,
            handles,
        } = self;
        drop(order_client);
        drop(menu_client);
        drop(account_client);

        join_all(handles).await?;
        info!("Marketplace stopped");
        Ok(())
    }
}

async fn join_all(handles: Vec<JoinHandle<()>>) -> Result<(), String> {
    let mut first_failure = None;
    for handle in handles {
        if let Err(e) = handle.await {
            error!("Actor task failed: {e}");
            first_failure.get_or_insert(format!("Actor task failed: {e}"));
        }
    }
    first_failure.map_or(Ok(()), Err)
}
