use crate::cart_actor::CartContext;
use crate::clients::{
    AddressClient, CartClient, CatalogClient, CheckoutService, OrderClient, UserClient,
};
use crate::config::StoreConfig;
use crate::model::IdSequence;
use crate::order_actor::OrderContext;
use crate::user_actor::UserContext;
use crate::payment::PaymentGateway;
use crate::{address_actor, cart_actor, catalog_actor, order_actor, user_actor};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{error, info};

/// The running storefront: one task per actor and the clients to reach them.
///
/// ```rust,ignore
/// let system = StoreSystem::new(StoreConfig::load()?, Arc::new(InMemoryGateway::new()));
///
/// let alice = system.users.register(UserCreate::customer("alice", "alice@example.com")).await?;
/// let session = Session::customer(alice.id);
/// system.carts.add_item(&session, product_id).await?;
/// let order = system.orders.place_order(&session, address_id, PaymentMethod::Cod, None).await?;
///
/// system.shutdown().await?;
/// ```
pub struct StoreSystem {
    pub catalog: CatalogClient,
    pub carts: CartClient,
    pub addresses: AddressClient,
    pub orders: OrderClient,
    pub users: UserClient,
    pub checkout: CheckoutService,

    /// Task handles in shutdown order (dependents before dependencies).
    handles: Vec<JoinHandle<()>>,
}

impl StoreSystem {
    /// Spawns every actor. Must be called inside a Tokio runtime.
    pub fn new(config: StoreConfig, gateway: Arc<dyn PaymentGateway>) -> Self {
        let config = Arc::new(config);
        let mailbox = config.mailbox_size.max(1);

        // 1. Create actors
        let (catalog_actor, catalog) = catalog_actor::new(mailbox);
        let (address_actor, addresses) = address_actor::new(mailbox);
        let (cart_actor, carts) = cart_actor::new(mailbox);
        let (user_actor, users) = user_actor::new(mailbox);
        let (order_actor, orders) = order_actor::new(mailbox);

        // 2. Start them with their dependencies
        let catalog_handle = tokio::spawn(catalog_actor.run(()));
        let address_handle = tokio::spawn(address_actor.run(IdSequence::default()));
        let cart_handle = tokio::spawn(
            cart_actor.run(CartContext::new(catalog.clone(), IdSequence::default())),
        );
        let user_handle = tokio::spawn(user_actor.run(UserContext {
            carts: carts.clone(),
            addresses: addresses.clone(),
        }));
        let order_handle = tokio::spawn(order_actor.run(OrderContext {
            carts: carts.clone(),
            catalog: catalog.clone(),
            addresses: addresses.clone(),
            gateway: gateway.clone(),
            config: config.clone(),
        }));

        let checkout = CheckoutService::new(carts.clone(), addresses.clone(), gateway, config);
        info!(mailbox, "Store system started");

        Self {
            catalog,
            carts,
            addresses,
            orders,
            users,
            checkout,
            handles: vec![
                order_handle,
                user_handle,
                cart_handle,
                address_handle,
                catalog_handle,
            ],
        }
    }

    /// Drops every client and waits for the actors to drain.
    ///
    /// Actors exit once all clients of their mailbox are gone, including the
    /// clones other actors hold in their context, so the order and user actors
    /// stop first and the catalog last.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down store...");

        drop(self.checkout);
        drop(self.orders);
        drop(self.users);
        drop(self.carts);
        drop(self.addresses);
        drop(self.catalog);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("Store shutdown complete.");
        Ok(())
    }
}
