//! # HomeGuard Store demo
//!
//! Starts the store with the in-memory payment gateway and walks one shopper
//! through a cash-on-delivery order and an online order.

use homeguard_store::config::StoreConfig;
use homeguard_store::lifecycle::tracing::setup_tracing;
use homeguard_store::lifecycle::StoreSystem;
use homeguard_store::model::{AddressForm, Category, OrderStatus, PaymentMethod, ProductCreate, UserCreate};
use homeguard_store::payment::InMemoryGateway;
use homeguard_store::session::Session;
use rust_decimal::Decimal;
use std::sync::Arc;
use tracing::{error, info, Instrument};

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = StoreConfig::load().map_err(|e| e.to_string())?;
    setup_tracing(&config.log_level);

    info!("Starting HomeGuard store");
    let gateway = Arc::new(InMemoryGateway::new());
    let system = StoreSystem::new(config, gateway.clone());

    let span = tracing::info_span!("setup");
    let (staff, shopper, bulb, lock) = async {
        let admin = system
            .users
            .register(UserCreate::staff("admin", "admin@homeguard.in"))
            .await
            .map_err(|e| e.to_string())?;
        let alice = system
            .users
            .register(UserCreate::customer("alice", "alice@example.com"))
            .await
            .map_err(|e| e.to_string())?;
        let staff = Session::staff(admin.id);

        let bulb = system
            .catalog
            .create_product(
                &staff,
                ProductCreate::new("Smart Bulb", Category::Lighting, Decimal::from(100), 5)
                    .with_offer(Decimal::from(80)),
            )
            .await
            .map_err(|e| e.to_string())?;
        let lock = system
            .catalog
            .create_product(
                &staff,
                ProductCreate::new("Door Lock", Category::Security, Decimal::from(50), 1)
                    .with_warranty("1 year"),
            )
            .await
            .map_err(|e| e.to_string())?;

        Ok::<_, String>((staff, Session::customer(alice.id), bulb, lock))
    }
    .instrument(span)
    .await?;

    let span = tracing::info_span!("checkout");
    let order = async {
        let address = system
            .addresses
            .add(
                &shopper,
                AddressForm::new("Alice", "12 MG Road, Bengaluru", "560001", "9876543210"),
            )
            .await
            .map_err(|e| e.to_string())?;

        for product in [bulb, bulb, lock] {
            system
                .carts
                .add_item(&shopper, product)
                .await
                .map_err(|e| e.to_string())?;
        }

        let view = system
            .checkout
            .prepare(&shopper)
            .await
            .map_err(|e| e.to_string())?;
        info!(total = %view.total, items = view.item_count, "Checkout ready");

        system
            .orders
            .place_order(&shopper, address.id, PaymentMethod::Cod, None)
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await?;
    info!(order_id = %order.id, total = %order.total_price, status = %order.status, "COD order placed");

    // Online: the shopper pays against the checkout's intent, then submits
    // the gateway reference with the order.
    let span = tracing::info_span!("online_checkout");
    let online = async {
        system
            .carts
            .add_item(&shopper, bulb)
            .await
            .map_err(|e| e.to_string())?;
        let view = system
            .checkout
            .prepare(&shopper)
            .await
            .map_err(|e| e.to_string())?;
        let intent = view
            .payment_intent
            .ok_or_else(|| "no payment intent for a payable cart".to_string())?;
        gateway.capture(intent.intent_id.clone(), intent.amount_minor, &intent.currency);

        system
            .orders
            .place_order(
                &shopper,
                order.address_id,
                PaymentMethod::Online,
                Some(intent.intent_id),
            )
            .await
            .map_err(|e| e.to_string())
    }
    .instrument(span)
    .await;
    match online {
        Ok(order) => info!(order_id = %order.id, status = %order.status, "Online order placed"),
        Err(e) => error!(error = %e, "Online order failed"),
    }

    if let Err(e) = system.carts.add_item(&shopper, lock).await {
        info!(error = %e, "Door lock is sold out");
    }

    match system
        .orders
        .update_status(&staff, order.id, OrderStatus::Confirmed)
        .await
    {
        Ok(order) => info!(order_id = %order.id, status = %order.status, "Order confirmed"),
        Err(e) => error!(error = %e, "Status update failed"),
    }

    let remaining = system
        .catalog
        .check_stock(bulb)
        .await
        .map_err(|e| e.to_string())?;
    info!(product_id = %bulb, remaining, "Stock after checkout");

    system.shutdown().await?;
    info!("Store stopped");
    Ok(())
}
