//! Whole-store scenarios against real actors wired by `StoreSystem`.

use homeguard_store::address_actor::AddressError;
use homeguard_store::cart_actor::CartError;
use homeguard_store::catalog_actor::CatalogError;
use homeguard_store::config::StoreConfig;
use homeguard_store::lifecycle::StoreSystem;
use homeguard_store::model::{
    AddressForm, AddressId, Category, OrderStatus, PaymentMethod, ProductCreate, ProductId,
    ProductSort, ProductUpdate, UserCreate,
};
use homeguard_store::order_actor::OrderError;
use homeguard_store::payment::InMemoryGateway;
use homeguard_store::session::Session;
use homeguard_store::user_actor::UserError;
use rust_decimal::Decimal;
use std::sync::Arc;

struct Store {
    system: StoreSystem,
    gateway: Arc<InMemoryGateway>,
    staff: Session,
}

impl Store {
    async fn start() -> Self {
        let gateway = Arc::new(InMemoryGateway::new());
        let system = StoreSystem::new(StoreConfig::default(), gateway.clone());
        let admin = system
            .users
            .register(UserCreate::staff("admin", "admin@homeguard.in"))
            .await
            .unwrap();
        Self {
            system,
            gateway,
            staff: Session::staff(admin.id),
        }
    }

    async fn shopper(&self, username: &str) -> (Session, AddressId) {
        let user = self
            .system
            .users
            .register(UserCreate::customer(username, format!("{username}@example.com")))
            .await
            .unwrap();
        let session = Session::customer(user.id);
        let address = self
            .system
            .addresses
            .add(
                &session,
                AddressForm::new(username, "12 MG Road, Bengaluru", "560001", "9876543210"),
            )
            .await
            .unwrap();
        (session, address.id)
    }

    async fn product(&self, name: &str, price: i64, offer: Option<i64>, stock: u32) -> ProductId {
        let mut params = ProductCreate::new(name, Category::Security, Decimal::from(price), stock);
        if let Some(offer) = offer {
            params = params.with_offer(Decimal::from(offer));
        }
        self.system
            .catalog
            .create_product(&self.staff, params)
            .await
            .unwrap()
    }

    async fn add(&self, session: &Session, product: ProductId, times: u32) {
        for _ in 0..times {
            self.system.carts.add_item(session, product).await.unwrap();
        }
    }
}

#[tokio::test]
async fn test_cod_checkout_end_to_end() {
    let store = Store::start().await;
    let x = store.product("Camera X", 100, Some(80), 5).await;
    let y = store.product("Sensor Y", 50, None, 1).await;
    let (alice, home) = store.shopper("alice").await;

    store.add(&alice, x, 2).await;
    store.add(&alice, y, 1).await;
    assert_eq!(store.system.carts.total(&alice).await.unwrap(), Decimal::from(210));

    let order = store
        .system
        .orders
        .place_order(&alice, home, PaymentMethod::Cod, None)
        .await
        .unwrap();

    assert_eq!(order.total_price, Decimal::from(210));
    assert_eq!(order.status, OrderStatus::Pending);
    assert_eq!(store.system.catalog.check_stock(x).await.unwrap(), 3);
    assert_eq!(store.system.catalog.check_stock(y).await.unwrap(), 0);
    assert!(store.system.carts.contents(&alice).await.unwrap().is_empty());

    let history = store.system.orders.orders_for(&alice).await.unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].items.len(), 2);

    store.system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_last_unit_goes_to_exactly_one_buyer() {
    let store = Store::start().await;
    let lock = store.product("Door Lock", 50, None, 1).await;
    let (alice, alice_home) = store.shopper("alice").await;
    let (bob, bob_home) = store.shopper("bobby").await;
    store.add(&alice, lock, 1).await;
    store.add(&bob, lock, 1).await;

    let orders = store.system.orders.clone();
    let (a, b) = tokio::join!(
        orders.place_order(&alice, alice_home, PaymentMethod::Cod, None),
        orders.place_order(&bob, bob_home, PaymentMethod::Cod, None),
    );

    let (won, lost) = match (a, b) {
        (Ok(_), Err(e)) => (&alice, e),
        (Err(e), Ok(_)) => (&bob, e),
        other => panic!("expected exactly one winner, got {other:?}"),
    };
    assert!(matches!(lost, OrderError::InsufficientStock { available: 0, .. }));
    assert_eq!(store.system.catalog.check_stock(lock).await.unwrap(), 0);
    assert_eq!(store.system.orders.orders_for(won).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_order_prices_survive_catalog_changes() {
    let store = Store::start().await;
    let cam = store.product("Camera", 100, Some(80), 5).await;
    let (alice, home) = store.shopper("alice").await;
    store.add(&alice, cam, 1).await;

    let order = store
        .system
        .orders
        .place_order(&alice, home, PaymentMethod::Cod, None)
        .await
        .unwrap();

    store
        .system
        .catalog
        .update_product(
            &store.staff,
            cam,
            ProductUpdate {
                price: Some(Decimal::from(150)),
                offer_price: Some(None),
                ..ProductUpdate::default()
            },
        )
        .await
        .unwrap();

    let stored = store
        .system
        .orders
        .order_detail(&alice, order.id)
        .await
        .unwrap();
    assert_eq!(stored.items[0].price, Decimal::from(80));
    assert_eq!(stored.total_price, Decimal::from(80));
}

#[tokio::test]
async fn test_cart_rules() {
    let store = Store::start().await;
    let cam = store.product("Camera", 100, None, 2).await;
    let gone = store.product("Siren", 30, None, 0).await;
    let (alice, _) = store.shopper("alice").await;

    let err = store.system.carts.add_item(&alice, gone).await.unwrap_err();
    assert_eq!(err, CartError::OutOfStock(gone));

    store.add(&alice, cam, 2).await;
    let err = store.system.carts.add_item(&alice, cam).await.unwrap_err();
    assert!(matches!(err, CartError::StockLimitReached { stock: 2, .. }));

    let line = store.system.carts.contents(&alice).await.unwrap().lines[0].item_id;
    let left = store.system.carts.decrement_item(&alice, line).await.unwrap();
    assert_eq!(left.map(|item| item.quantity), Some(1));
    let left = store.system.carts.decrement_item(&alice, line).await.unwrap();
    assert!(left.is_none());
    assert!(store.system.carts.contents(&alice).await.unwrap().is_empty());

    store.add(&alice, cam, 1).await;
    store.system.carts.clear(&alice).await.unwrap();
    assert_eq!(store.system.carts.total(&alice).await.unwrap(), Decimal::ZERO);

    let err = store
        .system
        .carts
        .add_item(&Session::anonymous(), cam)
        .await
        .unwrap_err();
    assert_eq!(err, CartError::Unauthenticated);
}

#[tokio::test]
async fn test_addresses_default_and_protection() {
    let store = Store::start().await;
    let cam = store.product("Camera", 100, None, 5).await;
    let (alice, home) = store.shopper("alice").await;
    let office = store
        .system
        .addresses
        .add(
            &alice,
            AddressForm::new("Alice", "Tech Park, Whitefield", "560066", "9876543210"),
        )
        .await
        .unwrap();

    store.system.addresses.set_default(&alice, home).await.unwrap();
    store.system.addresses.set_default(&alice, office.id).await.unwrap();
    let all = store.system.addresses.list(&alice).await.unwrap();
    let defaults: Vec<_> = all.iter().filter(|a| a.is_default).map(|a| a.id).collect();
    assert_eq!(defaults, vec![office.id]);

    store.add(&alice, cam, 1).await;
    store
        .system
        .orders
        .place_order(&alice, home, PaymentMethod::Cod, None)
        .await
        .unwrap();

    let err = store.system.addresses.remove(&alice, home).await.unwrap_err();
    assert_eq!(err, AddressError::Protected(home));
    store.system.addresses.remove(&alice, office.id).await.unwrap();

    let err = store
        .system
        .catalog
        .delete_product(&store.staff, cam)
        .await
        .unwrap_err();
    assert_eq!(err, CatalogError::Protected(cam));
}

#[tokio::test]
async fn test_failed_payments_leave_everything_in_place() {
    let store = Store::start().await;
    let cam = store.product("Camera", 100, None, 3).await;
    let (alice, home) = store.shopper("alice").await;
    store.add(&alice, cam, 2).await;

    let err = store
        .system
        .orders
        .place_order(&alice, home, PaymentMethod::Online, None)
        .await
        .unwrap_err();
    assert_eq!(err, OrderError::PaymentRequired);

    let err = store
        .system
        .orders
        .place_order(&alice, home, PaymentMethod::Online, Some("pay_never".into()))
        .await
        .unwrap_err();
    assert!(matches!(err, OrderError::PaymentDeclined(_)));

    assert_eq!(store.system.catalog.check_stock(cam).await.unwrap(), 3);
    assert_eq!(store.system.carts.contents(&alice).await.unwrap().item_count(), 2);
    assert!(store.system.orders.orders_for(&alice).await.unwrap().is_empty());
    // The address pin was released too.
    store.system.addresses.remove(&alice, home).await.unwrap();
}

#[tokio::test]
async fn test_online_checkout_with_captured_intent() {
    let store = Store::start().await;
    let cam = store.product("Camera", 100, Some(80), 3).await;
    let (alice, home) = store.shopper("alice").await;
    store.add(&alice, cam, 2).await;

    let view = store.system.checkout.prepare(&alice).await.unwrap();
    assert_eq!(view.total, Decimal::from(160));
    assert_eq!(view.addresses.len(), 1);
    let intent = view.payment_intent.unwrap();
    assert_eq!(intent.amount_minor, 16_000);
    store
        .gateway
        .capture(intent.intent_id.clone(), intent.amount_minor, &intent.currency);

    let order = store
        .system
        .orders
        .place_order(&alice, home, PaymentMethod::Online, Some(intent.intent_id))
        .await
        .unwrap();
    assert_eq!(order.status, OrderStatus::Confirmed);

    let err = store.system.checkout.prepare(&alice).await.unwrap_err();
    assert_eq!(err, OrderError::EmptyCart);
}

#[tokio::test]
async fn test_orders_are_private_and_staff_managed() {
    let store = Store::start().await;
    let cam = store.product("Camera", 100, None, 5).await;
    let (alice, home) = store.shopper("alice").await;
    let (bob, _) = store.shopper("bobby").await;
    store.add(&alice, cam, 1).await;
    let order = store
        .system
        .orders
        .place_order(&alice, home, PaymentMethod::Cod, None)
        .await
        .unwrap();

    let err = store.system.orders.order_detail(&bob, order.id).await.unwrap_err();
    assert!(matches!(err, OrderError::NotFound(_)));
    assert!(store.system.orders.orders_for(&bob).await.unwrap().is_empty());

    let err = store
        .system
        .orders
        .update_status(&alice, order.id, OrderStatus::Confirmed)
        .await
        .unwrap_err();
    assert_eq!(err, OrderError::Forbidden);

    let shipped = async {
        let orders = &store.system.orders;
        orders.update_status(&store.staff, order.id, OrderStatus::Confirmed).await?;
        orders.update_status(&store.staff, order.id, OrderStatus::Shipped).await
    }
    .await
    .unwrap();
    assert_eq!(shipped.status, OrderStatus::Shipped);
    assert_eq!(store.system.orders.list_all(&store.staff, None).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_accounts() {
    let store = Store::start().await;
    let (alice, _) = store.shopper("alice").await;

    let err = store
        .system
        .users
        .register(UserCreate::customer("alice", "someone@example.com"))
        .await
        .unwrap_err();
    match err {
        UserError::ValidationFailed(errors) => {
            assert_eq!(errors.get("username"), Some("This username is already taken."))
        }
        other => panic!("unexpected: {other:?}"),
    }

    // Re-saving one's own email is not a conflict.
    store
        .system
        .users
        .edit_email(&alice, "alice@example.com".into())
        .await
        .unwrap();
    let err = store
        .system
        .users
        .edit_email(&alice, "admin@homeguard.in".into())
        .await
        .unwrap_err();
    assert!(matches!(err, UserError::ValidationFailed(_)));

    let cam = store.product("Camera", 100, None, 5).await;
    store.add(&alice, cam, 1).await;
    let alice_id = alice.user().unwrap();
    store.system.users.delete_user(&store.staff, alice_id).await.unwrap();
    assert!(store.system.carts.snapshot(alice_id).await.unwrap().is_none());
    assert!(store
        .system
        .addresses
        .addresses_of(alice_id)
        .await
        .unwrap()
        .is_empty());

    // An address an order ships to outlives the account; the spare one goes.
    let (bob, bob_home) = store.shopper("bobby").await;
    store
        .system
        .addresses
        .add(&bob, AddressForm::new("Bob", "Tech Park, Whitefield", "560066", "9876543210"))
        .await
        .unwrap();
    store.add(&bob, cam, 1).await;
    let order = store
        .system
        .orders
        .place_order(&bob, bob_home, PaymentMethod::Cod, None)
        .await
        .unwrap();
    let bob_id = bob.user().unwrap();
    store.system.users.delete_user(&store.staff, bob_id).await.unwrap();
    let kept: Vec<AddressId> = store
        .system
        .addresses
        .addresses_of(bob_id)
        .await
        .unwrap()
        .iter()
        .map(|a| a.id)
        .collect();
    assert_eq!(kept, vec![order.address_id]);

    let users = store.system.users.list_users(&store.staff).await.unwrap();
    assert_eq!(users.len(), 1);
}

#[tokio::test]
async fn test_browsing_and_buy_now() {
    let store = Store::start().await;
    let staff = &store.staff;
    let catalog = &store.system.catalog;
    let bulb = catalog
        .create_product(
            staff,
            ProductCreate::new("Smart Bulb", Category::Lighting, Decimal::from(100), 3)
                .with_offer(Decimal::from(80)),
        )
        .await
        .unwrap();
    let strip = catalog
        .create_product(
            staff,
            ProductCreate::new("LED Strip", Category::Lighting, Decimal::from(120), 2),
        )
        .await
        .unwrap();
    let lock = store.product("Door Lock", 50, None, 1).await;

    let lighting = catalog
        .list_products(Some(Category::Lighting), ProductSort::PriceDesc)
        .await
        .unwrap();
    let ids: Vec<ProductId> = lighting.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![strip, bulb]);

    let found = catalog.search("smart BULB").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, bulb);
    assert_eq!(catalog.search(" ").await.unwrap().len(), 3);
    assert_eq!(
        catalog.categories().await.unwrap(),
        vec![Category::Lighting, Category::Security]
    );

    let err = catalog
        .create_product(
            staff,
            ProductCreate::new("Gold Lock", Category::Security, Decimal::from(1_000_000_000), 1),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::ValidationFailed(ref f) if f.get("price").is_some()));

    let (alice, _) = store.shopper("alice").await;
    store.add(&alice, bulb, 1).await;
    let line = store.system.carts.contents(&alice).await.unwrap().lines[0].item_id;
    let item = store.system.carts.increment_item(&alice, line).await.unwrap();
    assert_eq!(item.quantity, 2);
    store.system.carts.increment_item(&alice, line).await.unwrap();
    let err = store
        .system
        .carts
        .increment_item(&alice, line)
        .await
        .unwrap_err();
    assert!(matches!(err, CartError::StockLimitReached { stock: 3, .. }));

    let item = store
        .system
        .carts
        .replace_with_single(&alice, lock)
        .await
        .unwrap();
    let summary = store.system.carts.contents(&alice).await.unwrap();
    assert_eq!(summary.lines.len(), 1);
    assert_eq!(summary.lines[0].item_id, item.id);
    assert_eq!(summary.item_count(), 1);
    assert_eq!(summary.total, Decimal::from(50));

    catalog.adjust_stock(strip, -2).await.unwrap();
    let err = store
        .system
        .carts
        .replace_with_single(&alice, strip)
        .await
        .unwrap_err();
    assert_eq!(err, CartError::OutOfStock(strip));
    assert_eq!(store.system.carts.contents(&alice).await.unwrap().lines[0].item_id, item.id);
}
