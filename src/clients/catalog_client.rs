//! # Catalog Client
//!
//! High-level API over the catalog actor: browsing for shoppers, stock
//! movements for the order engine, and staff-only product administration.
use crate::catalog_actor::{CatalogAction, CatalogActionResult, CatalogError, ReservedLine};
use crate::model::{Category, Product, ProductCreate, ProductId, ProductSort, ProductUpdate};
use crate::session::Session;
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, info, instrument};

/// Client for interacting with the catalog actor.
#[derive(Clone)]
pub struct CatalogClient {
    inner: ResourceClient<Product>,
}

#[async_trait]
impl ActorClient<Product> for CatalogClient {
    type Error = CatalogError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e.downcast_entity::<CatalogError>() {
            Ok(err) => err,
            Err(FrameworkError::NotFound(id)) => CatalogError::NotFound(id),
            Err(other) => CatalogError::ActorCommunicationError(other.to_string()),
        }
    }
}

fn unexpected(result: CatalogActionResult) -> CatalogError {
    CatalogError::ActorCommunicationError(format!("unexpected action result: {result:?}"))
}

/// Orders products in place for the product grid.
pub fn sort_products(products: &mut [Product], sort: ProductSort) {
    match sort {
        ProductSort::Newest => {
            products.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)))
        }
        ProductSort::PriceAsc => products.sort_by(|a, b| {
            a.effective_price()
                .cmp(&b.effective_price())
                .then(a.id.cmp(&b.id))
        }),
        ProductSort::PriceDesc => products.sort_by(|a, b| {
            b.effective_price()
                .cmp(&a.effective_price())
                .then(a.id.cmp(&b.id))
        }),
    }
}

impl CatalogClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }

    /// Fetches a product, failing with `NotFound` when it does not exist.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> Result<Product, CatalogError> {
        self.get(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound(id.to_string()))
    }

    /// Products, optionally restricted to one category.
    #[instrument(skip(self))]
    pub async fn list_products(
        &self,
        category: Option<Category>,
        sort: ProductSort,
    ) -> Result<Vec<Product>, CatalogError> {
        let mut products = self
            .find(move |p: &Product| category.map_or(true, |c| p.category == c))
            .await?;
        sort_products(&mut products, sort);
        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Case-insensitive substring match on the product name. A blank query
    /// matches everything.
    #[instrument(skip(self))]
    pub async fn search(&self, query: &str) -> Result<Vec<Product>, CatalogError> {
        let needle = query.trim().to_lowercase();
        self.find(move |p: &Product| p.name.to_lowercase().contains(&needle))
            .await
    }

    /// Categories that currently have products, in storefront menu order.
    #[instrument(skip(self))]
    pub async fn categories(&self) -> Result<Vec<Category>, CatalogError> {
        let products = self.find(|_: &Product| true).await?;
        Ok(Category::ALL
            .into_iter()
            .filter(|category| products.iter().any(|p| p.category == *category))
            .collect())
    }

    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<u32, CatalogError> {
        match self
            .inner
            .perform_action(id, CatalogAction::CheckStock)
            .await
            .map_err(Self::map_error)?
        {
            CatalogActionResult::CheckStock(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    /// Applies a signed stock change. Returns the new stock level.
    #[instrument(skip(self))]
    pub async fn adjust_stock(&self, id: ProductId, delta: i64) -> Result<u32, CatalogError> {
        match self
            .inner
            .perform_action(id, CatalogAction::AdjustStock(delta))
            .await
            .map_err(Self::map_error)?
        {
            CatalogActionResult::AdjustStock(level) => {
                info!(%id, delta, stock = level, "Stock adjusted");
                Ok(level)
            }
            other => Err(unexpected(other)),
        }
    }

    /// Takes stock for every line at once. Either all lines are reserved, or
    /// the catalog is left untouched and the first shortfall is returned.
    #[instrument(skip(self))]
    pub async fn reserve(
        &self,
        lines: &[(ProductId, u32)],
    ) -> Result<Vec<ReservedLine>, CatalogError> {
        let actions = lines
            .iter()
            .map(|&(id, quantity)| (id, CatalogAction::Reserve(quantity)))
            .collect();
        let results = self
            .inner
            .perform_batch(actions)
            .await
            .map_err(Self::map_error)?;
        results
            .into_iter()
            .map(|result| match result {
                CatalogActionResult::Reserve(line) => Ok(line),
                other => Err(unexpected(other)),
            })
            .collect()
    }

    /// Returns previously reserved stock.
    #[instrument(skip(self))]
    pub async fn release(&self, lines: &[(ProductId, u32)]) -> Result<(), CatalogError> {
        let actions = lines
            .iter()
            .map(|&(id, quantity)| (id, CatalogAction::Release(quantity)))
            .collect();
        self.inner
            .perform_batch(actions)
            .await
            .map_err(Self::map_error)?;
        Ok(())
    }

    #[instrument(skip(self, session))]
    pub async fn create_product(
        &self,
        session: &Session,
        params: ProductCreate,
    ) -> Result<ProductId, CatalogError> {
        session.require_staff()?;
        debug!(?params, "create_product called");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self, session))]
    pub async fn update_product(
        &self,
        session: &Session,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, CatalogError> {
        session.require_staff()?;
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    /// Fails with `Protected` while any order references the product.
    #[instrument(skip(self, session))]
    pub async fn delete_product(&self, session: &Session, id: ProductId) -> Result<(), CatalogError> {
        session.require_staff()?;
        self.delete(id).await
    }
}
