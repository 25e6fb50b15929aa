use std::collections::HashMap;
use std::sync::Arc;

use agrimarket_core::{DomainError, DomainResult, Entity, ProductId};
use agrimarket_products::{NewProduct, Product};

/// Read access to the product catalog.
///
/// The sequence returned by `all_products` is ordered and stable for the
/// lifetime of the store. Reads never fail.
pub trait CatalogStore: Send + Sync {
    fn all_products(&self) -> Arc<[Product]>;
    fn get(&self, id: &ProductId) -> Option<Product>;
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S> CatalogStore for Arc<S>
where
    S: CatalogStore + ?Sized,
{
    fn all_products(&self) -> Arc<[Product]> {
        (**self).all_products()
    }

    fn get(&self, id: &ProductId) -> Option<Product> {
        (**self).get(id)
    }

    fn len(&self) -> usize {
        (**self).len()
    }
}

/// In-memory catalog, populated once and never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    products: Arc<[Product]>,
    index: HashMap<ProductId, usize>,
}

impl InMemoryCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load validated products, keeping their order.
    ///
    /// Identifiers must be unique within the catalog.
    pub fn load(products: Vec<Product>) -> DomainResult<Self> {
        let mut index = HashMap::with_capacity(products.len());
        for (pos, product) in products.iter().enumerate() {
            if index.insert(product.id().clone(), pos).is_some() {
                return Err(DomainError::conflict(format!(
                    "duplicate product id '{}'",
                    product.id()
                )));
            }
        }

        tracing::info!(products = products.len(), "catalog loaded");
        Ok(Self {
            products: products.into(),
            index,
        })
    }

    /// Validate raw listings and load them.
    pub fn load_new(listings: Vec<NewProduct>) -> DomainResult<Self> {
        let products = listings
            .into_iter()
            .map(Product::new)
            .collect::<DomainResult<Vec<_>>>()?;
        Self::load(products)
    }
}

impl CatalogStore for InMemoryCatalog {
    fn all_products(&self) -> Arc<[Product]> {
        Arc::clone(&self.products)
    }

    fn get(&self, id: &ProductId) -> Option<Product> {
        self.index.get(id).map(|&pos| self.products[pos].clone())
    }

    fn len(&self) -> usize {
        self.products.len()
    }
}
