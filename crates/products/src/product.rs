use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use agrimarket_core::{DomainError, DomainResult, Entity, Price, ProductId, SellerId};

/// Product category tag.
///
/// The set is open: tags outside the well-known ones are kept in `Other`.
/// Tags are normalized to lowercase, so `"Vegetables"` parses as
/// [`Category::Vegetables`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Vegetables,
    Fruits,
    Grains,
    Other(String),
}

impl Category {
    pub fn parse(tag: &str) -> Self {
        let tag = tag.trim().to_lowercase();
        match tag.as_str() {
            "vegetables" => Category::Vegetables,
            "fruits" => Category::Fruits,
            "grains" => Category::Grains,
            _ => Category::Other(tag),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Category::Vegetables => "vegetables",
            Category::Fruits => "fruits",
            Category::Grains => "grains",
            Category::Other(tag) => tag,
        }
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Category::parse(&value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        match value {
            Category::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of seller behind a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SellerType {
    Farmer,
    Wholesaler,
}

impl SellerType {
    pub fn as_str(self) -> &'static str {
        match self {
            SellerType::Farmer => "farmer",
            SellerType::Wholesaler => "wholesaler",
        }
    }
}

impl core::fmt::Display for SellerType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Produce grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Quality {
    Premium,
    Standard,
    Economy,
}

impl Quality {
    pub fn as_str(self) -> &'static str {
        match self {
            Quality::Premium => "premium",
            Quality::Standard => "standard",
            Quality::Economy => "economy",
        }
    }
}

impl core::fmt::Display for Quality {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unvalidated listing data, as supplied by a catalog source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub id: ProductId,
    pub name: String,
    pub category: Category,
    pub quantity: u64,
    pub unit: String,
    pub price: Price,
    pub wholesale_price: Price,
    pub government_price: Price,
    pub seller_id: SellerId,
    pub seller_name: String,
    pub seller_type: SellerType,
    pub location: String,
    pub quality: Quality,
    pub available_until: NaiveDate,
    pub image: String,
}

/// A marketplace listing.
///
/// Immutable once constructed; all three prices are set independently and no
/// ordering between them is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "NewProduct", into = "NewProduct")]
pub struct Product {
    id: ProductId,
    name: String,
    category: Category,
    quantity: u64,
    unit: String,
    price: Price,
    wholesale_price: Price,
    government_price: Price,
    seller_id: SellerId,
    seller_name: String,
    seller_type: SellerType,
    location: String,
    quality: Quality,
    available_until: NaiveDate,
    image: String,
}

impl Product {
    /// Validate listing data and build the product.
    pub fn new(data: NewProduct) -> DomainResult<Self> {
        if data.id.is_blank() {
            return Err(DomainError::missing("product", "id"));
        }
        let record = || format!("product {}", data.id);
        if data.name.trim().is_empty() {
            return Err(DomainError::missing(record(), "name"));
        }
        if data.category.as_str().is_empty() {
            return Err(DomainError::missing(record(), "category"));
        }
        if data.unit.trim().is_empty() {
            return Err(DomainError::missing(record(), "unit"));
        }
        if data.location.trim().is_empty() {
            return Err(DomainError::missing(record(), "location"));
        }
        if data.seller_id.is_blank() {
            return Err(DomainError::missing(record(), "seller id"));
        }

        Ok(Self {
            id: data.id,
            name: data.name,
            category: data.category,
            quantity: data.quantity,
            unit: data.unit,
            price: data.price,
            wholesale_price: data.wholesale_price,
            government_price: data.government_price,
            seller_id: data.seller_id,
            seller_name: data.seller_name,
            seller_type: data.seller_type,
            location: data.location,
            quality: data.quality,
            available_until: data.available_until,
            image: data.image,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &Category {
        &self.category
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Retail price.
    pub fn price(&self) -> Price {
        self.price
    }

    pub fn wholesale_price(&self) -> Price {
        self.wholesale_price
    }

    /// Official government rate.
    pub fn government_price(&self) -> Price {
        self.government_price
    }

    pub fn seller_id(&self) -> &SellerId {
        &self.seller_id
    }

    pub fn seller_name(&self) -> &str {
        &self.seller_name
    }

    pub fn seller_type(&self) -> SellerType {
        self.seller_type
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn quality(&self) -> Quality {
        self.quality
    }

    pub fn available_until(&self) -> NaiveDate {
        self.available_until
    }

    pub fn image(&self) -> &str {
        &self.image
    }

    /// Listings stay in the catalog after this date passes; callers decide
    /// whether to hide them.
    pub fn is_available_on(&self, date: NaiveDate) -> bool {
        self.available_until >= date
    }

    /// Retail price exceeds the government rate.
    pub fn is_above_government_rate(&self) -> bool {
        self.price > self.government_price
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

impl TryFrom<NewProduct> for Product {
    type Error = DomainError;

    fn try_from(value: NewProduct) -> Result<Self, Self::Error> {
        Product::new(value)
    }
}

impl From<Product> for NewProduct {
    fn from(value: Product) -> Self {
        NewProduct {
            id: value.id,
            name: value.name,
            category: value.category,
            quantity: value.quantity,
            unit: value.unit,
            price: value.price,
            wholesale_price: value.wholesale_price,
            government_price: value.government_price,
            seller_id: value.seller_id,
            seller_name: value.seller_name,
            seller_type: value.seller_type,
            location: value.location,
            quality: value.quality,
            available_until: value.available_until,
            image: value.image,
        }
    }
}
