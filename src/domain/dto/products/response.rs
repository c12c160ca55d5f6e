use serde::Serialize;

use crate::domain::dto::format_datetime;
use crate::domain::entities::products::product::Product;

#[derive(Debug, Clone, Serialize)]
pub struct ProductResponse {
    pub id: String,
    pub username: String,
    pub category_id: String,
    pub name: String,
    pub brand: String,
    pub image_url: String,
    pub affiliate_link: Option<String>,
    pub description: Option<String>,
    pub order: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id_string().unwrap_or_default(),
            category_id: product.category_id.to_hex(),
            created_at: format_datetime(&product.created_at),
            updated_at: format_datetime(&product.updated_at),
            username: product.username,
            name: product.name,
            brand: product.brand,
            image_url: product.image_url,
            affiliate_link: product.affiliate_link,
            description: product.description,
            order: product.order,
        }
    }
}
