//! Admin product entry

use crate::entity::{prelude::*, product, sea_orm_active_enums};
use crate::error::ApiError;
use crate::routes::products::{ProductView, invalidate_facets, strings_to_json};
use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use sea_orm::{ActiveModelTrait, ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter};
use serde::Deserialize;
use utoipa::ToSchema;

#[derive(Clone, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    /// Whole rupees
    pub price: Option<i64>,
    pub original_price: Option<i64>,
    pub discount: Option<i32>,
    pub category: Option<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub features: Vec<String>,
    pub in_stock: Option<bool>,
}

pub fn validate_add_product(request: &AddProductRequest) -> Vec<String> {
    let mut missing = Vec::new();
    if request.name.as_deref().unwrap_or("").trim().is_empty() {
        missing.push("name".to_string());
    }
    if request
        .description
        .as_deref()
        .unwrap_or("")
        .trim()
        .is_empty()
    {
        missing.push("description".to_string());
    }
    if request.price.is_none_or(|p| p <= 0) {
        missing.push("price".to_string());
    }
    if request.category.as_deref().unwrap_or("").trim().is_empty() {
        missing.push("category".to_string());
    }
    missing
}

#[utoipa::path(
    post,
    path = "/admin/products",
    tag = "admin",
    request_body = AddProductRequest,
    responses(
        (status = 200, description = "Product created", body = ProductView),
        (status = 400, description = "Missing or invalid fields"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "A product with this name already exists")
    ),
    security(("admin_password" = []))
)]
#[tracing::instrument(name = "POST /admin/products", skip(state, request))]
pub async fn add_product(
    State(state): State<AppState>,
    Json(request): Json<AddProductRequest>,
) -> Result<Json<ProductView>, ApiError> {
    let missing = validate_add_product(&request);
    if !missing.is_empty() {
        return Err(ApiError::bad_request(format!(
            "Missing or invalid fields: {}",
            missing.join(", ")
        )));
    }

    let name = request.name.as_deref().unwrap_or("").trim().to_string();
    let category: shringar::Category = request
        .category
        .as_deref()
        .unwrap_or("")
        .parse()
        .map_err(|e: shringar::catalog::UnknownValue| ApiError::bad_request(e.to_string()))?;

    let slug = shringar::slugify(&name);
    if slug.is_empty() {
        return Err(ApiError::bad_request(
            "Product name must contain at least one letter or digit",
        ));
    }

    let duplicate = Product::find()
        .filter(product::Column::Slug.eq(&slug))
        .one(&state.db)
        .await?;
    if duplicate.is_some() {
        return Err(ApiError::conflict(format!(
            "A product with slug {} already exists",
            slug
        )));
    }

    let now = chrono::Utc::now().naive_utc();
    let model = product::ActiveModel {
        id: Set(shringar_types::create_id()),
        name: Set(name),
        slug: Set(slug),
        description: Set(request.description.as_deref().unwrap_or("").trim().to_string()),
        price: Set(request.price.unwrap_or(0)),
        original_price: Set(request.original_price),
        discount: Set(request.discount),
        category: Set(sea_orm_active_enums::Category::from(category)),
        colors: Set(strings_to_json(&request.colors)),
        sizes: Set(strings_to_json(&request.sizes)),
        images: Set(strings_to_json(&request.images)),
        features: Set(strings_to_json(&request.features)),
        in_stock: Set(request.in_stock.unwrap_or(true)),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(&state.db)
    .await?;

    invalidate_facets(&state);

    tracing::info!(slug = %model.slug, "Product created");
    Ok(Json(ProductView::from(model)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_request() -> AddProductRequest {
        AddProductRequest {
            name: Some("Peacock Feather Mukut".into()),
            description: Some("Gold-plated mukut.".into()),
            price: Some(549),
            original_price: Some(699),
            discount: Some(21),
            category: Some("mukut".into()),
            colors: vec!["Gold".into()],
            sizes: vec!["3 inch".into()],
            images: vec![],
            features: vec![],
            in_stock: Some(true),
        }
    }

    #[test]
    fn complete_request_validates_clean() {
        assert!(validate_add_product(&full_request()).is_empty());
    }

    #[test]
    fn zero_price_is_invalid() {
        let mut request = full_request();
        request.price = Some(0);
        assert_eq!(validate_add_product(&request), vec!["price".to_string()]);
    }

    #[test]
    fn all_missing_fields_are_listed() {
        let request = AddProductRequest {
            name: None,
            description: Some(" ".into()),
            price: None,
            original_price: None,
            discount: None,
            category: None,
            colors: vec![],
            sizes: vec![],
            images: vec![],
            features: vec![],
            in_stock: None,
        };
        assert_eq!(
            validate_add_product(&request),
            vec!["name", "description", "price", "category"]
        );
    }
}
