use crate::entity::{prelude::*, product, sea_orm_active_enums};
use crate::error::ApiError;
use crate::state::AppState;
use axum::extract::{Path, Query, State};
use axum::{Json, Router, routing::get, routing::post};
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};
use serde::{Deserialize, Serialize};
use shringar::catalog::SortKey;
use std::collections::BTreeSet;
use utoipa::{IntoParams, ToSchema};

const FACETS_CACHE_KEY: &str = "product_facets";

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products))
        .route("/seed", post(seed_products))
        .route("/{slug}", get(get_product))
}

#[derive(Clone, Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductView {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub price: i64,
    pub original_price: Option<i64>,
    pub discount: Option<i32>,
    pub category: String,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
    pub images: Vec<String>,
    pub features: Vec<String>,
    pub in_stock: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<product::Model> for ProductView {
    fn from(model: product::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            slug: model.slug,
            description: model.description,
            price: model.price,
            original_price: model.original_price,
            discount: model.discount,
            category: shringar::Category::from(model.category).as_str().to_string(),
            colors: json_to_strings(&model.colors),
            sizes: json_to_strings(&model.sizes),
            images: json_to_strings(&model.images),
            features: json_to_strings(&model.features),
            in_stock: model.in_stock,
            created_at: model.created_at.to_string(),
            updated_at: model.updated_at.to_string(),
        }
    }
}

/// Json columns hold plain string arrays; anything else degrades to empty.
pub fn json_to_strings(value: &serde_json::Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

pub fn strings_to_json(values: &[String]) -> serde_json::Value {
    serde_json::Value::Array(
        values
            .iter()
            .map(|v| serde_json::Value::String(v.clone()))
            .collect(),
    )
}

#[derive(Clone, Serialize, Deserialize, Debug, ToSchema)]
pub struct ProductFacets {
    pub categories: Vec<String>,
    pub colors: Vec<String>,
    pub sizes: Vec<String>,
}

#[derive(Clone, Deserialize, Debug, IntoParams)]
pub struct ListProductsQuery {
    pub category: Option<String>,
    pub color: Option<String>,
    pub size: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Clone, Serialize, Deserialize, Debug, ToSchema)]
pub struct ListProductsResponse {
    pub products: Vec<ProductView>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
    pub facets: ProductFacets,
}

/// Bound-parameter jsonb containment test on a JSON string-array column.
fn json_array_contains(column: &str, value: &str) -> sea_orm::sea_query::SimpleExpr {
    Expr::cust_with_values(
        format!(r#""{}"::jsonb @> ?::jsonb"#, column),
        [serde_json::json!([value]).to_string()],
    )
}

#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    params(ListProductsQuery),
    responses(
        (status = 200, description = "Filtered product listing with facets", body = ListProductsResponse),
        (status = 400, description = "Invalid filter value")
    )
)]
#[tracing::instrument(name = "GET /products", skip(state))]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ListProductsQuery>,
) -> Result<Json<ListProductsResponse>, ApiError> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(12).clamp(1, 50);

    let mut condition = Condition::all();

    if let Some(category) = &query.category {
        let category: shringar::Category = category
            .parse()
            .map_err(|e: shringar::catalog::UnknownValue| ApiError::bad_request(e.to_string()))?;
        condition =
            condition.add(product::Column::Category.eq(sea_orm_active_enums::Category::from(category)));
    }

    if let Some(color) = &query.color
        && !color.trim().is_empty()
    {
        condition = condition.add(json_array_contains("colors", color.trim()));
    }

    if let Some(size) = &query.size
        && !size.trim().is_empty()
    {
        condition = condition.add(json_array_contains("sizes", size.trim()));
    }

    if let Some(search) = &query.search
        && !search.trim().is_empty()
    {
        let pattern = format!("%{}%", search.trim());
        condition = condition.add(
            Condition::any()
                .add(Expr::col(product::Column::Name).ilike(pattern.clone()))
                .add(Expr::col(product::Column::Description).ilike(pattern)),
        );
    }

    let sort: SortKey = match &query.sort {
        Some(raw) => raw
            .parse()
            .map_err(|e: shringar::catalog::UnknownValue| ApiError::bad_request(e.to_string()))?,
        None => SortKey::default(),
    };

    let select = Product::find().filter(condition);
    let select = match sort {
        SortKey::PriceAsc => select.order_by_asc(product::Column::Price),
        SortKey::PriceDesc => select.order_by_desc(product::Column::Price),
        SortKey::Newest => select.order_by_desc(product::Column::CreatedAt),
        SortKey::Name => select.order_by_asc(product::Column::Name),
    };

    let total = select.clone().count(&state.db).await?;
    let models = select
        .paginate(&state.db, limit)
        .fetch_page(page - 1)
        .await?;

    let facets = load_facets(&state).await?;

    Ok(Json(ListProductsResponse {
        products: models.into_iter().map(ProductView::from).collect(),
        total,
        page,
        limit,
        facets,
    }))
}

/// Distinct filter values over the in-stock catalog, cached briefly since
/// every listing request wants them.
pub async fn load_facets(state: &AppState) -> Result<ProductFacets, ApiError> {
    if let Some(facets) = state.get_cache::<ProductFacets>(FACETS_CACHE_KEY) {
        return Ok(facets);
    }

    let rows: Vec<(sea_orm_active_enums::Category, serde_json::Value, serde_json::Value)> =
        Product::find()
            .select_only()
            .column(product::Column::Category)
            .column(product::Column::Colors)
            .column(product::Column::Sizes)
            .filter(product::Column::InStock.eq(true))
            .into_tuple()
            .all(&state.db)
            .await?;

    let mut categories = BTreeSet::new();
    let mut colors = BTreeSet::new();
    let mut sizes = BTreeSet::new();
    for (category, color_values, size_values) in &rows {
        categories.insert(
            shringar::Category::from(category.clone())
                .as_str()
                .to_string(),
        );
        colors.extend(json_to_strings(color_values));
        sizes.extend(json_to_strings(size_values));
    }

    let facets = ProductFacets {
        categories: categories.into_iter().collect(),
        colors: colors.into_iter().collect(),
        sizes: sizes.into_iter().collect(),
    };
    state.set_cache(FACETS_CACHE_KEY.to_string(), facets.clone());
    Ok(facets)
}

pub fn invalidate_facets(state: &AppState) {
    state.invalidate_cache(FACETS_CACHE_KEY);
}

#[utoipa::path(
    get,
    path = "/products/{slug}",
    tag = "products",
    responses(
        (status = 200, description = "Product detail", body = ProductView),
        (status = 404, description = "No product with this slug")
    )
)]
#[tracing::instrument(name = "GET /products/{slug}", skip(state))]
pub async fn get_product(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ProductView>, ApiError> {
    let product = Product::find()
        .filter(product::Column::Slug.eq(&slug))
        .one(&state.db)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Product not found: {}", slug)))?;

    Ok(Json(ProductView::from(product)))
}

#[derive(Clone, Serialize, Deserialize, Debug, ToSchema)]
pub struct SeedResponse {
    pub seeded: usize,
}

#[utoipa::path(
    post,
    path = "/products/seed",
    tag = "products",
    responses(
        (status = 200, description = "Starter catalog inserted", body = SeedResponse),
        (status = 409, description = "Catalog is not empty")
    )
)]
#[tracing::instrument(name = "POST /products/seed", skip(state))]
pub async fn seed_products(State(state): State<AppState>) -> Result<Json<SeedResponse>, ApiError> {
    let existing = Product::find().count(&state.db).await?;
    if existing > 0 {
        return Err(ApiError::conflict(
            "Catalog already has products, seeding is one-time only",
        ));
    }

    let catalog = starter_catalog();
    let seeded = catalog.len();
    Product::insert_many(catalog).exec(&state.db).await?;
    invalidate_facets(&state);

    tracing::info!(count = seeded, "Seeded starter catalog");
    Ok(Json(SeedResponse { seeded }))
}

struct SeedProduct {
    name: &'static str,
    description: &'static str,
    price: i64,
    original_price: Option<i64>,
    category: shringar::Category,
    colors: &'static [&'static str],
    sizes: &'static [&'static str],
    features: &'static [&'static str],
}

fn starter_catalog() -> Vec<product::ActiveModel> {
    let seeds = [
        SeedProduct {
            name: "Radha Rani Poshak Set",
            description: "Hand-embroidered poshak with zari border, matching odhani included.",
            price: 1299,
            original_price: Some(1599),
            category: shringar::Category::Vastra,
            colors: &["Pink", "Yellow", "Red"],
            sizes: &["S", "M", "L"],
            features: &["Hand embroidery", "Soft satin lining", "Matching odhani"],
        },
        SeedProduct {
            name: "Kanha Pagh Vastra",
            description: "Festive vastra with mirror work for Janmashtami shringar.",
            price: 799,
            original_price: None,
            category: shringar::Category::Vastra,
            colors: &["Blue", "Green"],
            sizes: &["S", "M"],
            features: &["Mirror work", "Breathable cotton"],
        },
        SeedProduct {
            name: "Peacock Feather Mukut",
            description: "Gold-plated mukut crowned with a natural peacock feather.",
            price: 549,
            original_price: Some(699),
            category: shringar::Category::Mukut,
            colors: &["Gold"],
            sizes: &["2 inch", "3 inch", "4 inch"],
            features: &["Gold plating", "Natural feather", "Adjustable band"],
        },
        SeedProduct {
            name: "Kundan Jadau Mukut",
            description: "Kundan-studded mukut with pearl drops for utsav days.",
            price: 999,
            original_price: None,
            category: shringar::Category::Mukut,
            colors: &["Gold", "Silver"],
            sizes: &["3 inch", "4 inch"],
            features: &["Kundan stones", "Pearl drops"],
        },
        SeedProduct {
            name: "Sheesham Bansuri",
            description: "Hand-tuned sheesham wood bansuri with brass ring detail.",
            price: 449,
            original_price: None,
            category: shringar::Category::Bansuri,
            colors: &["Natural"],
            sizes: &["13 inch", "18 inch"],
            features: &["Hand tuned", "Brass rings"],
        },
        SeedProduct {
            name: "Tulsi Mala",
            description: "108-bead tulsi mala, hand knotted.",
            price: 199,
            original_price: Some(249),
            category: shringar::Category::Accessory,
            colors: &["Natural"],
            sizes: &[],
            features: &["108 beads", "Hand knotted"],
        },
    ];

    let now = chrono::Utc::now().naive_utc();
    seeds
        .into_iter()
        .map(|seed| {
            let to_vec = |values: &[&str]| -> Vec<String> {
                values.iter().map(|v| v.to_string()).collect()
            };
            product::ActiveModel {
                id: Set(shringar_types::create_id()),
                name: Set(seed.name.to_string()),
                slug: Set(shringar::slugify(seed.name)),
                description: Set(seed.description.to_string()),
                price: Set(seed.price),
                original_price: Set(seed.original_price),
                discount: Set(seed.original_price.map(|original| {
                    (((original - seed.price) * 100) / original.max(1)) as i32
                })),
                category: Set(sea_orm_active_enums::Category::from(seed.category)),
                colors: Set(strings_to_json(&to_vec(seed.colors))),
                sizes: Set(strings_to_json(&to_vec(seed.sizes))),
                images: Set(serde_json::json!([])),
                features: Set(strings_to_json(&to_vec(seed.features))),
                in_stock: Set(true),
                created_at: Set(now),
                updated_at: Set(now),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_string_arrays_round_trip() {
        let values = vec!["Pink".to_string(), "Gold".to_string()];
        let json = strings_to_json(&values);
        assert_eq!(json_to_strings(&json), values);
    }

    #[test]
    fn malformed_json_degrades_to_empty() {
        assert!(json_to_strings(&serde_json::json!({"not": "an array"})).is_empty());
        assert_eq!(
            json_to_strings(&serde_json::json!(["ok", 42, null])),
            vec!["ok".to_string()]
        );
    }

    #[test]
    fn starter_catalog_slugs_are_unique_and_discounts_consistent() {
        let catalog = starter_catalog();
        let mut slugs = std::collections::BTreeSet::new();
        for model in &catalog {
            let sea_orm::ActiveValue::Set(slug) = &model.slug else {
                panic!("slug not set");
            };
            assert!(slugs.insert(slug.clone()), "duplicate slug {}", slug);
        }
        assert_eq!(catalog.len(), 6);
    }
}
