use utoipa::{
    Modify, OpenApi,
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
};

/// Adds the back-office security scheme: the plaintext admin password in
/// the `x-admin-password` header.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "admin_password",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("x-admin-password"))),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Shringar Storefront API",
        description = "Product catalog, checkout, payment verification and back office for the Shringar devotional-wear store"
    ),
    paths(
        crate::routes::health::get_db_health,
        crate::routes::products::list_products,
        crate::routes::products::get_product,
        crate::routes::products::seed_products,
        crate::routes::orders::create_order,
        crate::routes::orders::get_order,
        crate::routes::orders::list_orders_by_email,
        crate::routes::payment::create_gateway_order,
        crate::routes::payment::verify_payment,
        crate::routes::upload::upload_images,
        crate::routes::auth::admin_login,
        crate::routes::admin::add_product::add_product,
        crate::routes::admin::list_orders::list_orders,
        crate::routes::admin::update_order::update_order,
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "products", description = "Catalog listing and detail"),
        (name = "orders", description = "Checkout and order history"),
        (name = "payment", description = "Payment gateway orders and signature verification"),
        (name = "upload", description = "Product image uploads"),
        (name = "auth", description = "Admin password check"),
        (name = "admin", description = "Back office"),
        (name = "health", description = "Liveness and database health")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_builds_and_covers_the_admin_scheme() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components present");
        assert!(components.security_schemes.contains_key("admin_password"));
        assert!(!doc.paths.paths.is_empty());
    }
}
