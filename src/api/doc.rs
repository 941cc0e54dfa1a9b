use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

pub const HEALTH_TAG: &str = "Health";
pub const AUTH_TAG: &str = "Auth";
pub const USER_TAG: &str = "Users";
pub const INGREDIENT_TAG: &str = "Ingredients";
pub const FRIDGE_TAG: &str = "Fridge";
pub const RECIPE_TAG: &str = "Recipes";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Larder",
        description = "Backend data service for a household food inventory",
    ),
    servers((url = "/api")),
    modifiers(&SecurityAddon),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
        )
    ),
    tags(
        (name = HEALTH_TAG, description = "Health check endpoints"),
        (name = AUTH_TAG, description = "Authentication endpoints"),
        (name = USER_TAG, description = "User management endpoints"),
        (name = INGREDIENT_TAG, description = "Ingredient catalog endpoints"),
        (name = FRIDGE_TAG, description = "Fridge stock endpoints"),
        (name = RECIPE_TAG, description = "Recipe endpoints"),
    )
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer Token Authentication"))
                        .build(),
                ),
            )
        }
    }
}
