pub mod account_service;
pub use account_service::{AccountService, AuthError};

pub mod account_service_impl;
pub use account_service_impl::SeaOrmAccountService;

pub mod recipe_service;
pub use recipe_service::{RecipeDraft, RecipeError, RecipeService};

pub mod recipe_service_impl;
pub use recipe_service_impl::SeaOrmRecipeService;
