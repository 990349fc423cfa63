pub mod account;
pub mod recipe;

pub use account::{Account, AccountProfile, NewAccount, ProfileUpdate};
pub use recipe::{Instructions, NewRecipe, Recipe};
