pub use super::category::Entity as Category;
pub use super::product::Entity as Product;
