//! Services: cheap, cloneable handles that own the business rules and talk
//! to the stores.

#[macro_use]
mod macros;

pub mod category_client;
pub mod order_client;
pub mod product_client;
pub mod user_client;

pub use category_client::CategoryClient;
pub use order_client::OrderClient;
pub use product_client::ProductClient;
pub use user_client::UserClient;
