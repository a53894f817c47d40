//! UI Components
//!
//! Pages and the reusable pieces they are built from.

mod catalog_tree;
mod form_fields;
mod pagination;
mod search_box;
mod sidebar;

mod dashboard_page;
mod groups_page;
mod login_page;
mod order_edit_page;
mod orders_page;
mod organization_edit_page;
mod organizations_page;
mod product_edit_page;
mod products_page;
mod user_edit_page;
mod users_page;

pub use catalog_tree::CatalogTree;
pub use form_fields::{CheckboxField, EditHeader, FormError, TextAreaField, TextField};
pub use pagination::{page_slice, Pagination};
pub use search_box::SearchBox;
pub use sidebar::Sidebar;

pub use dashboard_page::DashboardPage;
pub use groups_page::GroupsPage;
pub use login_page::LoginPage;
pub use order_edit_page::OrderEditPage;
pub use orders_page::OrdersPage;
pub use organization_edit_page::OrganizationEditPage;
pub use organizations_page::OrganizationsPage;
pub use product_edit_page::ProductEditPage;
pub use products_page::ProductsPage;
pub use user_edit_page::UserEditPage;
pub use users_page::UsersPage;
