//! Business workflows over the repositories.

pub mod auth;
pub mod catalog;
pub mod checkout;
pub mod requests;
pub mod uploads;

pub use auth::{AuthError, AuthService};
pub use catalog::{CatalogError, CatalogService};
pub use checkout::{CheckoutError, CheckoutService};
pub use requests::{InflightGuard, InflightRequests};
pub use uploads::{StoredFile, UploadError, UploadService};
