pub mod analytics;
pub mod domain;
pub mod ports;

pub use analytics::{summarize, InventorySummary, LOW_STOCK_THRESHOLD};
pub use domain::{
    Account, AccountUpdate, Category, ExchangeEligible, NewProduct, Product, ProductDraft,
    ProductPatch, ValidationErrors,
};
pub use ports::{ProductStore, PublishFilter, StoreError, StoreResult};
