//! Catalog domain - reference code to model name resolution

mod model_resolver;

pub use model_resolver::ModelCatalog;
