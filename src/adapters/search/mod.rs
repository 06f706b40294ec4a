//! Search adapters - Implementations of the SearchProvider port.

mod mock_search;
mod rapidapi_search;

pub use mock_search::{MockSearchProvider, MockSearchResponse};
pub use rapidapi_search::{RapidApiSearchConfig, RapidApiSearchProvider};
