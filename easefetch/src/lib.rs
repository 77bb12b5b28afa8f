mod data_fetch;
mod data_post;
mod executor;
mod fetch_error;
mod fetch_result;
mod fold;
#[cfg(feature = "http")]
mod http;
mod immediate_fetch;
mod logger;
mod state_store;
mod stream_ext;
mod transport;
mod validation;
pub mod mock;

#[cfg(test)]
mod unit_tests;

pub use data_fetch::*;
pub use data_post::*;
pub use executor::{execute_fetch, execute_post_fetch};
pub use fetch_error::*;
pub use fetch_result::*;
pub use fold::*;
#[cfg(feature = "http")]
pub use http::*;
pub use immediate_fetch::*;
pub use logger::*;
pub use state_store::*;
pub use stream_ext::*;
pub use transport::*;
pub use validation::*;

pub trait State: Clone + Send + Sync + 'static {}
