mod client;
pub mod data;
pub mod error;
pub mod fetch;
pub mod queries;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use client::HttpTransport;
pub use data::{CustomRequest, DataProvider};
pub use error::{DataError, HttpError};
pub use fetch::FetchWrapper;
pub use types::Paging;
