pub mod connection;
pub mod endpoints;
pub mod local;
pub mod payload;

pub use connection::{FdaClient, FdaError};
pub use endpoints::FdaConfig;
pub use local::LocalDataset;
pub use payload::parse_payload;
