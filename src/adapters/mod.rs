pub mod adapter;
pub mod mock_adapter;

pub use adapter::{AdapterError, AdapterProtocol, AdapterRegistry, AdapterWrapper, PoolAdapter, PoolEdition};
pub use mock_adapter::{ConstantProductAdapter, FixedRateAdapter};
