pub mod chain;
pub mod columns;
pub mod range;
pub mod raw;

pub use chain::{OptionChain, OptionChainRow, OptionSide};
pub use columns::ColumnMap;
pub use range::PriceRange;
pub use raw::{RawRow, RawValue};
