use alloy_primitives::{Address, address};

/// Wrapped native token used when no `[router]` config overrides it (WMNT on Mantle).
pub const WMNT: Address = address!("0x78c1b0c915c4faa5fffa6cabf0219da63d7f4cb8");

/// Sentinel identity of the chain's native asset.
pub const NATIVE: Address = Address::ZERO;

/// Denominator for every basis-point quantity (lender premiums, adapter fees).
pub const BPS_BASE: u64 = 10_000;

pub const DEFAULT_MAX_ARBITRAGE_CANDIDATES: usize = 8;

#[inline]
pub fn is_native(asset: Address) -> bool {
    asset == NATIVE
}
