use crate::errors::{RouterError, RouterResult};
use crate::logic::Swap;
use alloy_primitives::Bytes;
use alloy_sol_types::{SolType, sol, sol_data};

sol! {
    /// ABI layout of one hop inside the flash-loan callback payload.
    struct SwapCall {
        address fromAsset;
        uint256 amountIn;
        address toAsset;
        address adapter;
        address pool;
        uint8 poolEdition;
        address recipient;
    }
}

type SwapCalls = sol_data::Array<SwapCall>;

impl From<&Swap> for SwapCall {
    fn from(hop: &Swap) -> Self {
        SwapCall {
            fromAsset: hop.from_asset,
            amountIn: hop.amount_in,
            toAsset: hop.to_asset,
            adapter: hop.adapter,
            pool: hop.pool,
            poolEdition: hop.pool_edition,
            recipient: hop.recipient,
        }
    }
}

impl From<SwapCall> for Swap {
    fn from(call: SwapCall) -> Self {
        Swap {
            from_asset: call.fromAsset,
            amount_in: call.amountIn,
            to_asset: call.toAsset,
            adapter: call.adapter,
            pool: call.pool,
            pool_edition: call.poolEdition,
            recipient: call.recipient,
        }
    }
}

pub fn encode_path(path: &[Swap]) -> Bytes {
    let calls: Vec<SwapCall> = path.iter().map(SwapCall::from).collect();
    Bytes::from(SwapCalls::abi_encode(&calls))
}

pub fn decode_path(data: &[u8]) -> RouterResult<Vec<Swap>> {
    let calls = SwapCalls::abi_decode(data).map_err(|e| RouterError::InvalidCalldata(e.to_string()))?;
    Ok(calls.into_iter().map(Swap::from).collect())
}
