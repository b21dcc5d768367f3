use alloy_primitives::U256;

/// Per-branch inputs and outputs of one weighted split.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SplitAmounts {
    pub parts: Vec<U256>,
    pub outputs: Vec<U256>,
    pub amount_out: U256,
}

/// Cumulative amounts along a weighted path: `amounts[0]` is the input, `amounts[i + 1]` the
/// output of split `i`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PathAmounts {
    pub amounts: Vec<U256>,
    pub splits: Vec<SplitAmounts>,
}

impl PathAmounts {
    pub fn amount_out(&self) -> U256 {
        self.amounts.last().copied().unwrap_or_default()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinearAmounts {
    pub branch_inputs: Vec<U256>,
    pub branches: Vec<PathAmounts>,
    pub amount_out: U256,
}
