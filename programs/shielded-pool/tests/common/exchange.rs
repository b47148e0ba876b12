//! Exchange legs for swap tests.

use shielded_pool::{ExchangeError, ExchangeLeg};

/// Fills every order at `amount_in * numerator / denominator`.
pub struct FixedRateExchange {
    pub numerator: u64,
    pub denominator: u64,
    pub calls: usize,
}

impl FixedRateExchange {
    pub fn new(numerator: u64, denominator: u64) -> Self {
        Self {
            numerator,
            denominator,
            calls: 0,
        }
    }
}

impl ExchangeLeg for FixedRateExchange {
    fn exchange(
        &mut self,
        _token_in: &[u8; 32],
        _token_out: &[u8; 32],
        amount_in: u64,
        _min_amount_out: u64,
    ) -> Result<u64, ExchangeError> {
        self.calls += 1;
        let out = u128::from(amount_in) * u128::from(self.numerator) / u128::from(self.denominator);
        u64::try_from(out).map_err(|_| ExchangeError::InsufficientLiquidity)
    }
}

/// Venue with no liquidity.
pub struct DryExchange;

impl ExchangeLeg for DryExchange {
    fn exchange(
        &mut self,
        _token_in: &[u8; 32],
        _token_out: &[u8; 32],
        _amount_in: u64,
        _min_amount_out: u64,
    ) -> Result<u64, ExchangeError> {
        Err(ExchangeError::InsufficientLiquidity)
    }
}
