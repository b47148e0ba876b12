//! Swap exchange leg.

/// Errors surfaced by an exchange leg.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ExchangeError {
    /// The venue cannot fill the requested amount
    #[error("insufficient liquidity for requested amount")]
    InsufficientLiquidity,
    /// The token pair is not routable
    #[error("unsupported token pair")]
    UnsupportedPair,
    /// Any other venue-specific failure
    #[error("exchange failed: {0}")]
    Other(String),
}

/// External exchange leg used by the swap operation.
///
/// The engine hands over exactly `amount_in` units of `token_in` and expects
/// the number of `token_out` units credited in return. The call is
/// synchronous; a returned error aborts the whole swap. Slippage enforcement
/// (`amount_out >= min_amount_out`) is done by the engine, not the leg.
///
/// Token identifiers are 32-byte little-endian field elements.
pub trait ExchangeLeg {
    /// Exchange `amount_in` of `token_in` for `token_out`, returning the amount out.
    fn exchange(
        &mut self,
        token_in: &[u8; 32],
        token_out: &[u8; 32],
        amount_in: u64,
        min_amount_out: u64,
    ) -> Result<u64, ExchangeError>;
}

impl<E: ExchangeLeg + ?Sized> ExchangeLeg for &mut E {
    fn exchange(
        &mut self,
        token_in: &[u8; 32],
        token_out: &[u8; 32],
        amount_in: u64,
        min_amount_out: u64,
    ) -> Result<u64, ExchangeError> {
        (**self).exchange(token_in, token_out, amount_in, min_amount_out)
    }
}
