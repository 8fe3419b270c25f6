//! BTC ↔ satoshi conversions
//!
//! Exact and synchronous; no rate lookup is involved.

use crate::{
    amount::{Amount, ToAmount},
    constants::SATOSHIS_PER_BITCOIN,
    error::ConversionError,
};
use rust_decimal::Decimal;

fn satoshis_per_bitcoin() -> Amount {
    Amount::new(Decimal::from(SATOSHIS_PER_BITCOIN))
}

/// Converts an amount of bitcoin to satoshis
///
/// Fractional satoshis are kept, e.g. `0.2490521409` BTC is
/// `24905214.09` sats.
pub fn bitcoin_to_satoshis(amount_in_btc: impl ToAmount) -> Result<Amount, ConversionError> {
    let btc = amount_in_btc.to_amount()?;
    Ok(btc.checked_mul(satoshis_per_bitcoin())?)
}

/// Converts an amount of satoshis to bitcoin
pub fn satoshis_to_bitcoin(amount_in_sats: impl ToAmount) -> Result<Amount, ConversionError> {
    let sats = amount_in_sats.to_amount()?;
    Ok(sats.checked_div(satoshis_per_bitcoin())?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_bitcoin_to_satoshis() {
        assert_eq!(bitcoin_to_satoshis(1).unwrap().to_f64(), 100_000_000.0);
        assert_eq!(bitcoin_to_satoshis(0.5).unwrap().to_f64(), 50_000_000.0);
        assert_eq!(bitcoin_to_satoshis(0.000015).unwrap().to_f64(), 1500.0);
        assert_eq!(bitcoin_to_satoshis(0.2490521409).unwrap().to_f64(), 24905214.09);
        assert_eq!(bitcoin_to_satoshis(2.4245).unwrap().to_f64(), 242450000.0);
        assert_eq!(bitcoin_to_satoshis(0).unwrap(), Amount::ZERO);
    }

    #[test]
    fn test_satoshis_to_bitcoin() {
        assert_eq!(satoshis_to_bitcoin(100_000_000).unwrap().to_f64(), 1.0);
        assert_eq!(satoshis_to_bitcoin(50_000_000).unwrap().to_f64(), 0.5);
        assert_eq!(satoshis_to_bitcoin(1500).unwrap().to_f64(), 0.000015);
        assert_eq!(satoshis_to_bitcoin(24905214.09).unwrap().to_f64(), 0.2490521409);
        assert_eq!(satoshis_to_bitcoin(242_450_000).unwrap().to_f64(), 2.4245);
        assert_eq!(satoshis_to_bitcoin(0).unwrap(), Amount::ZERO);
    }

    #[test]
    fn test_string_inputs() {
        assert_eq!(
            bitcoin_to_satoshis("0.00000001").unwrap().as_decimal(),
            dec!(1)
        );
        assert!(matches!(
            bitcoin_to_satoshis("one"),
            Err(ConversionError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_round_trip_at_satoshi_precision() {
        let samples = [
            "0",
            "0.00000001",
            "0.12345678",
            "1",
            "20999999.97690000",
            "0.1",
            "3.14159265",
        ];
        for sample in samples {
            let original = Amount::parse(sample).unwrap();
            let sats = bitcoin_to_satoshis(original).unwrap();
            assert_eq!(satoshis_to_bitcoin(sats).unwrap(), original, "{sample}");
        }
    }
}
