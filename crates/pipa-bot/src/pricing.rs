// SPDX-FileCopyrightText: 2026 Pipa Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tank quotes.
//!
//! All three measuring methods go through the same unit price, so converting
//! money to liters and back yields the original amount. Values are kept
//! unrounded; rounding happens only when formatting replies.

use thiserror::Error;

/// A percentage outside `(0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("percentage must be greater than 0 and at most 100, got {0}")]
pub struct PercentOutOfRange(pub f64);

/// Liters, total and the price they were computed with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TankQuote {
    pub liters: f64,
    pub amount: f64,
    pub unit_price: f64,
}

/// The configured price of one liter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceList {
    price_per_liter: f64,
}

impl PriceList {
    pub fn new(price_per_liter: f64) -> Self {
        Self { price_per_liter }
    }

    pub fn price_per_liter(&self) -> f64 {
        self.price_per_liter
    }

    pub fn by_volume(&self, liters: f64) -> TankQuote {
        TankQuote {
            liters,
            amount: liters * self.price_per_liter,
            unit_price: self.price_per_liter,
        }
    }

    pub fn by_money(&self, amount: f64) -> TankQuote {
        TankQuote {
            liters: amount / self.price_per_liter,
            amount,
            unit_price: self.price_per_liter,
        }
    }

    /// Fill `percent` of a tank holding `capacity` liters.
    pub fn by_percentage(&self, capacity: f64, percent: f64) -> Result<TankQuote, PercentOutOfRange> {
        if !(percent > 0.0 && percent <= 100.0) {
            return Err(PercentOutOfRange(percent));
        }
        Ok(self.by_volume(capacity * percent / 100.0))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn tabulator_example() {
        let quote = PriceList::new(12.50).by_percentage(300.0, 85.0).unwrap();
        assert!((quote.liters - 255.0).abs() < 1e-9);
        assert!((quote.amount - 3187.50).abs() < 1e-9);
    }

    #[test]
    fn volume_example() {
        let quote = PriceList::new(12.50).by_volume(150.0);
        assert_eq!(quote.amount, 1875.0);
        assert_eq!(quote.unit_price, 12.50);
    }

    #[test]
    fn percentage_bounds() {
        let prices = PriceList::new(12.50);
        assert!(prices.by_percentage(300.0, 100.0).is_ok());
        assert_eq!(prices.by_percentage(300.0, 0.0), Err(PercentOutOfRange(0.0)));
        assert!(prices.by_percentage(300.0, 100.01).is_err());
        assert!(prices.by_percentage(300.0, -5.0).is_err());
        assert!(prices.by_percentage(300.0, f64::NAN).is_err());
    }

    proptest! {
        #[test]
        fn money_and_volume_round_trip(
            price in 0.5f64..100.0,
            liters in 0.1f64..10_000.0,
        ) {
            let prices = PriceList::new(price);
            let forward = prices.by_volume(liters);
            let back = prices.by_money(forward.amount);
            prop_assert!((back.liters - liters).abs() <= 1e-9 * liters.max(1.0));
            prop_assert!((forward.amount - liters * price).abs() <= 1e-9 * forward.amount.max(1.0));
        }

        #[test]
        fn money_quote_is_consistent(
            price in 0.5f64..100.0,
            amount in 1.0f64..100_000.0,
        ) {
            let quote = PriceList::new(price).by_money(amount);
            prop_assert!((quote.liters * quote.unit_price - amount).abs() <= 1e-9 * amount);
        }
    }
}
