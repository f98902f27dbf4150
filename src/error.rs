// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Error types for order validation, payment reconciliation, and adjustment parsing.
//!
//! The pricing functions themselves never fail; these errors belong to the
//! boundary checks a caller runs before and after pricing.

use rust_decimal::Decimal;
use thiserror::Error;

/// Order validation and reconciliation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// Order has no line items
    #[error("order must contain at least one item")]
    EmptyOrder,

    /// Order has more line items than allowed
    #[error("order has {count} items (maximum is {max})")]
    TooManyItems { count: usize, max: usize },

    /// Quantity is zero or above the configured maximum
    #[error("invalid quantity for item {index} (must be between 1 and {max})")]
    InvalidQuantity { index: usize, max: u32 },

    /// Unit price is negative or above the configured maximum
    #[error("invalid unit price for item {index} (must be between 0 and {max})")]
    InvalidUnitPrice { index: usize, max: Decimal },

    /// Adjustment value is negative
    #[error("adjustment value must not be negative")]
    NegativeAdjustment,

    /// Percentage discount outside 0..=100
    #[error("percentage discount must be between 0 and 100")]
    InvalidPercentage,

    /// Fixed discount larger than the amount it applies to
    #[error("fixed discount {value} exceeds the amount {max}")]
    DiscountExceedsAmount { value: Decimal, max: Decimal },

    /// No payment was supplied
    #[error("at least one payment is required")]
    MissingPayment,

    /// Payment amount below the smallest currency unit
    #[error("payment amount must be at least 0.01")]
    InvalidPaymentAmount,

    /// Payments do not add up to the order total
    #[error("payments total {paid} does not match order total {expected}")]
    PaymentMismatch { paid: Decimal, expected: Decimal },
}

/// Failure to parse an adjustment such as `10%` or `5.00`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseAdjustmentError {
    #[error("empty adjustment")]
    Empty,

    #[error("invalid adjustment value: {0}")]
    InvalidValue(String),

    #[error("adjustment value must not be negative")]
    Negative,
}

#[cfg(test)]
mod tests {
    use super::{OrderError, ParseAdjustmentError};
    use rust_decimal_macros::dec;

    #[test]
    fn error_display_messages() {
        assert_eq!(
            OrderError::EmptyOrder.to_string(),
            "order must contain at least one item"
        );
        assert_eq!(
            OrderError::TooManyItems { count: 51, max: 50 }.to_string(),
            "order has 51 items (maximum is 50)"
        );
        assert_eq!(
            OrderError::InvalidQuantity { index: 2, max: 1000 }.to_string(),
            "invalid quantity for item 2 (must be between 1 and 1000)"
        );
        assert_eq!(
            OrderError::InvalidUnitPrice {
                index: 0,
                max: dec!(99999.99)
            }
            .to_string(),
            "invalid unit price for item 0 (must be between 0 and 99999.99)"
        );
        assert_eq!(
            OrderError::InvalidPercentage.to_string(),
            "percentage discount must be between 0 and 100"
        );
        assert_eq!(
            OrderError::DiscountExceedsAmount {
                value: dec!(50),
                max: dec!(30)
            }
            .to_string(),
            "fixed discount 50 exceeds the amount 30"
        );
        assert_eq!(
            OrderError::PaymentMismatch {
                paid: dec!(100.00),
                expected: dec!(185.00)
            }
            .to_string(),
            "payments total 100.00 does not match order total 185.00"
        );
        assert_eq!(
            ParseAdjustmentError::InvalidValue("abc".into()).to_string(),
            "invalid adjustment value: abc"
        );
    }

    #[test]
    fn errors_are_cloneable() {
        let error = OrderError::MissingPayment;
        let cloned = error.clone();
        assert_eq!(error, cloned);
    }
}
