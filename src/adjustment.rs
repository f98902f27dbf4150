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

//! Discount and surcharge arithmetic.
//!
//! An [`Adjustment`] is either a percentage of an amount or a flat currency
//! amount. Discounts and surcharges share the percentage math and differ in
//! two places:
//!
//! - a fixed discount never takes off more than the amount it applies to,
//!   while a fixed surcharge is added as-is;
//! - applying a discount is floored at zero, applying a surcharge has no ceiling.

use crate::error::ParseAdjustmentError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A discount or surcharge instruction.
///
/// Serialized as `{"type": "percentage", "value": "10"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum Adjustment {
    /// Percent of the amount, `10` meaning 10%.
    Percentage(Decimal),
    /// Flat currency amount.
    Fixed(Decimal),
}

/// Which way an adjustment moves an amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustmentRole {
    Discount,
    Surcharge,
}

impl Adjustment {
    pub fn value(&self) -> Decimal {
        match self {
            Self::Percentage(value) | Self::Fixed(value) => *value,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.value().is_zero()
    }

    /// Absolute amount this adjustment represents when applied to `base`.
    ///
    /// Fixed discounts are clamped to `base`; fixed surcharges are not.
    pub fn amount(&self, base: Decimal, role: AdjustmentRole) -> Decimal {
        match (self, role) {
            (Self::Percentage(percent), _) => base * *percent / Decimal::ONE_HUNDRED,
            (Self::Fixed(value), AdjustmentRole::Discount) => (*value).min(base),
            (Self::Fixed(value), AdjustmentRole::Surcharge) => *value,
        }
    }

    pub fn discount_amount(&self, base: Decimal) -> Decimal {
        self.amount(base, AdjustmentRole::Discount)
    }

    pub fn surcharge_amount(&self, base: Decimal) -> Decimal {
        self.amount(base, AdjustmentRole::Surcharge)
    }

    /// Returns `base` minus the discount, never below zero.
    pub fn apply_discount(&self, base: Decimal) -> Decimal {
        (base - self.discount_amount(base)).max(Decimal::ZERO)
    }

    /// Returns `base` plus the surcharge.
    pub fn apply_surcharge(&self, base: Decimal) -> Decimal {
        base + self.surcharge_amount(base)
    }
}

impl fmt::Display for Adjustment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Percentage(value) => write!(f, "{value}%"),
            Self::Fixed(value) => write!(f, "{value}"),
        }
    }
}

/// Parses `10%` as a percentage and `5.50` as a fixed amount.
impl FromStr for Adjustment {
    type Err = ParseAdjustmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseAdjustmentError::Empty);
        }

        let (raw, percentage) = match s.strip_suffix('%') {
            Some(raw) => (raw.trim_end(), true),
            None => (s, false),
        };
        let value = Decimal::from_str(raw)
            .map_err(|_| ParseAdjustmentError::InvalidValue(s.to_string()))?;
        if value.is_sign_negative() && !value.is_zero() {
            return Err(ParseAdjustmentError::Negative);
        }

        Ok(if percentage {
            Self::Percentage(value)
        } else {
            Self::Fixed(value)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn percentage_amount_is_same_for_both_roles() {
        let spec = Adjustment::Percentage(dec!(20));
        assert_eq!(spec.discount_amount(dec!(250)), dec!(50));
        assert_eq!(spec.surcharge_amount(dec!(250)), dec!(50));
    }

    #[test]
    fn fixed_discount_is_clamped_but_surcharge_is_not() {
        let spec = Adjustment::Fixed(dec!(50));
        assert_eq!(spec.discount_amount(dec!(30)), dec!(30));
        assert_eq!(spec.surcharge_amount(dec!(30)), dec!(50));
    }

    #[test]
    fn oversized_percentage_discount_floors_at_zero() {
        let spec = Adjustment::Percentage(dec!(200));
        assert_eq!(spec.discount_amount(dec!(50)), dec!(100));
        assert_eq!(spec.apply_discount(dec!(50)), Decimal::ZERO);
    }

    #[test]
    fn parse_percentage_and_fixed() {
        assert_eq!(
            "10%".parse::<Adjustment>(),
            Ok(Adjustment::Percentage(dec!(10)))
        );
        assert_eq!(
            " 12.5 % ".parse::<Adjustment>(),
            Ok(Adjustment::Percentage(dec!(12.5)))
        );
        assert_eq!("5.50".parse::<Adjustment>(), Ok(Adjustment::Fixed(dec!(5.50))));
    }

    #[test]
    fn parse_rejects_bad_input() {
        assert_eq!("".parse::<Adjustment>(), Err(ParseAdjustmentError::Empty));
        assert_eq!("-5".parse::<Adjustment>(), Err(ParseAdjustmentError::Negative));
        assert_eq!(
            "ten%".parse::<Adjustment>(),
            Err(ParseAdjustmentError::InvalidValue("ten%".into()))
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        for spec in [Adjustment::Percentage(dec!(7.5)), Adjustment::Fixed(dec!(3))] {
            assert_eq!(spec.to_string().parse::<Adjustment>(), Ok(spec));
        }
    }

    #[test]
    fn serializes_as_tagged_object() {
        let json = serde_json::to_string(&Adjustment::Percentage(dec!(10))).unwrap();
        assert_eq!(json, r#"{"type":"percentage","value":"10"}"#);

        let spec: Adjustment = serde_json::from_str(r#"{"type":"fixed","value":"4.25"}"#).unwrap();
        assert_eq!(spec, Adjustment::Fixed(dec!(4.25)));
    }
}
