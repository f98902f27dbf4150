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

use order_pricing_rs::{Adjustment, AdjustmentRole};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

// === Amount ===

#[test]
fn percentage_discount_amount() {
    let spec = Adjustment::Percentage(dec!(10));
    assert_eq!(spec.amount(dec!(100), AdjustmentRole::Discount), dec!(10));
    assert_eq!(Adjustment::Percentage(dec!(20)).discount_amount(dec!(250)), dec!(50));
    assert_eq!(Adjustment::Percentage(dec!(50)).discount_amount(dec!(50)), dec!(25));
}

#[test]
fn fixed_discount_amount() {
    assert_eq!(Adjustment::Fixed(dec!(15)).discount_amount(dec!(100)), dec!(15));
    assert_eq!(Adjustment::Fixed(dec!(30)).discount_amount(dec!(50)), dec!(30));
}

#[test]
fn fixed_discount_clamps_to_base() {
    let spec = Adjustment::Fixed(dec!(50));
    assert_eq!(spec.amount(dec!(30), AdjustmentRole::Discount), dec!(30));
    assert_eq!(spec.apply_discount(dec!(30)), Decimal::ZERO);
}

#[test]
fn fixed_surcharge_is_not_clamped() {
    let spec = Adjustment::Fixed(dec!(50));
    assert_eq!(spec.amount(dec!(30), AdjustmentRole::Surcharge), dec!(50));
    assert_eq!(spec.apply_surcharge(dec!(30)), dec!(80));
}

// === Apply ===

#[test]
fn apply_percentage_discount() {
    assert_eq!(Adjustment::Percentage(dec!(10)).apply_discount(dec!(100)), dec!(90));
    assert_eq!(Adjustment::Percentage(dec!(20)).apply_discount(dec!(250)), dec!(200));
    assert_eq!(Adjustment::Percentage(dec!(50)).apply_discount(dec!(50)), dec!(25));
}

#[test]
fn apply_fixed_discount() {
    assert_eq!(Adjustment::Fixed(dec!(15)).apply_discount(dec!(100)), dec!(85));
    assert_eq!(Adjustment::Fixed(dec!(30)).apply_discount(dec!(50)), dec!(20));
    assert_eq!(Adjustment::Fixed(dec!(20)).apply_discount(dec!(10)), Decimal::ZERO);
}

#[test]
fn discount_never_goes_negative() {
    assert_eq!(
        Adjustment::Percentage(dec!(200)).apply_discount(dec!(50)),
        Decimal::ZERO
    );
}

#[test]
fn surcharge_has_no_ceiling() {
    assert_eq!(
        Adjustment::Percentage(dec!(200)).apply_surcharge(dec!(50)),
        dec!(150)
    );
}

#[test]
fn zero_base_yields_zero_amounts() {
    assert_eq!(Adjustment::Percentage(dec!(10)).discount_amount(Decimal::ZERO), Decimal::ZERO);
    assert_eq!(Adjustment::Fixed(dec!(10)).discount_amount(Decimal::ZERO), Decimal::ZERO);
    assert_eq!(Adjustment::Fixed(dec!(10)).apply_surcharge(Decimal::ZERO), dec!(10));
}
