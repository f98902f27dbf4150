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

use order_pricing_rs::{Adjustment, ItemKind, LineItem, ProductId, distribute};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn make_item(unit_price: Decimal, quantity: u32) -> LineItem {
    LineItem::new(ProductId(1), ItemKind::Rental, unit_price, quantity)
}

fn fixed_values(specs: &[Adjustment]) -> Vec<Decimal> {
    specs
        .iter()
        .map(|spec| match spec {
            Adjustment::Fixed(value) => *value,
            Adjustment::Percentage(_) => panic!("expected fixed share, got {spec}"),
        })
        .collect()
}

#[test]
fn percentage_is_distributed_unchanged() {
    let items = [
        make_item(dec!(100), 1),
        make_item(dec!(50), 2),
        make_item(dec!(25), 4),
    ];

    let specs = distribute(&items, Adjustment::Percentage(dec!(10)));

    assert_eq!(specs.len(), 3);
    assert!(specs.iter().all(|s| *s == Adjustment::Percentage(dec!(10))));
}

#[test]
fn percentage_is_uniform_regardless_of_prices() {
    let items = [make_item(dec!(999.99), 1), make_item(dec!(0.01), 7)];
    let specs = distribute(&items, Adjustment::Percentage(dec!(12.5)));
    assert_eq!(
        specs,
        vec![
            Adjustment::Percentage(dec!(12.5)),
            Adjustment::Percentage(dec!(12.5))
        ]
    );
}

#[test]
fn fixed_is_split_equally_between_equal_items() {
    let items = [
        make_item(dec!(100), 1),
        make_item(dec!(50), 2),
        make_item(dec!(25), 4),
    ];

    let specs = distribute(&items, Adjustment::Fixed(dec!(30)));

    assert_eq!(fixed_values(&specs), vec![dec!(10), dec!(10), dec!(10)]);
}

#[test]
fn fixed_is_split_proportionally() {
    let items = [
        make_item(dec!(200), 1), // 50%
        make_item(dec!(100), 1), // 25%
        make_item(dec!(100), 1), // 25%
    ];

    let specs = distribute(&items, Adjustment::Fixed(dec!(40)));

    assert_eq!(fixed_values(&specs), vec![dec!(20), dec!(10), dec!(10)]);
}

#[test]
fn zero_subtotal_gives_fixed_zero() {
    let items = [make_item(dec!(0), 1), make_item(dec!(0), 2)];

    let specs = distribute(&items, Adjustment::Fixed(dec!(10)));

    assert_eq!(
        specs,
        vec![Adjustment::Fixed(Decimal::ZERO), Adjustment::Fixed(Decimal::ZERO)]
    );
}

#[test]
fn fixed_shares_sum_exactly_to_order_amount() {
    let items = [
        make_item(dec!(19.99), 3),
        make_item(dec!(7.45), 1),
        make_item(dec!(120.00), 1),
        make_item(dec!(0.99), 11),
    ];

    let specs = distribute(&items, Adjustment::Fixed(dec!(17.23)));
    let sum: Decimal = fixed_values(&specs).iter().sum();

    assert_eq!(sum, dec!(17.23));
}

#[test]
fn fixed_shares_match_order_discount_after_clamping() {
    // Discount larger than the order: each share clamps to its own base.
    let items = [make_item(dec!(30), 1), make_item(dec!(10), 1)];
    let specs = distribute(&items, Adjustment::Fixed(dec!(100)));

    let applied: Decimal = items
        .iter()
        .zip(&specs)
        .map(|(item, spec)| spec.discount_amount(item.base_amount()))
        .sum();
    let subtotal: Decimal = items.iter().map(LineItem::base_amount).sum();

    assert_eq!(applied, Adjustment::Fixed(dec!(100)).discount_amount(subtotal));
}

#[test]
fn output_has_one_spec_per_item_in_order() {
    let items = [make_item(dec!(1), 1), make_item(dec!(3), 1)];
    let specs = distribute(&items, Adjustment::Fixed(dec!(4)));
    assert_eq!(fixed_values(&specs), vec![dec!(1), dec!(3)]);
}
