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

//! Spreading an order-level adjustment across its line items.
//!
//! Percentages need no redistribution: the same percent applied to every
//! item adds up to the percent of the order. Fixed amounts are split in
//! proportion to each item's weight using the largest remainder method:
//!
//! 1. Round the order amount to the currency scale.
//! 2. Compute each exact share and round it down to the scale.
//! 3. Hand the leftover units, one each, to the items with the largest
//!    fractional remainders (earlier items first on ties).
//!
//! The shares therefore add up exactly to the rounded order amount.

use crate::adjustment::Adjustment;
use crate::item::LineItem;
use rust_decimal::{Decimal, RoundingStrategy};

/// Currency scale used by [`distribute`].
pub const DEFAULT_SCALE: u32 = 2;

/// Largest scale a `Decimal` can carry. Larger scales are clamped to it.
pub const MAX_SCALE: u32 = Decimal::MAX_SCALE;

/// Splits `spec` across `items` in proportion to their base amounts.
///
/// Returns one adjustment per item, in the same order. Fixed amounts are
/// split at [`DEFAULT_SCALE`]; the engine splits at its configured
/// `scale` instead, so use [`distribute_over`] to reproduce its shares
/// under another scale.
///
/// Leftover units go to the largest remainders with earlier items first on
/// ties, so items of equal weight can differ by one unit:
///
/// ```
/// use order_pricing_rs::{distribute_over, Adjustment};
/// use rust_decimal_macros::dec;
///
/// let weights = [dec!(100), dec!(100), dec!(100)];
/// let shares = distribute_over(&weights, Adjustment::Fixed(dec!(10)), 2);
/// let values: Vec<_> = shares.iter().map(Adjustment::value).collect();
/// assert_eq!(values, vec![dec!(3.34), dec!(3.33), dec!(3.33)]);
/// ```
pub fn distribute(items: &[LineItem], spec: Adjustment) -> Vec<Adjustment> {
    let weights: Vec<Decimal> = items.iter().map(LineItem::base_amount).collect();
    distribute_over(&weights, spec, DEFAULT_SCALE)
}

/// Splits `spec` across arbitrary non-negative `weights`.
///
/// When the weights add up to zero every item gets `Fixed(0)`. A `scale`
/// above [`MAX_SCALE`] is treated as [`MAX_SCALE`].
pub fn distribute_over(weights: &[Decimal], spec: Adjustment, scale: u32) -> Vec<Adjustment> {
    let total: Decimal = weights.iter().sum();
    if total.is_zero() {
        return vec![Adjustment::Fixed(Decimal::ZERO); weights.len()];
    }

    match spec {
        Adjustment::Percentage(_) => vec![spec; weights.len()],
        Adjustment::Fixed(amount) => allocate(amount, weights, total, scale)
            .into_iter()
            .map(Adjustment::Fixed)
            .collect(),
    }
}

/// Largest remainder allocation of `amount` by `weights`.
fn allocate(amount: Decimal, weights: &[Decimal], total: Decimal, scale: u32) -> Vec<Decimal> {
    let scale = scale.min(MAX_SCALE);
    let unit = Decimal::new(1, scale);
    let amount = amount.round_dp_with_strategy(scale, RoundingStrategy::MidpointNearestEven);

    // Multiply before dividing so exact splits stay exact.
    let exact: Vec<Decimal> = weights.iter().map(|w| amount * *w / total).collect();
    let mut shares: Vec<Decimal> = exact
        .iter()
        .map(|e| e.round_dp_with_strategy(scale, RoundingStrategy::ToZero))
        .collect();

    let allocated: Decimal = shares.iter().sum();
    let mut leftover = amount - allocated;
    if leftover < unit {
        return shares;
    }

    let mut by_remainder: Vec<usize> = (0..shares.len()).collect();
    // Stable sort keeps index order among equal remainders.
    by_remainder.sort_by(|&a, &b| (exact[b] - shares[b]).cmp(&(exact[a] - shares[a])));

    for index in by_remainder {
        if leftover < unit {
            break;
        }
        shares[index] += unit;
        leftover -= unit;
    }

    shares
}
