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

//! Boundary checks run before an order is priced.
//!
//! The engine accepts anything and computes a consistent result; these
//! checks reject the inputs a shop would never want priced.

use crate::adjustment::Adjustment;
use crate::error::OrderError;
use crate::item::LineItem;
use crate::settings::PricingSettings;
use rust_decimal::Decimal;

/// Checks a discount against the amount it will apply to.
pub fn validate_discount(spec: &Adjustment, base: Decimal) -> Result<(), OrderError> {
    if spec.value() < Decimal::ZERO {
        return Err(OrderError::NegativeAdjustment);
    }
    match spec {
        Adjustment::Percentage(percent) if *percent > Decimal::ONE_HUNDRED => {
            Err(OrderError::InvalidPercentage)
        }
        Adjustment::Fixed(value) if *value > base => Err(OrderError::DiscountExceedsAmount {
            value: *value,
            max: base,
        }),
        _ => Ok(()),
    }
}

/// Surcharges only need to be non-negative; percentages above 100 are allowed.
pub fn validate_surcharge(spec: &Adjustment) -> Result<(), OrderError> {
    if spec.value() < Decimal::ZERO {
        return Err(OrderError::NegativeAdjustment);
    }
    Ok(())
}

pub fn validate_line_item(
    index: usize,
    item: &LineItem,
    settings: &PricingSettings,
) -> Result<(), OrderError> {
    if item.quantity == 0 || item.quantity > settings.max_quantity {
        return Err(OrderError::InvalidQuantity {
            index,
            max: settings.max_quantity,
        });
    }
    if item.unit_price < Decimal::ZERO || item.unit_price > settings.max_unit_price {
        return Err(OrderError::InvalidUnitPrice {
            index,
            max: settings.max_unit_price,
        });
    }
    if let Some(discount) = &item.discount {
        validate_discount(discount, item.base_amount())?;
    }
    if let Some(surcharge) = &item.surcharge {
        validate_surcharge(surcharge)?;
    }
    Ok(())
}

/// Validates a whole order: item count, every item, and order-level adjustments.
///
/// A fixed order discount is checked against the order subtotal.
pub fn validate_order(
    items: &[LineItem],
    order_discount: Option<&Adjustment>,
    order_surcharge: Option<&Adjustment>,
    settings: &PricingSettings,
) -> Result<(), OrderError> {
    if items.is_empty() {
        return Err(OrderError::EmptyOrder);
    }
    if items.len() > settings.max_items {
        return Err(OrderError::TooManyItems {
            count: items.len(),
            max: settings.max_items,
        });
    }

    for (index, item) in items.iter().enumerate() {
        validate_line_item(index, item, settings)?;
    }

    if let Some(discount) = order_discount {
        let subtotal: Decimal = items.iter().map(LineItem::base_amount).sum();
        validate_discount(discount, subtotal)?;
    }
    if let Some(surcharge) = order_surcharge {
        validate_surcharge(surcharge)?;
    }
    Ok(())
}
