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

//! Line items going into the engine and priced items coming out.

use crate::adjustment::Adjustment;
use crate::base::{ItemKind, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One product line of an order, as supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ProductId,
    pub kind: ItemKind,
    pub unit_price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub discount: Option<Adjustment>,
    #[serde(default)]
    pub surcharge: Option<Adjustment>,
}

impl LineItem {
    pub fn new(product_id: ProductId, kind: ItemKind, unit_price: Decimal, quantity: u32) -> Self {
        Self {
            product_id,
            kind,
            unit_price,
            quantity,
            discount: None,
            surcharge: None,
        }
    }

    pub fn with_discount(mut self, discount: Adjustment) -> Self {
        self.discount = Some(discount);
        self
    }

    pub fn with_surcharge(mut self, surcharge: Adjustment) -> Self {
        self.surcharge = Some(surcharge);
        self
    }

    /// Returns `unit_price * quantity`.
    pub fn base_amount(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// A line item with its derived amounts.
///
/// `total = subtotal - discount_amount + surcharge_amount` and never goes
/// below zero through a discount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PricedItem {
    pub product_id: ProductId,
    pub kind: ItemKind,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub discount: Option<Adjustment>,
    pub surcharge: Option<Adjustment>,
    /// This item's share of the order-level discount.
    pub order_discount: Option<Adjustment>,
    /// This item's share of the order-level surcharge.
    pub order_surcharge: Option<Adjustment>,
    pub subtotal: Decimal,
    pub discount_amount: Decimal,
    pub surcharge_amount: Decimal,
    pub total: Decimal,
}

impl PricedItem {
    /// Prices a line item with its own adjustments only.
    ///
    /// The discount is applied first and the surcharge is computed on the
    /// discounted amount.
    pub(crate) fn from_line_item(item: &LineItem, surcharges_enabled: bool) -> Self {
        let subtotal = item.base_amount();

        let discount = item.discount.filter(|spec| !spec.is_zero());
        let discount_amount = discount
            .map(|spec| spec.discount_amount(subtotal).min(subtotal))
            .unwrap_or(Decimal::ZERO);
        let discounted = subtotal - discount_amount;

        let surcharge = item
            .surcharge
            .filter(|spec| surcharges_enabled && !spec.is_zero());
        let surcharge_amount = surcharge
            .map(|spec| spec.surcharge_amount(discounted))
            .unwrap_or(Decimal::ZERO);

        Self {
            product_id: item.product_id,
            kind: item.kind,
            unit_price: item.unit_price,
            quantity: item.quantity,
            discount,
            surcharge,
            order_discount: None,
            order_surcharge: None,
            subtotal,
            discount_amount,
            surcharge_amount,
            total: discounted + surcharge_amount,
        }
    }

    /// Copy with every amount rounded to `scale` decimal places.
    pub fn rounded(&self, scale: u32) -> Self {
        Self {
            subtotal: self.subtotal.round_dp(scale),
            discount_amount: self.discount_amount.round_dp(scale),
            surcharge_amount: self.surcharge_amount.round_dp(scale),
            total: self.total.round_dp(scale),
            ..self.clone()
        }
    }
}
