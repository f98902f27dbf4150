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

use crate::adjustment::Adjustment;
use crate::distribution::distribute_over;
use crate::error::OrderError;
use crate::item::{LineItem, PricedItem};
use crate::payment::{self, Payment};
use crate::settings::PricingSettings;
use crate::validation;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, warn};

/// Totals of one priced order.
///
/// Recomputed from scratch on every call. `grand_total` is always the sum
/// of the item totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderTotals {
    /// Sum of base amounts, before any adjustment.
    pub subtotal: Decimal,
    pub item_discount_amount: Decimal,
    pub order_discount_amount: Decimal,
    pub total_discount_amount: Decimal,
    pub item_surcharge_amount: Decimal,
    pub order_surcharge_amount: Decimal,
    pub total_surcharge_amount: Decimal,
    pub grand_total: Decimal,
    pub items: Vec<PricedItem>,
}

impl OrderTotals {
    /// Copy with every amount rounded to `scale` decimal places.
    ///
    /// Order-level sums are rounded independently of the items, so they can
    /// differ from the sum of rounded items by a unit.
    pub fn rounded(&self, scale: u32) -> Self {
        Self {
            subtotal: self.subtotal.round_dp(scale),
            item_discount_amount: self.item_discount_amount.round_dp(scale),
            order_discount_amount: self.order_discount_amount.round_dp(scale),
            total_discount_amount: self.total_discount_amount.round_dp(scale),
            item_surcharge_amount: self.item_surcharge_amount.round_dp(scale),
            order_surcharge_amount: self.order_surcharge_amount.round_dp(scale),
            total_surcharge_amount: self.total_surcharge_amount.round_dp(scale),
            grand_total: self.grand_total.round_dp(scale),
            items: self.items.iter().map(|item| item.rounded(scale)).collect(),
        }
    }
}

/// Order pricing engine.
///
/// Stateless apart from its settings; every call is independent, so one
/// engine can be shared freely between threads.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    settings: PricingSettings,
}

impl Engine {
    /// Creates an engine with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: PricingSettings) -> Self {
        Engine { settings }
    }

    pub fn settings(&self) -> &PricingSettings {
        &self.settings
    }

    /// Prices an order.
    ///
    /// # Steps
    ///
    /// | Step | Behavior |
    /// |------|----------|
    /// | Item adjustments | Each item's discount, then its surcharge on the discounted amount |
    /// | Order discount | Split over raw base amounts, never discounting an item past its subtotal |
    /// | Order surcharge | Split over post-discount item totals and added |
    /// | Grand total | Sum of final item totals |
    ///
    /// Input is assumed validated; see [`Engine::validate`].
    pub fn compute_order_totals(
        &self,
        items: &[LineItem],
        order_discount: Option<Adjustment>,
        order_surcharge: Option<Adjustment>,
    ) -> OrderTotals {
        let surcharges_enabled = !self.settings.inhibit_surcharge;
        if !surcharges_enabled
            && (order_surcharge.is_some() || items.iter().any(|item| item.surcharge.is_some()))
        {
            warn!("surcharges are inhibited by configuration and will be ignored");
        }

        let mut priced: Vec<PricedItem> = items
            .iter()
            .map(|item| PricedItem::from_line_item(item, surcharges_enabled))
            .collect();

        let subtotal: Decimal = priced.iter().map(|item| item.subtotal).sum();
        let item_discount_amount: Decimal = priced.iter().map(|item| item.discount_amount).sum();
        let item_surcharge_amount: Decimal = priced.iter().map(|item| item.surcharge_amount).sum();

        let order_discount = order_discount.filter(|spec| !spec.is_zero());
        let order_discount_amount = match order_discount {
            Some(spec) => self.apply_order_discount(&mut priced, spec),
            None => Decimal::ZERO,
        };

        let order_surcharge = order_surcharge.filter(|spec| surcharges_enabled && !spec.is_zero());
        let order_surcharge_amount = match order_surcharge {
            Some(spec) => self.apply_order_surcharge(&mut priced, spec),
            None => Decimal::ZERO,
        };

        let grand_total: Decimal = priced.iter().map(|item| item.total).sum();

        debug!(
            items = priced.len(),
            %subtotal,
            %order_discount_amount,
            %order_surcharge_amount,
            %grand_total,
            "priced order"
        );

        OrderTotals {
            subtotal,
            item_discount_amount,
            order_discount_amount,
            total_discount_amount: item_discount_amount + order_discount_amount,
            item_surcharge_amount,
            order_surcharge_amount,
            total_surcharge_amount: item_surcharge_amount + order_surcharge_amount,
            grand_total,
            items: priced,
        }
    }

    /// Returns the order-level discount actually taken off.
    ///
    /// An item's combined discount never exceeds its subtotal, so surcharges
    /// are never eaten into and totals stay non-negative.
    fn apply_order_discount(&self, priced: &mut [PricedItem], spec: Adjustment) -> Decimal {
        let weights: Vec<Decimal> = priced.iter().map(|item| item.subtotal).collect();
        let shares = distribute_over(&weights, spec, self.settings.scale);

        let mut applied = Decimal::ZERO;
        for (item, share) in priced.iter_mut().zip(shares) {
            let undiscounted = item.subtotal - item.discount_amount;
            let amount = share.discount_amount(item.subtotal).min(undiscounted);
            item.order_discount = Some(share);
            item.discount_amount += amount;
            item.total -= amount;
            applied += amount;
        }
        applied
    }

    /// Returns the order-level surcharge added.
    fn apply_order_surcharge(&self, priced: &mut [PricedItem], spec: Adjustment) -> Decimal {
        let weights: Vec<Decimal> = priced.iter().map(|item| item.total).collect();
        let shares = distribute_over(&weights, spec, self.settings.scale);

        let mut applied = Decimal::ZERO;
        for (item, share) in priced.iter_mut().zip(shares) {
            let amount = share.surcharge_amount(item.total);
            item.order_surcharge = Some(share);
            item.surcharge_amount += amount;
            item.total += amount;
            applied += amount;
        }
        applied
    }

    /// Runs the boundary checks against this engine's limits.
    ///
    /// # Errors
    ///
    /// - [`OrderError::EmptyOrder`] / [`OrderError::TooManyItems`] - Item count out of range.
    /// - [`OrderError::InvalidQuantity`] / [`OrderError::InvalidUnitPrice`] - Item out of range.
    /// - [`OrderError::NegativeAdjustment`] - Any adjustment below zero.
    /// - [`OrderError::InvalidPercentage`] - Discount percentage above 100.
    /// - [`OrderError::DiscountExceedsAmount`] - Fixed discount above what it applies to.
    pub fn validate(
        &self,
        items: &[LineItem],
        order_discount: Option<&Adjustment>,
        order_surcharge: Option<&Adjustment>,
    ) -> Result<(), OrderError> {
        validation::validate_order(items, order_discount, order_surcharge, &self.settings)
    }

    /// Checks that `payments` settle `totals.grand_total` within the configured tolerance.
    ///
    /// The total is compared at currency precision.
    pub fn reconcile_payments(
        &self,
        totals: &OrderTotals,
        payments: &[Payment],
    ) -> Result<Decimal, OrderError> {
        payment::reconcile(
            totals.grand_total.round_dp(self.settings.scale),
            payments,
            self.settings.payment_tolerance,
        )
    }
}

/// Prices an order with default settings.
pub fn compute_order_totals(
    items: &[LineItem],
    order_discount: Option<Adjustment>,
    order_surcharge: Option<Adjustment>,
) -> OrderTotals {
    Engine::new().compute_order_totals(items, order_discount, order_surcharge)
}
