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

//! Running summary over many priced orders.

use crate::base::{ItemKind, PaymentMethodId};
use crate::engine::OrderTotals;
use crate::payment::Payment;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReportSummary {
    pub total_orders: usize,
    pub total_amount: Decimal,
    pub total_items: u64,
    pub rental_items: u64,
    pub sale_items: u64,
    pub total_discount: Decimal,
    pub total_surcharge: Decimal,
    /// Omitted from serialized output when no payments were recorded.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub payment_method_totals: BTreeMap<PaymentMethodId, Decimal>,
}

impl ReportSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one order and the payments collected for it.
    pub fn record(&mut self, totals: &OrderTotals, payments: &[Payment]) {
        self.total_orders += 1;
        self.total_amount += totals.grand_total;
        self.total_discount += totals.total_discount_amount;
        self.total_surcharge += totals.total_surcharge_amount;

        for item in &totals.items {
            let quantity = u64::from(item.quantity);
            self.total_items += quantity;
            match item.kind {
                ItemKind::Rental => self.rental_items += quantity,
                ItemKind::Sale => self.sale_items += quantity,
            }
        }

        for payment in payments {
            *self
                .payment_method_totals
                .entry(payment.method)
                .or_insert(Decimal::ZERO) += payment.amount;
        }
    }

    /// Copy with money amounts rounded to `scale` decimal places.
    pub fn rounded(&self, scale: u32) -> Self {
        Self {
            total_amount: self.total_amount.round_dp(scale),
            total_discount: self.total_discount.round_dp(scale),
            total_surcharge: self.total_surcharge.round_dp(scale),
            payment_method_totals: self
                .payment_method_totals
                .iter()
                .map(|(method, amount)| (*method, amount.round_dp(scale)))
                .collect(),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adjustment::Adjustment;
    use crate::base::ProductId;
    use crate::engine::compute_order_totals;
    use crate::item::LineItem;
    use rust_decimal_macros::dec;

    #[test]
    fn summary_accumulates_orders_and_payments() {
        let first = compute_order_totals(
            &[
                LineItem::new(ProductId(1), ItemKind::Rental, dec!(100), 1),
                LineItem::new(ProductId(2), ItemKind::Sale, dec!(50), 2),
            ],
            Some(Adjustment::Percentage(dec!(10))),
            None,
        );
        let second = compute_order_totals(
            &[LineItem::new(ProductId(3), ItemKind::Rental, dec!(30), 3)
                .with_surcharge(Adjustment::Fixed(dec!(5)))],
            None,
            None,
        );

        let mut summary = ReportSummary::new();
        summary.record(
            &first,
            &[
                Payment::new(PaymentMethodId(1), dec!(80)),
                Payment::new(PaymentMethodId(2), dec!(100)),
            ],
        );
        summary.record(&second, &[Payment::new(PaymentMethodId(1), dec!(95))]);

        assert_eq!(summary.total_orders, 2);
        assert_eq!(summary.total_amount, dec!(275));
        assert_eq!(summary.total_items, 6);
        assert_eq!(summary.rental_items, 4);
        assert_eq!(summary.sale_items, 2);
        assert_eq!(summary.total_discount, dec!(20));
        assert_eq!(summary.total_surcharge, dec!(5));
        assert_eq!(summary.payment_method_totals[&PaymentMethodId(1)], dec!(175));
        assert_eq!(summary.payment_method_totals[&PaymentMethodId(2)], dec!(100));
    }

    #[test]
    fn empty_summary_is_all_zero() {
        let summary = ReportSummary::new();
        assert_eq!(summary.total_orders, 0);
        assert_eq!(summary.total_amount, Decimal::ZERO);
        assert!(summary.payment_method_totals.is_empty());
    }

    #[test]
    fn payment_totals_are_serialized_only_when_recorded() {
        let totals = compute_order_totals(
            &[LineItem::new(ProductId(1), ItemKind::Sale, dec!(20), 1)],
            None,
            None,
        );

        let mut unpaid = ReportSummary::new();
        unpaid.record(&totals, &[]);
        let json = serde_json::to_value(&unpaid).unwrap();
        assert!(json.get("payment_method_totals").is_none());

        let mut paid = ReportSummary::new();
        paid.record(&totals, &[Payment::new(PaymentMethodId(3), dec!(20))]);
        let json = serde_json::to_value(&paid).unwrap();
        assert_eq!(json["payment_method_totals"]["3"], "20");
    }
}
