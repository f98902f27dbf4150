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

//! Checking that an order's payments cover its total.

use crate::base::PaymentMethodId;
use crate::error::OrderError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// One payment towards an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub method: PaymentMethodId,
    pub amount: Decimal,
}

impl Payment {
    pub fn new(method: PaymentMethodId, amount: Decimal) -> Self {
        Self { method, amount }
    }
}

/// Smallest payment the shop accepts.
const MIN_PAYMENT: Decimal = dec!(0.01);

/// Verifies `payments` add up to `expected` within `tolerance`.
///
/// Returns the sum paid.
///
/// # Errors
///
/// - [`OrderError::MissingPayment`] - No payment supplied.
/// - [`OrderError::InvalidPaymentAmount`] - A payment is below 0.01.
/// - [`OrderError::PaymentMismatch`] - The sum differs from `expected` by more than `tolerance`.
pub fn reconcile(
    expected: Decimal,
    payments: &[Payment],
    tolerance: Decimal,
) -> Result<Decimal, OrderError> {
    if payments.is_empty() {
        return Err(OrderError::MissingPayment);
    }
    if payments.iter().any(|payment| payment.amount < MIN_PAYMENT) {
        return Err(OrderError::InvalidPaymentAmount);
    }

    let paid: Decimal = payments.iter().map(|payment| payment.amount).sum();
    if (paid - expected).abs() > tolerance {
        warn!(%paid, %expected, "payments do not match order total");
        return Err(OrderError::PaymentMismatch { paid, expected });
    }

    Ok(paid)
}
