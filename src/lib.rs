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

//! # Order Pricing
//!
//! This library prices rental and retail orders: it applies item-level
//! discounts and surcharges, spreads order-level adjustments across the
//! items, and derives the order totals a shop persists and collects payment for.
//!
//! ## Core Components
//!
//! - [`Adjustment`]: Percentage or fixed discount/surcharge arithmetic
//! - [`distribute`]: Splits an order-level adjustment across line items
//! - [`Engine`]: Computes [`OrderTotals`] and reconciles payments
//! - [`ReportSummary`]: Aggregates many priced orders
//! - [`OrderError`]: Validation and reconciliation failures
//!
//! ## Example
//!
//! ```
//! use order_pricing_rs::{Adjustment, Engine, ItemKind, LineItem, ProductId};
//! use rust_decimal_macros::dec;
//!
//! let engine = Engine::new();
//!
//! let items = [
//!     LineItem::new(ProductId(1), ItemKind::Rental, dec!(100), 1)
//!         .with_discount(Adjustment::Percentage(dec!(10))),
//!     LineItem::new(ProductId(2), ItemKind::Sale, dec!(50), 2)
//!         .with_discount(Adjustment::Fixed(dec!(5))),
//! ];
//!
//! let totals = engine.compute_order_totals(&items, None, None);
//! assert_eq!(totals.subtotal, dec!(200));
//! assert_eq!(totals.grand_total, dec!(185));
//! ```
//!
//! ## Thread Safety
//!
//! Pricing is pure: no call shares mutable state with another, so an
//! [`Engine`] can be used from any number of threads at once.

pub mod adjustment;
mod base;
pub mod distribution;
mod engine;
pub mod error;
mod item;
mod payment;
mod report;
pub mod settings;
pub mod validation;

pub use adjustment::{Adjustment, AdjustmentRole};
pub use base::{ItemKind, OrderId, PaymentMethodId, ProductId};
pub use distribution::{distribute, distribute_over};
pub use engine::{Engine, OrderTotals, compute_order_totals};
pub use error::{OrderError, ParseAdjustmentError};
pub use item::{LineItem, PricedItem};
pub use payment::{Payment, reconcile};
pub use report::ReportSummary;
pub use settings::{PricingSettings, SettingsError};
