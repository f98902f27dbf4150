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

//! Pricing settings loaded from an optional TOML file and `PRICING_*`
//! environment variables.

use config::{Config, ConfigError, Environment, File};
use rust_decimal::Decimal;

use crate::distribution::MAX_SCALE;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::warn;

/// File read when no explicit configuration path is given.
pub const DEFAULT_CONFIG_FILE: &str = "pricing.toml";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("configuration loading failed: {0}")]
    Load(#[from] ConfigError),

    /// The configured currency scale is beyond what `Decimal` can represent.
    #[error("invalid scale {scale}: at most {max} decimal places are supported")]
    InvalidScale { scale: u32, max: u32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingSettings {
    /// Decimal places of the currency.
    pub scale: u32,
    /// Largest accepted gap between payments and the order total.
    pub payment_tolerance: Decimal,
    /// Ignore every surcharge, item-level and order-level.
    pub inhibit_surcharge: bool,
    pub max_items: usize,
    pub max_quantity: u32,
    pub max_unit_price: Decimal,
}

impl Default for PricingSettings {
    fn default() -> Self {
        Self {
            scale: 2,
            payment_tolerance: Decimal::new(1, 2),
            inhibit_surcharge: false,
            max_items: 50,
            max_quantity: 1000,
            max_unit_price: Decimal::new(9_999_999, 2),
        }
    }
}

impl PricingSettings {
    /// Loads settings, falling back to defaults when the default file is absent.
    ///
    /// An explicitly requested file that cannot be read is an error, and so
    /// is a `scale` above [`MAX_SCALE`] from any source.
    pub fn load(config_path: Option<&Path>) -> Result<Self, SettingsError> {
        Self::load_with_env(config_path, environment())
    }

    fn load_with_env(config_path: Option<&Path>, env: Environment) -> Result<Self, SettingsError> {
        let settings = match Self::load_from(config_path, env) {
            Ok(settings) => settings,
            Err(err) if config_path.is_none() => {
                warn!("Could not read config file: {err}. Using default configuration.");
                Self::default()
            }
            Err(err) => return Err(err),
        };

        settings.validate()?;
        Ok(settings)
    }

    fn load_from(config_path: Option<&Path>, env: Environment) -> Result<Self, SettingsError> {
        let file = match config_path {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        let settings = Config::builder()
            .add_source(file)
            .add_source(env)
            .build()?
            .try_deserialize::<PricingSettings>()?;

        Ok(settings)
    }

    /// Checks values the type system cannot rule out.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.scale > MAX_SCALE {
            return Err(SettingsError::InvalidScale {
                scale: self.scale,
                max: MAX_SCALE,
            });
        }
        Ok(())
    }
}

/// `PRICING_*` variables, overriding the file.
fn environment() -> Environment {
    Environment::with_prefix("PRICING").try_parsing(true)
}
