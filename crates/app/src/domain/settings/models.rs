//! Settings Models

use fernwood::{
    checkout::PaymentMethod,
    money::STORE_CURRENCY,
    pricing::{PricingError, TaxRate},
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreProfile {
    pub name: String,
    pub email: String,
    pub phone: String,

    /// ISO 4217 code
    pub currency: String,

    pub timezone: String,
}

impl Default for StoreProfile {
    fn default() -> Self {
        Self {
            name: "Fernwood Furniture".to_string(),
            email: "info@fernwood.example".to_string(),
            phone: "+233 30 123 4567".to_string(),
            currency: STORE_CURRENCY.iso_alpha_code.to_string(),
            timezone: "UTC".to_string(),
        }
    }
}

/// Payment methods offered at the till.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentToggles {
    pub cash: bool,
    pub card: bool,
    pub mobile_money: bool,
    pub bank_transfer: bool,
}

impl PaymentToggles {
    #[must_use]
    pub const fn allows(self, method: PaymentMethod) -> bool {
        match method {
            PaymentMethod::Cash => self.cash,
            PaymentMethod::Card => self.card,
            PaymentMethod::MobileMoney => self.mobile_money,
            PaymentMethod::BankTransfer => self.bank_transfer,
        }
    }

    /// Enabled methods in display order.
    pub fn enabled(self) -> impl Iterator<Item = PaymentMethod> {
        PaymentMethod::ALL
            .into_iter()
            .filter(move |method| self.allows(*method))
    }
}

impl Default for PaymentToggles {
    fn default() -> Self {
        Self {
            cash: true,
            card: true,
            mobile_money: true,
            bank_transfer: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationToggles {
    pub email: bool,
    pub low_stock: bool,
    pub new_order: bool,
    pub order_updates: bool,
}

impl Default for NotificationToggles {
    fn default() -> Self {
        Self {
            email: true,
            low_stock: true,
            new_order: true,
            order_updates: true,
        }
    }
}

/// Settings Model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub store: StoreProfile,
    pub payments: PaymentToggles,
    pub notifications: NotificationToggles,

    /// Percentage points, e.g. `15`
    pub tax_rate: Decimal,
}

impl Settings {
    /// Tax rate for pricing carts.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::TaxRateOutOfRange`] if the stored rate is outside 0 to 100.
    pub fn tax(&self) -> Result<TaxRate, PricingError> {
        TaxRate::from_percent_points(self.tax_rate)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store: StoreProfile::default(),
            payments: PaymentToggles::default(),
            notifications: NotificationToggles::default(),
            tax_rate: TaxRate::default().percent_points(),
        }
    }
}

/// Settings Update Model
///
/// Sections left out stay as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct SettingsUpdate {
    pub store: Option<StoreProfile>,
    pub payments: Option<PaymentToggles>,
    pub notifications: Option<NotificationToggles>,
    pub tax_rate: Option<Decimal>,
}
