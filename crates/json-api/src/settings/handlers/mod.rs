//! Settings Handlers

use fernwood_app::domain::settings::models::{
    NotificationToggles, PaymentToggles, Settings, StoreProfile,
};
use salvo::oapi::ToSchema;
use serde::{Deserialize, Serialize};

use crate::extensions::*;

pub(crate) mod get;
pub(crate) mod update;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub(crate) struct StoreProfileBody {
    pub name: String,
    pub email: String,
    pub phone: String,

    /// ISO 4217 code, always `GHS`
    pub currency: String,

    pub timezone: String,
}

impl From<StoreProfile> for StoreProfileBody {
    fn from(store: StoreProfile) -> Self {
        Self {
            name: store.name,
            email: store.email,
            phone: store.phone,
            currency: store.currency,
            timezone: store.timezone,
        }
    }
}

impl From<StoreProfileBody> for StoreProfile {
    fn from(body: StoreProfileBody) -> Self {
        Self {
            name: body.name,
            email: body.email,
            phone: body.phone,
            currency: body.currency,
            timezone: body.timezone,
        }
    }
}

/// Payment methods offered at the till
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub(crate) struct PaymentsBody {
    pub cash: bool,
    pub card: bool,
    pub mobile_money: bool,
    pub bank_transfer: bool,
}

impl From<PaymentToggles> for PaymentsBody {
    fn from(toggles: PaymentToggles) -> Self {
        Self {
            cash: toggles.cash,
            card: toggles.card,
            mobile_money: toggles.mobile_money,
            bank_transfer: toggles.bank_transfer,
        }
    }
}

impl From<PaymentsBody> for PaymentToggles {
    fn from(body: PaymentsBody) -> Self {
        Self {
            cash: body.cash,
            card: body.card,
            mobile_money: body.mobile_money,
            bank_transfer: body.bank_transfer,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
pub(crate) struct NotificationsBody {
    pub email: bool,
    pub low_stock: bool,
    pub new_order: bool,
    pub order_updates: bool,
}

impl From<NotificationToggles> for NotificationsBody {
    fn from(toggles: NotificationToggles) -> Self {
        Self {
            email: toggles.email,
            low_stock: toggles.low_stock,
            new_order: toggles.new_order,
            order_updates: toggles.order_updates,
        }
    }
}

impl From<NotificationsBody> for NotificationToggles {
    fn from(body: NotificationsBody) -> Self {
        Self {
            email: body.email,
            low_stock: body.low_stock,
            new_order: body.new_order,
            order_updates: body.order_updates,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SettingsResponse {
    pub store: StoreProfileBody,
    pub payments: PaymentsBody,
    pub notifications: NotificationsBody,

    /// Percentage points as a decimal string, e.g. `"15"`
    pub tax_rate: String,

    /// Enabled payment methods in display order
    pub enabled_methods: Vec<String>,
}

impl From<Settings> for SettingsResponse {
    fn from(settings: Settings) -> Self {
        Self {
            enabled_methods: settings
                .payments
                .enabled()
                .map(|method| method.label())
                .collect(),
            store: settings.store.into(),
            payments: settings.payments.into(),
            notifications: settings.notifications.into(),
            tax_rate: settings.tax_rate.normalize().to_string(),
        }
    }
}
