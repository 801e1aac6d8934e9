//! Settings service.

use async_trait::async_trait;
use fernwood::{money::STORE_CURRENCY, pricing::TaxRate};
use mockall::automock;
use tokio::sync::RwLock;
use tracing::info;

use crate::domain::settings::{
    errors::SettingsServiceError,
    models::{Settings, SettingsUpdate, StoreProfile},
};

#[derive(Debug, Default)]
pub struct InMemorySettingsService {
    settings: RwLock<Settings>,
}

impl InMemorySettingsService {
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: RwLock::new(settings),
        }
    }
}

fn validate_profile(profile: &StoreProfile) -> Result<(), SettingsServiceError> {
    if profile.name.trim().is_empty() {
        return Err(SettingsServiceError::MissingRequiredData("store name"));
    }

    if !profile
        .currency
        .trim()
        .eq_ignore_ascii_case(STORE_CURRENCY.iso_alpha_code)
    {
        return Err(SettingsServiceError::UnsupportedCurrency {
            expected: STORE_CURRENCY.iso_alpha_code,
            found: profile.currency.clone(),
        });
    }

    Ok(())
}

#[async_trait]
impl SettingsService for InMemorySettingsService {
    async fn get_settings(&self) -> Result<Settings, SettingsServiceError> {
        Ok(self.settings.read().await.clone())
    }

    #[tracing::instrument(skip(self, update))]
    async fn update_settings(
        &self,
        update: SettingsUpdate,
    ) -> Result<Settings, SettingsServiceError> {
        let mut settings = self.settings.write().await;
        let mut next = settings.clone();

        if let Some(mut store) = update.store {
            validate_profile(&store)?;

            store.currency = STORE_CURRENCY.iso_alpha_code.to_string();
            next.store = store;
        }

        if let Some(payments) = update.payments {
            if payments.enabled().next().is_none() {
                return Err(SettingsServiceError::NoPaymentMethods);
            }

            next.payments = payments;
        }

        if let Some(notifications) = update.notifications {
            next.notifications = notifications;
        }

        if let Some(points) = update.tax_rate {
            next.tax_rate = TaxRate::from_percent_points(points)?.percent_points();
        }

        *settings = next.clone();

        info!(tax_rate = %next.tax_rate, "settings updated");

        Ok(next)
    }
}

#[automock]
#[async_trait]
pub trait SettingsService: Send + Sync {
    async fn get_settings(&self) -> Result<Settings, SettingsServiceError>;

    /// Replace the sections present in `update`. Nothing changes if any section is invalid.
    async fn update_settings(
        &self,
        update: SettingsUpdate,
    ) -> Result<Settings, SettingsServiceError>;
}

#[cfg(test)]
mod tests {
    use fernwood::{checkout::PaymentMethod, pricing::PricingError};
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::domain::settings::models::PaymentToggles;

    use super::*;

    #[tokio::test]
    async fn defaults_charge_fifteen_percent_and_take_everything() -> TestResult {
        let service = InMemorySettingsService::default();

        let settings = service.get_settings().await?;

        assert_eq!(settings.tax_rate, Decimal::new(15, 0));
        assert_eq!(settings.payments.enabled().count(), 4);
        assert_eq!(settings.store.currency, "GHS");

        Ok(())
    }

    #[tokio::test]
    async fn update_tax_rate() -> TestResult {
        let service = InMemorySettingsService::default();

        let settings = service
            .update_settings(SettingsUpdate {
                tax_rate: Some(Decimal::new(125, 1)),
                ..SettingsUpdate::default()
            })
            .await?;

        assert_eq!(settings.tax()?.percent_points(), Decimal::new(125, 1));

        Ok(())
    }

    #[tokio::test]
    async fn out_of_range_tax_rate_changes_nothing() -> TestResult {
        let service = InMemorySettingsService::default();

        let result = service
            .update_settings(SettingsUpdate {
                payments: Some(PaymentToggles {
                    card: false,
                    ..PaymentToggles::default()
                }),
                tax_rate: Some(Decimal::new(150, 0)),
                ..SettingsUpdate::default()
            })
            .await;

        assert!(matches!(
            result,
            Err(SettingsServiceError::TaxRate(PricingError::TaxRateOutOfRange(_)))
        ));
        assert!(service.get_settings().await?.payments.card);

        Ok(())
    }

    #[tokio::test]
    async fn cannot_disable_every_payment_method() -> TestResult {
        let service = InMemorySettingsService::default();

        let result = service
            .update_settings(SettingsUpdate {
                payments: Some(PaymentToggles {
                    cash: false,
                    card: false,
                    mobile_money: false,
                    bank_transfer: false,
                }),
                ..SettingsUpdate::default()
            })
            .await;

        assert!(matches!(result, Err(SettingsServiceError::NoPaymentMethods)));

        Ok(())
    }

    #[tokio::test]
    async fn currency_is_fixed_to_the_store_currency() -> TestResult {
        let service = InMemorySettingsService::default();

        let result = service
            .update_settings(SettingsUpdate {
                store: Some(StoreProfile {
                    currency: "USD".to_string(),
                    ..StoreProfile::default()
                }),
                ..SettingsUpdate::default()
            })
            .await;

        assert!(matches!(
            result,
            Err(SettingsServiceError::UnsupportedCurrency { expected: "GHS", .. })
        ));

        Ok(())
    }

    #[test]
    fn toggles_gate_methods() {
        let toggles = PaymentToggles {
            bank_transfer: false,
            ..PaymentToggles::default()
        };

        assert!(toggles.allows(PaymentMethod::MobileMoney));
        assert!(!toggles.allows(PaymentMethod::BankTransfer));
    }
}
