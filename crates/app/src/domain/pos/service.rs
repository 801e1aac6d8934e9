//! POS service.

use std::{num::TryFromIntError, sync::Arc, time::Duration};

use async_trait::async_trait;
use fernwood::{
    cart::{Cart, CartError, QuantityChange},
    checkout::{Checkout, CheckoutError, PaymentMethod, Settlement},
    discounts::DiscountScope,
    money::STORE_CURRENCY,
    pricing::{TaxRate, price_cart},
    products::ProductId,
    receipt::{Receipt, ReceiptStyle},
};
use jiff::Zoned;
use mockall::automock;
use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::{
    auth::AuthUser,
    domain::{
        customers::CustomersService,
        pos::{
            errors::PosServiceError,
            models::{CartView, CatalogItem, CustomerRef, DiscountInput, Sale},
        },
        products::ProductsService,
        settings::SettingsService,
        transactions::{
            TransactionsService,
            models::{NewTransaction, Transaction, TransactionLine},
        },
        users::models::UserUuid,
    },
};

/// Default pause while a payment is "processed".
pub const DEFAULT_PROCESSING_DELAY: Duration = Duration::from_millis(1500);

#[derive(Debug)]
struct OpenCheckout {
    checkout: Checkout<'static>,

    /// Rate the checkout total was priced at
    tax_rate: TaxRate,
}

#[derive(Debug)]
struct Register {
    cart: Cart<'static>,
    checkout: Option<OpenCheckout>,
    customer: Option<CustomerRef>,
}

impl Default for Register {
    fn default() -> Self {
        Self {
            cart: Cart::new(STORE_CURRENCY),
            checkout: None,
            customer: None,
        }
    }
}

impl Register {
    fn unlocked_cart(&mut self) -> Result<&mut Cart<'static>, PosServiceError> {
        if self.checkout.is_some() {
            return Err(PosServiceError::CheckoutInProgress);
        }

        Ok(&mut self.cart)
    }

    fn open_checkout(&mut self) -> Result<&mut OpenCheckout, PosServiceError> {
        self.checkout.as_mut().ok_or(PosServiceError::NoCheckout)
    }
}

type SharedRegister = Arc<Mutex<Register>>;

pub struct InMemoryPosService {
    registers: Mutex<FxHashMap<UserUuid, SharedRegister>>,
    products: Arc<dyn ProductsService>,
    customers: Arc<dyn CustomersService>,
    transactions: Arc<dyn TransactionsService>,
    settings: Arc<dyn SettingsService>,
    processing_delay: Duration,
}

impl InMemoryPosService {
    #[must_use]
    pub fn new(
        products: Arc<dyn ProductsService>,
        customers: Arc<dyn CustomersService>,
        transactions: Arc<dyn TransactionsService>,
        settings: Arc<dyn SettingsService>,
        processing_delay: Duration,
    ) -> Self {
        Self {
            registers: Mutex::new(FxHashMap::default()),
            products,
            customers,
            transactions,
            settings,
            processing_delay,
        }
    }

    async fn tax_rate(&self) -> Result<TaxRate, PosServiceError> {
        Ok(self.settings.get_settings().await?.tax()?)
    }

    async fn view(&self, register: &Register) -> Result<CartView, PosServiceError> {
        let tax_rate = match &register.checkout {
            Some(open) => open.tax_rate,
            None => self.tax_rate().await?,
        };

        Ok(CartView::new(
            &register.cart,
            tax_rate,
            register.customer.as_ref(),
            register.checkout.as_ref().map(|open| &open.checkout),
        )?)
    }

    async fn catalog_product(
        &self,
        product: &ProductId,
    ) -> Result<fernwood::products::Product<'static>, PosServiceError> {
        Ok(self
            .products
            .get_product(product)
            .await?
            .to_catalog_product()?)
    }

    /// The cashier's register, opened on first use.
    async fn register(&self, cashier: UserUuid) -> SharedRegister {
        Arc::clone(self.registers.lock().await.entry(cashier).or_default())
    }

    /// Run `change` against the cashier's register and return the updated view.
    async fn with_register(
        &self,
        cashier: UserUuid,
        change: impl FnOnce(&mut Register) -> Result<(), PosServiceError> + Send,
    ) -> Result<CartView, PosServiceError> {
        let register = self.register(cashier).await;
        let mut register = register.lock().await;

        change(&mut register)?;

        self.view(&register).await
    }
}

impl std::fmt::Debug for InMemoryPosService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryPosService")
            .field("processing_delay", &self.processing_delay)
            .finish_non_exhaustive()
    }
}

/// A payment taken off the request path once the checkout is processing.
struct PendingSale {
    register: SharedRegister,
    cashier: AuthUser,
    transactions: Arc<dyn TransactionsService>,
    customers: Arc<dyn CustomersService>,
    delay: Duration,
}

impl PendingSale {
    async fn settle(self) -> Result<Sale, PosServiceError> {
        tokio::time::sleep(self.delay).await;

        let mut register = self.register.lock().await;

        let (transaction, receipt) = match self.record(&mut register).await {
            Ok(recorded) => recorded,
            Err(source) => {
                // Drop the checkout so the cart can be rung up again.
                register.checkout = None;

                return Err(source);
            }
        };

        let customer = std::mem::take(&mut *register).customer;

        drop(register);

        if let Some(customer) = customer
            && let Err(source) = self
                .customers
                .record_purchase(&customer.id, transaction.total, Zoned::now().date())
                .await
        {
            warn!(customer = %customer.id, %source, "failed to credit customer");
        }

        info!(transaction = %transaction.id, total = transaction.total, "sale completed");

        Ok(Sale {
            transaction,
            receipt,
        })
    }

    async fn record(
        &self,
        register: &mut Register,
    ) -> Result<(Transaction, String), PosServiceError> {
        let open = register.open_checkout()?;
        let tax_rate = open.tax_rate;
        let settlement = open.checkout.complete()?;

        let receipt = Receipt::from_cart(&register.cart, tax_rate, Some(settlement))?
            .render(ReceiptStyle::Plain)?;

        let sale = new_transaction(
            &register.cart,
            tax_rate,
            &settlement,
            &self.cashier,
            register.customer.as_ref(),
        )?;

        let transaction = self.transactions.record_transaction(sale).await?;

        Ok((transaction, receipt))
    }
}

fn transaction_lines(cart: &Cart<'_>) -> Result<Vec<TransactionLine>, PosServiceError> {
    cart.iter()
        .map(|line| {
            Ok(TransactionLine {
                product_id: line.product().to_string(),
                name: line.name().to_string(),
                sku: line.sku().to_string(),
                unit_price: minor(line.unit_price())?,
                quantity: line.quantity(),
                discount: minor(line.discount_amount()?)?,
                total: minor(line.total()?)?,
            })
        })
        .collect()
}

fn minor(amount: Money<'_, Currency>) -> Result<u64, TryFromIntError> {
    u64::try_from(amount.to_minor_units())
}

fn new_transaction(
    cart: &Cart<'_>,
    tax_rate: TaxRate,
    settlement: &Settlement<'_>,
    cashier: &AuthUser,
    customer: Option<&CustomerRef>,
) -> Result<NewTransaction, PosServiceError> {
    let totals = price_cart(cart, tax_rate)?;

    Ok(NewTransaction {
        cashier: cashier.name.clone(),
        cashier_id: Some(cashier.uuid),
        customer: customer.map(|customer| customer.name.clone()),
        customer_id: customer.map(|customer| customer.id.clone()),
        lines: transaction_lines(cart)?,
        subtotal: minor(totals.subtotal)?,
        discount: minor(totals.discount)?,
        tax: minor(totals.tax)?,
        total: minor(totals.total)?,
        payment_method: settlement.method,
        tendered: settlement.tendered.map(minor).transpose()?,
        change: settlement.change.map(minor).transpose()?,
    })
}

#[async_trait]
impl PosService for InMemoryPosService {
    async fn catalog(&self, query: &str) -> Result<Vec<CatalogItem>, PosServiceError> {
        let catalog = self.products.catalog().await?;
        let threshold = self.products.low_stock_threshold();

        Ok(catalog
            .filter(query)
            .into_iter()
            .map(|product| CatalogItem::new(product, threshold))
            .collect())
    }

    async fn cart(&self, cashier: UserUuid) -> Result<CartView, PosServiceError> {
        self.with_register(cashier, |_| Ok(())).await
    }

    #[tracing::instrument(skip(self))]
    async fn add_item(
        &self,
        cashier: UserUuid,
        product: &ProductId,
    ) -> Result<CartView, PosServiceError> {
        let product = self.catalog_product(product).await?;

        self.with_register(cashier, |register| {
            let quantity = register.unlocked_cart()?.add(&product)?;

            debug!(product = %product.id, quantity, "item added");

            Ok(())
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn update_quantity(
        &self,
        cashier: UserUuid,
        product: &ProductId,
        quantity: u32,
    ) -> Result<CartView, PosServiceError> {
        let product = match self.catalog_product(product).await {
            Ok(product) => product,
            // A product deleted mid-sale can still be taken off the cart.
            Err(PosServiceError::Products(_)) if quantity == 0 => {
                return self.remove_item(cashier, product).await;
            }
            Err(source) => return Err(source),
        };

        self.with_register(cashier, |register| {
            match register.unlocked_cart()?.update_quantity(&product, quantity)? {
                QuantityChange::Set(quantity) => debug!(quantity, "quantity updated"),
                QuantityChange::Removed => debug!("line removed"),
            }

            Ok(())
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn remove_item(
        &self,
        cashier: UserUuid,
        product: &ProductId,
    ) -> Result<CartView, PosServiceError> {
        self.with_register(cashier, |register| {
            register
                .unlocked_cart()?
                .remove(product)
                .ok_or_else(|| CartError::LineNotFound(product.clone()))?;

            Ok(())
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn clear_cart(&self, cashier: UserUuid) -> Result<CartView, PosServiceError> {
        self.with_register(cashier, |register| {
            register.unlocked_cart()?.clear();
            register.customer = None;

            Ok(())
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn apply_discount(
        &self,
        cashier: UserUuid,
        scope: DiscountScope,
        discount: DiscountInput,
    ) -> Result<CartView, PosServiceError> {
        let request = discount.to_request()?;

        self.with_register(cashier, |register| {
            register.unlocked_cart()?.apply_discount(&scope, request)?;

            Ok(())
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn remove_discount(
        &self,
        cashier: UserUuid,
        scope: DiscountScope,
    ) -> Result<CartView, PosServiceError> {
        self.with_register(cashier, |register| {
            register.unlocked_cart()?.remove_discount(&scope)?;

            Ok(())
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn attach_customer(
        &self,
        cashier: UserUuid,
        customer: Option<String>,
    ) -> Result<CartView, PosServiceError> {
        let customer = match customer {
            Some(id) => Some(CustomerRef::from(&self.customers.get_customer(&id).await?)),
            None => None,
        };

        self.with_register(cashier, |register| {
            register.customer = customer;

            Ok(())
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn begin_checkout(&self, cashier: UserUuid) -> Result<CartView, PosServiceError> {
        let tax_rate = self.tax_rate().await?;

        let register = self.register(cashier).await;
        let mut register = register.lock().await;

        if register.checkout.is_some() {
            return Err(PosServiceError::CheckoutInProgress);
        }

        let totals = price_cart(&register.cart, tax_rate)?;
        let mut checkout = Checkout::new(&totals);

        checkout.begin()?;

        register.checkout = Some(OpenCheckout { checkout, tax_rate });

        info!(total = totals.total.to_minor_units(), "checkout started");

        self.view(&register).await
    }

    #[tracing::instrument(skip(self))]
    async fn select_method(
        &self,
        cashier: UserUuid,
        method: PaymentMethod,
    ) -> Result<CartView, PosServiceError> {
        let settings = self.settings.get_settings().await?;

        if !settings.payments.allows(method) {
            return Err(PosServiceError::MethodDisabled(method));
        }

        self.with_register(cashier, |register| {
            register.open_checkout()?.checkout.select_method(method)?;

            Ok(())
        })
        .await
    }

    #[tracing::instrument(skip(self))]
    async fn tender(&self, cashier: UserUuid, amount: u64) -> Result<CartView, PosServiceError> {
        let tendered = Money::from_minor(i64::try_from(amount)?, STORE_CURRENCY);

        self.with_register(cashier, |register| {
            register.open_checkout()?.checkout.tender(tendered)?;

            Ok(())
        })
        .await
    }

    #[tracing::instrument(skip(self, cashier), fields(cashier = %cashier.uuid))]
    async fn process_payment(&self, cashier: &AuthUser) -> Result<Sale, PosServiceError> {
        let register = self.register(cashier.uuid).await;
        let method = register.lock().await.open_checkout()?.checkout.process()?;

        info!(%method, "processing payment");

        let pending = PendingSale {
            register,
            cashier: cashier.clone(),
            transactions: Arc::clone(&self.transactions),
            customers: Arc::clone(&self.customers),
            delay: self.processing_delay,
        };

        // Settles even if the caller stops waiting.
        tokio::spawn(pending.settle()).await?
    }

    #[tracing::instrument(skip(self))]
    async fn cancel_checkout(&self, cashier: UserUuid) -> Result<CartView, PosServiceError> {
        self.with_register(cashier, |register| {
            match register.open_checkout()?.checkout.cancel() {
                Ok(()) => {}
                // Settled but never recorded, so nothing was sold.
                Err(CheckoutError::AlreadySettled) => warn!("discarding unrecorded checkout"),
                Err(source) => return Err(source.into()),
            }

            register.checkout = None;

            Ok(())
        })
        .await
    }
}

#[automock]
#[async_trait]
pub trait PosService: Send + Sync {
    /// Products whose name or SKU contains `query`. A blank query lists everything.
    async fn catalog(&self, query: &str) -> Result<Vec<CatalogItem>, PosServiceError>;

    /// The cashier's current cart.
    async fn cart(&self, cashier: UserUuid) -> Result<CartView, PosServiceError>;

    /// Add one unit, up to the stock on hand.
    async fn add_item(
        &self,
        cashier: UserUuid,
        product: &ProductId,
    ) -> Result<CartView, PosServiceError>;

    /// Set a line's quantity. Zero removes the line.
    async fn update_quantity(
        &self,
        cashier: UserUuid,
        product: &ProductId,
        quantity: u32,
    ) -> Result<CartView, PosServiceError>;

    async fn remove_item(
        &self,
        cashier: UserUuid,
        product: &ProductId,
    ) -> Result<CartView, PosServiceError>;

    /// Empty the cart and detach the customer.
    async fn clear_cart(&self, cashier: UserUuid) -> Result<CartView, PosServiceError>;

    async fn apply_discount(
        &self,
        cashier: UserUuid,
        scope: DiscountScope,
        discount: DiscountInput,
    ) -> Result<CartView, PosServiceError>;

    async fn remove_discount(
        &self,
        cashier: UserUuid,
        scope: DiscountScope,
    ) -> Result<CartView, PosServiceError>;

    /// Attach a customer to the sale, or detach with `None`.
    async fn attach_customer(
        &self,
        cashier: UserUuid,
        customer: Option<String>,
    ) -> Result<CartView, PosServiceError>;

    /// Price the cart at the current tax rate and lock it for payment.
    async fn begin_checkout(&self, cashier: UserUuid) -> Result<CartView, PosServiceError>;

    /// Choose how the customer pays. Methods turned off in settings are refused.
    async fn select_method(
        &self,
        cashier: UserUuid,
        method: PaymentMethod,
    ) -> Result<CartView, PosServiceError>;

    /// Record cash handed over, in minor units.
    async fn tender(&self, cashier: UserUuid, amount: u64) -> Result<CartView, PosServiceError>;

    /// Take the payment, record the transaction and clear the register.
    async fn process_payment(&self, cashier: &AuthUser) -> Result<Sale, PosServiceError>;

    /// Close the checkout and unlock the cart.
    async fn cancel_checkout(&self, cashier: UserUuid) -> Result<CartView, PosServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rust_decimal::Decimal;
    use testresult::TestResult;

    use crate::{
        auth::Role,
        domain::{
            customers::CustomersService,
            settings::models::{PaymentToggles, SettingsUpdate},
            transactions::{
                MockTransactionsService, TransactionsServiceError,
                models::{TransactionFilter, TransactionStatus},
            },
        },
        test::TestContext,
    };

    use super::*;

    fn cashier() -> AuthUser {
        AuthUser {
            uuid: UserUuid::new(),
            email: "cashier@example.com".to_string(),
            name: "Cashier User".to_string(),
            role: Role::Cashier,
        }
    }

    fn sofa() -> ProductId {
        ProductId::from("PROD-001")
    }

    fn table() -> ProductId {
        ProductId::from("PROD-002")
    }

    fn pos_with_transactions(
        ctx: &TestContext,
        transactions: MockTransactionsService,
    ) -> InMemoryPosService {
        InMemoryPosService::new(
            Arc::clone(&ctx.products),
            Arc::clone(&ctx.customers),
            Arc::new(transactions),
            Arc::clone(&ctx.settings),
            Duration::ZERO,
        )
    }

    #[tokio::test]
    async fn catalog_search_matches_name_or_sku() -> TestResult {
        let ctx = TestContext::new().await?;

        let items = ctx.pos.catalog("fur-b").await?;

        assert_eq!(items.len(), 1);
        assert_eq!(items.first().map(|item| item.name.as_str()), Some("King Size Bed Frame"));
        assert_eq!(ctx.pos.catalog("").await?.len(), 5);

        Ok(())
    }

    #[tokio::test]
    async fn cart_totals_follow_the_settings_tax_rate() -> TestResult {
        let ctx = TestContext::new().await?;
        let till = cashier();

        ctx.pos.add_item(till.uuid, &sofa()).await?;
        ctx.pos.add_item(till.uuid, &sofa()).await?;

        let view = ctx.pos.add_item(till.uuid, &table()).await?;

        assert_eq!(view.subtotal, 349_997);
        assert_eq!(view.tax, 52_500);
        assert_eq!(view.total, 402_497);
        assert_eq!(view.item_count, 3);

        ctx.settings
            .update_settings(SettingsUpdate {
                tax_rate: Some(Decimal::TEN),
                ..SettingsUpdate::default()
            })
            .await?;

        let view = ctx.pos.cart(till.uuid).await?;

        assert_eq!(view.tax, 35_000);
        assert_eq!(view.tax_rate, Decimal::TEN);

        Ok(())
    }

    #[tokio::test]
    async fn adding_beyond_stock_is_refused() -> TestResult {
        let ctx = TestContext::new().await?;
        let till = cashier();

        for _ in 0..3 {
            ctx.pos.add_item(till.uuid, &table()).await?;
        }

        let result = ctx.pos.add_item(till.uuid, &table()).await;

        assert!(matches!(
            result,
            Err(PosServiceError::Cart(CartError::StockCeiling { available: 3, .. }))
        ));

        let out_of_stock = ctx.pos.add_item(till.uuid, &ProductId::from("PROD-003")).await;

        assert!(matches!(
            out_of_stock,
            Err(PosServiceError::Cart(CartError::OutOfStock(_)))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn registers_are_per_cashier() -> TestResult {
        let ctx = TestContext::new().await?;
        let first = cashier();
        let second = cashier();

        ctx.pos.add_item(first.uuid, &sofa()).await?;

        assert!(ctx.pos.cart(second.uuid).await?.lines.is_empty());
        assert_eq!(ctx.pos.cart(first.uuid).await?.lines.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn cart_is_locked_while_checking_out() -> TestResult {
        let ctx = TestContext::new().await?;
        let till = cashier();

        ctx.pos.add_item(till.uuid, &sofa()).await?;
        ctx.pos.begin_checkout(till.uuid).await?;

        let result = ctx.pos.add_item(till.uuid, &table()).await;

        assert!(matches!(result, Err(PosServiceError::CheckoutInProgress)));

        ctx.pos.cancel_checkout(till.uuid).await?;

        assert!(ctx.pos.add_item(till.uuid, &table()).await.is_ok());

        Ok(())
    }

    #[tokio::test]
    async fn empty_cart_cannot_check_out() -> TestResult {
        let ctx = TestContext::new().await?;

        let result = ctx.pos.begin_checkout(UserUuid::new()).await;

        assert!(matches!(
            result,
            Err(PosServiceError::Checkout(CheckoutError::EmptyCart))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn cash_sale_records_transaction_and_clears_register() -> TestResult {
        let ctx = TestContext::new().await?;
        let till = cashier();

        ctx.pos.add_item(till.uuid, &sofa()).await?;
        ctx.pos
            .apply_discount(
                till.uuid,
                DiscountScope::Cart,
                DiscountInput::Percent(Decimal::TEN),
            )
            .await?;
        ctx.pos
            .attach_customer(till.uuid, Some("1".to_string()))
            .await?;
        ctx.pos.begin_checkout(till.uuid).await?;
        ctx.pos
            .select_method(till.uuid, PaymentMethod::Cash)
            .await?;

        let short = ctx.pos.tender(till.uuid, 100_000).await?;

        assert_eq!(short.checkout.as_ref().and_then(|checkout| checkout.change), None);
        assert!(matches!(
            ctx.pos.process_payment(&till).await,
            Err(PosServiceError::Checkout(CheckoutError::InsufficientTender { .. }))
        ));

        let tendered = ctx.pos.tender(till.uuid, 150_000).await?;

        // 1299.99 - 130.00 + 175.50 tax
        assert_eq!(tendered.total, 134_549);
        assert_eq!(
            tendered.checkout.as_ref().and_then(|checkout| checkout.change),
            Some(15_451)
        );

        let sale = ctx.pos.process_payment(&till).await?;

        assert_eq!(sale.transaction.id, "TXN-1006");
        assert_eq!(sale.transaction.total, 134_549);
        assert_eq!(sale.transaction.change, Some(15_451));
        assert_eq!(sale.transaction.customer.as_deref(), Some("John Doe"));
        assert_eq!(sale.transaction.status, TransactionStatus::Completed);
        assert!(sale.receipt.contains("Change:"));

        let cart = ctx.pos.cart(till.uuid).await?;

        assert!(cart.lines.is_empty());
        assert!(cart.checkout.is_none());
        assert!(cart.customer.is_none());

        let customer = ctx.customers.get_customer("1").await?;

        assert_eq!(customer.orders, 6);

        let today = ctx
            .transactions
            .list_transactions(&TransactionFilter::default(), Timestamp::now())
            .await?;

        assert_eq!(today.len(), 6);

        Ok(())
    }

    #[tokio::test]
    async fn card_sale_needs_no_tender() -> TestResult {
        let ctx = TestContext::new().await?;
        let till = cashier();

        ctx.pos.add_item(till.uuid, &table()).await?;
        ctx.pos.begin_checkout(till.uuid).await?;

        let confirming = ctx
            .pos
            .select_method(till.uuid, PaymentMethod::Card)
            .await?;

        assert_eq!(
            confirming.checkout.as_ref().map(|checkout| checkout.state),
            Some("confirming")
        );

        let sale = ctx.pos.process_payment(&till).await?;

        assert_eq!(sale.transaction.payment_method, PaymentMethod::Card);
        assert_eq!(sale.transaction.tendered, None);

        Ok(())
    }

    #[tokio::test]
    async fn disabled_methods_are_refused() -> TestResult {
        let ctx = TestContext::new().await?;
        let till = cashier();

        ctx.settings
            .update_settings(SettingsUpdate {
                payments: Some(PaymentToggles {
                    mobile_money: false,
                    ..PaymentToggles::default()
                }),
                ..SettingsUpdate::default()
            })
            .await?;

        ctx.pos.add_item(till.uuid, &sofa()).await?;
        ctx.pos.begin_checkout(till.uuid).await?;

        let result = ctx
            .pos
            .select_method(till.uuid, PaymentMethod::MobileMoney)
            .await;

        assert!(matches!(
            result,
            Err(PosServiceError::MethodDisabled(PaymentMethod::MobileMoney))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn second_payment_while_processing_is_rejected() -> TestResult {
        let ctx = TestContext::with_processing_delay(Duration::from_millis(200)).await?;
        let till = cashier();

        ctx.pos.add_item(till.uuid, &sofa()).await?;
        ctx.pos.begin_checkout(till.uuid).await?;
        ctx.pos
            .select_method(till.uuid, PaymentMethod::BankTransfer)
            .await?;

        let (first, second) = tokio::join!(ctx.pos.process_payment(&till), async {
            tokio::time::sleep(Duration::from_millis(50)).await;

            ctx.pos.process_payment(&till).await
        });

        assert!(first.is_ok());
        assert!(matches!(
            second,
            Err(PosServiceError::Checkout(CheckoutError::AlreadyProcessing))
        ));

        Ok(())
    }

    #[tokio::test]
    async fn abandoned_payment_still_settles() -> TestResult {
        let ctx = TestContext::with_processing_delay(Duration::from_millis(300)).await?;
        let till = cashier();

        ctx.pos.add_item(till.uuid, &table()).await?;
        ctx.pos.begin_checkout(till.uuid).await?;
        ctx.pos
            .select_method(till.uuid, PaymentMethod::Card)
            .await?;

        let abandoned =
            tokio::time::timeout(Duration::from_millis(20), ctx.pos.process_payment(&till)).await;

        assert!(abandoned.is_err());

        tokio::time::sleep(Duration::from_millis(600)).await;

        let cart = ctx.pos.cart(till.uuid).await?;

        assert!(cart.lines.is_empty());
        assert!(cart.checkout.is_none());

        let today = ctx
            .transactions
            .list_transactions(&TransactionFilter::default(), Timestamp::now())
            .await?;

        assert_eq!(today.len(), 6);
        assert!(ctx.pos.add_item(till.uuid, &sofa()).await.is_ok());

        Ok(())
    }

    #[tokio::test]
    async fn failed_recording_reopens_the_cart() -> TestResult {
        let ctx = TestContext::new().await?;
        let till = cashier();

        let mut transactions = MockTransactionsService::new();

        transactions
            .expect_record_transaction()
            .once()
            .return_once(|_| Err(TransactionsServiceError::NoLines));

        let pos = pos_with_transactions(&ctx, transactions);

        pos.add_item(till.uuid, &sofa()).await?;
        pos.begin_checkout(till.uuid).await?;
        pos.select_method(till.uuid, PaymentMethod::Card).await?;

        let result = pos.process_payment(&till).await;

        assert!(matches!(
            result,
            Err(PosServiceError::Transactions(TransactionsServiceError::NoLines))
        ));

        let cart = pos.cart(till.uuid).await?;

        assert_eq!(cart.lines.len(), 1);
        assert!(cart.checkout.is_none());
        assert!(pos.begin_checkout(till.uuid).await.is_ok());

        Ok(())
    }

    #[tokio::test]
    async fn unrecorded_settled_checkout_can_be_cancelled() -> TestResult {
        let ctx = TestContext::new().await?;
        let till = cashier();
        let pos = pos_with_transactions(&ctx, MockTransactionsService::new());

        pos.add_item(till.uuid, &table()).await?;
        pos.begin_checkout(till.uuid).await?;
        pos.select_method(till.uuid, PaymentMethod::Card).await?;

        {
            let register = pos.register(till.uuid).await;
            let mut register = register.lock().await;
            let checkout = &mut register.open_checkout()?.checkout;

            checkout.process()?;
            checkout.complete()?;
        }

        let view = pos.cancel_checkout(till.uuid).await?;

        assert!(view.checkout.is_none());
        assert_eq!(view.lines.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn other_registers_work_while_one_is_processing() -> TestResult {
        let ctx = TestContext::with_processing_delay(Duration::from_millis(200)).await?;
        let first = cashier();
        let second = cashier();

        ctx.pos.add_item(first.uuid, &sofa()).await?;
        ctx.pos.begin_checkout(first.uuid).await?;
        ctx.pos
            .select_method(first.uuid, PaymentMethod::MobileMoney)
            .await?;

        let (sale, other) = tokio::join!(ctx.pos.process_payment(&first), async {
            tokio::time::sleep(Duration::from_millis(50)).await;

            ctx.pos.add_item(second.uuid, &table()).await
        });

        assert!(sale.is_ok());
        assert_eq!(other?.lines.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn quantity_zero_removes_line() -> TestResult {
        let ctx = TestContext::new().await?;
        let till = cashier();

        ctx.pos.add_item(till.uuid, &sofa()).await?;

        let view = ctx.pos.update_quantity(till.uuid, &sofa(), 0).await?;

        assert!(view.lines.is_empty());

        let missing = ctx.pos.remove_item(till.uuid, &sofa()).await;

        assert!(matches!(
            missing,
            Err(PosServiceError::Cart(CartError::LineNotFound(_)))
        ));

        Ok(())
    }
}
