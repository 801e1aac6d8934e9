//! Test helpers.

use std::sync::Arc;

use fernwood_app::{
    auth::{AuthUser, MockAuthService, Role},
    context::AppContext,
    domain::{
        categories::MockCategoriesService, customers::MockCustomersService,
        orders::MockOrdersService, pos::MockPosService, products::MockProductsService,
        reports::MockReportsService, returns::MockReturnsService,
        settings::MockSettingsService, suppliers::MockSuppliersService,
        transactions::MockTransactionsService, users::MockUsersService,
        users::models::UserUuid,
    },
};
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State};

/// A signed in caller.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TestUser {
    pub(crate) uuid: UserUuid,
    pub(crate) email: &'static str,
    pub(crate) name: &'static str,
    pub(crate) role: Role,
}

impl TestUser {
    pub(crate) fn user(self) -> AuthUser {
        AuthUser {
            uuid: self.uuid,
            email: self.email.to_string(),
            name: self.name.to_string(),
            role: self.role,
        }
    }
}

pub(crate) const ADMIN: TestUser = TestUser {
    uuid: UserUuid::from_uuid(Uuid::from_u128(1)),
    email: "admin@example.com",
    name: "Admin User",
    role: Role::Admin,
};

pub(crate) const CASHIER: TestUser = TestUser {
    uuid: UserUuid::from_uuid(Uuid::from_u128(2)),
    email: "cashier@example.com",
    name: "Cashier User",
    role: Role::Cashier,
};

pub(crate) const STAFF: TestUser = TestUser {
    uuid: UserUuid::from_uuid(Uuid::from_u128(3)),
    email: "emily.davis@example.com",
    name: "Emily Davis",
    role: Role::Staff,
};

/// Hoop that signs `user` in without going through the session service.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SignIn(Option<TestUser>);

#[salvo::handler]
impl SignIn {
    async fn handle(
        &self,
        req: &mut Request,
        depot: &mut Depot,
        res: &mut Response,
        ctrl: &mut FlowCtrl,
    ) {
        if let Some(user) = self.0 {
            depot.insert_auth_user(user.user());
        }

        ctrl.call_next(req, depot, res).await;
    }
}

pub(crate) fn sign_in(user: Option<TestUser>) -> SignIn {
    SignIn(user)
}

/// One mock per service. Any call without a matching expectation fails the test.
#[derive(Default)]
pub(crate) struct Mocks {
    pub(crate) auth: MockAuthService,
    pub(crate) products: MockProductsService,
    pub(crate) categories: MockCategoriesService,
    pub(crate) customers: MockCustomersService,
    pub(crate) suppliers: MockSuppliersService,
    pub(crate) users: MockUsersService,
    pub(crate) orders: MockOrdersService,
    pub(crate) transactions: MockTransactionsService,
    pub(crate) returns: MockReturnsService,
    pub(crate) settings: MockSettingsService,
    pub(crate) reports: MockReportsService,
    pub(crate) pos: MockPosService,
}

impl Mocks {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            auth: Arc::new(self.auth),
            products: Arc::new(self.products),
            categories: Arc::new(self.categories),
            customers: Arc::new(self.customers),
            suppliers: Arc::new(self.suppliers),
            users: Arc::new(self.users),
            orders: Arc::new(self.orders),
            transactions: Arc::new(self.transactions),
            returns: Arc::new(self.returns),
            settings: Arc::new(self.settings),
            reports: Arc::new(self.reports),
            pos: Arc::new(self.pos),
        })
    }

    /// Serve `route` as `user`, bypassing the role guards.
    pub(crate) fn service(self, user: TestUser, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(sign_in(Some(user)))
                .push(route),
        )
    }
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    Mocks {
        auth,
        ..Mocks::default()
    }
    .into_state()
}
