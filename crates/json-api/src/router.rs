//! App Router
//!
//! Routes are grouped by who may call them: anyone, any signed in user, the till (cashiers and
//! admins) and the back office (admins). The till group is pushed first so its literal paths win
//! over the back office's `{customer}` style captures.

use salvo::Router;

use crate::{
    auth::{self, guard},
    categories, customers, healthcheck, observability, orders, pos, products, reports, returns,
    settings, suppliers, transactions, users,
};

pub(crate) fn app_router(metrics_enabled: bool) -> Router {
    let mut router = Router::new().push(Router::with_path("healthcheck").get(healthcheck::handler));

    if metrics_enabled {
        router = router.push(Router::with_path("metrics").get(observability::metrics_handler));
    }

    router
        .push(Router::with_path("auth/login").post(auth::handlers::login::handler))
        .push(
            Router::new()
                .hoop(auth::middleware::handler)
                .push(Router::with_path("auth/logout").post(auth::handlers::logout::handler))
                .push(Router::with_path("auth/me").get(auth::handlers::me::handler))
                .push(Router::with_path("navigation").get(auth::handlers::navigation::handler))
                .push(till_router())
                .push(back_office_router()),
        )
}

fn till_router() -> Router {
    Router::new()
        .hoop(guard::till)
        .push(
            Router::with_path("pos")
                .push(Router::with_path("catalog").get(pos::catalog::handler))
                .push(
                    Router::with_path("cart")
                        .get(pos::cart::get::handler)
                        .delete(pos::cart::clear::handler)
                        .push(
                            Router::with_path("items")
                                .post(pos::items::create::handler)
                                .push(
                                    Router::with_path("{product}")
                                        .put(pos::items::update::handler)
                                        .delete(pos::items::delete::handler),
                                ),
                        )
                        .push(
                            Router::with_path("discount")
                                .put(pos::discount::update::handler)
                                .delete(pos::discount::delete::handler),
                        )
                        .push(Router::with_path("customer").put(pos::customer::handler)),
                )
                .push(
                    Router::with_path("checkout")
                        .post(pos::checkout::create::handler)
                        .delete(pos::checkout::delete::handler)
                        .push(Router::with_path("method").put(pos::checkout::method::handler))
                        .push(Router::with_path("tender").put(pos::checkout::tender::handler))
                        .push(Router::with_path("process").post(pos::checkout::process::handler)),
                ),
        )
        .push(
            Router::with_path("transactions")
                .get(transactions::index::handler)
                .push(Router::with_path("summary").get(transactions::summary::handler))
                .push(Router::with_path("{transaction}").get(transactions::get::handler)),
        )
        .push(
            Router::with_path("returns")
                .get(returns::index::handler)
                .post(returns::create::handler),
        )
        .push(Router::with_path("customers/lookup").get(customers::lookup::handler))
}

fn back_office_router() -> Router {
    Router::new()
        .hoop(guard::back_office)
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .post(products::create::handler)
                .push(
                    Router::with_path("{product}")
                        .get(products::get::handler)
                        .put(products::update::handler)
                        .delete(products::delete::handler)
                        .push(Router::with_path("stock").put(products::stock::handler)),
                ),
        )
        .push(
            Router::with_path("categories")
                .get(categories::index::handler)
                .post(categories::create::handler)
                .push(
                    Router::with_path("{category}")
                        .get(categories::get::handler)
                        .put(categories::update::handler)
                        .delete(categories::delete::handler),
                ),
        )
        .push(
            Router::with_path("customers")
                .get(customers::index::handler)
                .post(customers::create::handler)
                .push(
                    Router::with_path("{customer}")
                        .get(customers::get::handler)
                        .put(customers::update::handler)
                        .delete(customers::delete::handler),
                ),
        )
        .push(
            Router::with_path("suppliers")
                .get(suppliers::index::handler)
                .post(suppliers::create::handler)
                .push(
                    Router::with_path("{supplier}")
                        .get(suppliers::get::handler)
                        .put(suppliers::update::handler)
                        .delete(suppliers::delete::handler),
                ),
        )
        .push(
            Router::with_path("users")
                .get(users::index::handler)
                .post(users::create::handler)
                .push(
                    Router::with_path("{user}")
                        .get(users::get::handler)
                        .put(users::update::handler)
                        .delete(users::delete::handler)
                        .push(Router::with_path("password").put(users::password::handler)),
                ),
        )
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .push(
                    Router::with_path("{order}")
                        .get(orders::get::handler)
                        .push(Router::with_path("status").put(orders::status::handler)),
                ),
        )
        .push(
            Router::with_path("settings")
                .get(settings::get::handler)
                .put(settings::update::handler),
        )
        .push(Router::with_path("reports/summary").get(reports::summary::handler))
}
