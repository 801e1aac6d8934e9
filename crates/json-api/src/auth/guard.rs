//! Role guard.
//!
//! Navigation hides screens a role can't use; these hoops reject the calls behind them.

use fernwood_app::auth::Area;
use salvo::prelude::*;
use tracing::warn;

use crate::extensions::*;

/// Admin only routes.
#[salvo::handler]
pub(crate) async fn back_office(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    enforce(Area::BackOffice, req, depot, res, ctrl).await;
}

/// Register routes, open to cashiers and admins.
#[salvo::handler]
pub(crate) async fn till(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    enforce(Area::Till, req, depot, res, ctrl).await;
}

async fn enforce(
    area: Area,
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    let role = match depot.auth_user_or_401() {
        Ok(user) => user.role,
        Err(error) => {
            res.render(error);
            ctrl.skip_rest();

            return;
        }
    };

    if !role.can_access(area) {
        warn!(%role, path = %req.uri().path(), "role not permitted");

        res.render(StatusError::forbidden().brief(format!("Not permitted for role {role}")));
        ctrl.skip_rest();

        return;
    }

    ctrl.call_next(req, depot, res).await;
}

#[cfg(test)]
mod tests {
    use salvo::test::TestClient;
    use testresult::TestResult;

    use crate::test_helpers::{ADMIN, CASHIER, STAFF, TestUser};

    use super::*;

    #[salvo::handler]
    async fn ok(res: &mut Response) {
        res.render("ok");
    }

    fn make_service(user: Option<TestUser>) -> Service {
        let router = Router::new()
            .push(
                Router::with_path("admin")
                    .hoop(crate::test_helpers::sign_in(user))
                    .hoop(back_office)
                    .get(ok),
            )
            .push(
                Router::with_path("till")
                    .hoop(crate::test_helpers::sign_in(user))
                    .hoop(till)
                    .get(ok),
            );

        Service::new(router)
    }

    async fn status(user: Option<TestUser>, path: &str) -> Option<StatusCode> {
        TestClient::get(format!("http://example.com/{path}"))
            .send(&make_service(user))
            .await
            .status_code
    }

    #[tokio::test]
    async fn admin_reaches_both_areas() -> TestResult {
        assert_eq!(status(Some(ADMIN), "admin").await, Some(StatusCode::OK));
        assert_eq!(status(Some(ADMIN), "till").await, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn cashier_is_kept_out_of_the_back_office() -> TestResult {
        assert_eq!(status(Some(CASHIER), "admin").await, Some(StatusCode::FORBIDDEN));
        assert_eq!(status(Some(CASHIER), "till").await, Some(StatusCode::OK));

        Ok(())
    }

    #[tokio::test]
    async fn staff_reaches_neither_area() -> TestResult {
        assert_eq!(status(Some(STAFF), "admin").await, Some(StatusCode::FORBIDDEN));
        assert_eq!(status(Some(STAFF), "till").await, Some(StatusCode::FORBIDDEN));

        Ok(())
    }

    #[tokio::test]
    async fn anonymous_request_is_unauthorized() -> TestResult {
        assert_eq!(status(None, "till").await, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
