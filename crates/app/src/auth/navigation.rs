//! Role-filtered navigation and client-side route guards.
//!
//! None of this is an access control boundary; it decides what the sidebar shows and where a
//! browser gets redirected.

use serde::Serialize;

use crate::auth::Role;

/// Where signed-out visitors are sent.
pub const LOGIN_PATH: &str = "/auth/login";

/// A sidebar entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub name: &'static str,
    pub href: &'static str,
}

/// Outcome of checking a path against the visitor's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "access", content = "to", rename_all = "snake_case")]
pub enum RouteAccess {
    Allowed,
    Redirect(&'static str),
}

struct NavEntry {
    name: &'static str,
    href: fn(Role) -> &'static str,
    roles: &'static [Role],
}

const ADMIN: &[Role] = &[Role::Admin];
const CASHIER: &[Role] = &[Role::Cashier];

const NAVIGATION: &[NavEntry] = &[
    NavEntry {
        name: "Dashboard",
        href: home_for,
        roles: &[Role::Admin, Role::Cashier],
    },
    NavEntry {
        name: "Point of Sale",
        href: |_| "/dashboard/cashier/pos",
        roles: CASHIER,
    },
    NavEntry {
        name: "Inventory",
        href: |_| "/dashboard/admin/inventory",
        roles: ADMIN,
    },
    NavEntry {
        name: "Products",
        href: |_| "/dashboard/admin/products",
        roles: ADMIN,
    },
    NavEntry {
        name: "Categories",
        href: |_| "/dashboard/admin/categories",
        roles: ADMIN,
    },
    NavEntry {
        name: "Sales",
        href: |_| "/dashboard/admin/sales",
        roles: ADMIN,
    },
    NavEntry {
        name: "Orders",
        href: |_| "/dashboard/admin/orders",
        roles: ADMIN,
    },
    NavEntry {
        name: "Customers",
        href: |_| "/dashboard/admin/customers",
        roles: ADMIN,
    },
    NavEntry {
        name: "Users",
        href: |_| "/dashboard/admin/users",
        roles: ADMIN,
    },
    NavEntry {
        name: "Suppliers",
        href: |_| "/dashboard/admin/suppliers",
        roles: ADMIN,
    },
    NavEntry {
        name: "Reports",
        href: |_| "/dashboard/admin/reports",
        roles: ADMIN,
    },
    NavEntry {
        name: "Settings",
        href: |_| "/dashboard/admin/settings",
        roles: ADMIN,
    },
    NavEntry {
        name: "Transactions",
        href: |_| "/dashboard/cashier/transactions",
        roles: CASHIER,
    },
    NavEntry {
        name: "Returns",
        href: |_| "/dashboard/cashier/returns",
        roles: CASHIER,
    },
    NavEntry {
        name: "Customer Lookup",
        href: |_| "/dashboard/cashier/customers",
        roles: CASHIER,
    },
];

/// Landing page for a role.
#[must_use]
pub fn home_for(role: Role) -> &'static str {
    match role {
        Role::Admin => "/dashboard/admin",
        Role::Cashier => "/dashboard/cashier/pos",
        Role::Manager | Role::Staff => LOGIN_PATH,
    }
}

/// Sidebar entries visible to a role, in display order.
#[must_use]
pub fn navigation_for(role: Role) -> Vec<NavItem> {
    NAVIGATION
        .iter()
        .filter(|entry| entry.roles.contains(&role))
        .map(|entry| NavItem {
            name: entry.name,
            href: (entry.href)(role),
        })
        .collect()
}

/// The sidebar entry to highlight for a path: an exact match, else the longest prefix match.
#[must_use]
pub fn active_item(role: Role, path: &str) -> Option<NavItem> {
    let items = navigation_for(role);

    if let Some(exact) = items.iter().find(|item| item.href == path) {
        return Some(exact.clone());
    }

    items
        .into_iter()
        .filter(|item| path.starts_with(item.href))
        .max_by_key(|item| item.href.len())
}

/// Where a visitor with `role` (or signed out) may go.
#[must_use]
pub fn guard_route(role: Option<Role>, path: &str) -> RouteAccess {
    let Some(role) = role else {
        return if path.starts_with("/dashboard") {
            RouteAccess::Redirect(LOGIN_PATH)
        } else {
            RouteAccess::Allowed
        };
    };

    let allowed = if path == "/dashboard" || path == "/dashboard/" {
        false
    } else if path.starts_with("/dashboard/admin") {
        role == Role::Admin
    } else if path.starts_with("/dashboard/cashier") {
        role == Role::Cashier
    } else {
        true
    };

    if allowed {
        RouteAccess::Allowed
    } else {
        RouteAccess::Redirect(home_for(role))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_link_depends_on_role() {
        let admin = navigation_for(Role::Admin);
        let cashier = navigation_for(Role::Cashier);

        assert_eq!(admin.first().map(|item| item.href), Some("/dashboard/admin"));
        assert_eq!(
            cashier.first().map(|item| item.href),
            Some("/dashboard/cashier/pos")
        );
    }

    #[test]
    fn cashier_sees_only_till_entries() {
        let names: Vec<&str> = navigation_for(Role::Cashier)
            .iter()
            .map(|item| item.name)
            .collect();

        assert_eq!(
            names,
            vec![
                "Dashboard",
                "Point of Sale",
                "Transactions",
                "Returns",
                "Customer Lookup"
            ]
        );
    }

    #[test]
    fn admin_sees_back_office_entries() {
        let items = navigation_for(Role::Admin);

        assert_eq!(items.len(), 11);
        assert!(items.iter().all(|item| item.name != "Point of Sale"));
    }

    #[test]
    fn staff_have_no_navigation() {
        assert!(navigation_for(Role::Staff).is_empty());
    }

    #[test]
    fn active_item_prefers_longest_prefix() {
        let active = active_item(Role::Cashier, "/dashboard/cashier/transactions/TXN-1001");

        assert_eq!(active.map(|item| item.name), Some("Transactions"));
    }

    #[test]
    fn signed_out_visitors_are_sent_to_login() {
        assert_eq!(
            guard_route(None, "/dashboard/admin/products"),
            RouteAccess::Redirect(LOGIN_PATH)
        );
        assert_eq!(guard_route(None, LOGIN_PATH), RouteAccess::Allowed);
    }

    #[test]
    fn cashier_is_redirected_out_of_admin_pages() {
        assert_eq!(
            guard_route(Some(Role::Cashier), "/dashboard/admin/settings"),
            RouteAccess::Redirect("/dashboard/cashier/pos")
        );
    }

    #[test]
    fn admin_is_redirected_out_of_cashier_pages() {
        assert_eq!(
            guard_route(Some(Role::Admin), "/dashboard/cashier/pos"),
            RouteAccess::Redirect("/dashboard/admin")
        );
    }

    #[test]
    fn bare_dashboard_redirects_to_role_home() {
        assert_eq!(
            guard_route(Some(Role::Admin), "/dashboard"),
            RouteAccess::Redirect("/dashboard/admin")
        );
    }
}
