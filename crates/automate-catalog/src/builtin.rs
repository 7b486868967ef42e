//! Built-in catalog of the store backend, parameterized by base URL.

use std::collections::BTreeMap;

use crate::{DomainCatalog, EndpointCatalog, EndpointDescriptor, HttpMethod};

use crate::HttpMethod::{Delete, Get, Post, Put};

fn area(entries: &[(&str, &str, HttpMethod, &str)], base_url: &str) -> DomainCatalog {
    let mut operations = BTreeMap::new();
    for (name, path, method, description) in entries {
        operations.insert(
            (*name).to_string(),
            EndpointDescriptor::new(format!("{base_url}{path}"), *method, *description),
        );
    }
    operations
}

/// The full endpoint directory of the store backend.
///
/// Every operation the REST backend exposes, grouped by domain area. The
/// result is immutable data; build it once at startup and share it.
pub fn builtin_catalog(base_url: &str) -> EndpointCatalog {
    let base_url = base_url.trim_end_matches('/');
    let mut catalog = EndpointCatalog::new();

    catalog.insert_area(
        "products",
        area(
            &[
                ("list", "/products", Get, "Get all products"),
                ("create", "/products", Post, "Create new product"),
                ("update", "/products/{id}", Put, "Update product"),
                ("delete", "/products/{id}", Delete, "Delete product"),
                ("search", "/products/search", Get, "Search products"),
                ("updateStock", "/products/{id}/stock", Put, "Update product stock"),
                ("bulkImport", "/products/bulk-import", Post, "Bulk import products"),
            ],
            base_url,
        ),
    );

    catalog.insert_area(
        "customers",
        area(
            &[
                ("list", "/customers", Get, "Get all customers"),
                ("create", "/customers", Post, "Create new customer"),
                ("update", "/customers/{id}", Put, "Update customer"),
                ("delete", "/customers/{id}", Delete, "Delete customer"),
                ("orders", "/customers/{id}/orders", Get, "Get customer orders"),
                ("balance", "/customers/{id}/balance", Get, "Get customer balance"),
                ("updateBalance", "/customers/{id}/balance", Put, "Update customer balance"),
            ],
            base_url,
        ),
    );

    catalog.insert_area(
        "orders",
        area(
            &[
                ("list", "/orders", Get, "Get all orders"),
                ("create", "/orders", Post, "Create new order"),
                ("update", "/orders/{id}", Put, "Update order"),
                ("delete", "/orders/{id}", Delete, "Delete order"),
                ("updateStatus", "/orders/{id}/status", Put, "Update order status"),
                ("addPayment", "/orders/{id}/payments", Post, "Add payment to order"),
                ("items", "/orders/{id}/items", Get, "Get order items"),
                ("addItem", "/orders/{id}/items", Post, "Add item to order"),
                ("removeItem", "/orders/{id}/items/{itemId}", Delete, "Remove item from order"),
            ],
            base_url,
        ),
    );

    catalog.insert_area(
        "suppliers",
        area(
            &[
                ("list", "/suppliers", Get, "Get all suppliers"),
                ("create", "/suppliers", Post, "Create new supplier"),
                ("update", "/suppliers/{id}", Put, "Update supplier"),
                ("delete", "/suppliers/{id}", Delete, "Delete supplier"),
                ("products", "/suppliers/{id}/products", Get, "Get supplier products"),
            ],
            base_url,
        ),
    );

    catalog.insert_area(
        "purchase-orders",
        area(
            &[
                ("list", "/purchase-orders", Get, "Get all purchase orders"),
                ("create", "/purchase-orders", Post, "Create new purchase order"),
                ("update", "/purchase-orders/{id}", Put, "Update purchase order"),
                ("delete", "/purchase-orders/{id}", Delete, "Delete purchase order"),
                ("approve", "/purchase-orders/{id}/approve", Put, "Approve purchase order"),
                ("receive", "/purchase-orders/{id}/receive", Put, "Mark purchase order as received"),
            ],
            base_url,
        ),
    );

    catalog.insert_area(
        "finance",
        area(
            &[
                ("addExpense", "/finance/expenses", Post, "Add new expense"),
                ("getExpenses", "/finance/expenses", Get, "Get all expenses"),
                ("updateExpense", "/finance/expenses/{id}", Put, "Update expense"),
                ("deleteExpense", "/finance/expenses/{id}", Delete, "Delete expense"),
                ("getRevenue", "/finance/revenue", Get, "Get revenue data"),
                ("getCashFlow", "/finance/cash-flow", Get, "Get cash flow data"),
            ],
            base_url,
        ),
    );

    catalog.insert_area(
        "analytics",
        area(
            &[
                ("salesReport", "/reports/sales", Get, "Get sales analytics"),
                ("inventoryReport", "/reports/inventory", Get, "Get inventory analytics"),
                ("financialReport", "/reports/financial", Get, "Get financial analytics"),
                ("customerReport", "/reports/customers", Get, "Get customer analytics"),
                ("profitReport", "/reports/profit", Get, "Get profit analytics"),
            ],
            base_url,
        ),
    );

    catalog.insert_area(
        "dashboard",
        area(
            &[
                ("stats", "/dashboard/enhanced-stats", Get, "Get dashboard statistics"),
                ("dailySales", "/dashboard/daily-sales", Get, "Get daily sales data"),
                ("categoryPerformance", "/dashboard/category-performance", Get, "Get category performance"),
                ("inventoryStatus", "/dashboard/inventory-status", Get, "Get inventory status"),
            ],
            base_url,
        ),
    );

    catalog.insert_area(
        "notifications",
        area(
            &[
                ("list", "/notifications", Get, "Get notifications"),
                ("markAsRead", "/notifications/{id}/read", Put, "Mark notification as read"),
                ("markAllAsRead", "/notifications/mark-all-read", Put, "Mark all notifications as read"),
            ],
            base_url,
        ),
    );

    catalog.insert_area(
        "calendar",
        area(
            &[
                ("events", "/calendar/events", Get, "Get calendar events"),
                ("createEvent", "/calendar/events", Post, "Create calendar event"),
                ("updateEvent", "/calendar/events/{id}", Put, "Update calendar event"),
                ("deleteEvent", "/calendar/events/{id}", Delete, "Delete calendar event"),
            ],
            base_url,
        ),
    );

    catalog.insert_area(
        "settings",
        area(
            &[
                ("get", "/settings", Get, "Get system settings"),
                ("update", "/settings", Put, "Update system settings"),
                ("backup", "/settings/backup", Post, "Create system backup"),
                ("restore", "/settings/restore", Post, "Restore from backup"),
            ],
            base_url,
        ),
    );

    catalog
}

/// A quick-action entry front-ends show for domain-area selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickAction {
    pub title: &'static str,
    pub description: &'static str,
    pub area: &'static str,
}

/// The quick-action directory of the assistant page.
pub fn quick_actions() -> &'static [QuickAction] {
    &[
        QuickAction {
            title: "Products",
            description: "Add, update, or manage inventory",
            area: "products",
        },
        QuickAction {
            title: "Customers",
            description: "Manage customer data and profiles",
            area: "customers",
        },
        QuickAction {
            title: "Sales",
            description: "Process sales and transactions",
            area: "sales",
        },
        QuickAction {
            title: "Suppliers",
            description: "Manage supplier relationships",
            area: "suppliers",
        },
        QuickAction {
            title: "Purchase Orders",
            description: "Create and manage purchase orders",
            area: "purchase-orders",
        },
        QuickAction {
            title: "Orders",
            description: "View and process customer orders",
            area: "orders",
        },
        QuickAction {
            title: "Analytics",
            description: "Generate reports and insights",
            area: "analytics",
        },
        QuickAction {
            title: "Finance",
            description: "Financial tracking and management",
            area: "finance",
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_all_domain_areas() {
        let catalog = builtin_catalog("https://api.example");
        let areas: Vec<_> = catalog.area_names().collect();
        assert_eq!(
            areas,
            vec![
                "analytics",
                "calendar",
                "customers",
                "dashboard",
                "finance",
                "notifications",
                "orders",
                "products",
                "purchase-orders",
                "settings",
                "suppliers",
            ]
        );
    }

    #[test]
    fn test_builtin_product_list_descriptor() {
        let catalog = builtin_catalog("https://api.example/");
        let descriptor = &catalog.area("products").unwrap()["list"];
        assert_eq!(descriptor.endpoint, "https://api.example/products");
        assert_eq!(descriptor.method, HttpMethod::Get);
        assert_eq!(descriptor.description, "Get all products");
    }

    #[test]
    fn test_builtin_keeps_path_templates_unsubstituted() {
        let catalog = builtin_catalog("https://api.example");
        let descriptor = &catalog.area("orders").unwrap()["removeItem"];
        assert_eq!(
            descriptor.endpoint,
            "https://api.example/orders/{id}/items/{itemId}"
        );
        assert_eq!(descriptor.method, HttpMethod::Delete);
    }

    #[test]
    fn test_quick_actions_reference_known_or_aliased_areas() {
        let catalog = builtin_catalog("https://api.example");
        for action in quick_actions() {
            let slice = catalog.slice(action.area);
            assert_eq!(slice.area_count(), 1, "area {} must resolve", action.area);
        }
    }
}
