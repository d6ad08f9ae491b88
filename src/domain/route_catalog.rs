//! Static catalogue of navigable, visit-tracked routes.

use serde::Serialize;

/// Navigation entry advertised to the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Route {
    pub path: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub description: &'static str,
    /// Plain-text body served when the route is visited.
    #[serde(skip)]
    pub content: &'static str,
}

/// Every tracked route, in navigation order.
pub const TRACKED_ROUTES: &[Route] = &[
    Route {
        path: "/hello",
        name: "Home",
        icon: "home",
        description: "Dashboard home page",
        content: "This is Analytics App",
    },
    Route {
        path: "/about",
        name: "About",
        icon: "info-circle",
        description: "About this application",
        content: "About Us",
    },
    Route {
        path: "/analytics-dashboard",
        name: "Analytics",
        icon: "chart-line",
        description: "View analytics data",
        content: "Analytics Dashboard",
    },
    Route {
        path: "/reports",
        name: "Reports",
        icon: "list",
        description: "View detailed reports",
        content: "Reports Page",
    },
    Route {
        path: "/settings",
        name: "Settings",
        icon: "cog",
        description: "Application settings",
        content: "Settings Page",
    },
];

/// Buttons offered by the dashboards for generating test clicks.
pub const DEMO_BUTTONS: [&str; 3] = ["test-button-1", "test-button-2", "test-button-3"];

/// Looks up a tracked route by its exact path.
pub fn find_route(path: &str) -> Option<&'static Route> {
    TRACKED_ROUTES.iter().find(|r| r.path == path)
}
