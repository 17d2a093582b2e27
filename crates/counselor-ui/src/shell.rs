//! Page chrome shared by every view: brand, live clock, navigation.

use chrono::NaiveDateTime;

use counselor_core::types::Route;

use crate::view::{Action, Bindings};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub route: Route,
    pub label: &'static str,
    pub binding: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shell {
    pub brand: String,
    pub tagline: String,
    pub clock: String,
    pub nav: Vec<NavItem>,
}

/// "Today: Sunday, Oct 18, 2026 | Time: 14:05:09"
pub fn clock_label(now: NaiveDateTime) -> String {
    format!(
        "Today: {} | Time: {}",
        now.format("%A, %b %-d, %Y"),
        now.format("%H:%M:%S")
    )
}

pub fn nav_binding(route: Route) -> String {
    match route.path() {
        Some("/") | None => "nav-home".to_string(),
        Some(path) => format!("nav-{}", path.trim_start_matches('/')),
    }
}

/// Build the shell for `active`, registering one binding per nav pill.
pub fn build(
    brand: &str,
    tagline: &str,
    active: Route,
    now: NaiveDateTime,
    bindings: &mut Bindings,
) -> Shell {
    let nav = Route::KNOWN
        .iter()
        .map(|&route| {
            let binding = nav_binding(route);
            let path = route.path().unwrap_or("/");
            bindings.bind(binding.clone(), Action::Navigate(path.to_string()));
            NavItem {
                route,
                label: route.label(),
                binding,
                active: route == active,
            }
        })
        .collect();

    Shell {
        brand: brand.to_string(),
        tagline: tagline.to_string(),
        clock: clock_label(now),
        nav,
    }
}
