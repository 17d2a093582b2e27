//! Fragment-based view routing.
//!
//! The router holds only the current route. Every transition replaces the
//! whole view, so nothing carries over between views.

use counselor_core::types::Route;

/// The externally observable location fragment, e.g. `#/placements`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Location {
    fragment: String,
}

impl Location {
    pub fn new(fragment: impl Into<String>) -> Self {
        Self {
            fragment: fragment.into(),
        }
    }

    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// The path encoded in the fragment. An empty fragment means `/`.
    pub fn path(&self) -> &str {
        fragment_path(&self.fragment)
    }

    /// Point the fragment at `target`. Returns `true` when the path changed,
    /// which is when a navigation signal should fire.
    pub fn assign(&mut self, target: &str) -> bool {
        let next = fragment_path(target);
        if next == self.path() {
            return false;
        }
        self.fragment = format!("#{}", next);
        true
    }
}

fn fragment_path(fragment: &str) -> &str {
    let path = fragment.strip_prefix('#').unwrap_or(fragment);
    if path.is_empty() {
        "/"
    } else {
        path
    }
}

/// A route change applied by the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: Route,
    pub to: Route,
}

impl Transition {
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

/// Maps the location to the single active route.
#[derive(Debug, Clone)]
pub struct ViewRouter {
    current: Route,
}

impl ViewRouter {
    /// Start on the route named by `location`, which is `Home` when the
    /// fragment is empty.
    pub fn new(location: &Location) -> Self {
        let current = Route::from_path(location.path());
        tracing::debug!(route = %current, fragment = location.fragment(), "Router initialised");
        Self { current }
    }

    pub fn current(&self) -> Route {
        self.current
    }

    /// Switch to the route matching `target`. Unknown paths land on `NotFound`.
    pub fn navigate(&mut self, target: &str) -> Transition {
        let to = Route::from_path(fragment_path(target));
        let transition = Transition {
            from: self.current,
            to,
        };
        self.current = to;
        tracing::debug!(
            from = %transition.from,
            to = %transition.to,
            target,
            "Route transition"
        );
        transition
    }

    /// React to the location having changed.
    pub fn on_navigation_signal(&mut self, location: &Location) -> Transition {
        self.navigate(location.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Odd navigation targets; each must land on a known route or `NotFound`.
    const ODD_TARGETS: &[&str] = &[
        "",
        "#",
        "##/x",
        "#/#/staff",
        "/campus/",
        "campus",
        "/CAMPUS",
        " /staff",
        "/staff?tab=1",
        "/staff#top",
        "//",
        "/../feedback",
        "/\0",
        "/sta\0ff",
        "/कैंपस",
        "/😀",
        "/gallery\u{200b}",
        "\u{feff}#/gallery",
    ];

    fn random_target(rng: &mut StdRng) -> String {
        let len = rng.random_range(0..24);
        let mut target: String = (0..len).map(|_| rng.random::<char>()).collect();
        if rng.random_bool(0.5) {
            target.insert_str(0, "#/");
        }
        target
    }

    fn assert_resolves(router: &mut ViewRouter, target: &str) {
        let transition = router.navigate(target);
        let route = router.current();
        assert_eq!(route, transition.to, "target {target:?}");
        assert!(
            route == Route::NotFound || Route::KNOWN.contains(&route),
            "target {target:?} resolved to {route:?}"
        );
    }

    #[test]
    fn test_empty_fragment_is_home() {
        assert_eq!(Location::new("").path(), "/");
        assert_eq!(Location::new("#").path(), "/");
        assert_eq!(ViewRouter::new(&Location::default()).current(), Route::Home);
    }

    #[test]
    fn test_initial_route_from_fragment() {
        let router = ViewRouter::new(&Location::new("#/staff"));
        assert_eq!(router.current(), Route::Staff);
    }

    #[test]
    fn test_navigate_known_routes() {
        let mut router = ViewRouter::new(&Location::default());
        for route in Route::KNOWN {
            let path = route.path().unwrap();
            let transition = router.navigate(path);
            assert_eq!(transition.to, route);
            assert_eq!(router.current(), route);
        }
    }

    #[test]
    fn test_unknown_path_is_not_found() {
        let mut router = ViewRouter::new(&Location::default());
        let transition = router.navigate("/xyz");
        assert_eq!(transition.from, Route::Home);
        assert_eq!(transition.to, Route::NotFound);
        assert!(transition.changed());
    }

    #[test]
    fn test_odd_targets_resolve() {
        let mut router = ViewRouter::new(&Location::default());
        for target in ODD_TARGETS {
            assert_resolves(&mut router, target);
        }
        assert_eq!(router.navigate("##/x").to, Route::NotFound);
        assert_eq!(router.navigate("/campus/").to, Route::NotFound);
        assert_eq!(router.navigate("/sta\0ff").to, Route::NotFound);
        assert_eq!(router.navigate("#").to, Route::Home);

        let long = format!("/{}", "placements/".repeat(10_000));
        assert_resolves(&mut router, &long);
        assert_eq!(router.current(), Route::NotFound);
    }

    #[test]
    fn test_random_targets_resolve() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut router = ViewRouter::new(&Location::default());
        for _ in 0..2_000 {
            let target = random_target(&mut rng);
            assert_resolves(&mut router, &target);
        }
    }

    #[test]
    fn test_navigate_accepts_fragment_form() {
        let mut router = ViewRouter::new(&Location::default());
        assert_eq!(router.navigate("#/gallery").to, Route::Gallery);
    }

    #[test]
    fn test_assign_reports_change() {
        let mut location = Location::new("#/");
        assert!(!location.assign("/"));
        assert!(location.assign("/campus"));
        assert_eq!(location.fragment(), "#/campus");
        assert!(!location.assign("#/campus"));
    }

    #[test]
    fn test_signal_follows_location() {
        let mut location = Location::default();
        let mut router = ViewRouter::new(&location);
        location.assign("/feedback");
        assert_eq!(router.on_navigation_signal(&location).to, Route::Feedback);
    }
}
