use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::router::{Router, RouterBuilder};
use crate::runtime_config::RouterConfig;

/// One `[[route]]` table of a route manifest
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RouteEntry {
    pub method: String,
    pub path: String,
    /// Handler name reported on a match
    pub handler: String,
}

/// Route table read from a TOML file
///
/// ```toml
/// [[route]]
/// method = "GET"
/// path = "/users/:id"
/// handler = "get_user"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RouteManifest {
    #[serde(rename = "route", default)]
    pub routes: Vec<RouteEntry>,
}

impl RouteManifest {
    /// Parse a manifest from TOML text
    pub fn parse(text: &str) -> Result<Self> {
        toml::from_str(text).context("Failed to parse route manifest")
    }

    /// Read and parse a manifest file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read route manifest {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("Invalid route manifest {}", path.display()))
    }

    /// Sort entries by path; equal paths keep their file order
    pub fn sort(&mut self) {
        self.routes.sort_by(|a, b| a.path.cmp(&b.path));
    }

    /// Build a router whose handlers are the manifest's handler names
    pub fn build_router(self, config: RouterConfig) -> Result<Router<String>> {
        let mut builder = RouterBuilder::with_config(config);
        for entry in self.routes {
            let RouteEntry {
                method,
                path,
                handler,
            } = entry;
            builder
                .add_route(&method, path.as_str(), handler)
                .with_context(|| format!("Cannot add route {method} {path}"))?;
        }
        builder.build().context("Failed to build router")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::BuildError;
    use http::Method;

    const MANIFEST: &str = r#"
[[route]]
method = "GET"
path = "/users"
handler = "list_users"

[[route]]
method = "get"
path = "/users/:id"
handler = "get_user"

[[route]]
method = "GET"
path = "/static/*"
handler = "static_files"
"#;

    #[test]
    fn test_parse_manifest() {
        let manifest = RouteManifest::parse(MANIFEST).unwrap();
        assert_eq!(manifest.routes.len(), 3);
        assert_eq!(manifest.routes[1].path, "/users/:id");
        assert_eq!(manifest.routes[1].handler, "get_user");
    }

    #[test]
    fn test_empty_manifest() {
        let manifest = RouteManifest::parse("").unwrap();
        assert!(manifest.routes.is_empty());
    }

    #[test]
    fn test_manifest_builds_router() {
        let router = RouteManifest::parse(MANIFEST)
            .unwrap()
            .build_router(RouterConfig::default())
            .unwrap();

        let m = router.match_indexed(&Method::GET, "/users/7").unwrap();
        assert_eq!(m.handler, "get_user");
        assert_eq!(m.get_path_param("id"), Some("7"));
    }

    #[test]
    fn test_unsorted_manifest_needs_sort() {
        let text = r#"
[[route]]
method = "GET"
path = "/users"
handler = "users"

[[route]]
method = "GET"
path = "/admin"
handler = "admin"
"#;
        let err = RouteManifest::parse(text)
            .unwrap()
            .build_router(RouterConfig::default())
            .unwrap_err();
        assert!(matches!(
            err.root_cause().downcast_ref::<BuildError>(),
            Some(BuildError::OutOfOrder { .. })
        ));

        let mut manifest = RouteManifest::parse(text).unwrap();
        manifest.sort();
        let router = manifest.build_router(RouterConfig::default()).unwrap();
        assert!(router.match_static(&Method::GET, "/admin").is_some());
    }
}
