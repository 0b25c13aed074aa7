// File: src/config.rs
// Purpose: Configuration parsing from shrinkroute.toml

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::collaborator::Collaborator;
use crate::registry::{RouteDef, Shrinkroute};
use crate::table::DEFAULT_SEPARATOR;

/// Registry configuration
///
/// ```toml
/// separator = "."
/// append_extra = true
///
/// [routes.users]
/// path = "/users"
///
/// [routes."users.show"]
/// path = "/:id"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShrinkrouteConfig {
    /// Separator between route name segments (default: ".")
    #[serde(default = "default_separator")]
    pub separator: String,

    /// Whether unused parameters go to the query string (default: true)
    #[serde(default = "default_true")]
    pub append_extra: bool,

    /// Path-only route definitions, handlers are attached in code
    #[serde(default)]
    pub routes: BTreeMap<String, RouteConfig>,
}

/// One route entry
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RouteConfig {
    #[serde(default)]
    pub path: Option<String>,
}

fn default_separator() -> String {
    DEFAULT_SEPARATOR.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for ShrinkrouteConfig {
    fn default() -> Self {
        Self {
            separator: default_separator(),
            append_extra: true,
            routes: BTreeMap::new(),
        }
    }
}

impl ShrinkrouteConfig {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        // Missing file means defaults
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Load configuration from default path (./shrinkroute.toml)
    pub fn load_default() -> Result<Self> {
        Self::load("shrinkroute.toml")
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(toml::from_str(content)?)
    }

    /// Route definitions for [`Shrinkroute::register_all`]
    pub fn route_defs<H>(&self) -> impl Iterator<Item = (String, RouteDef<H>)> + '_ {
        self.routes.iter().map(|(name, route)| {
            let def = RouteDef {
                path: route.path.clone(),
                handlers: None,
            };
            (name.clone(), def)
        })
    }
}

impl<C: Collaborator> Shrinkroute<C> {
    /// Applies separator, append default and the configured routes
    pub fn apply_config(&mut self, config: &ShrinkrouteConfig) -> crate::Result<()> {
        self.set_separator(&config.separator);
        self.set_append_extra(config.append_extra);
        self.register_all(config.route_defs::<C::Handler>())
    }
}
