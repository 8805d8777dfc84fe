//! Site records: named launch sites and their raw key/value placement nodes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::ValueError;

/// Raw key/value record attached to a site.
///
/// Values are stored as the text the user wrote. Typed getters parse on demand
/// so a malformed entry only affects the lookup that reads it.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct SiteNode {
    values: BTreeMap<String, String>,
}

impl SiteNode {
    /// Create an empty node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for tests and programmatic setup.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    /// Insert or replace a raw value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Returns `true` if the key is present, whatever its text.
    pub fn has_value(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Raw text stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Parse `key` as a boolean. Accepts `true`/`false` in any case,
    /// surrounded by whitespace.
    pub fn get_bool(&self, key: &str) -> Result<bool, ValueError> {
        let text = self.require(key)?;
        let trimmed = text.trim();
        if trimmed.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if trimmed.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(invalid(key, text))
        }
    }

    /// Parse `key` as a 64-bit float.
    pub fn get_f64(&self, key: &str) -> Result<f64, ValueError> {
        let text = self.require(key)?;
        text.trim().parse::<f64>().map_err(|_| invalid(key, text))
    }

    /// Parse `key` as an RGBA color.
    ///
    /// Accepted forms are three or four float channels separated by commas
    /// and/or whitespace (`"0.2, 0.5, 0.1"`, alpha defaults to 1), or hex
    /// `#RRGGBB` / `#RRGGBBAA`.
    pub fn get_color(&self, key: &str) -> Result<[f32; 4], ValueError> {
        let text = self.require(key)?;
        parse_color(text.trim()).ok_or_else(|| invalid(key, text))
    }

    fn require(&self, key: &str) -> Result<&str, ValueError> {
        self.get(key).ok_or_else(|| ValueError::Missing(key.to_string()))
    }
}

fn invalid(key: &str, text: &str) -> ValueError {
    ValueError::Invalid {
        key: key.to_string(),
        text: text.to_string(),
    }
}

fn parse_color(text: &str) -> Option<[f32; 4]> {
    if let Some(hex) = text.strip_prefix('#') {
        return parse_hex_color(hex);
    }

    let channels = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| part.parse::<f32>().ok())
        .collect::<Option<Vec<f32>>>()?;

    match channels.as_slice() {
        [r, g, b] => Some([*r, *g, *b, 1.0]),
        [r, g, b, a] => Some([*r, *g, *b, *a]),
        _ => None,
    }
}

fn parse_hex_color(hex: &str) -> Option<[f32; 4]> {
    if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
        return None;
    }

    let mut out = [1.0; 4];
    for (i, slot) in out.iter_mut().enumerate().take(hex.len() / 2) {
        let byte = u8::from_str_radix(&hex[i * 2..i * 2 + 2], 16).ok()?;
        *slot = f32::from(byte) / 255.0;
    }
    Some(out)
}

// ---------------------------------------------------------------------------
// Sites
// ---------------------------------------------------------------------------

/// A named site and its placement node.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Site {
    /// Unique site name.
    pub name: String,
    /// Placement node carrying the grass keys (`changeGrassColor`,
    /// `grassColor`, `latitude`, `longitude`).
    pub pqs_city: Option<SiteNode>,
}

/// All configured sites plus the name of the one currently active.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteRegistry {
    /// Name of the most recently selected site.
    pub last_site: String,
    /// Site definitions, in file order.
    pub sites: Vec<Site>,
}

impl Default for SiteRegistry {
    fn default() -> Self {
        Self {
            last_site: "KSC".to_string(),
            sites: Vec::new(),
        }
    }
}

impl SiteRegistry {
    /// First site with the given name.
    pub fn get_site_by_name(&self, name: &str) -> Option<&Site> {
        self.sites.iter().find(|s| s.name == name)
    }

    /// The site named by [`last_site`](Self::last_site), if defined.
    pub fn active_site(&self) -> Option<&Site> {
        self.get_site_by_name(&self.last_site)
    }
}
