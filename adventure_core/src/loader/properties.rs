//! The bracketed property list on entity lines.
//!
//! ```text
//! [Takeable,Container,Openable,Open,Lockable=<key>,Health=<+n|-n|n>,Usable]
//! ```
//!
//! Flags are matched as substrings, in any order and combination. `Lockable`
//! and `Health` take the first value found. `Open` must be a whole token.

use game_rules::{Components, UsableComponent};

/// Structured form of one property list.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Properties {
    pub takeable: bool,
    pub container: bool,
    pub openable: bool,
    /// Openable starts open.
    pub open: bool,
    pub lock_key: Option<String>,
    pub health: Option<i32>,
    pub usable: bool,
}

impl Properties {
    /// Parse a raw property string such as `[Takeable,Usable,Health=+2]`.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        Self {
            takeable: raw.contains("Takeable"),
            container: raw.contains("Container"),
            openable: raw.contains("Openable"),
            open: tokens(raw).any(|token| token == "Open"),
            lock_key: value_after(raw, "Lockable=")
                .map(str::trim)
                .filter(|key| !key.is_empty())
                .map(str::to_string),
            health: value_after(raw, "Health=").and_then(parse_signed),
            usable: raw.contains("Usable"),
        }
    }

    /// Build the component set these properties describe.
    ///
    /// `Usable` together with `Health` heals for a positive value and damages
    /// otherwise; `Usable` alone has no effect.
    pub fn into_components(self) -> Components {
        let mut components = Components::new();
        if self.takeable {
            components = components.with_takeable();
        }
        if self.container {
            components = components.with_container();
        }
        if self.openable {
            components = components.with_openable(self.open);
        }
        if let Some(key) = self.lock_key {
            components = components.with_lock(key);
        }
        if let Some(health) = self.health {
            components = components.with_health(health);
        }
        if self.usable {
            let usable = self
                .health
                .map(UsableComponent::from_health_delta)
                .unwrap_or_default();
            components = components.with_usable(usable);
        }
        components
    }
}

fn tokens(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(|c: char| matches!(c, ',' | '[' | ']'))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Text after the first `prefix`, up to the next `,` or `]`.
fn value_after<'a>(raw: &'a str, prefix: &str) -> Option<&'a str> {
    let start = raw.find(prefix)? + prefix.len();
    let rest = &raw[start..];
    let end = rest.find(|c: char| c == ',' || c == ']').unwrap_or(rest.len());
    Some(&rest[..end])
}

/// Leading `+n`, `-n` or `n`; trailing junk is ignored.
fn parse_signed(value: &str) -> Option<i32> {
    let value = value.trim();
    let (negative, digits) = match value.as_bytes().first() {
        Some(b'+') => (false, &value[1..]),
        Some(b'-') => (true, &value[1..]),
        _ => (false, value),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    let magnitude: i32 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
