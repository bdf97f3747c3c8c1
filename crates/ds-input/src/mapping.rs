//! Host key name to emulated button mapping

use ds_core::config::InputConfig;
use ds_core::DsKey;

/// Host key bound to each emulated button.
///
/// Key names compare case-insensitively. One host key may be bound to
/// several buttons; an empty name leaves a button unbound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBindings {
    names: [String; DsKey::COUNT],
}

impl KeyBindings {
    /// No button bound
    pub fn unbound() -> Self {
        Self {
            names: Default::default(),
        }
    }

    pub fn from_config(config: &InputConfig) -> Self {
        let mut bindings = Self::unbound();
        bindings.bind(DsKey::A, &config.a);
        bindings.bind(DsKey::B, &config.b);
        bindings.bind(DsKey::Select, &config.select);
        bindings.bind(DsKey::Start, &config.start);
        bindings.bind(DsKey::Right, &config.right);
        bindings.bind(DsKey::Left, &config.left);
        bindings.bind(DsKey::Up, &config.up);
        bindings.bind(DsKey::Down, &config.down);
        bindings.bind(DsKey::R, &config.r);
        bindings.bind(DsKey::L, &config.l);
        bindings.bind(DsKey::X, &config.x);
        bindings.bind(DsKey::Y, &config.y);
        bindings
    }

    pub fn to_config(&self) -> InputConfig {
        let name = |key: DsKey| self.names[key.index()].clone();
        InputConfig {
            a: name(DsKey::A),
            b: name(DsKey::B),
            select: name(DsKey::Select),
            start: name(DsKey::Start),
            right: name(DsKey::Right),
            left: name(DsKey::Left),
            up: name(DsKey::Up),
            down: name(DsKey::Down),
            r: name(DsKey::R),
            l: name(DsKey::L),
            x: name(DsKey::X),
            y: name(DsKey::Y),
        }
    }

    pub fn bind(&mut self, key: DsKey, host_key: &str) {
        self.names[key.index()] = host_key.trim().to_string();
    }

    pub fn unbind(&mut self, key: DsKey) {
        self.names[key.index()].clear();
    }

    /// Host key bound to a button
    pub fn host_key(&self, key: DsKey) -> Option<&str> {
        let name = self.names[key.index()].as_str();
        (!name.is_empty()).then_some(name)
    }

    /// Buttons bound to a host key
    pub fn keys_for<'a>(&'a self, host_key: &'a str) -> impl Iterator<Item = DsKey> + 'a {
        DsKey::ALL.into_iter().filter(move |key| {
            let name = &self.names[key.index()];
            !name.is_empty() && name.eq_ignore_ascii_case(host_key.trim())
        })
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self::from_config(&InputConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::default();
        assert_eq!(bindings.keys_for("h").collect::<Vec<_>>(), vec![DsKey::Start]);
        assert_eq!(bindings.host_key(DsKey::A), Some("L"));
        assert_eq!(bindings.keys_for("F12").count(), 0);
    }

    #[test]
    fn test_shared_host_key() {
        let mut bindings = KeyBindings::unbound();
        bindings.bind(DsKey::L, "Space");
        bindings.bind(DsKey::R, "space");
        assert_eq!(
            bindings.keys_for("SPACE").collect::<Vec<_>>(),
            vec![DsKey::R, DsKey::L]
        );

        bindings.unbind(DsKey::R);
        assert_eq!(bindings.host_key(DsKey::R), None);
        assert_eq!(bindings.keys_for("").count(), 0);
    }

    #[test]
    fn test_config_round_trip() {
        let mut bindings = KeyBindings::default();
        bindings.bind(DsKey::X, "Return");
        let restored = KeyBindings::from_config(&bindings.to_config());
        assert_eq!(restored, bindings);
    }
}
