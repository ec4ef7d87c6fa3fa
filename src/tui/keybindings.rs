use crate::tui::action::Action;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fmt;
use tracing::warn;

/// Maps KeyEvents to Actions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "Vec<KeyBinding>", into = "Vec<KeyBinding>")]
pub struct KeyBindings {
    bindings_list: Vec<KeyBinding>,
    bindings_map: HashMap<KeyPattern, Action>,
}

/// Single keybinding entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBinding {
    pub key: String,
    pub action: Action,
}

/// Pattern for matching key events
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPattern {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings_list = vec![
            // Column cursor
            KeyBinding::new("Left", Action::MoveLeft),
            KeyBinding::new("Right", Action::MoveRight),
            KeyBinding::new("h", Action::MoveLeft),
            KeyBinding::new("l", Action::MoveRight),
            KeyBinding::new("s", Action::SortColumn),
            // Paging
            KeyBinding::new("n", Action::NextPage),
            KeyBinding::new("p", Action::PrevPage),
            KeyBinding::new("PageDown", Action::NextPage),
            KeyBinding::new("PageUp", Action::PrevPage),
            KeyBinding::new("Home", Action::FirstPage),
            KeyBinding::new("End", Action::LastPage),
            KeyBinding::new("g", Action::FirstPage),
            KeyBinding::new("G", Action::LastPage),
            KeyBinding::new("z", Action::CyclePageSize),
            // Search
            KeyBinding::new("/", Action::StartSearch),
            KeyBinding::new("c", Action::ClearSearch),
            // Application
            KeyBinding::new("q", Action::Quit),
            KeyBinding::new("Esc", Action::Cancel),
            KeyBinding::new("Enter", Action::Confirm),
        ];
        for n in 1..=9 {
            bindings_list.push(KeyBinding::new(&n.to_string(), Action::SortColumnAt(n - 1)));
        }

        Self::from(bindings_list)
    }
}

impl From<Vec<KeyBinding>> for KeyBindings {
    fn from(bindings_list: Vec<KeyBinding>) -> Self {
        let bindings_map = Self::build_map(&bindings_list);
        Self {
            bindings_list,
            bindings_map,
        }
    }
}

impl From<KeyBindings> for Vec<KeyBinding> {
    fn from(bindings: KeyBindings) -> Self {
        bindings.bindings_list
    }
}

impl KeyBindings {
    /// Build hashmap from bindings list; later entries win
    fn build_map(bindings: &[KeyBinding]) -> HashMap<KeyPattern, Action> {
        bindings
            .iter()
            .filter_map(|b| match KeyPattern::from_string(&b.key) {
                Ok(pattern) => Some((pattern, b.action)),
                Err(err) => {
                    warn!("Skipping key binding '{}': {}", b.key, err);
                    None
                }
            })
            .collect()
    }

    /// Layer user bindings on top of these
    pub fn with_overrides(mut self, overrides: &[KeyBinding]) -> Self {
        self.bindings_list.extend(overrides.iter().cloned());
        self.bindings_map = Self::build_map(&self.bindings_list);
        self
    }

    /// Get action for key event
    pub fn get_action(&self, key: &KeyEvent) -> Option<Action> {
        let pattern = KeyPattern::from_event(key);
        self.bindings_map.get(&pattern).copied()
    }

    /// Keys currently bound to an action (for the help line)
    pub fn get_keys_for_action(&self, action: Action) -> Vec<String> {
        let mut seen = HashSet::new();
        self.bindings_list
            .iter()
            .filter(|b| b.action == action)
            .filter(|b| {
                KeyPattern::from_string(&b.key)
                    .is_ok_and(|p| self.bindings_map.get(&p) == Some(&action))
            })
            .filter(|b| seen.insert(b.key.clone()))
            .map(|b| b.key.clone())
            .collect()
    }

    /// Validate bindings and return warnings
    pub fn validate(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        let mut seen_keys: HashMap<String, Action> = HashMap::new();
        for binding in &self.bindings_list {
            match seen_keys.get(&binding.key) {
                Some(existing) if *existing != binding.action => warnings.push(format!(
                    "Key '{}' rebound from {:?} to {:?}",
                    binding.key, existing, binding.action
                )),
                _ => {}
            }
            seen_keys.insert(binding.key.clone(), binding.action);
        }

        for binding in &self.bindings_list {
            if let Err(err) = KeyPattern::from_string(&binding.key) {
                warnings.push(format!(
                    "Invalid key pattern '{}' for action {:?}: {}",
                    binding.key, binding.action, err
                ));
            }
        }

        warnings
    }
}

impl KeyBinding {
    pub fn new(key: &str, action: Action) -> Self {
        Self {
            key: key.to_string(),
            action,
        }
    }
}

impl KeyPattern {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self::normalized(code, modifiers)
    }

    pub fn from_event(event: &KeyEvent) -> Self {
        Self::normalized(event.code, event.modifiers)
    }

    /// Characters carry their own case, so Shift is dropped for them
    fn normalized(code: KeyCode, mut modifiers: KeyModifiers) -> Self {
        if matches!(code, KeyCode::Char(_)) {
            modifiers.remove(KeyModifiers::SHIFT);
        }
        Self { code, modifiers }
    }

    /// Parse from string (e.g., "Ctrl+n", "G", "PageDown", "/")
    pub fn from_string(s: &str) -> Result<Self, String> {
        // A lone "+" is a key, not a separator
        let (modifier_parts, key_part) = match s.rsplit_once('+') {
            Some((mods, "")) => (mods.strip_suffix('+').unwrap_or(mods), "+"),
            Some((mods, key)) => (mods, key),
            None => ("", s),
        };

        let mut modifiers = KeyModifiers::empty();
        for part in modifier_parts.split('+').filter(|p| !p.is_empty()) {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return Err(format!("Unknown modifier: {}", part)),
            }
        }

        let mut chars = key_part.chars();
        let code = match (chars.next(), chars.next()) {
            (Some(ch), None) => KeyCode::Char(ch),
            _ => match key_part.to_lowercase().as_str() {
                "up" => KeyCode::Up,
                "down" => KeyCode::Down,
                "left" => KeyCode::Left,
                "right" => KeyCode::Right,
                "pageup" | "pgup" => KeyCode::PageUp,
                "pagedown" | "pgdown" | "pgdn" => KeyCode::PageDown,
                "home" => KeyCode::Home,
                "end" => KeyCode::End,
                "tab" => KeyCode::Tab,
                "enter" | "return" => KeyCode::Enter,
                "esc" | "escape" => KeyCode::Esc,
                "backspace" => KeyCode::Backspace,
                "delete" | "del" => KeyCode::Delete,
                "space" => KeyCode::Char(' '),
                f if f.starts_with('f') => match f[1..].parse::<u8>() {
                    Ok(n) if (1..=12).contains(&n) => KeyCode::F(n),
                    _ => return Err(format!("Invalid function key: {}", key_part)),
                },
                _ => return Err(format!("Unknown key: {}", key_part)),
            },
        };

        Ok(Self::normalized(code, modifiers))
    }
}

impl fmt::Display for KeyPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            write!(f, "Ctrl+")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            write!(f, "Alt+")?;
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            write!(f, "Shift+")?;
        }
        match self.code {
            KeyCode::Char(' ') => write!(f, "Space"),
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::Left => write!(f, "←"),
            KeyCode::Right => write!(f, "→"),
            KeyCode::Up => write!(f, "↑"),
            KeyCode::Down => write!(f, "↓"),
            KeyCode::PageUp => write!(f, "PgUp"),
            KeyCode::PageDown => write!(f, "PgDn"),
            KeyCode::F(n) => write!(f, "F{n}"),
            other => write!(f, "{other:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_key_pattern_parsing() {
        assert_eq!(
            KeyPattern::from_string("Ctrl+n").unwrap(),
            KeyPattern::new(KeyCode::Char('n'), KeyModifiers::CONTROL)
        );
        assert_eq!(KeyPattern::from_string("PageDown").unwrap().code, KeyCode::PageDown);
        assert_eq!(KeyPattern::from_string("F5").unwrap().code, KeyCode::F(5));
        assert_eq!(KeyPattern::from_string("+").unwrap().code, KeyCode::Char('+'));
        assert_eq!(
            KeyPattern::from_string("Ctrl++").unwrap(),
            KeyPattern::new(KeyCode::Char('+'), KeyModifiers::CONTROL)
        );
        assert!(KeyPattern::from_string("Hyper+x").is_err());
        assert!(KeyPattern::from_string("F13").is_err());
        assert!(KeyPattern::from_string("nonsense").is_err());
    }

    #[test]
    fn test_shifted_characters_match() {
        let bindings = KeyBindings::default();
        assert_eq!(
            bindings.get_action(&key(KeyCode::Char('G'), KeyModifiers::SHIFT)),
            Some(Action::LastPage)
        );
        assert_eq!(
            bindings.get_action(&key(KeyCode::Char('g'), KeyModifiers::NONE)),
            Some(Action::FirstPage)
        );
    }

    #[test]
    fn test_default_bindings() {
        let bindings = KeyBindings::default();
        assert!(bindings.validate().is_empty());
        assert_eq!(
            bindings.get_action(&key(KeyCode::Char('3'), KeyModifiers::NONE)),
            Some(Action::SortColumnAt(2))
        );
        assert_eq!(
            bindings.get_action(&key(KeyCode::Char('/'), KeyModifiers::NONE)),
            Some(Action::StartSearch)
        );
        assert_eq!(bindings.get_action(&key(KeyCode::Char('x'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_overrides_win() {
        let bindings = KeyBindings::default().with_overrides(&[
            KeyBinding::new("n", Action::LastPage),
            KeyBinding::new("bogus", Action::Quit),
        ]);
        assert_eq!(
            bindings.get_action(&key(KeyCode::Char('n'), KeyModifiers::NONE)),
            Some(Action::LastPage)
        );
        assert_eq!(bindings.get_keys_for_action(Action::NextPage), vec!["PageDown"]);

        let warnings = bindings.validate();
        assert!(warnings.iter().any(|w| w.contains("rebound")));
        assert!(warnings.iter().any(|w| w.contains("Invalid key pattern 'bogus'")));
    }

    #[test]
    fn test_serde_round_trip_as_list() {
        let bindings = KeyBindings::default();
        let json = serde_json::to_string(&bindings).unwrap();
        let restored: KeyBindings = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.bindings_list, bindings.bindings_list);
    }
}
