use crate::runtime::intent::Intent;
use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    pub fn key(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    pub fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    pub fn alt(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::ALT)
    }

    pub fn from_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }
}

#[derive(Default)]
pub struct KeyBindings {
    bindings: HashMap<KeyBinding, Intent>,
}

impl KeyBindings {
    pub fn new() -> Self {
        let mut manager = Self::default();
        manager.install_defaults();
        manager
    }

    pub fn bind(&mut self, key: KeyBinding, intent: Intent) {
        self.bindings.insert(key, intent);
    }

    pub fn unbind(&mut self, key: &KeyBinding) {
        self.bindings.remove(key);
    }

    /// Bound intent, or the key itself for the focused field.
    pub fn resolve(&self, event: KeyEvent) -> Intent {
        self.bindings
            .get(&KeyBinding::from_event(event))
            .cloned()
            .unwrap_or(Intent::InputKey(event))
    }

    fn install_defaults(&mut self) {
        self.bind(KeyBinding::ctrl(KeyCode::Char('c')), Intent::Exit);
        self.bind(KeyBinding::key(KeyCode::Esc), Intent::Exit);
        self.bind(KeyBinding::key(KeyCode::Enter), Intent::Submit);
        self.bind(KeyBinding::key(KeyCode::Tab), Intent::NextField);
        self.bind(KeyBinding::key(KeyCode::BackTab), Intent::PrevField);
        self.bind(
            KeyBinding::new(KeyCode::BackTab, KeyModifiers::SHIFT),
            Intent::PrevField,
        );
        self.bind(KeyBinding::ctrl(KeyCode::Char('r')), Intent::Restart);
        for (index, digit) in ('1'..='9').enumerate() {
            self.bind(KeyBinding::alt(KeyCode::Char(digit)), Intent::GoToStep(index));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{KeyBinding, KeyBindings};
    use crate::runtime::intent::Intent;
    use crate::terminal::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn defaults_cover_navigation() {
        let bindings = KeyBindings::new();
        assert_eq!(
            bindings.resolve(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Intent::Exit
        );
        assert_eq!(bindings.resolve(KeyEvent::plain(KeyCode::Enter)), Intent::Submit);
        assert_eq!(
            bindings.resolve(KeyEvent::new(KeyCode::Char('3'), KeyModifiers::ALT)),
            Intent::GoToStep(2)
        );
    }

    #[test]
    fn unbound_keys_reach_the_focused_field() {
        let mut bindings = KeyBindings::new();
        let key = KeyEvent::plain(KeyCode::Char('3'));
        assert_eq!(bindings.resolve(key), Intent::InputKey(key));

        bindings.unbind(&KeyBinding::key(KeyCode::Esc));
        let esc = KeyEvent::plain(KeyCode::Esc);
        assert_eq!(bindings.resolve(esc), Intent::InputKey(esc));
    }
}
