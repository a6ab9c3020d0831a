//! Generic input event types for cross-host compatibility.

use super::modifiers::Modifiers;

/// Generic key representation for cross-host compatibility.
///
/// Hosts map their native key codes to these values; [`Key::from_name`]
/// accepts DOM `KeyboardEvent.key` names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Printable character (letters, digits, symbols, space)
    Char(char),
    /// Return/Enter key
    Enter,
    /// Backspace key
    Backspace,
    /// Forward delete key
    Delete,
    /// Escape key
    Escape,
    /// Tab key
    Tab,
    /// Shift modifier
    Shift,
    /// Control modifier
    Control,
    /// Alt modifier
    Alt,
    /// Meta/Super/Command modifier
    Meta,
    /// Caps Lock
    CapsLock,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    PageUp,
    PageDown,
    /// Unmapped or unrecognized key
    Unknown,
}

impl Key {
    /// Maps a DOM-style key name (`"a"`, `"Enter"`, `"ArrowLeft"`, ...) to a key.
    pub fn from_name(name: &str) -> Self {
        let mut chars = name.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Key::Char(c);
        }

        match name {
            "Enter" | "Return" => Key::Enter,
            "Backspace" => Key::Backspace,
            "Delete" => Key::Delete,
            "Escape" | "Esc" => Key::Escape,
            "Tab" => Key::Tab,
            "Shift" => Key::Shift,
            "Control" => Key::Control,
            "Alt" => Key::Alt,
            "Meta" => Key::Meta,
            "CapsLock" => Key::CapsLock,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "Home" => Key::Home,
            "End" => Key::End,
            "PageUp" => Key::PageUp,
            "PageDown" => Key::PageDown,
            "Space" | "Spacebar" => Key::Char(' '),
            _ => Key::Unknown,
        }
    }

    /// Returns true for keys that only move the caret or change modifier state.
    pub fn is_navigation_or_modifier(&self) -> bool {
        matches!(
            self,
            Key::Shift
                | Key::Control
                | Key::Alt
                | Key::Meta
                | Key::ArrowLeft
                | Key::ArrowRight
                | Key::ArrowUp
                | Key::ArrowDown
                | Key::Home
                | Key::End
                | Key::PageUp
                | Key::PageDown
                | Key::Tab
                | Key::Escape
                | Key::CapsLock
        )
    }
}

/// A key press together with the modifiers held at that moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// A key press with no modifiers held.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::new(),
        }
    }

    pub fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}

/// What the host should do with a key after the tools have seen it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KeyOutcome {
    /// Apply the key's default text-editing effect
    #[default]
    Continue,
    /// The tools already applied the effect; skip the default
    PreventDefault,
}

/// Mouse button identification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MouseButton {
    /// Left mouse button (primary drawing button)
    #[default]
    Left,
    /// Right mouse button (cancel action)
    Right,
    /// Middle mouse button (currently unused)
    Middle,
}

/// Pointer event channels a listener can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    Move,
    Down,
    Up,
    DoubleClick,
    /// Native context-menu request (right click on most platforms)
    ContextMenu,
}

/// A pointer event in client (window) coordinates.
///
/// The surface maps client coordinates to its own space through
/// [`RenderingSurface::to_surface_coordinates`](crate::surface::RenderingSurface::to_surface_coordinates).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerEventKind,
    pub x: f64,
    pub y: f64,
    pub button: MouseButton,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            x,
            y,
            button: MouseButton::Left,
        }
    }

    pub fn down(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Down, x, y)
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Move, x, y)
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::Up, x, y)
    }

    pub fn double_click(x: f64, y: f64) -> Self {
        Self::new(PointerEventKind::DoubleClick, x, y)
    }

    pub fn context_menu(x: f64, y: f64) -> Self {
        Self {
            kind: PointerEventKind::ContextMenu,
            x,
            y,
            button: MouseButton::Right,
        }
    }

    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = button;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_key_names_map_to_keys() {
        assert_eq!(Key::from_name("a"), Key::Char('a'));
        assert_eq!(Key::from_name("é"), Key::Char('é'));
        assert_eq!(Key::from_name("Enter"), Key::Enter);
        assert_eq!(Key::from_name("PageDown"), Key::PageDown);
        assert_eq!(Key::from_name("F13"), Key::Unknown);
    }

    #[test]
    fn navigation_keys_are_classified() {
        assert!(Key::ArrowLeft.is_navigation_or_modifier());
        assert!(Key::CapsLock.is_navigation_or_modifier());
        assert!(!Key::Char('x').is_navigation_or_modifier());
        assert!(!Key::Backspace.is_navigation_or_modifier());
    }
}
