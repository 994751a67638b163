//! Whole-card activation rules.
//!
//! When cards are activation targets, a click or `Enter`/`Space` anywhere on
//! the card opens the viewer. Interactive elements nested in the card keep
//! their own behaviour, so activations that start on them are ignored here.

/// What started the activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivationTrigger {
    /// Mouse, pen or touch click.
    Pointer,
    /// Keyboard key, by its key name (`"Enter"`, `" "`, `"Spacebar"`, ...).
    Key(String),
}

/// Element the activation originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    /// The card surface itself, or passive content inside it.
    Card,
    /// An anchor.
    Link,
    /// A button.
    Button,
    /// Input, select or textarea.
    FormControl,
    /// A form label.
    Label,
    /// Anything else that is not interactive.
    Other,
}

impl ElementKind {
    /// True for elements that handle activation on their own.
    #[must_use]
    pub fn is_interactive(self) -> bool {
        matches!(
            self,
            Self::Link | Self::Button | Self::FormControl | Self::Label
        )
    }
}

/// A synthetic activation event delivered to a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activation {
    /// Click or key.
    pub trigger: ActivationTrigger,
    /// Closest element at the activation origin.
    pub origin: ElementKind,
}

impl Activation {
    /// Pointer click originating from `origin`.
    #[must_use]
    pub fn click(origin: ElementKind) -> Self {
        Self {
            trigger: ActivationTrigger::Pointer,
            origin,
        }
    }

    /// Key press originating from `origin`.
    #[must_use]
    pub fn key(key: impl Into<String>, origin: ElementKind) -> Self {
        Self {
            trigger: ActivationTrigger::Key(key.into()),
            origin,
        }
    }

    /// Whether this event should open the card's viewer link.
    #[must_use]
    pub fn opens_viewer(&self) -> bool {
        if self.origin.is_interactive() {
            return false;
        }
        match &self.trigger {
            ActivationTrigger::Pointer => true,
            ActivationTrigger::Key(key) => matches!(key.as_str(), "Enter" | " " | "Space" | "Spacebar"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_on_card_opens_viewer() {
        assert!(Activation::click(ElementKind::Card).opens_viewer());
        assert!(Activation::click(ElementKind::Other).opens_viewer());
    }

    #[test]
    fn test_enter_and_space_open_viewer() {
        for key in ["Enter", " ", "Space", "Spacebar"] {
            assert!(Activation::key(key, ElementKind::Card).opens_viewer(), "key {key:?}");
        }
    }

    #[test]
    fn test_other_keys_are_ignored() {
        for key in ["Tab", "Escape", "a", "ArrowDown"] {
            assert!(!Activation::key(key, ElementKind::Card).opens_viewer(), "key {key:?}");
        }
    }

    #[test]
    fn test_nested_interactive_elements_keep_their_behaviour() {
        for origin in [
            ElementKind::Link,
            ElementKind::Button,
            ElementKind::FormControl,
            ElementKind::Label,
        ] {
            assert!(!Activation::click(origin).opens_viewer(), "{origin:?}");
            assert!(!Activation::key("Enter", origin).opens_viewer(), "{origin:?}");
        }
    }
}
