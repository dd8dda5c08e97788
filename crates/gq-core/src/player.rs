use serde::{Deserialize, Serialize};

/// Label shown for players without a usable name.
pub const ANONYMOUS_LABEL: &str = "Anonymous";

/// An already-resolved player identity.
///
/// The quiz never authenticates anyone. It only tags attempt records with
/// the identifier and shows the label on the leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Player {
    /// Stable identifier used to key leaderboard reduction.
    pub id: String,
    /// Display label.
    pub label: String,
}

impl Player {
    /// Create a player whose label is derived from the identifier.
    ///
    /// For e-mail style identifiers the label is the part before `@`.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        let label = label_from_id(&id);
        Self { id, label }
    }

    /// Create a player with an explicit label.
    pub fn with_label(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }

    /// The label to show, falling back to [`ANONYMOUS_LABEL`].
    pub fn display_label(&self) -> &str {
        display_label(&self.label)
    }
}

/// Derive a display label from an identifier.
pub fn label_from_id(id: &str) -> String {
    id.split('@').next().unwrap_or("").trim().to_string()
}

/// Map an empty label to [`ANONYMOUS_LABEL`].
pub fn display_label(label: &str) -> &str {
    if label.trim().is_empty() {
        ANONYMOUS_LABEL
    } else {
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_from_email() {
        let p = Player::new("ana.maria@example.com");
        assert_eq!(p.label, "ana.maria");
        assert_eq!(p.display_label(), "ana.maria");
    }

    #[test]
    fn label_from_plain_id() {
        assert_eq!(Player::new("carlos").display_label(), "carlos");
    }

    #[test]
    fn empty_label_is_anonymous() {
        assert_eq!(Player::new("@example.com").display_label(), ANONYMOUS_LABEL);
        assert_eq!(Player::with_label("x", "  ").display_label(), ANONYMOUS_LABEL);
    }
}
