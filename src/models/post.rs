//! Finished post model

use serde::{Deserialize, Serialize};

/// A finished block: display text plus its action buttons
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// HTML formatted text
    pub text: String,
    /// Buttons in display order, one per keyboard row
    pub buttons: Vec<PostButton>,
}

/// Labeled button attached to a post
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostButton {
    pub label: String,
    pub action: ButtonAction,
}

/// What a button does when pressed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ButtonAction {
    /// Opens a URL
    Url(String),
    /// Opens the chat picker with `@bot <query>` pre-filled
    SwitchInlineQuery(String),
}

impl PostButton {
    pub fn url(label: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::Url(url.into()),
        }
    }

    pub fn switch_inline_query(label: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            action: ButtonAction::SwitchInlineQuery(query.into()),
        }
    }
}

impl Post {
    /// Labels of all buttons, in order
    pub fn button_labels(&self) -> Vec<&str> {
        self.buttons.iter().map(|b| b.label.as_str()).collect()
    }
}
