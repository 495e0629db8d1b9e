//! Notification action buttons.

use serde::{Deserialize, Serialize};

/// Visual weight of an action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionStyle {
    /// Emphasised action.
    Primary,
    /// Regular action.
    #[default]
    Secondary,
    /// Destructive action.
    Danger,
}

/// An action attached to a notification, rendered as a button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationAction {
    /// Button label.
    pub label: String,
    /// Link target, if the action navigates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Named handler, if the action runs a command.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    /// Button style.
    #[serde(default)]
    pub style: ActionStyle,
}

impl NotificationAction {
    /// A link action.
    pub fn link(label: impl Into<String>, url: impl Into<String>, style: ActionStyle) -> Self {
        Self {
            label: label.into(),
            url: Some(url.into()),
            action: None,
            style,
        }
    }
}
