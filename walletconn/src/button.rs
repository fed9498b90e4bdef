//! Connect control rendering.
//!
//! The control label is a pure function of [`ConnectionState`]; rendering
//! never consults anything else, so the same state always produces the
//! same label.

use crate::session::ConnectionState;

/// Rendered state of the connect control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    /// Text shown on the control.
    pub text: String,
    /// Whether the control accepts a press.
    pub enabled: bool,
}

/// Maps a connection state to its control label.
///
/// Disconnected renders the connect affordance, connecting a disabled
/// transient label, and connected the truncated account identifier
/// (pressing it disconnects).
#[must_use]
pub fn render(state: &ConnectionState) -> Label {
    match state {
        ConnectionState::Disconnected => Label {
            text: "Connect".to_owned(),
            enabled: true,
        },
        ConnectionState::Connecting => Label {
            text: "Connecting…".to_owned(),
            enabled: false,
        },
        ConnectionState::Connected { account, .. } => Label {
            text: truncate_account(account),
            enabled: true,
        },
    }
}

/// Shortens an account identifier to `0x1f98…F984` form: the first six
/// and last four characters joined by an ellipsis. Identifiers short
/// enough to show in full are returned unchanged.
#[must_use]
pub fn truncate_account(account: &str) -> String {
    const PREFIX: usize = 6;
    const SUFFIX: usize = 4;

    let chars: Vec<char> = account.chars().collect();
    if chars.len() <= PREFIX + SUFFIX {
        return account.to_owned();
    }
    let head: String = chars[..PREFIX].iter().collect();
    let tail: String = chars[chars.len() - SUFFIX..].iter().collect();
    format!("{head}…{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_state_renders_its_label() {
        let disconnected = render(&ConnectionState::Disconnected);
        assert_eq!(disconnected.text, "Connect");
        assert!(disconnected.enabled);

        let connecting = render(&ConnectionState::Connecting);
        assert_eq!(connecting.text, "Connecting…");
        assert!(!connecting.enabled);

        let connected = render(&ConnectionState::Connected {
            account: "0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984".to_owned(),
            chain_id: 1,
        });
        assert_eq!(connected.text, "0x1f98…F984");
        assert!(connected.enabled);
    }

    #[test]
    fn short_identifiers_are_not_truncated() {
        assert_eq!(truncate_account("0x1234"), "0x1234");
        assert_eq!(truncate_account("0x12345678"), "0x12345678");
    }

    #[test]
    fn truncation_keeps_prefix_and_suffix() {
        assert_eq!(
            truncate_account("0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984"),
            "0x1f98…F984"
        );
    }
}
