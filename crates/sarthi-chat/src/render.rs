use sarthi_core::{ChatMessage, Role};

pub const USER_LABEL: &str = "You";
pub const BOT_LABEL: &str = "Sarthi";

/// One transcript entry as a terminal line, e.g. `Sarthi> Office opens at 10.`
pub fn render_line(message: &ChatMessage) -> String {
    let label = match message.role {
        Role::User => USER_LABEL,
        Role::Bot => BOT_LABEL,
    };
    format!("{label}> {}", message.content)
}
