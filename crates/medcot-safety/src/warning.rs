//! Safety warning block composition.

use medcot_core::models::SafetyAlert;

pub const WARNING_HEADER: &str = "**SAFETY WARNING:**";

/// `"**SAFETY WARNING:**\n- <msg>\n- <msg>"`.
pub fn warning_block(alerts: &[SafetyAlert]) -> String {
    let mut block = String::from(WARNING_HEADER);
    for alert in alerts {
        block.push_str("\n- ");
        block.push_str(&alert.message);
    }
    block
}

/// Prepend the warning block to `answer_text`, separated by a blank line,
/// unless the block is already present. Empty text becomes the block itself.
/// Without alerts the text is returned unchanged.
pub fn compose_warning(answer_text: &str, alerts: &[SafetyAlert]) -> String {
    if alerts.is_empty() {
        return answer_text.to_string();
    }
    let block = warning_block(alerts);
    if answer_text.is_empty() {
        block
    } else if answer_text.contains(&block) {
        answer_text.to_string()
    } else {
        format!("{block}\n\n{answer_text}")
    }
}
