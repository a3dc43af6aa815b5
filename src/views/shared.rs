use time::{OffsetDateTime, UtcOffset, format_description::FormatItem, macros::format_description};

const MESSAGE_TIME_FORMAT: &[FormatItem<'static>] =
    format_description!("[hour repr:12 padding:zero]:[minute padding:zero] [period case:upper]");

/// Wall-clock time a message was created, in the local offset when known.
pub fn format_message_time(timestamp: Option<OffsetDateTime>) -> Option<String> {
    let mut datetime = timestamp?;
    if let Ok(offset) = UtcOffset::current_local_offset() {
        datetime = datetime.to_offset(offset);
    }
    datetime.format(MESSAGE_TIME_FORMAT).ok()
}

#[cfg(any(feature = "desktop", feature = "mobile"))]
pub fn copy_to_clipboard(text: String) {
    match arboard::Clipboard::new() {
        Ok(mut clipboard) => {
            if let Err(err) = clipboard.set_text(text) {
                tracing::warn!(error = %err, "failed to copy to clipboard");
            }
        }
        Err(err) => tracing::warn!(error = %err, "clipboard unavailable"),
    }
}

#[cfg(not(any(feature = "desktop", feature = "mobile")))]
pub fn copy_to_clipboard(_text: String) {
    tracing::debug!("clipboard not supported on this platform");
}
