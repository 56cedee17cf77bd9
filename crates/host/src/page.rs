//! Page-level hooks the embedding UI calls on the script's behalf.

use crate::context::HostContext;
use crate::error::HostError;

/// Shown instead of the details of an opaque cross-origin script error.
pub const OPAQUE_SCRIPT_ERROR: &str = "Script Error: See Browser Console for Detail";

/// Source name under which uncaught script errors are reported.
pub const SCRIPT_ERROR_SOURCE: &str = "onerror";

/// Builds the text shown for an uncaught script error.
pub fn script_error_text(message: &str, line: u32, column: u32) -> String {
    if message.to_lowercase().contains("script error") {
        OPAQUE_SCRIPT_ERROR.to_string()
    } else {
        format!("Message: {message} - Line: {line} - Column: {column}")
    }
}

/// Passes an uncaught script error to the host's error display.
pub fn report_script_error(ctx: &HostContext, message: &str, line: u32, column: u32) {
    let text = script_error_text(message, line, column);
    tracing::error!(page = %ctx.page(), line, column, "{text}");
    ctx.host().page_error(ctx.page(), SCRIPT_ERROR_SOURCE, &text);
}

/// Tells the host that the page gained focus.
pub fn focus(ctx: &HostContext) -> Result<(), HostError> {
    ctx.host().page_select(ctx.page())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::PageId;
    use crate::testing::{Call, RecordingHost};
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::sync::Arc;

    #[rstest]
    #[case("Script error.", OPAQUE_SCRIPT_ERROR)]
    #[case("Uncaught SCRIPT ERROR", OPAQUE_SCRIPT_ERROR)]
    #[case("x is not defined", "Message: x is not defined - Line: 12 - Column: 4")]
    fn script_error_formatting(#[case] message: &str, #[case] expected: &str) {
        assert_eq!(script_error_text(message, 12, 4), expected);
    }

    #[test]
    fn script_errors_go_to_the_page() {
        let host = Arc::new(RecordingHost::default());
        let ctx = HostContext::new(host.clone(), PageId(5));
        report_script_error(&ctx, "boom", 1, 2);
        assert_eq!(
            host.calls(),
            vec![(
                PageId(5),
                Call::PageError {
                    source: "onerror".to_string(),
                    message: "Message: boom - Line: 1 - Column: 2".to_string(),
                }
            )]
        );
    }

    #[test]
    fn focus_selects_the_page() {
        let host = Arc::new(RecordingHost::default());
        focus(&HostContext::new(host.clone(), PageId(9))).unwrap();
        assert_eq!(host.calls(), vec![(PageId(9), Call::PageSelect)]);
    }
}
