use mentor_core::{AppViewModel, ConnectivityState};

const RULE: &str = "----------------------------------------";

/// Draws the whole screen for one view model.
pub fn render(view: &AppViewModel) -> String {
    let mut lines = Vec::new();

    lines.push("IDE Mentor Bot".to_string());
    lines.push(format!("Status: {}", view.status_line));
    if view.retry_visible {
        let hint = if view.retry_enabled {
            format!("  [{}] type `retry`", view.retry_label)
        } else {
            format!("  [{}]", view.retry_label)
        };
        lines.push(hint);
    }

    lines.push(RULE.to_string());
    lines.push(format!(
        "Your Query: {}",
        if view.query.is_empty() {
            "(empty)"
        } else {
            view.query.as_str()
        }
    ));
    lines.push(format!(
        "Zip File:   {}",
        view.file_name.as_deref().unwrap_or("(none)")
    ));
    let run_hint = if view.submit_enabled {
        " type `run`"
    } else {
        ""
    };
    lines.push(format!("[{}]{}", view.submit_label, run_hint));

    if !view.error_message.is_empty() {
        lines.push(format!("Error: {}", view.error_message));
    }
    if let Some(notice) = &view.notice {
        lines.push(notice.clone());
    }

    lines.push(RULE.to_string());
    lines.push("Response".to_string());
    if view.copy_visible {
        lines.push("[Copy] type `copy`".to_string());
        lines.push(output_display(&view.response));
    }

    lines.join("\n")
}

/// Plain rendering of an output block.
pub fn output_display(output: &str) -> String {
    format!("Output:\n{output}")
}

/// Why a gated control cannot be used right now.
pub fn submit_blocked_reason(view: &AppViewModel) -> &'static str {
    if view.loading {
        "A request is already being processed."
    } else {
        match view.connectivity {
            ConnectivityState::Checking => "Still checking the backend connection.",
            _ => "The backend is not connected. Type `retry` first.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn connected_view() -> AppViewModel {
        AppViewModel {
            connectivity: ConnectivityState::Connected,
            backend_url: "http://127.0.0.1:5000".to_string(),
            status_line: "Connected to http://127.0.0.1:5000".to_string(),
            retry_visible: false,
            retry_enabled: true,
            retry_label: "Retry Connection".to_string(),
            submit_enabled: true,
            submit_label: "Run".to_string(),
            ..AppViewModel::default()
        }
    }

    #[test]
    fn response_is_shown_through_output_display() {
        let view = AppViewModel {
            query: "why did tests fail".to_string(),
            file_name: Some("report.zip".to_string()),
            response: "Your tests failed because...".to_string(),
            copy_visible: true,
            ..connected_view()
        };

        let screen = render(&view);
        assert!(screen.contains("Status: Connected to http://127.0.0.1:5000"));
        assert!(screen.contains("Your Query: why did tests fail"));
        assert!(screen.contains("Zip File:   report.zip"));
        assert!(screen.ends_with("[Copy] type `copy`\nOutput:\nYour tests failed because..."));
        assert!(!screen.contains("retry"));
    }

    #[test]
    fn disconnected_screen_offers_retry_and_shows_error() {
        let view = AppViewModel {
            connectivity: ConnectivityState::Error,
            status_line: "Disconnected from http://127.0.0.1:5000".to_string(),
            retry_visible: true,
            submit_enabled: false,
            error_message: "Please select a zip file".to_string(),
            ..connected_view()
        };

        let screen = render(&view);
        assert!(screen.contains("[Retry Connection] type `retry`"));
        assert!(screen.contains("Error: Please select a zip file"));
        assert!(screen.contains("[Run]\n"));
        assert!(!screen.contains("Output:"));
        assert_eq!(
            submit_blocked_reason(&view),
            "The backend is not connected. Type `retry` first."
        );
    }

    #[test]
    fn output_display_has_heading() {
        assert_eq!(output_display("42"), "Output:\n42");
    }
}
