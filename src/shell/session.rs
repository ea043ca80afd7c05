use crate::client::CredibilityApi;
use crate::commands::popup::{PopupController, PopupSurface, VoteButton};
use log::{debug, warn};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupEvent {
    Click(VoteButton),
    Refresh,
    Close,
}

pub fn parse_event(line: &str) -> Option<PopupEvent> {
    match line.trim().to_ascii_lowercase().as_str() {
        "c" | "credible" | "up" | "+" => Some(PopupEvent::Click(VoteButton::Credible)),
        "n" | "not-credible" | "down" | "-" => Some(PopupEvent::Click(VoteButton::NotCredible)),
        "r" | "refresh" => Some(PopupEvent::Refresh),
        "q" | "quit" | "close" => Some(PopupEvent::Close),
        _ => None,
    }
}

/// Feeds button clicks from `input` to the controller until the popup is
/// closed or input ends. Each event finishes before the next line is read.
pub async fn run_session<A, S, R>(controller: &mut PopupController<A, S>, input: R) -> std::io::Result<()>
where
    A: CredibilityApi,
    S: PopupSurface,
    R: AsyncBufRead + Unpin,
{
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        let Some(event) = parse_event(&line) else {
            warn!("unknown input '{}': use c(redible), n(ot-credible), r(efresh) or q(uit)", line.trim());
            continue;
        };
        debug!("popup event {event:?}");

        // Failures are already on the surface as a status message.
        match event {
            PopupEvent::Click(button) => {
                let _ = controller.click(button).await;
            }
            PopupEvent::Refresh => {
                let _ = controller.refresh().await;
            }
            PopupEvent::Close => break,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_button_aliases() {
        assert_eq!(parse_event(" C "), Some(PopupEvent::Click(VoteButton::Credible)));
        assert_eq!(parse_event("not-credible"), Some(PopupEvent::Click(VoteButton::NotCredible)));
        assert_eq!(parse_event("r"), Some(PopupEvent::Refresh));
        assert_eq!(parse_event("quit"), Some(PopupEvent::Close));
        assert_eq!(parse_event("maybe"), None);
    }
}
