/// Trailer viewer modal
///
/// Extracts the YouTube id from the movie's trailer URL and surfaces the
/// watch link. A missing or unparseable URL renders a "not found" body
/// instead of an empty modal.

use crate::Message;
use iced::widget::{button, column, container, text};
use iced::{Alignment, Element, Length};

#[derive(Debug)]
pub struct TrailerModal {
    pub title: String,
    pub youtube_id: Option<String>,
}

impl TrailerModal {
    pub fn new(title: String, trailer_url: Option<&str>) -> Self {
        let youtube_id = trailer_url.and_then(extract_youtube_id);
        TrailerModal { title, youtube_id }
    }

    pub fn view(&self) -> Element<'_, Message> {
        let body: Element<Message> = match &self.youtube_id {
            Some(id) => column![
                text(&self.title).size(20),
                text(format!("https://www.youtube.com/watch?v={}", id)).size(16),
            ]
            .spacing(12)
            .align_x(Alignment::Center)
            .into(),
            None => text("Trailer not found.").size(16).into(),
        };

        container(
            column![
                body,
                button(text("Close").size(14))
                    .on_press(Message::CloseTrailer)
                    .style(button::secondary),
            ]
            .spacing(16)
            .align_x(Alignment::Center),
        )
        .width(Length::Fixed(480.0))
        .padding(32)
        .style(container::rounded_box)
        .into()
    }
}

/// Pull the value of the `v` query parameter out of a YouTube watch URL.
pub fn extract_youtube_id(url: &str) -> Option<String> {
    let (_, query) = url.split_once('?')?;
    for pair in query.split('&') {
        if let Some(value) = pair.strip_prefix("v=") {
            if !value.is_empty() {
                return Some(value.to_string());
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_v_parameter() {
        assert_eq!(
            extract_youtube_id("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_extracts_v_among_other_parameters() {
        assert_eq!(
            extract_youtube_id("https://www.youtube.com/watch?t=42&v=abc123"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_urls_without_v_yield_none() {
        assert_eq!(extract_youtube_id("https://www.youtube.com/watch?t=42"), None);
        assert_eq!(extract_youtube_id("https://example.com/trailer.mp4"), None);
        assert_eq!(extract_youtube_id("https://www.youtube.com/watch?v="), None);
    }
}
