use scraper::{Html, Selector};

use crate::models::RawAgendaEntry;

/// Everything the pipeline needs from one meeting page.
#[derive(Debug, Clone, Default)]
pub struct MeetingPage {
    /// First link whose href mentions "download", if any. Only required when
    /// the download stage actually has to run.
    pub media_url: Option<String>,
    /// Raw agenda entries in page order.
    pub entries: Vec<RawAgendaEntry>,
}

fn sel(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|_| unreachable!("static selector"))
}

/// Extract the agenda listing and media download link from a meeting page.
///
/// Pure over the HTML body so it can be tested without a network. Entries
/// whose markup lacks a title button are emitted with an empty title; the
/// normalizer decides to drop them.
pub fn parse_meeting_page(html: &str) -> MeetingPage {
    let document = Html::parse_document(html);
    let item_sel = sel("li.agenda_item");
    let title_sel = sel("button.item_title");
    let prefix_sel = sel("span.item_prefix");
    let time_sel = sel("span.item_time");
    let link_sel = sel(r#"a[href*="download"]"#);

    let media_url = document
        .select(&link_sel)
        .filter_map(|el| el.value().attr("href"))
        .map(str::to_string)
        .next();

    let mut entries = Vec::new();
    for item in document.select(&item_sel) {
        let title = item
            .select(&title_sel)
            .next()
            .map(|button| collapse_whitespace(&button.text().collect::<Vec<_>>().join(" ")))
            .unwrap_or_default();

        let prefix = item
            .select(&prefix_sel)
            .next()
            .map(|span| span.text().collect::<String>().trim().to_string())
            .filter(|p| !p.is_empty());

        let raw_duration = item
            .select(&time_sel)
            .next()
            .map(|span| {
                let text = span.text().collect::<String>();
                text.trim()
                    .trim_start_matches("tijdsduur:")
                    .trim()
                    .to_string()
            })
            .filter(|d| !d.is_empty());

        entries.push(RawAgendaEntry {
            title,
            prefix,
            raw_duration,
        });
    }

    MeetingPage { media_url, entries }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><body>
        <a href="/vergadering/123/download">Download</a>
        <ul>
          <li class="agenda_item">
            <button class="item_title">
              <span class="item_prefix">1.</span>
              Opening   en mededelingen
            </button>
            <span class="item_time"> tijdsduur: 00:05:00 </span>
          </li>
          <li class="agenda_item">
            <button class="item_title"><span class="item_prefix">1.1</span> Spreekrecht</button>
          </li>
          <li class="agenda_item">
            <span class="item_time">tijdsduur: 00:10:00</span>
          </li>
        </ul>
        </body></html>
    "#;

    #[test]
    fn test_parse_meeting_page() {
        let page = parse_meeting_page(PAGE);

        assert_eq!(page.media_url.as_deref(), Some("/vergadering/123/download"));
        assert_eq!(page.entries.len(), 3);

        assert_eq!(page.entries[0].title, "1. Opening en mededelingen");
        assert_eq!(page.entries[0].prefix.as_deref(), Some("1."));
        assert_eq!(page.entries[0].raw_duration.as_deref(), Some("00:05:00"));

        assert_eq!(page.entries[1].title, "1.1 Spreekrecht");
        assert_eq!(page.entries[1].prefix.as_deref(), Some("1.1"));
        assert_eq!(page.entries[1].raw_duration, None);

        // Broken markup: no title button, but the entry is still emitted.
        assert_eq!(page.entries[2].title, "");
        assert_eq!(page.entries[2].raw_duration.as_deref(), Some("00:10:00"));
    }

    #[test]
    fn test_no_download_link() {
        let page = parse_meeting_page("<html><body><a href=\"/other\">x</a></body></html>");
        assert_eq!(page.media_url, None);
        assert!(page.entries.is_empty());
    }
}
