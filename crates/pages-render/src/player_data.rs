//! Table rows describing what each player does on a page.

use pages_spec::{EventSequence, Page};

/// One three-column table row.
pub type Row = [String; 3];

/// Header row of an event sequence.
pub fn header() -> Row {
    [
        "player".to_string(),
        "number of events".to_string(),
        "event sequence duration range".to_string(),
    ]
}

/// Content row of an event sequence. Players are numbered from 1.
pub fn content(sequence: &EventSequence) -> Row {
    [
        (sequence.player_index + 1).to_string(),
        sequence.event_count.to_string(),
        format!(
            "{} -- {}",
            format_seconds(sequence.duration_range.minimum),
            format_seconds(sequence.duration_range.maximum)
        ),
    ]
}

/// `(header, content)` pairs for every voice of a page, in voice order.
pub fn player_rows(page: &Page) -> Vec<(Row, Row)> {
    page.iter().map(|sequence| (header(), content(sequence))).collect()
}

/// Formats a duration bound in seconds; an unbounded maximum becomes `$\infty$`.
pub fn format_seconds(seconds: f64) -> String {
    if seconds.is_infinite() {
        r"$\infty$".to_string()
    } else {
        format!("{}s", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pages_spec::DurationRange;
    use pretty_assertions::assert_eq;

    fn sequence(player_index: usize, event_count: u32, minimum: f64, maximum: f64) -> EventSequence {
        EventSequence {
            player_index,
            event_count,
            duration_range: DurationRange::new(minimum, maximum),
            is_short: true,
        }
    }

    #[test]
    fn test_content_row() {
        assert_eq!(
            content(&sequence(0, 3, 15.0, 40.0)),
            ["1".to_string(), "3".to_string(), "15s -- 40s".to_string()]
        );
    }

    #[test]
    fn test_rest_row_uses_infinity() {
        assert_eq!(
            content(&sequence(2, 0, 0.0, f64::INFINITY))[2],
            r"0s -- $\infty$"
        );
    }

    #[test]
    fn test_player_rows_follow_voice_order() {
        let page = Page {
            page_number: 4,
            event_sequences: vec![sequence(0, 1, 5.0, 10.0), sequence(1, 2, 10.0, 20.0)],
        };
        let rows = player_rows(&page);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0, header());
        assert_eq!(rows[1].1[0], "2");
    }
}
