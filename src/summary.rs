use std::io::Write;

use serde_json::Value;

fn text<'a>(event: &'a Value, pointer: &str) -> Option<&'a str> {
    event.pointer(pointer).and_then(Value::as_str)
}

/// Prints a readable listing of the events.
pub fn print_events(events: &[Value], location: &str, out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "\n=== Found {} events in {location} ===", events.len())?;
    if events.is_empty() {
        writeln!(out, "No events found.")?;
        return Ok(());
    }

    for (i, event) in events.iter().enumerate() {
        let venue = event.pointer("/_embedded/venues/0");
        let venue_text = |pointer: &str| venue.and_then(|v| text(v, pointer)).unwrap_or("N/A");

        writeln!(out, "\n{}. {}", i + 1, text(event, "/name").unwrap_or("Unknown Event"))?;
        writeln!(
            out,
            "   Date: {} at {}",
            text(event, "/dates/start/localDate").unwrap_or("TBA"),
            text(event, "/dates/start/localTime").unwrap_or("TBA"),
        )?;
        writeln!(out, "   Venue: {}", venue_text("/name"))?;
        writeln!(
            out,
            "   Location: {}, {}",
            venue_text("/city/name"),
            venue_text("/country/name"),
        )?;

        let artists: Vec<&str> = event
            .pointer("/_embedded/attractions")
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|a| text(a, "/name"))
            .collect();
        if !artists.is_empty() {
            writeln!(out, "   Artists: {}", artists.join(", "))?;
        }
        writeln!(out, "   Tickets: {}", text(event, "/url").unwrap_or(""))?;
    }

    Ok(())
}
