use std::io::BufRead;
use std::io::Write;

use anyhow::Context;

/// Answers gathered from the user.
#[derive(Debug, PartialEq)]
pub struct Input {
    pub api_key: String,
    pub country_code: String,
    pub city: Option<String>,
    pub keyword: Option<String>,
}

/// Reads one trimmed answer, or `None` at end of input.
fn ask(
    reader: &mut impl BufRead,
    out: &mut impl Write,
    prompt: &str,
) -> anyhow::Result<Option<String>> {
    write!(out, "{prompt}")?;
    out.flush()?;
    let mut line = String::new();
    let read = reader
        .read_line(&mut line)
        .context("failed to read from stdin")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

fn ask_required(
    reader: &mut impl BufRead,
    out: &mut impl Write,
    prompt: &str,
) -> anyhow::Result<String> {
    ask(reader, out, prompt)?.context("unexpected end of input")
}

fn ask_optional(
    reader: &mut impl BufRead,
    out: &mut impl Write,
    prompt: &str,
) -> anyhow::Result<Option<String>> {
    Ok(ask(reader, out, prompt)?.filter(|answer| !answer.is_empty()))
}

/// Asks for the API key (unless one is preset), the country code, an optional city and an
/// optional artist or keyword.
pub fn collect(
    reader: &mut impl BufRead,
    out: &mut impl Write,
    preset_api_key: Option<String>,
) -> anyhow::Result<Input> {
    let api_key = match preset_api_key.filter(|k| !k.trim().is_empty()) {
        Some(key) => key.trim().to_string(),
        None => ask_required(reader, out, "Enter your Ticketmaster API key: ")?,
    };
    if api_key.is_empty() {
        anyhow::bail!("API key is required");
    }

    writeln!(out, "\nUse an ISO 3166-1 alpha-2 country code (US, GB, IE, NL, DE, ...)")?;
    let country_code = ask_required(reader, out, "Enter country code: ")?.to_ascii_uppercase();
    if country_code.len() != 2 || !country_code.chars().all(|c| c.is_ascii_alphabetic()) {
        anyhow::bail!("'{country_code}' is not a valid 2-letter country code");
    }

    writeln!(
        out,
        "\nEnter a city to narrow down results, or press Enter to search the entire country"
    )?;
    let city = ask_optional(reader, out, "Enter city name (optional): ")?;

    writeln!(out, "\nEnter an artist or keyword, or press Enter for all events")?;
    let keyword = ask_optional(reader, out, "Enter artist or keyword (optional): ")?;

    Ok(Input {
        api_key,
        country_code,
        city,
        keyword,
    })
}
