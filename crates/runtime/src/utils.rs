
pub fn default_offset() -> time::UtcOffset {
    // TODO: use tz-rs or something to get the right timezone?
    time::UtcOffset::UTC
}

/// Offset from a whole number of hours, clamped to the valid range.
pub fn offset_from_hours(hours: i8) -> time::UtcOffset {
    time::UtcOffset::from_hms(hours.clamp(-25, 25), 0, 0)
        .unwrap_or_else(|_| default_offset())
}

/// "2024年11月1日", in the given offset (UTC if none)
pub fn format_date_ja(date: &time::OffsetDateTime, offset: Option<time::UtcOffset>) -> String {
    let date = date.to_offset(offset.unwrap_or_else(default_offset));
    format!("{}年{}月{}日", date.year(), u8::from(date.month()), date.day())
}

/// "2024-11-01", for `datetime` attributes
pub fn format_date_iso(date: &time::OffsetDateTime, offset: Option<time::UtcOffset>) -> String {
    let date = date.to_offset(offset.unwrap_or_else(default_offset));
    format!("{:04}-{:02}-{:02}", date.year(), u8::from(date.month()), date.day())
}

/// Yen with thousands separators, "¥12,000"
pub fn format_price(yen: u64) -> String {
    let digits = yen.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 2);
    out.push('¥');
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// URL-safe slug: lower case, whitespace and underscores become `-`,
/// anything outside `[a-z0-9-]` is dropped, repeated `-` collapse.
pub fn to_slug(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.trim().to_lowercase().chars() {
        let c = match c {
            c if c.is_ascii_alphanumeric() => c,
            c if c.is_whitespace() || c == '_' || c == '-' => '-',
            _ => continue,
        };
        if c == '-' && out.ends_with('-') {
            continue;
        }
        out.push(c);
    }
    out
}

/// Remove anything that looks like a tag, leaving only text.
pub fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        match rest[start..].find('>') {
            Some(end) => rest = &rest[start + end + 1..],
            None => {
                rest = &rest[start..];
                break;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Plain-text excerpt of markup, at most `length` characters plus an ellipsis.
///
/// Character references are decoded, so the result needs escaping again
/// before it goes back into markup.
pub fn excerpt_from_content(html: &str, length: usize) -> String {
    let stripped = strip_tags(html);
    let text = html_escape::decode_html_entities(&stripped);
    match text.char_indices().nth(length) {
        Some((cut, _)) => format!("{}…", &text[..cut]),
        None => text.into_owned(),
    }
}


// Adapted from anyhow's debug formatter
struct Indented<'a, T> {
    inner: &'a mut T,
    indent: usize,
    prefix: Option<&'a str>,
}
impl<'a, T> Indented<'a, T> where T: std::fmt::Write {
    fn new(inner: &'a mut T, indent: usize, prefix: Option<&'a str>) -> Self {
        Indented {
            inner,
            indent,
            prefix,
        }
    }
}
impl<'a, T> std::fmt::Write for Indented<'a, T> where T: std::fmt::Write {
    fn write_str(&mut self, s: &str) -> std::fmt::Result {
        let mut first_segment = true;
        for line in s.split('\n') {
            if let Some(prefix) = self.prefix.take() {
                write!(self.inner, "{:>width$}", prefix, width=self.indent)?;
            } else if !first_segment {
                // If we have reached a newline; print out an equivalent and then indentation
                self.inner.write_char('\n')?;
                write!(self.inner, "{:>width$}", "", width=self.indent)?;
            }
            self.inner.write_str(line)?;
            first_segment = false;
        }
        Ok(())
    }
}

pub fn format_error<E, W>(f: &mut W, error: &E) -> Result<(), std::fmt::Error>
    where W: std::fmt::Write, E: std::error::Error + ?Sized
{
    use std::fmt::Write;
    write!(f, "{}", error)?;

    if let Some(cause) = error.source() {
        write!(f, "\n\nCaused by:")?;
        let mut next_cause = Some(cause);
        let mut n = 0;
        while let Some(cause) = next_cause {
            writeln!(f)?;
            let prefix = format!("{}: ", n);
            let mut indented = Indented::new(f, 7, Some(&prefix));
            write!(indented, "{}", cause)?;
            next_cause = cause.source();
            n += 1;
        }
    }
    Ok(())
}

pub fn format_error_disp<'a, E>(e: &'a E) -> impl std::fmt::Display + 'a
    where E: std::error::Error + ?Sized
{
    struct Disp<'a, E: ?Sized>(&'a E);
    impl<E> std::fmt::Display for Disp<'_, E> where E: std::error::Error + ?Sized {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            format_error(f, self.0)
        }
    }
    Disp(e)
}
