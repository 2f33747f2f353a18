//! # Placeholder Substitution
//!
//! Registry notice bodies are templates. Two kinds of placeholder are
//! filled in, in this order:
//!
//! 1. **Copyright runs.** A line starting with `COPYRIGHT` (optionally
//!    after a `// ` comment marker) and reaching a terminal marker
//!    (`COPYRIGHT HOLDER`, `COPYRIGHT OWNER`, or
//!    `<various other dates and companies>`) is replaced from the token
//!    through the marker by the summary's copyright holder. Matching is
//!    case-insensitive and never crosses a newline.
//! 2. **Years.** Every `YYYY` or `YEAR` outside the replaced copyright runs
//!    becomes the current four-digit year.
//!
//! The holder string is inserted verbatim and never passes through the year
//! substitution.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::{NoExpand, Regex};

fn copyright_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Anchored with multi-line `^` rather than matching a leading `\n`: the
    // line break before a run stays in the output, so the holder lands on
    // its own line instead of being glued to the previous one.
    RE.get_or_init(|| {
        Regex::new(
            r"(?im)^(?:// )?COPYRIGHT.+(?:COPYRIGHT (?:HOLDER|OWNER)|<various other dates and companies>)",
        )
        .expect("copyright placeholder regex")
    })
}

fn year_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"YYYY|YEAR").expect("year placeholder regex"))
}

/// Fill the copyright and year placeholders of a notice body.
pub fn substitute_placeholders(body: &str, copyright_holder: &str, year: i32) -> String {
    let year = year.to_string();
    let mut out = String::with_capacity(body.len());
    let mut last = 0;

    for run in copyright_regex().find_iter(body) {
        out.push_str(&replace_years(&body[last..run.start()], &year));
        out.push_str(copyright_holder);
        last = run.end();
    }
    out.push_str(&replace_years(&body[last..], &year));
    out
}

fn replace_years<'a>(text: &'a str, year: &str) -> Cow<'a, str> {
    year_regex().replace_all(text, NoExpand(year))
}
