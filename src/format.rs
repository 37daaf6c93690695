use jiff::{Zoned, civil::Date};

/// Lower-cases `text` and collapses every run of characters outside
/// `[a-z0-9]` into a single hyphen, with no hyphen at either end.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for c in text.to_lowercase().chars() {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c);
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

pub fn format_duration(minutes: Option<i32>) -> String {
    let Some(minutes) = minutes.filter(|m| *m > 0) else {
        return String::new();
    };

    let (hours, mins) = (minutes / 60, minutes % 60);
    match (hours, mins) {
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}h"),
        (h, m) => format!("{h}h {m}m"),
    }
}

/// One decimal place, with a zero or missing rating shown as blank.
pub fn format_rating(rating: Option<f64>) -> String {
    let Some(r) = rating.filter(|r| *r != 0.0 && !r.is_nan()) else {
        return String::new();
    };

    // Only odd multiples of 0.25 sit exactly halfway between two tenths.
    // Those round away from zero; everything else is already nearest.
    let quarters = r * 4.0;
    if quarters.fract() == 0.0 && quarters.abs() < 1e15 && (quarters as i64) % 2 != 0 {
        let q = quarters as i64;
        let tenths = (q * 5 + q.signum()) / 2;
        let sign = if tenths < 0 { "-" } else { "" };
        return format!("{sign}{}.{}", tenths.abs() / 10, tenths.abs() % 10);
    }

    format!("{r:.1}")
}

/// `7:30 PM`
pub fn format_showtime(at: &Zoned) -> String {
    at.strftime("%-I:%M %p").to_string()
}

/// `Fri, Jan 3`
pub fn format_date(date: Date) -> String {
    date.strftime("%a, %b %-d").to_string()
}

/// `Friday, January 3, 2025`
pub fn format_full_date(date: Date) -> String {
    date.strftime("%A, %B %-d, %Y").to_string()
}

pub fn format_day_short(date: Date) -> String {
    date.strftime("%a").to_string()
}

pub fn format_day_num(date: Date) -> String {
    date.day().to_string()
}

pub fn format_month_short(date: Date) -> String {
    date.strftime("%b").to_string()
}
