use serde::Serialize;

/// A duration parsed from a trailing-unit string (`s`, `m`, `h`); a bare
/// number is interpreted as seconds.
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd, Serialize)]
pub struct Duration(pub f64);

impl Duration {
    pub const ZERO: Duration = Duration(0.0);

    pub fn from_secs(secs: f64) -> Self {
        Duration(secs)
    }

    pub fn as_secs(&self) -> f64 {
        self.0
    }

    /// Parses a value like `"24h"`, `"15m"`, `"30s"`, or a bare `"300"`
    /// (seconds). Returns `None` on malformed input; callers record a
    /// warning and a zero duration in that case.
    pub fn parse(raw: &str) -> Option<Duration> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        let (number, unit) = match raw.trim_end_matches(|c: char| c.is_ascii_alphabetic()) {
            number if number.len() < raw.len() => (number, &raw[number.len()..]),
            number => (number, ""),
        };

        let scale = match unit {
            "" | "s" => 1.0,
            "m" => 60.0,
            "h" => 3600.0,
            _ => return None,
        };

        number.trim().parse::<f64>().ok().map(|n| Duration(n * scale))
    }
}

impl std::fmt::Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}s", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_units() {
        assert_eq!(Duration::parse("30s"), Some(Duration(30.0)));
        assert_eq!(Duration::parse("5m"), Some(Duration(300.0)));
        assert_eq!(Duration::parse("2h"), Some(Duration(7200.0)));
        assert_eq!(Duration::parse("300"), Some(Duration(300.0)));
    }

    #[test]
    fn rejects_unknown_unit() {
        assert_eq!(Duration::parse("5d"), None);
        assert_eq!(Duration::parse(""), None);
    }
}
