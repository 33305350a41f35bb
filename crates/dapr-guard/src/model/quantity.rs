use serde::Serialize;

/// A memory quantity in bytes, parsed from Kubernetes-style suffixed
/// strings (`"1Gi"`, `"512Mi"`) or a bare byte count.
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd, Serialize)]
pub struct Quantity(pub f64);

impl Quantity {
    pub fn bytes(&self) -> f64 {
        self.0
    }

    pub fn gib(value: f64) -> Self {
        Quantity(value * 1024.0 * 1024.0 * 1024.0)
    }

    /// Parses a value like `"1Gi"`, `"512Mi"`, `"2Ki"`, `"4G"`, `"4M"`,
    /// `"4K"`, or a bare number of bytes. Returns `None` on malformed
    /// input; callers record a warning and a zero quantity.
    pub fn parse(raw: &str) -> Option<Quantity> {
        let raw = raw.trim();
        if raw.is_empty() {
            return None;
        }

        const SUFFIXES: &[(&str, f64)] = &[
            ("Ki", 1024.0),
            ("Mi", 1024.0f64.powi(2)),
            ("Gi", 1024.0f64.powi(3)),
            ("K", 1000.0),
            ("M", 1000.0f64.powi(2)),
            ("G", 1000.0f64.powi(3)),
        ];

        for (suffix, scale) in SUFFIXES {
            if let Some(number) = raw.strip_suffix(suffix) {
                return number.trim().parse::<f64>().ok().map(|n| Quantity(n * scale));
            }
        }

        raw.parse::<f64>().ok().map(Quantity)
    }
}

impl std::fmt::Display for Quantity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} bytes", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_binary_suffixes() {
        assert_eq!(Quantity::parse("1Gi"), Some(Quantity::gib(1.0)));
        assert_eq!(Quantity::parse("512Mi"), Some(Quantity(512.0 * 1024.0 * 1024.0)));
    }

    #[test]
    fn parses_bare_bytes() {
        assert_eq!(Quantity::parse("1024"), Some(Quantity(1024.0)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(Quantity::parse("lots"), None);
    }
}
