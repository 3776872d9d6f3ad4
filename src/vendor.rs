/// Rendering engine family, used to pick a vendor-prefixed property name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vendor {
    Webkit,
    Firefox,
    Ie,
    Opera,
}

impl Vendor {
    /// Guess the engine from a user-agent string.
    ///
    /// Checks run in order and are case-insensitive, so Chromium-based Opera
    /// and Edge report as [`Vendor::Webkit`]. Unknown agents yield `None`.
    pub fn detect(user_agent: &str) -> Option<Self> {
        let ua = user_agent.to_ascii_lowercase();

        if ua.contains("chrome") || ua.contains("safari") {
            Some(Vendor::Webkit)
        } else if ua.contains("firefox") {
            Some(Vendor::Firefox)
        } else if ua.contains("msie") || ua.contains("trident/") {
            Some(Vendor::Ie)
        } else if ua.contains("opera") {
            Some(Vendor::Opera)
        } else {
            None
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Vendor::Webkit => "webkit",
            Vendor::Firefox => "firefox",
            Vendor::Ie => "ie",
            Vendor::Opera => "opera",
        }
    }

    /// CSS prefix for this engine, e.g. `-webkit-`.
    pub fn prefix(self) -> &'static str {
        match self {
            Vendor::Webkit => "-webkit-",
            Vendor::Firefox => "-moz-",
            Vendor::Ie => "-ms-",
            Vendor::Opera => "-o-",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_common_agents() {
        let chrome = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";
        let firefox = "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0";
        let ie11 = "Mozilla/5.0 (Windows NT 10.0; Trident/7.0; rv:11.0) like Gecko";
        let ie10 = "Mozilla/5.0 (compatible; MSIE 10.0; Windows NT 6.1)";
        let presto = "Opera/9.80 (Windows NT 6.1) Presto/2.12.388 Version/12.16";

        assert_eq!(Vendor::detect(chrome), Some(Vendor::Webkit));
        assert_eq!(Vendor::detect(firefox), Some(Vendor::Firefox));
        assert_eq!(Vendor::detect(ie11), Some(Vendor::Ie));
        assert_eq!(Vendor::detect(ie10), Some(Vendor::Ie));
        assert_eq!(Vendor::detect(presto), Some(Vendor::Opera));
    }

    #[test]
    fn unknown_agent_has_no_prefix() {
        assert_eq!(Vendor::detect("curl/8.4.0"), None);
        assert_eq!(Vendor::detect(""), None);
    }

    #[test]
    fn prefixes() {
        assert_eq!(Vendor::Webkit.prefix(), "-webkit-");
        assert_eq!(Vendor::Firefox.prefix(), "-moz-");
        assert_eq!(Vendor::Ie.prefix(), "-ms-");
        assert_eq!(Vendor::Opera.prefix(), "-o-");
    }
}
