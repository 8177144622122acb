use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static SEMVER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)\.(\d+)\.(\d+)(?:-([0-9A-Za-z.-]+))?(?:\+([0-9A-Za-z.-]+))?$")
        .expect("semver pattern is valid")
});

static HASH_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"-([0-9a-f]{7,40})$").expect("hash pattern is valid"));

/// Structured view of a free-form version string.
///
/// Numeric components are only present when the whole string matched
/// `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]`. A missing component means
/// "unknown", never zero.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedVersion {
    pub major: Option<u64>,
    pub minor: Option<u64>,
    pub patch: Option<u64>,
    pub prerelease: Option<String>,
    pub build_meta: Option<String>,
    /// Trailing 7-40 lowercase hex characters after a hyphen, read as a commit reference.
    pub hash: Option<String>,
    /// Input with a single leading `v`/`V` removed.
    pub display: String,
    /// Input exactly as given.
    pub raw: String,
}

impl ParsedVersion {
    /// Parse a version string. Never fails; see [`parse_version`].
    pub fn parse(input: &str) -> Self {
        let display = strip_v_prefix(input);

        let mut parsed = ParsedVersion {
            display: display.to_string(),
            raw: input.to_string(),
            hash: HASH_SUFFIX
                .captures(input)
                .map(|caps| caps[1].to_string()),
            ..Default::default()
        };

        if let Some(caps) = SEMVER_PATTERN.captures(display) {
            // Digits that overflow u64 leave the record unparsed
            let numbers = (
                caps[1].parse::<u64>(),
                caps[2].parse::<u64>(),
                caps[3].parse::<u64>(),
            );
            if let (Ok(major), Ok(minor), Ok(patch)) = numbers {
                parsed.major = Some(major);
                parsed.minor = Some(minor);
                parsed.patch = Some(patch);
                parsed.prerelease = caps.get(4).map(|m| m.as_str().to_string());
                parsed.build_meta = caps.get(5).map(|m| m.as_str().to_string());
            }
        }

        parsed
    }

    /// Whether the numeric components were recognized.
    pub fn is_parsed(&self) -> bool {
        self.major.is_some()
    }

    /// Whether a prerelease tag was recognized.
    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }

    /// The `(major, minor, patch)` triple when all three are known.
    pub fn triple(&self) -> Option<(u64, u64, u64)> {
        Some((self.major?, self.minor?, self.patch?))
    }

    /// Strict SemVer 2.0 view of this version, if it is one.
    ///
    /// Stricter than the parser above: rejects leading zeros and empty
    /// dot-separated identifiers.
    pub fn to_semver(&self) -> Option<semver::Version> {
        if !self.is_parsed() {
            return None;
        }
        semver::Version::parse(&self.display).ok()
    }
}

impl fmt::Display for ParsedVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.triple() {
            Some((major, minor, patch)) => {
                write!(f, "{}.{}.{}", major, minor, patch)?;
                if let Some(pre) = &self.prerelease {
                    write!(f, "-{}", pre)?;
                }
                if let Some(build) = &self.build_meta {
                    write!(f, "+{}", build)?;
                }
                Ok(())
            }
            None => write!(f, "{}", self.display),
        }
    }
}

/// Parse a free-form version string into its components.
///
/// Strips one leading `v` or `V`, then matches the semantic pattern. The
/// commit hash is searched for in the original input whether or not the
/// pattern matched.
///
/// # Example
/// ```
/// use update_notifier::domain::parse_version;
///
/// let v = parse_version("v1.2.3-abc1234");
/// assert_eq!(v.major, Some(1));
/// assert_eq!(v.prerelease.as_deref(), Some("abc1234"));
/// assert_eq!(v.hash.as_deref(), Some("abc1234"));
///
/// assert_eq!(parse_version("1.2").major, None);
/// ```
pub fn parse_version(input: &str) -> ParsedVersion {
    ParsedVersion::parse(input)
}

fn strip_v_prefix(input: &str) -> &str {
    input
        .strip_prefix('v')
        .or_else(|| input.strip_prefix('V'))
        .unwrap_or(input)
}
