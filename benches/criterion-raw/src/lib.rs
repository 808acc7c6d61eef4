use std::{cmp::Ordering, fmt, str::FromStr, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};


static LABEL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(?P<threads>[^,]+?)\s*,\s*(?P<files>\d+)\s*files\s*$").unwrap()
});

/// Legend key of a configuration. Kept as text, ordered numerically when possible.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThreadCount(pub String);

impl ThreadCount {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Ord for ThreadCount {
    fn cmp(&self, other: &Self) -> Ordering {
        // numeric counts first, then anything else lexically
        match (self.0.parse::<u64>(), other.0.parse::<u64>()) {
            (Ok(a), Ok(b)) => a.cmp(&b).then_with(|| self.0.cmp(&other.0)),
            (Ok(_), Err(_)) => Ordering::Less,
            (Err(_), Ok(_)) => Ordering::Greater,
            (Err(_), Err(_)) => self.0.cmp(&other.0),
        }
    }
}

impl PartialOrd for ThreadCount {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for ThreadCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity of one benchmark configuration, parsed from criterion's
/// `value` column, ie. `"4, 16 files"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConfigurationLabel {
    pub thread_count: ThreadCount,
    pub batch_size: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelParseError(pub String);

impl fmt::Display for LabelParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Unsupported configuration label {:?}", self.0)
    }
}

impl std::error::Error for LabelParseError {}

impl ConfigurationLabel {
    pub fn new(thread_count: impl Into<String>, batch_size: u64) -> Self {
        Self {
            thread_count: ThreadCount(thread_count.into()),
            batch_size,
        }
    }
}

impl FromStr for ConfigurationLabel {
    type Err = LabelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = LABEL_RE
            .captures(s)
            .ok_or_else(|| LabelParseError(s.to_owned()))?;
        let batch_size = caps["files"]
            .parse::<u64>()
            .map_err(|_| LabelParseError(s.to_owned()))?;
        Ok(Self::new(&caps["threads"], batch_size))
    }
}

impl fmt::Display for ConfigurationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {} files", self.thread_count, self.batch_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_thread_and_batch() {
        assert_eq!(
            "4, 16 files".parse::<ConfigurationLabel>().unwrap(),
            ConfigurationLabel::new("4", 16)
        );
        assert_eq!(
            "1, 128 files".parse::<ConfigurationLabel>().unwrap(),
            ConfigurationLabel::new("1", 128)
        );
    }

    #[test]
    fn display_parses_back() {
        let label = ConfigurationLabel::new("8", 64);
        assert_eq!(label.to_string(), "8, 64 files");
        assert_eq!(label.to_string().parse::<ConfigurationLabel>().unwrap(), label);
    }

    #[test]
    fn rejects_malformed_labels() {
        for bad in ["4 16 files", "4, 16", "4, x files", ", 16 files", "4, 16 files extra"] {
            assert!(bad.parse::<ConfigurationLabel>().is_err(), "{bad}");
        }
    }

    #[test]
    fn thread_counts_sort_numerically() {
        let mut counts = ["16", "2", "1", "auto"].map(|x| ThreadCount(x.to_owned()));
        counts.sort();
        let sorted = counts.iter().map(ThreadCount::as_str).collect::<Vec<_>>();
        assert_eq!(sorted, ["1", "2", "16", "auto"]);
    }
}
