//! Keyword domain gate.
//!
//! A coarse substring filter, not a classifier: "powerful" passes because it
//! contains "power", and a question about "photovoltaics" fails. Both are
//! accepted behaviour.

/// Terms that mark a question as energy related.
pub const ENERGY_KEYWORDS: &[&str] = &[
    "energy",
    "power",
    "electricity",
    "solar",
    "wind",
    "hydro",
    "thermal",
    "nuclear",
    "renewable",
    "generation",
    "capacity",
    "transmission",
    "grid",
    "coal",
    "gas",
    "npp",
    "installed",
    "mw",
    "gwh",
    "kwh",
    "voltage",
    "transformer",
    "feeder",
    "consumption",
    "demand",
    "supply",
    "load",
    "frequency",
    "outage",
    "plant",
];

#[derive(Debug, Clone)]
pub struct DomainGate {
    keywords: Vec<String>,
}

impl DomainGate {
    /// Gate with the built-in keyword list.
    pub fn new() -> Self {
        Self {
            keywords: ENERGY_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }

    /// Built-in keywords plus `extra`. Blank entries are ignored; all
    /// keywords are stored lower-cased.
    pub fn with_keywords<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut gate = Self::new();
        for keyword in extra {
            let keyword = keyword.as_ref().trim().to_lowercase();
            if !keyword.is_empty() && !gate.keywords.contains(&keyword) {
                gate.keywords.push(keyword);
            }
        }
        gate
    }

    /// True iff the lower-cased query contains at least one keyword.
    pub fn is_in_domain(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.keywords.iter().any(|k| query.contains(k.as_str()))
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }
}

impl Default for DomainGate {
    fn default() -> Self {
        Self::new()
    }
}
