/// Pools shown by the dashboard unless `POOL_ALLOW_LIST` says otherwise.
pub const DEFAULT_POOL_ALLOW_LIST: [&str; 8] = [
    "747c1d2a-c668-4682-b9f9-296708a3dd90",
    "d4b3c522-6127-4b89-bedf-83641cdcd2eb",
    "aa70268e-4b52-42bf-a116-608b370f9501",
    "db678df9-3281-4bc2-a8bb-01160ffd6d48",
    "f981a304-bb6c-45b8-b0c5-fd2f515ad23a",
    "cefa9bb8-c230-459a-a855-3b94e96acd8c",
    "7e0661bf-8cf3-45e6-9424-31916d4c7b84",
    "e6435aae-cbe9-4d26-ab2c-a4d533db9972",
];

/// Ordered set of pool identifiers the API exposes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowList {
    ids: Vec<String>,
}

impl AllowList {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut unique: Vec<String> = Vec::new();
        for id in ids {
            let id = id.as_ref().trim();
            if !id.is_empty() && !unique.iter().any(|known| known == id) {
                unique.push(id.to_string());
            }
        }
        Self { ids: unique }
    }

    /// Parses a comma-separated list, blanks are ignored.
    pub fn parse(raw: &str) -> Self {
        Self::new(raw.split(','))
    }

    pub fn contains(&self, pool_id: &str) -> bool {
        self.ids.iter().any(|id| id == pool_id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl Default for AllowList {
    fn default() -> Self {
        Self::new(DEFAULT_POOL_ALLOW_LIST)
    }
}
