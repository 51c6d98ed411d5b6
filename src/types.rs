/// Match count for one fetched URL
///
/// Recoverable fetch failures are reported as a zero count so that every
/// URL of a completed run has exactly one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlCount {
    pub url: String,
    pub count: usize,
}

impl UrlCount {
    pub fn new(url: impl Into<String>, count: usize) -> Self {
        Self {
            url: url.into(),
            count,
        }
    }
}

/// Outcome of a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Records in completion order
    pub results: Vec<UrlCount>,
    pub total: usize,
}

impl RunSummary {
    pub fn count_for(&self, url: &str) -> Option<usize> {
        self.results
            .iter()
            .find(|record| record.url == url)
            .map(|record| record.count)
    }
}
