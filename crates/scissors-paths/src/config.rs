/// Which pixels count as adjacent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Connectivity {
    /// Up, right, down, left.
    Four,
    /// Cardinal plus diagonal neighbours.
    #[default]
    Eight,
}

/// Tuning knobs for a [`ShortestPathEngine`](crate::ShortestPathEngine).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    /// Graph adjacency used when relaxing neighbours.
    pub connectivity: Connectivity,
    /// Number of steps between publications of progress to other threads.
    /// `run`/`run_for` also publish when they return. Values below 1 are
    /// treated as 1.
    pub publish_interval: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            connectivity: Connectivity::Eight,
            publish_interval: 1024,
        }
    }
}

impl SearchConfig {
    /// Set the adjacency (builder).
    pub const fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Set the publication interval (builder).
    pub const fn with_publish_interval(mut self, steps: usize) -> Self {
        self.publish_interval = steps;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder() {
        let c = SearchConfig::default()
            .with_connectivity(Connectivity::Four)
            .with_publish_interval(1);
        assert_eq!(c.connectivity, Connectivity::Four);
        assert_eq!(c.publish_interval, 1);
        assert_eq!(SearchConfig::default().connectivity, Connectivity::Eight);
    }
}
