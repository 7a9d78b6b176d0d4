//! Pipeline configuration.

use std::time::Duration;

/// One distance ring around the rider.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingConfig {
    /// Ring radius in miles.
    pub radius_miles: f64,

    /// Number of equal angular sectors candidates are bucketed into.
    pub sectors: usize,

    /// Maximum candidates kept per sector.
    pub per_sector: usize,
}

impl RingConfig {
    pub fn new(radius_miles: f64, sectors: usize, per_sector: usize) -> Self {
        Self {
            radius_miles,
            sectors,
            per_sector,
        }
    }

    /// Upper bound on candidates this ring can produce.
    pub fn max_candidates(&self) -> usize {
        self.sectors * self.per_sector
    }
}

/// Configuration for one ride-planning request.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Side of the square street-geometry query box, in miles.
    pub geometry_box_miles: f64,

    /// Rings in output order.
    pub rings: Vec<RingConfig>,

    /// Budget for the whole request, provider calls included.
    pub deadline: Duration,

    /// How long cached walking routes stay valid.
    pub walking_cache_ttl: Duration,

    /// How long cached driving routes stay valid. Traffic changes quickly.
    pub driving_cache_ttl: Duration,
}

impl PipelineConfig {
    pub fn with_rings(mut self, rings: Vec<RingConfig>) -> Self {
        self.rings = rings;
        self
    }

    pub fn with_geometry_box(mut self, miles: f64) -> Self {
        self.geometry_box_miles = miles;
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = deadline;
        self
    }

    pub fn with_walking_cache_ttl(mut self, ttl: Duration) -> Self {
        self.walking_cache_ttl = ttl;
        self
    }

    pub fn with_driving_cache_ttl(mut self, ttl: Duration) -> Self {
        self.driving_cache_ttl = ttl;
        self
    }

    /// Upper bound on candidates across all rings.
    pub fn max_candidates(&self) -> usize {
        self.rings.iter().map(RingConfig::max_candidates).sum()
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            geometry_box_miles: 1.0,
            rings: vec![
                RingConfig::new(0.1, 8, 1),
                RingConfig::new(0.25, 12, 1),
                RingConfig::new(0.5, 16, 1),
                RingConfig::new(0.75, 16, 1),
            ],
            deadline: Duration::from_secs(15),
            walking_cache_ttl: Duration::from_secs(3600),
            driving_cache_ttl: Duration::from_secs(300),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = PipelineConfig::default();

        assert_eq!(config.geometry_box_miles, 1.0);
        assert_eq!(config.rings.len(), 4);
        assert_eq!(config.rings[0], RingConfig::new(0.1, 8, 1));
        assert_eq!(config.rings[3].radius_miles, 0.75);
        assert_eq!(config.deadline, Duration::from_secs(15));
        assert_eq!(config.walking_cache_ttl, Duration::from_secs(3600));
        assert_eq!(config.driving_cache_ttl, Duration::from_secs(300));
    }

    #[test]
    fn default_rings_increase_in_radius() {
        let config = PipelineConfig::default();
        assert!(
            config
                .rings
                .windows(2)
                .all(|w| w[0].radius_miles < w[1].radius_miles)
        );
    }

    #[test]
    fn custom_config() {
        let config = PipelineConfig::default()
            .with_rings(vec![RingConfig::new(0.2, 4, 2)])
            .with_geometry_box(0.5)
            .with_deadline(Duration::from_secs(2))
            .with_walking_cache_ttl(Duration::from_secs(10))
            .with_driving_cache_ttl(Duration::from_secs(5));

        assert_eq!(config.rings, vec![RingConfig::new(0.2, 4, 2)]);
        assert_eq!(config.geometry_box_miles, 0.5);
        assert_eq!(config.deadline, Duration::from_secs(2));
        assert_eq!(config.walking_cache_ttl, Duration::from_secs(10));
        assert_eq!(config.driving_cache_ttl, Duration::from_secs(5));
    }

    #[test]
    fn candidate_bound() {
        assert_eq!(PipelineConfig::default().max_candidates(), 8 + 12 + 16 + 16);
        assert_eq!(RingConfig::new(0.3, 6, 2).max_candidates(), 12);
    }
}
