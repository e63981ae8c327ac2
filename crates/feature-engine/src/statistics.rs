//! Summary statistics over pixel samples

/// Population statistics of one channel or distance map
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ChannelStats {
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation (divides by `count`)
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl ChannelStats {
    /// Summarize a sample; an empty sample yields all zeros
    pub fn of(samples: &[f64]) -> Self {
        let Some(&first) = samples.first() else {
            return Self::default();
        };

        let (sum, min, max) = samples
            .iter()
            .fold((0.0, first, first), |(sum, lo, hi), &v| (sum + v, lo.min(v), hi.max(v)));
        let count = samples.len();
        let mean = sum / count as f64;
        let variance = samples.iter().map(|&v| (v - mean).powi(2)).sum::<f64>() / count as f64;

        Self {
            count,
            mean,
            std_dev: variance.sqrt(),
            min,
            max,
        }
    }

    /// Mean of the strictly positive samples, `None` when there are none
    pub fn mean_positive(samples: &[f32]) -> Option<f64> {
        let (sum, count) = samples
            .iter()
            .filter(|&&v| v > 0.0)
            .fold((0.0f64, 0usize), |(sum, count), &v| (sum + v as f64, count + 1));

        (count > 0).then(|| sum / count as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary() {
        let stats = ChannelStats::of(&[3.0, 1.0, 5.0, 2.0, 4.0]);
        assert_eq!(stats.count, 5);
        assert!((stats.mean - 3.0).abs() < 1e-12);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 5.0);
    }

    #[test]
    fn test_population_std_dev() {
        // Textbook sample with population std dev exactly 2
        let stats = ChannelStats::of(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
        assert!((stats.std_dev - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_flat_channel() {
        assert_eq!(ChannelStats::of(&[128.0; 16]).std_dev, 0.0);
    }

    #[test]
    fn test_empty_sample() {
        assert_eq!(ChannelStats::of(&[]), ChannelStats::default());
    }

    #[test]
    fn test_mean_positive() {
        assert_eq!(ChannelStats::mean_positive(&[0.0, 2.0, 4.0, 0.0]), Some(3.0));
        assert_eq!(ChannelStats::mean_positive(&[0.0, 0.0]), None);
        assert_eq!(ChannelStats::mean_positive(&[]), None);
    }
}
