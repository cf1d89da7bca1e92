// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Delta-encoded track dataset.
//!
//! Each track is a list of segments whose endpoints are stored as deltas.
//! Both endpoints of the first segment are offsets from `(start, min_time)`,
//! and every following endpoint is an offset from the same endpoint of the
//! previous segment. Speeds are stored relative to `min_speed`, one per
//! segment across all tracks in order.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, ensure};
use serde::{Deserialize, Serialize};
use understory_surface::{ColorRamp, Domain, Segment};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub(crate) struct Dataset {
    all_speeds: Vec<f64>,
    all_x1: Vec<Vec<f64>>,
    all_x2: Vec<Vec<f64>>,
    all_y1: Vec<Vec<f64>>,
    all_y2: Vec<Vec<f64>>,
    min_speed: f64,
    max_speed: f64,
    min_time: f64,
    max_time: f64,
    start: f64,
    end: f64,
}

impl Dataset {
    pub(crate) fn load(path: &Path) -> anyhow::Result<Self> {
        let file =
            File::open(path).with_context(|| format!("opening dataset {}", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("parsing dataset {}", path.display()))
    }

    /// Deterministic synthetic dataset of `tracks` tracks with `per_track`
    /// segments each.
    pub(crate) fn synthetic(tracks: usize, per_track: usize, seed: u64) -> Self {
        let mut rng = Rng(seed.max(1));
        let mut data = Self {
            min_speed: 0.0,
            max_speed: 30.0,
            min_time: 0.0,
            max_time: 3_600.0,
            start: 0.0,
            end: 10_000.0,
            ..Self::default()
        };
        for _ in 0..tracks {
            let mut x1 = Vec::with_capacity(per_track);
            let mut x2 = Vec::with_capacity(per_track);
            let mut y1 = Vec::with_capacity(per_track);
            let mut y2 = Vec::with_capacity(per_track);
            let origin_x = rng.next_f64() * data.end * 0.5;
            let origin_y = rng.next_f64() * data.max_time * 0.5;
            for j in 0..per_track {
                let (dx, dy) = if j == 0 {
                    (origin_x, origin_y)
                } else {
                    (rng.next_f64() * 20.0, rng.next_f64() * 5.0)
                };
                let len = 5.0 + rng.next_f64() * 15.0;
                x1.push(dx);
                y1.push(dy);
                x2.push(if j == 0 { dx + len } else { dx });
                y2.push(if j == 0 { dy + len * 0.25 } else { dy });
                data.all_speeds.push(rng.next_f64() * data.max_speed);
            }
            data.all_x1.push(x1);
            data.all_x2.push(x2);
            data.all_y1.push(y1);
            data.all_y2.push(y2);
        }
        data
    }

    /// Total number of encoded segments.
    pub(crate) fn segment_count(&self) -> usize {
        self.all_x1.iter().map(Vec::len).sum()
    }

    /// Decodes every track into domain-space segments.
    pub(crate) fn segments(&self) -> anyhow::Result<Vec<Segment>> {
        let tracks = self.all_x1.len();
        ensure!(
            self.all_x2.len() == tracks && self.all_y1.len() == tracks && self.all_y2.len() == tracks,
            "coordinate arrays disagree on the number of tracks"
        );
        let total = self.segment_count();
        ensure!(
            self.all_speeds.len() == total,
            "expected {total} speeds, found {}",
            self.all_speeds.len()
        );

        let mut out = Vec::with_capacity(total);
        let mut speeds = self.all_speeds.iter();
        for (i, x1s) in self.all_x1.iter().enumerate() {
            let (x2s, y1s, y2s) = (&self.all_x2[i], &self.all_y1[i], &self.all_y2[i]);
            ensure!(
                x2s.len() == x1s.len() && y1s.len() == x1s.len() && y2s.len() == x1s.len(),
                "track {i} has coordinate arrays of different lengths"
            );
            let (mut x1, mut x2) = (self.start, self.start);
            let (mut y1, mut y2) = (self.min_time, self.min_time);
            for j in 0..x1s.len() {
                x1 += x1s[j];
                y1 += y1s[j];
                x2 += x2s[j];
                y2 += y2s[j];
                let speed = speeds.next().copied().unwrap_or_default();
                out.push(Segment::new((x1, y1), (x2, y2), self.min_speed + speed));
            }
        }
        Ok(out)
    }

    /// Data domain: distance along X, time along Y.
    pub(crate) fn domain(&self) -> Domain {
        Domain {
            x: self.start..self.end,
            y: self.min_time..self.max_time,
        }
    }

    /// Color ramp spanning the speed range.
    pub(crate) fn color_ramp(&self) -> ColorRamp {
        ColorRamp::new(self.min_speed, self.max_speed)
    }
}

/// xorshift64*, enough for reproducible synthetic data.
struct Rng(u64);

impl Rng {
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.0 = x;
        x.wrapping_mul(0x2545_F491_4F6C_DD1D)
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1_u64 << 53) as f64
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::Dataset;

    const SMALL: &str = r#"{
        "all_speeds": [1.0, 2.0, 3.0],
        "all_x1": [[1.0, 2.0], [10.0]],
        "all_x2": [[3.0, 1.0], [11.0]],
        "all_y1": [[0.5, 0.5], [0.0]],
        "all_y2": [[0.5, 1.0], [4.0]],
        "min_speed": 10.0,
        "max_speed": 20.0,
        "min_time": 100.0,
        "max_time": 200.0,
        "start": 50.0,
        "end": 80.0
    }"#;

    #[test]
    fn decodes_accumulated_deltas() {
        let data: Dataset = serde_json::from_str(SMALL).unwrap();
        let segs = data.segments().unwrap();
        assert_eq!(segs.len(), 3);

        assert_eq!(segs[0].p1, Point::new(51.0, 100.5));
        assert_eq!(segs[0].p2, Point::new(53.0, 100.5));
        assert_eq!(segs[0].value, 11.0);

        // Second segment accumulates on top of the first.
        assert_eq!(segs[1].p1, Point::new(53.0, 101.0));
        assert_eq!(segs[1].p2, Point::new(54.0, 101.5));

        // A new track restarts from (start, min_time).
        assert_eq!(segs[2].p1, Point::new(60.0, 100.0));
        assert_eq!(segs[2].p2, Point::new(61.0, 104.0));
        assert_eq!(segs[2].value, 13.0);

        assert_eq!(data.domain().x, 50.0..80.0);
        assert_eq!(data.color_ramp().domain(), (10.0, 20.0));
    }

    #[test]
    fn mismatched_shapes_are_rejected() {
        let mut data: Dataset = serde_json::from_str(SMALL).unwrap();
        data.all_speeds.pop();
        assert!(data.segments().is_err());

        let mut data: Dataset = serde_json::from_str(SMALL).unwrap();
        data.all_y2[0].pop();
        assert!(data.segments().is_err());

        let mut data: Dataset = serde_json::from_str(SMALL).unwrap();
        data.all_x2.pop();
        assert!(data.segments().is_err());
    }

    #[test]
    fn synthetic_is_reproducible() {
        let a = Dataset::synthetic(4, 25, 7);
        let b = Dataset::synthetic(4, 25, 7);
        assert_eq!(a, b);
        assert_eq!(a.segment_count(), 100);
        let segs = a.segments().unwrap();
        assert_eq!(segs.len(), 100);
        assert!(segs.iter().all(|s| s.value >= 0.0 && s.value <= 30.0));
    }
}
