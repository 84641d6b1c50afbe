//! Random selection of study days from a date window.

use std::io::Write;

use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::error::SampleError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleConfig {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub count: usize,
    pub seed: Option<u64>,
}

/// Every day from `from` to `to`, both included.
pub fn date_range(from: NaiveDate, to: NaiveDate) -> Vec<NaiveDate> {
    std::iter::successors(Some(from), |day| day.succ_opt())
        .take_while(|day| *day <= to)
        .collect()
}

/// Draws `count` distinct days from the window, returned in ascending order.
pub fn sample_days(config: &SampleConfig) -> Result<Vec<NaiveDate>, SampleError> {
    let days = date_range(config.from, config.to);
    if config.count > days.len() {
        return Err(SampleError::TooFewDays {
            requested: config.count,
            available: days.len(),
        });
    }

    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut sample: Vec<NaiveDate> = days
        .choose_multiple(&mut rng, config.count)
        .copied()
        .collect();
    sample.sort();
    Ok(sample)
}

/// One `YYYY-MM-DD` per line.
pub fn write_days<W: Write>(out: &mut W, days: &[NaiveDate]) -> std::io::Result<()> {
    for day in days {
        writeln!(out, "{}", day.format("%Y-%m-%d"))?;
    }
    Ok(())
}
