use jiff::SignedDuration;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum InvalidMatrix {
    #[error("row {row} has {len} entries, expected {expected}")]
    NotSquare {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("entry ({from}, {to}) must be a non-negative number of seconds")]
    InvalidEntry { from: usize, to: usize },

    #[error("diagonal entry ({index}, {index}) must be zero")]
    NonZeroDiagonal { index: usize },

    #[error("matrix holds {len} entries, expected {expected}")]
    WrongLength { len: usize, expected: usize },
}

/// Square travel-time table for one profile, row major, in seconds.
///
/// Unreachable pairs hold `f64::INFINITY` and serialize as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawTravelTimeMatrix")]
pub struct TravelTimeMatrix {
    num_locations: usize,
    #[serde(with = "unreachable_as_null")]
    times: Vec<f64>,
}

#[derive(Deserialize)]
struct RawTravelTimeMatrix {
    num_locations: usize,
    #[serde(with = "unreachable_as_null")]
    times: Vec<f64>,
}

impl TryFrom<RawTravelTimeMatrix> for TravelTimeMatrix {
    type Error = InvalidMatrix;

    fn try_from(raw: RawTravelTimeMatrix) -> Result<Self, Self::Error> {
        let expected = raw.num_locations.checked_mul(raw.num_locations);
        if expected != Some(raw.times.len()) {
            return Err(InvalidMatrix::WrongLength {
                len: raw.times.len(),
                expected: expected.unwrap_or(usize::MAX),
            });
        }

        for (index, &secs) in raw.times.iter().enumerate() {
            check_entry(index / raw.num_locations, index % raw.num_locations, secs)?;
        }

        Ok(TravelTimeMatrix {
            num_locations: raw.num_locations,
            times: raw.times,
        })
    }
}

fn check_entry(from: usize, to: usize, secs: f64) -> Result<(), InvalidMatrix> {
    if secs.is_nan() || secs < 0.0 {
        return Err(InvalidMatrix::InvalidEntry { from, to });
    }
    if from == to && secs != 0.0 {
        return Err(InvalidMatrix::NonZeroDiagonal { index: from });
    }
    Ok(())
}

impl TravelTimeMatrix {
    pub(crate) fn from_flat(num_locations: usize, times: Vec<f64>) -> Self {
        debug_assert_eq!(times.len(), num_locations * num_locations);
        TravelTimeMatrix {
            num_locations,
            times,
        }
    }

    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self, InvalidMatrix> {
        let num_locations = rows.len();
        let mut times = Vec::with_capacity(num_locations * num_locations);

        for (from, row) in rows.into_iter().enumerate() {
            if row.len() != num_locations {
                return Err(InvalidMatrix::NotSquare {
                    row: from,
                    len: row.len(),
                    expected: num_locations,
                });
            }

            for (to, secs) in row.into_iter().enumerate() {
                check_entry(from, to, secs)?;
                times.push(secs);
            }
        }

        Ok(TravelTimeMatrix {
            num_locations,
            times,
        })
    }

    #[inline(always)]
    fn index(&self, from: usize, to: usize) -> usize {
        from * self.num_locations + to
    }

    pub fn num_locations(&self) -> usize {
        self.num_locations
    }

    #[inline(always)]
    pub fn travel_secs(&self, from: usize, to: usize) -> f64 {
        self.times[self.index(from, to)]
    }

    pub fn travel_time(&self, from: usize, to: usize) -> Option<SignedDuration> {
        let secs = self.travel_secs(from, to);
        if secs.is_finite() {
            SignedDuration::try_from_secs_f64(secs).ok()
        } else {
            None
        }
    }

    pub fn is_reachable(&self, from: usize, to: usize) -> bool {
        self.travel_secs(from, to).is_finite()
    }

    pub fn is_symmetric(&self) -> bool {
        (0..self.num_locations).all(|from| {
            (from + 1..self.num_locations)
                .all(|to| self.travel_secs(from, to) == self.travel_secs(to, from))
        })
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        self.times.chunks(self.num_locations.max(1))
    }
}

mod unreachable_as_null {
    use serde::{Deserialize, Deserializer, Serializer, ser::SerializeSeq};

    pub fn serialize<S: Serializer>(times: &[f64], serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(times.len()))?;
        for secs in times {
            if secs.is_finite() {
                seq.serialize_element(&Some(*secs))?;
            } else {
                seq.serialize_element(&None::<f64>)?;
            }
        }
        seq.end()
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
        let times: Vec<Option<f64>> = Vec::deserialize(deserializer)?;
        Ok(times
            .into_iter()
            .map(|secs| secs.unwrap_or(f64::INFINITY))
            .collect())
    }
}
