use jiff::SignedDuration;
use serde::Serialize;

use crate::{
    problem::{stop::StopIdx, tour_problem::DEPOT},
    solver::score::Score,
};

use super::working_solution::WorkingSolution;

/// A vehicle's final tour. Empty tours stay at the depot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tour {
    stops: Vec<StopIdx>,
    travel_time: SignedDuration,
    duration: SignedDuration,
}

fn secs_to_duration(secs: f64) -> SignedDuration {
    SignedDuration::try_from_secs_f64(secs).unwrap_or(SignedDuration::MAX)
}

impl Tour {
    pub fn empty() -> Self {
        Tour {
            stops: Vec::new(),
            travel_time: SignedDuration::ZERO,
            duration: SignedDuration::ZERO,
        }
    }

    pub fn stops(&self) -> &[StopIdx] {
        &self.stops
    }

    /// Matrix locations visited in order, starting and ending at the depot.
    pub fn path(&self) -> Vec<usize> {
        std::iter::once(DEPOT)
            .chain(self.stops.iter().map(|stop| stop.location_id()))
            .chain(std::iter::once(DEPOT))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn travel_time(&self) -> SignedDuration {
        self.travel_time
    }

    /// Travel time plus service time at every stop.
    pub fn duration(&self) -> SignedDuration {
        self.duration
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TourSolution {
    tours: Vec<Tour>,
    unserved: Vec<StopIdx>,
    score: Score,
}

impl TourSolution {
    pub fn from_working_solution(solution: &WorkingSolution, score: Score) -> Self {
        let problem = solution.problem();
        let tours = solution
            .routes()
            .iter()
            .map(|route| Tour {
                stops: route.stops().to_vec(),
                travel_time: secs_to_duration(route.travel_secs()),
                duration: secs_to_duration(route.working_secs(problem)),
            })
            .collect();

        TourSolution {
            tours,
            unserved: solution.sorted_unassigned_stops(),
            score,
        }
    }

    pub fn tours(&self) -> &[Tour] {
        &self.tours
    }

    pub fn into_tours(self) -> Vec<Tour> {
        self.tours
    }

    /// Stops no tour visits, in index order.
    pub fn unserved(&self) -> &[StopIdx] {
        &self.unserved
    }

    pub fn score(&self) -> Score {
        self.score
    }

    pub fn served(&self) -> Vec<StopIdx> {
        let mut served: Vec<StopIdx> = self
            .tours
            .iter()
            .flat_map(|tour| tour.stops().iter().copied())
            .collect();
        served.sort_unstable();
        served
    }

    pub fn served_count(&self) -> usize {
        self.tours.iter().map(|tour| tour.len()).sum()
    }
}
