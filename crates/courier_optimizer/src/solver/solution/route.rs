use crate::problem::{
    stop::StopIdx,
    tour_problem::{DEPOT, TourProblem},
};

/// One vehicle's stop sequence. The depot is implicit at both ends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkingSolutionRoute {
    stops: Vec<StopIdx>,
    travel_secs: f64,
}

/// Travel time of depot -> `stops`... -> depot.
pub fn compute_travel_secs<I>(problem: &TourProblem, stops: I) -> f64
where
    I: IntoIterator<Item = StopIdx>,
{
    let mut previous = DEPOT;
    let mut travel_secs = 0.0;
    for stop in stops {
        travel_secs += problem.travel_secs(previous, stop.location_id());
        previous = stop.location_id();
    }

    if previous != DEPOT {
        travel_secs += problem.travel_secs(previous, DEPOT);
    }

    travel_secs
}

impl WorkingSolutionRoute {
    pub fn empty() -> Self {
        WorkingSolutionRoute::default()
    }

    pub fn from_stops(problem: &TourProblem, stops: Vec<StopIdx>) -> Self {
        let travel_secs = compute_travel_secs(problem, stops.iter().copied());
        WorkingSolutionRoute { stops, travel_secs }
    }

    pub fn stops(&self) -> &[StopIdx] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    pub fn contains(&self, stop: StopIdx) -> bool {
        self.stops.contains(&stop)
    }

    pub fn position_of(&self, stop: StopIdx) -> Option<usize> {
        self.stops.iter().position(|&candidate| candidate == stop)
    }

    pub fn travel_secs(&self) -> f64 {
        self.travel_secs
    }

    pub fn working_secs(&self, problem: &TourProblem) -> f64 {
        problem.working_secs(self.travel_secs, self.stops.len())
    }

    pub fn location_id(&self, position: usize) -> usize {
        self.stops[position].location_id()
    }

    /// Location visited right before `position`, the depot for the first stop.
    pub fn previous_location_id(&self, position: usize) -> usize {
        if position == 0 {
            DEPOT
        } else {
            self.stops[position - 1].location_id()
        }
    }

    /// Location visited right after `position`, the depot for the last stop.
    pub fn next_location_id(&self, position: usize) -> usize {
        self.stops
            .get(position + 1)
            .map_or(DEPOT, |stop| stop.location_id())
    }

    /// Extra travel time when `stop` is inserted before the stop currently at `position`.
    pub fn insertion_travel_delta(&self, problem: &TourProblem, stop: StopIdx, position: usize) -> f64 {
        let previous = self.previous_location_id(position);
        let next = self
            .stops
            .get(position)
            .map_or(DEPOT, |stop| stop.location_id());

        problem.travel_secs(previous, stop.location_id())
            + problem.travel_secs(stop.location_id(), next)
            - problem.travel_secs(previous, next)
    }

    /// Travel time of the route once the stop at `position` is removed.
    pub fn travel_secs_without(&self, problem: &TourProblem, position: usize) -> f64 {
        compute_travel_secs(
            problem,
            self.stops
                .iter()
                .enumerate()
                .filter(|&(index, _)| index != position)
                .map(|(_, &stop)| stop),
        )
    }

    pub fn insert(&mut self, problem: &TourProblem, stop: StopIdx, position: usize) {
        self.stops.insert(position, stop);
        self.update(problem);
    }

    pub fn remove(&mut self, problem: &TourProblem, position: usize) -> StopIdx {
        let stop = self.stops.remove(position);
        self.update(problem);
        stop
    }

    pub fn replace_stops(&mut self, problem: &TourProblem, stops: Vec<StopIdx>) {
        self.stops = stops;
        self.update(problem);
    }

    pub fn clear(&mut self) -> Vec<StopIdx> {
        self.travel_secs = 0.0;
        std::mem::take(&mut self.stops)
    }

    fn update(&mut self, problem: &TourProblem) {
        self.travel_secs = compute_travel_secs(problem, self.stops.iter().copied());
    }
}
