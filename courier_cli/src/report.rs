use std::iter;

use comfy_table::{Table, presets::UTF8_FULL};
use courier_fleet::{
    allocation::{FleetAllocation, VehicleTour},
    fleet_plan::FleetPlan,
    stop_id::StopId,
};
use courier_matrix_providers::{coordinate::Coordinate, travel_profile::TravelProfile};
use jiff::SignedDuration;
use serde::Serialize;

const GOOGLE_MAPS_DIRECTIONS_URL: &str = "https://www.google.com/maps/dir/";

/// Directions through `stops`, starting and ending at `depot`.
pub fn google_maps_link(depot: Coordinate, stops: &[Coordinate]) -> String {
    let waypoints = iter::once(&depot)
        .chain(stops)
        .chain(iter::once(&depot))
        .map(|coordinate| coordinate.to_string())
        .collect::<Vec<_>>()
        .join("/");

    format!("{GOOGLE_MAPS_DIRECTIONS_URL}{waypoints}")
}

#[derive(Serialize)]
pub struct AllocationReport {
    pub depot: Coordinate,
    pub classes: Vec<ClassReport>,
    pub unvisited: Vec<StopReport>,
    pub timed_out: bool,
}

#[derive(Serialize)]
pub struct ClassReport {
    pub class: String,
    pub profile: TravelProfile,
    pub skipped: bool,
    pub tours: Vec<TourReport>,
}

#[derive(Serialize)]
pub struct TourReport {
    pub vehicle: String,
    pub stops: Vec<StopReport>,
    pub travel_time: SignedDuration,
    pub duration: SignedDuration,
    /// Absent for vehicles that stay at the depot.
    pub link: Option<String>,
}

#[derive(Serialize)]
pub struct StopReport {
    pub id: StopId,
    pub coordinate: Coordinate,
}

impl AllocationReport {
    pub fn new(plan: &FleetPlan, allocation: &FleetAllocation, timed_out: bool) -> Self {
        let stop_report = |id: StopId| StopReport {
            id,
            coordinate: plan.stop(id),
        };

        let tour_report = |tour: &VehicleTour| {
            let coordinates: Vec<Coordinate> =
                tour.stops.iter().map(|&stop| plan.stop(stop)).collect();
            TourReport {
                vehicle: tour.vehicle.clone(),
                stops: tour.stops.iter().copied().map(stop_report).collect(),
                travel_time: tour.travel_time,
                duration: tour.duration,
                link: (!coordinates.is_empty()).then(|| google_maps_link(plan.depot, &coordinates)),
            }
        };

        AllocationReport {
            depot: plan.depot,
            classes: allocation
                .classes
                .iter()
                .map(|class| ClassReport {
                    class: class.class.clone(),
                    profile: class.profile,
                    skipped: class.skipped,
                    tours: class.tours.iter().map(tour_report).collect(),
                })
                .collect(),
            unvisited: allocation.unvisited.iter().copied().map(stop_report).collect(),
            timed_out,
        }
    }

    pub fn summary_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL).set_header(vec![
            "Class", "Profile", "Vehicle", "Stops", "Travel", "Duration",
        ]);

        for class in &self.classes {
            // Idle vehicles of a skipped class carry no information
            if class.skipped {
                table.add_row(vec![
                    class.class.clone(),
                    class.profile.to_string(),
                    String::from("skipped"),
                    String::from("-"),
                    String::from("-"),
                    String::from("-"),
                ]);
                continue;
            }

            for tour in &class.tours {
                table.add_row(vec![
                    class.class.clone(),
                    class.profile.to_string(),
                    tour.vehicle.clone(),
                    tour.stops.len().to_string(),
                    format!("{:#}", tour.travel_time),
                    format!("{:#}", tour.duration),
                ]);
            }
        }

        table
    }

    pub fn print(&self) {
        println!("{}", self.summary_table());

        for class in &self.classes {
            if class.skipped {
                println!("\n{}: skipped, no travel times", class.class);
                continue;
            }

            println!("\n{} routes:", class.class);
            for tour in &class.tours {
                match &tour.link {
                    Some(link) => println!("{}: {}", tour.vehicle, link),
                    None => println!("{}: no stops", tour.vehicle),
                }
            }
        }

        println!("\nUnvisited stops: {}", self.unvisited.len());
    }
}
