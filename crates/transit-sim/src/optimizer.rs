//! Simulated route optimization.
//!
//! There is no traffic model behind this. Interior vertices get a small
//! random nudge and the time saving and traffic score are drawn from fixed
//! bands, so a dashboard has something plausible to show.

use rand::Rng;

use transit_core::constants::*;
use transit_core::model::Route;
use transit_core::state::RouteOptimization;
use transit_core::Coordinate;

pub fn optimize_route<R: Rng>(route: &Route, rng: &mut R) -> RouteOptimization {
    let original: Vec<Coordinate> = route.coordinates.vertices().to_vec();
    let mut optimized = original.clone();

    // Endpoints stay put.
    let last = optimized.len().saturating_sub(1);
    for coord in optimized.iter_mut().take(last).skip(1) {
        coord.x += rng.gen_range(-OPTIMIZE_JITTER_DEG..=OPTIMIZE_JITTER_DEG);
        coord.y += rng.gen_range(-OPTIMIZE_JITTER_DEG..=OPTIMIZE_JITTER_DEG);
    }

    let factor = rng.gen_range(OPTIMIZE_TIME_FACTOR_MIN..OPTIMIZE_TIME_FACTOR_MAX);
    let optimized_time = (f64::from(route.estimated_time) * factor).floor() as u32;

    RouteOptimization {
        route_id: route.id.clone(),
        original_coordinates: original,
        optimized_coordinates: optimized,
        time_saved: route.estimated_time.saturating_sub(optimized_time),
        traffic_score: rng.gen_range(TRAFFIC_SCORE_MIN..TRAFFIC_SCORE_MAX),
        optimization_applied: true,
    }
}
