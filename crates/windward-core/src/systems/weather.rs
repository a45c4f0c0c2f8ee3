//! Weather system - drives the wind field from the calendar and RNG.

use rand::Rng;

use windward_logic::clock::CycleClock;
use windward_logic::constants::wind as wind_consts;
use windward_logic::wind::WindState;

/// Advance the wind field by one frame.
///
/// Storm pressure follows the calendar, cataclysm intensity can only
/// raise it further, and shifts retarget the heading on a randomized
/// interval. RNG is injected so headless runs can seed it.
pub fn weather_system<R: Rng>(
    wind: &mut WindState,
    clock: &CycleClock,
    rng: &mut R,
    sim_time: f64,
    dt: f32,
) {
    wind.set_storm_from_day(clock.cycle_day, clock.day_progress());
    wind.inject_cataclysm_intensity(clock.cataclysm_intensity);

    if wind.shift_due(sim_time) {
        let biased = rng.gen::<f32>() < wind_consts::BIASED_DRAW_CHANCE;
        let offset = if biased {
            rng.gen_range(-wind_consts::BIASED_SPREAD..=wind_consts::BIASED_SPREAD)
        } else {
            rng.gen_range(-std::f32::consts::PI..=std::f32::consts::PI)
        };
        let interval = rng.gen_range(wind_consts::SHIFT_MIN_SECS..=wind_consts::SHIFT_MAX_SECS);
        wind.retarget(biased, offset, interval, sim_time);
    }

    wind.drift(dt);
    wind.gust(dt);
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_strength_stays_in_band() {
        let mut wind = WindState::new();
        let mut clock = CycleClock::default();
        let mut rng = StdRng::seed_from_u64(7);

        // Push the calendar deep into the storm window
        for _ in 0..27 {
            clock.advance();
        }

        let mut time = 0.0f64;
        for _ in 0..10_000 {
            weather_system(&mut wind, &clock, &mut rng, time, 0.05);
            time += 0.05;
            let floor = wind_consts::BASE_STRENGTH * 0.3;
            let ceiling = wind_consts::MAX_STRENGTH * wind.storm_multiplier;
            assert!(wind.strength >= floor - 1e-3, "below floor: {}", wind.strength);
            assert!(wind.strength <= ceiling + 1e-3, "above ceiling: {}", wind.strength);
        }
    }

    #[test]
    fn test_shifts_eventually_retarget() {
        let mut wind = WindState::new();
        let clock = CycleClock::default();
        let mut rng = StdRng::seed_from_u64(42);

        let start_target = wind.target_angle;
        let mut time = 0.0f64;
        let mut saw_retarget = false;
        for _ in 0..20_000 {
            weather_system(&mut wind, &clock, &mut rng, time, 0.1);
            time += 0.1;
            if (wind.target_angle - start_target).abs() > 1e-6 {
                saw_retarget = true;
                break;
            }
        }
        assert!(saw_retarget, "no wind shift in 2000 simulated seconds");
    }
}
