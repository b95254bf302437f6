use colored::Colorize;
use log::debug;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

use crate::scenario::{Engine, InvariantScenario};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario_name: String,
    pub seed: u64,
    pub passed: bool,
    pub iterations_run: usize,
    pub successful_iterations: usize,
    pub failures: Vec<String>,
    #[serde(with = "duration_serde")]
    pub average_duration: Duration,
    #[serde(with = "duration_vec_serde")]
    pub performance_data: Vec<Duration>,
}

pub struct LogicTester<'a> {
    engine: &'a Engine,
    verbose: bool,
}

impl<'a> LogicTester<'a> {
    pub const fn new(engine: &'a Engine, verbose: bool) -> Self {
        Self { engine, verbose }
    }

    pub fn run_scenario(
        &self,
        scenario: &InvariantScenario,
        seeds: &[u64],
        iterations: usize,
    ) -> Vec<ScenarioResult> {
        let mut results = Vec::new();

        for &seed in seeds {
            if self.verbose {
                println!(
                    "🧪 Testing scenario: {} (seed: {})",
                    scenario.name().bright_white(),
                    seed
                );
            }
            results.push(self.run_single_scenario(scenario, seed, iterations));
        }

        results
    }

    fn run_single_scenario(
        &self,
        scenario: &InvariantScenario,
        seed: u64,
        iterations: usize,
    ) -> ScenarioResult {
        let mut successes = 0;
        let mut failures = Vec::new();
        let mut performance_data = Vec::new();

        for i in 0..iterations {
            let attempt = i + 1;
            let start_time = Instant::now();
            let iteration_seed = seed.wrapping_add(u64::try_from(i).unwrap_or(u64::MAX));
            let mut rng = ChaCha20Rng::seed_from_u64(iteration_seed);

            match scenario.run(self.engine, &mut rng) {
                Ok(()) => {
                    successes += 1;
                    let duration = start_time.elapsed();
                    performance_data.push(duration);
                    let key = scenario.key();
                    debug!("{key} iteration {attempt} passed in {duration:?}");
                    if self.verbose {
                        println!("  ✅ Iteration {attempt} passed ({duration:?})");
                    }
                }
                Err(err) => {
                    let message = format!("Iteration {attempt} (seed {iteration_seed}): {err:#}");
                    if self.verbose {
                        let shown = message.clone().red();
                        println!("  ❌ Iteration {attempt} failed: {shown}");
                    }
                    failures.push(message);
                }
            }
        }

        let average_duration = if performance_data.is_empty() {
            Duration::ZERO
        } else {
            performance_data.iter().sum::<Duration>()
                / u32::try_from(performance_data.len()).unwrap_or(1)
        };

        ScenarioResult {
            scenario_name: scenario.name().to_string(),
            seed,
            passed: failures.is_empty(),
            iterations_run: iterations,
            successful_iterations: successes,
            failures,
            average_duration,
            performance_data,
        }
    }
}

mod duration_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        duration.as_micros().serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let micros = u128::deserialize(deserializer)?;
        Ok(Duration::from_micros(u64::try_from(micros).unwrap_or(0)))
    }
}

mod duration_vec_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(durations: &[Duration], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let micros: Vec<u128> = durations.iter().map(Duration::as_micros).collect();
        micros.serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let micros = Vec::<u128>::deserialize(deserializer)?;
        Ok(micros
            .into_iter()
            .map(|m| Duration::from_micros(u64::try_from(m).unwrap_or(0)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::find_scenario;
    use anyhow::bail;
    use tactics_game::StaticCatalogLoader;

    fn engine() -> Engine {
        Engine::new(StaticCatalogLoader).unwrap()
    }

    fn always_fails(_engine: &Engine, _rng: &mut ChaCha20Rng) -> anyhow::Result<()> {
        bail!("boom")
    }

    #[test]
    fn passing_scenario_reports_every_iteration() {
        let engine = engine();
        let tester = LogicTester::new(&engine, false);
        let scenario = find_scenario("budget-reduction").unwrap();
        let results = tester.run_scenario(&scenario, &[1, 2], 5);
        assert_eq!(results.len(), 2);
        for result in &results {
            assert!(result.passed, "{:?}", result.failures);
            assert_eq!(result.successful_iterations, 5);
            assert_eq!(result.performance_data.len(), 5);
        }
    }

    #[test]
    fn failures_carry_iteration_seed() {
        let engine = engine();
        let tester = LogicTester::new(&engine, false);
        let scenario = InvariantScenario::new("fail", "Always Fails", "", always_fails);
        let results = tester.run_scenario(&scenario, &[40], 2);
        let result = &results[0];
        assert!(!result.passed);
        assert_eq!(result.successful_iterations, 0);
        assert_eq!(result.average_duration, Duration::ZERO);
        assert_eq!(result.failures[1], "Iteration 2 (seed 41): boom");
    }

    #[test]
    fn durations_serialize_as_micros() {
        let result = ScenarioResult {
            scenario_name: "Smoke".to_string(),
            seed: 1,
            passed: true,
            iterations_run: 1,
            successful_iterations: 1,
            failures: Vec::new(),
            average_duration: Duration::from_millis(3),
            performance_data: vec![Duration::from_micros(1500)],
        };
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["average_duration"], 3000);
        assert_eq!(value["performance_data"][0], 1500);
        let back: ScenarioResult = serde_json::from_value(value).unwrap();
        assert_eq!(back.performance_data, result.performance_data);
    }
}
