use anyhow::{Context, Result, bail, ensure};
use ladder_game::{
    LadderConfig, LadderDiagram, LadderError, LadderGenerator, LadderSession, PathResolver,
    RngBundle, Roster, ScriptedRolls, SetupError, code_from_entropy, decode_code, encode_code,
    generate, seed_from_entropy,
};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// A property check run once per seed, rail count and iteration.
pub type ScenarioCheck = fn(u64, usize) -> Result<()>;

#[derive(Debug, Clone, Copy)]
pub struct LadderScenario {
    pub name: &'static str,
    pub description: &'static str,
    pub check: ScenarioCheck,
}

const SCENARIOS: &[LadderScenario] = &[
    LadderScenario {
        name: "smoke",
        description: "Generate a ladder and confirm every rail reaches a distinct terminal",
        check: check_smoke,
    },
    LadderScenario {
        name: "bijection",
        description: "Resolved terminals form a permutation and its inverse agrees",
        check: check_bijection,
    },
    LadderScenario {
        name: "invariant",
        description: "Rung rows stay interior, counts stay in bounds, neighbouring gaps never share a row",
        check: check_invariant,
    },
    LadderScenario {
        name: "determinism",
        description: "Same seed and rail count produce the same ladder and paths",
        check: check_determinism,
    },
    LadderScenario {
        name: "descent",
        description: "Paths start at the top, only move down or sideways by one rail, and end at the bottom",
        check: check_descent,
    },
    LadderScenario {
        name: "boundary",
        description: "Zero rails, out-of-range starts, single rails and exhausted attempts",
        check: check_boundary,
    },
    LadderScenario {
        name: "share-code",
        description: "Session codes decode to their rail count and re-encode unchanged",
        check: check_share_code,
    },
    LadderScenario {
        name: "session",
        description: "A full round pairs every player with one outcome and its code rebuilds it",
        check: check_session,
    },
];

pub fn get_scenario(name: &str) -> Option<LadderScenario> {
    SCENARIOS
        .iter()
        .find(|scenario| scenario.name.eq_ignore_ascii_case(name))
        .copied()
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    SCENARIOS
        .iter()
        .map(|scenario| (scenario.name, scenario.description))
        .collect()
}

/// Every scenario except the quick smoke pass.
pub fn full_scenario_names() -> Vec<&'static str> {
    SCENARIOS
        .iter()
        .map(|scenario| scenario.name)
        .filter(|name| *name != "smoke")
        .collect()
}

/// The ladder a seed produces for `rail_count` rails, drawn from the same
/// stream a [`LadderSession`] uses.
pub fn ladder_for(seed: u64, rail_count: usize) -> Result<LadderDiagram> {
    let mut rng = RngBundle::from_user_seed(seed);
    generate(rail_count, rng.ladder())
        .with_context(|| format!("generating {rail_count} rails from seed {seed}"))
}

fn check_smoke(seed: u64, rail_count: usize) -> Result<()> {
    let diagram = ladder_for(seed, rail_count)?;
    let permutation = PathResolver::resolve_all(&diagram)?;
    ensure!(
        permutation.len() == rail_count,
        "expected {rail_count} terminals, got {}",
        permutation.len()
    );
    Ok(())
}

fn check_bijection(seed: u64, rail_count: usize) -> Result<()> {
    let diagram = ladder_for(seed, rail_count)?;
    let permutation = PathResolver::resolve_all(&diagram)?;
    let mut terminals = permutation.as_slice().to_vec();
    terminals.sort_unstable();
    ensure!(
        terminals.iter().copied().eq(0..rail_count),
        "terminals {:?} are not a permutation of 0..{rail_count}",
        permutation.as_slice()
    );
    for (start, terminal) in permutation.iter() {
        ensure!(
            permutation.start_for(terminal) == Some(start),
            "inverse disagrees at terminal {terminal}"
        );
    }
    Ok(())
}

fn check_invariant(seed: u64, rail_count: usize) -> Result<()> {
    let config = LadderConfig::default();
    let diagram = ladder_for(seed, rail_count)?;
    diagram
        .validate()
        .context("generated diagram failed validation")?;
    ensure!(diagram.rail_count() == rail_count, "rail count drifted");
    ensure!(diagram.steps() == config.steps, "steps drifted");
    ensure!(
        diagram.gap_count() == rail_count.saturating_sub(1),
        "gap count {} for {rail_count} rails",
        diagram.gap_count()
    );

    let mut previous: Vec<u8> = Vec::new();
    for gap in 0..diagram.gap_count() {
        let rows: Vec<u8> = diagram.rows_in_gap(gap).collect();
        let count = rows.len();
        ensure!(
            (usize::from(config.min_rungs)..=usize::from(config.max_rungs)).contains(&count),
            "gap {gap} holds {count} rungs"
        );
        for &row in &rows {
            ensure!(
                (1..=config.steps).contains(&row),
                "gap {gap} has a rung on boundary row {row}"
            );
            ensure!(
                !previous.contains(&row),
                "gaps {} and {gap} share row {row}",
                gap.saturating_sub(1)
            );
        }
        previous = rows;
    }
    Ok(())
}

fn check_determinism(seed: u64, rail_count: usize) -> Result<()> {
    let first = ladder_for(seed, rail_count)?;
    let second = ladder_for(seed, rail_count)?;
    ensure!(first == second, "seed {seed} produced two different ladders");
    ensure!(
        PathResolver::resolve_paths(&first)? == PathResolver::resolve_paths(&second)?,
        "paths differ between identical ladders"
    );
    Ok(())
}

fn check_descent(seed: u64, rail_count: usize) -> Result<()> {
    let diagram = ladder_for(seed, rail_count)?;
    for start in 0..rail_count {
        let path = PathResolver::resolve(&diagram, start)?;
        let waypoints = path.waypoints();
        let (Some(first), Some(last)) = (waypoints.first(), waypoints.last()) else {
            bail!("rail {start} produced an empty path");
        };
        ensure!(
            first.rail == start && first.row == 0,
            "rail {start} starts at {first:?}"
        );
        ensure!(
            last.row == diagram.bottom_row() && last.rail == path.terminal(),
            "rail {start} ends at {last:?}"
        );

        let mut sideways = 0;
        for pair in waypoints.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            if from.row == to.row {
                ensure!(
                    from.rail.abs_diff(to.rail) == 1,
                    "rail {start} jumps from {from:?} to {to:?}"
                );
                sideways += 1;
            } else {
                ensure!(
                    from.rail == to.rail && from.row < to.row,
                    "rail {start} moves from {from:?} to {to:?}"
                );
            }
        }
        ensure!(
            sideways == path.crossings(),
            "rail {start} counted {} crossings, walked {sideways}",
            path.crossings()
        );

        let normalized = path.normalized(&diagram);
        ensure!(
            normalized
                .iter()
                .all(|point| (0.0..=1.0).contains(&point.x) && (0.0..=1.0).contains(&point.y)),
            "rail {start} leaves the unit square"
        );
        ensure!(
            normalized.windows(2).all(|pair| pair[0].y <= pair[1].y),
            "rail {start} climbs in normalized space"
        );
    }
    Ok(())
}

fn check_boundary(seed: u64, rail_count: usize) -> Result<()> {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);
    match generate(0, &mut rng) {
        Err(LadderError::InvalidInput { rail_count: 0 }) => {}
        other => bail!("zero rails returned {other:?}"),
    }

    let diagram = ladder_for(seed, rail_count)?;
    match PathResolver::resolve(&diagram, rail_count) {
        Err(LadderError::OutOfRange { index, .. }) if index == rail_count => {}
        other => bail!("start {rail_count} returned {other:?}"),
    }

    if rail_count == 1 {
        ensure!(diagram.rungs().is_empty(), "single rail grew rungs");
        let path = PathResolver::resolve(&diagram, 0)?;
        ensure!(
            path.waypoints().len() == 2 && path.terminal() == 0,
            "single rail path {:?}",
            path.waypoints()
        );
    }

    if rail_count >= 3 {
        let generator = LadderGenerator::new(LadderConfig {
            max_generation_attempts: 2,
            ..LadderConfig::default()
        })?;
        let mut rolls = ScriptedRolls::new(vec![1]);
        match generator.generate(rail_count, &mut rolls) {
            Err(LadderError::GenerationFailed { attempts: 2 }) => {}
            other => bail!("unsatisfiable rolls returned {other:?}"),
        }
    }
    Ok(())
}

fn check_share_code(seed: u64, rail_count: usize) -> Result<()> {
    let code = code_from_entropy(rail_count, seed);
    let Some((rails, code_seed)) = decode_code(&code) else {
        bail!("code {code} did not decode");
    };
    ensure!(rails == rail_count, "code {code} decoded to {rails} rails");
    ensure!(
        encode_code(rails, code_seed) == code,
        "code {code} re-encoded as {}",
        encode_code(rails, code_seed)
    );
    ensure!(
        decode_code(&code.to_lowercase()) == Some((rails, code_seed)),
        "code {code} is case sensitive"
    );
    ensure!(
        ladder_for(code_seed, rails)? == ladder_for(code_seed, rails)?,
        "code {code} does not pin a ladder"
    );
    Ok(())
}

fn check_session(seed: u64, rail_count: usize) -> Result<()> {
    let config = LadderConfig::default();
    let roster = match Roster::numbered(rail_count, &config) {
        Ok(roster) => roster,
        Err(SetupError::PlayerCount { .. })
            if !(config.min_players..=config.max_players).contains(&rail_count) =>
        {
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    let winners = usize::try_from(seed % 3).unwrap_or(0).min(rail_count);
    let prizes: Vec<String> = (1..=winners).map(|n| format!("Prize {n}")).collect();
    let round_seed = seed_from_entropy(rail_count, seed);
    let mut round = LadderSession::new(config.clone(), roster, prizes, round_seed)?;

    for _ in 0..2 {
        let Some(code) = round.code() else {
            bail!("seed {} has no session code", round.seed());
        };
        let shared = LadderSession::from_code(config.clone(), &code, Vec::new())?;
        ensure!(
            shared.diagram() == round.diagram(),
            "code {code} rebuilt a different ladder"
        );
        ensure!(
            ladder_for(round.seed(), rail_count)? == *round.diagram(),
            "seed {} shows a different ladder than it plays",
            round.seed()
        );

        let results = round.results()?;
        ensure!(results.len() == rail_count, "{} pairings", results.len());
        let won = results.iter().filter(|pairing| pairing.outcome.is_winner).count();
        ensure!(won == winners, "{won} winners, expected {winners}");
        for (index, pairing) in results.iter().enumerate() {
            let reveal = round.reveal(index)?;
            ensure!(
                reveal.path.terminal() == pairing.terminal && reveal.outcome == pairing.outcome,
                "reveal for player {index} disagrees with results"
            );
        }
        round.replay()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_lookup_is_case_insensitive() {
        assert_eq!(get_scenario("Bijection").map(|s| s.name), Some("bijection"));
        assert!(get_scenario("missing").is_none());
        assert_eq!(list_scenarios().len(), SCENARIOS.len());
        assert!(!full_scenario_names().contains(&"smoke"));
    }

    #[test]
    fn every_scenario_passes_a_small_sweep() {
        for scenario in SCENARIOS {
            for rail_count in 1..=10 {
                for seed in 0..5 {
                    if let Err(err) = (scenario.check)(seed, rail_count) {
                        panic!("{} seed {seed} rails {rail_count}: {err:#}", scenario.name);
                    }
                }
            }
        }
    }

    #[test]
    fn ladder_for_matches_the_session_from_a_code() {
        for rail_count in 2..=10 {
            let code = code_from_entropy(rail_count, 0x5EED);
            let round =
                LadderSession::from_code(LadderConfig::default(), &code, Vec::new()).unwrap();
            assert_eq!(
                ladder_for(round.seed(), rail_count).unwrap(),
                *round.diagram(),
                "{code}"
            );
        }
    }

    #[test]
    fn ladder_for_reports_zero_rails() {
        let err = ladder_for(1, 0).unwrap_err();
        assert!(format!("{err:#}").contains("0 rails"));
    }
}
