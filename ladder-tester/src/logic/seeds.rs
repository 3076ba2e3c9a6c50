use anyhow::{Result, bail};
use ladder_game::decode_code;
use std::collections::HashSet;

/// Seed metadata resolved from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedInfo {
    pub seed: u64,
    pub code: Option<String>,
    /// Rail count pinned by a session code.
    pub rails: Option<usize>,
}

impl SeedInfo {
    #[must_use]
    pub const fn from_numeric(seed: u64) -> Self {
        Self {
            seed,
            code: None,
            rails: None,
        }
    }

    #[must_use]
    pub const fn from_code(seed: u64, rails: usize, code: String) -> Self {
        Self {
            seed,
            code: Some(code),
            rails: Some(rails),
        }
    }

    /// Rail counts this seed should be exercised with.
    #[must_use]
    pub fn rail_counts(&self, requested: &[usize]) -> Vec<usize> {
        self.rails.map_or_else(|| requested.to_vec(), |rails| vec![rails])
    }

    #[must_use]
    pub fn label(&self) -> String {
        match &self.code {
            Some(code) => format!("{code} ({})", self.seed),
            None => self.seed.to_string(),
        }
    }
}

/// Resolve CLI seed tokens into canonical seeds.
///
/// Accepts literal integers and session codes like `5-MAPLE42`.
pub fn resolve_seed_inputs(tokens: &[String]) -> Result<Vec<SeedInfo>> {
    let mut pending: Vec<SeedInfo> = Vec::new();

    for token in tokens {
        if token.is_empty() {
            continue;
        }

        if let Ok(value) = token.parse::<u64>() {
            pending.push(SeedInfo::from_numeric(value));
            continue;
        }

        if let Ok(value) = token.parse::<i64>() {
            pending.push(SeedInfo::from_numeric(value.unsigned_abs()));
            continue;
        }

        if let Some((rails, seed)) = decode_code(token) {
            pending.push(SeedInfo::from_code(seed, rails, token.to_uppercase()));
            continue;
        }

        bail!("Unrecognized seed token: {token}");
    }

    let mut deduped: Vec<SeedInfo> = Vec::new();
    let mut seen: HashSet<(u64, Option<usize>)> = HashSet::new();

    for info in pending {
        if seen.insert((info.seed, info.rails)) {
            deduped.push(info);
        }
    }

    if deduped.is_empty() {
        deduped.push(SeedInfo::from_numeric(1337));
    }

    Ok(deduped)
}
