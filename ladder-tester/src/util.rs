use anyhow::{Context, Result, bail};
use ladder_game::constants::DEFAULT_MAX_PLAYERS;

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Parse rail counts such as `3,5` or `1-10` into a sorted, deduplicated list.
pub fn parse_rails(s: &str) -> Result<Vec<usize>> {
    let mut rails = Vec::new();
    for token in split_csv(s) {
        if token.eq_ignore_ascii_case("all") {
            rails.extend(1..=DEFAULT_MAX_PLAYERS);
            continue;
        }
        if let Some((low, high)) = token.split_once('-') {
            let low: usize = low
                .trim()
                .parse()
                .with_context(|| format!("invalid rail range: {token}"))?;
            let high: usize = high
                .trim()
                .parse()
                .with_context(|| format!("invalid rail range: {token}"))?;
            if low > high {
                bail!("rail range runs backwards: {token}");
            }
            rails.extend(low..=high);
            continue;
        }
        let value: usize = token
            .parse()
            .with_context(|| format!("invalid rail count: {token}"))?;
        rails.push(value);
    }
    rails.sort_unstable();
    rails.dedup();
    if rails.is_empty() {
        bail!("no rail counts requested");
    }
    if rails.first() == Some(&0) {
        bail!("rail counts start at 1");
    }
    Ok(rails)
}
