use anyhow::{Context, Result, bail};

pub fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Parse CLI seed tokens. Accepts decimal integers (negative values use their
/// magnitude) and `0x`-prefixed hex.
pub fn parse_seeds(tokens: &[String]) -> Result<Vec<u64>> {
    let mut seeds = Vec::with_capacity(tokens.len());
    for token in tokens {
        if let Some(hex) = token
            .strip_prefix("0x")
            .or_else(|| token.strip_prefix("0X"))
        {
            let seed = u64::from_str_radix(&hex.replace('_', ""), 16)
                .with_context(|| format!("invalid hex seed '{token}'"))?;
            seeds.push(seed);
            continue;
        }
        if let Ok(value) = token.parse::<i64>() {
            seeds.push(value.unsigned_abs());
            continue;
        }
        if let Ok(value) = token.parse::<u64>() {
            seeds.push(value);
            continue;
        }
        bail!("unrecognised seed '{token}'");
    }
    if seeds.is_empty() {
        bail!("no seeds given");
    }
    Ok(seeds)
}
