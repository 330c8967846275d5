//! Turns typed pull lists into candidate pulls.
//!
//! Grammar, comma or whitespace separated: a rarity digit (`4`, `5`, `6`),
//! optionally followed by `*` (featured) or `!` (featured, tagged
//! guaranteed), optionally prefixed by `g` for a gift. E.g. `4,4,5,6*,g6`.

use anyhow::{Result, anyhow, bail};
use chrono::{DateTime, Utc};
use tally_core::pull::{NewPull, Rarity, SpecialTag};

/// Every pull of one batch shares `at`; the log orders them by key.
pub fn parse_pulls(input: &str, at: DateTime<Utc>) -> Result<Vec<NewPull>> {
  let pulls = input
    .split(|c: char| c == ',' || c.is_whitespace())
    .filter(|t| !t.is_empty())
    .map(|token| parse_token(token, at))
    .collect::<Result<Vec<_>>>()?;
  if pulls.is_empty() {
    bail!("no pulls given");
  }
  Ok(pulls)
}

fn parse_token(token: &str, at: DateTime<Utc>) -> Result<NewPull> {
  let (gift, rest) = match token.strip_prefix(['g', 'G']) {
    Some(rest) => (true, rest),
    None => (false, token),
  };
  let mut chars = rest.chars();
  let digit = chars
    .next()
    .and_then(|c| c.to_digit(10))
    .ok_or_else(|| anyhow!("bad pull {token:?}: expected a rarity digit"))?;
  let rarity = Rarity::try_from(digit as u8)
    .map_err(|e| anyhow!("bad pull {token:?}: {e}"))?;

  let mut pull = NewPull::new(rarity).at(at);
  match chars.as_str() {
    "" => {}
    "*" => pull = pull.featured(),
    "!" => pull = pull.featured().tagged(SpecialTag::Guaranteed),
    suffix => bail!("bad pull {token:?}: unknown suffix {suffix:?}"),
  }
  if gift {
    pull = pull.tagged(SpecialTag::Gift);
  }
  Ok(pull)
}

/// Fill a short ten-pull with `padding` pulls. Gifts do not take a slot.
pub fn pad_ten(
  mut pulls: Vec<NewPull>,
  padding: Rarity,
  at: DateTime<Utc>,
) -> Result<Vec<NewPull>> {
  let slots = pulls.iter().filter(|p| !p.is_gift()).count();
  if slots > 10 {
    bail!("a ten-pull holds at most 10 pulls, got {slots}");
  }
  pulls.extend((slots..10).map(|_| NewPull::new(padding).at(at)));
  Ok(pulls)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn now() -> DateTime<Utc> { Utc::now() }

  #[test]
  fn parses_markers() {
    let pulls = parse_pulls("4, 5 6* 6! g6", now()).unwrap();
    assert_eq!(pulls.len(), 5);
    assert_eq!(pulls[1].rarity, Rarity::Five);
    assert!(pulls[2].is_featured);
    assert_eq!(pulls[2].special_tag, SpecialTag::None);
    assert_eq!(pulls[3].special_tag, SpecialTag::Guaranteed);
    assert!(pulls[4].is_gift());
  }

  #[test]
  fn batch_shares_timestamp() {
    let at = now();
    let pulls = parse_pulls("4,4,4", at).unwrap();
    assert!(pulls.iter().all(|p| p.timestamp == at));
  }

  #[test]
  fn rejects_bad_tokens() {
    assert!(parse_pulls("", now()).is_err());
    assert!(parse_pulls("3", now()).is_err());
    assert!(parse_pulls("x", now()).is_err());
    assert!(parse_pulls("6?", now()).is_err());
  }

  #[test]
  fn pads_to_ten() {
    let pulls = parse_pulls("6* g5", now()).unwrap();
    let padded = pad_ten(pulls, Rarity::Four, now()).unwrap();
    assert_eq!(padded.len(), 11);
    assert_eq!(padded.iter().filter(|p| !p.is_gift()).count(), 10);
    assert!(padded[2..].iter().all(|p| p.rarity == Rarity::Four));
  }

  #[test]
  fn overfull_ten_pull_rejected() {
    let pulls = parse_pulls("4 4 4 4 4 4 4 4 4 4 4", now()).unwrap();
    assert!(pad_ten(pulls, Rarity::Four, now()).is_err());
  }
}
