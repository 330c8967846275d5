//! Plain-text rendering of engine results.

use tally_core::{
  distribution::Bucket,
  pool::Pool,
  probability::expected_pulls_per_six,
  pull::{PullRecord, SpecialTag},
  rules::GiftKind,
  summary::PoolSummary,
  validate::ValidationReport,
};

pub fn print_pools(pools: &[Pool]) {
  if pools.is_empty() {
    println!("no pools yet; create one with `tally add-pool <type> <name>`");
    return;
  }
  for pool in pools {
    let lock = if pool.locked { " [locked]" } else { "" };
    println!("{:<9} {}  {}{lock}", pool.pool_type, pool.pool_id, pool.name);
  }
}

pub fn print_summary(summary: &PoolSummary) {
  let pool = &summary.pool;
  let rules = pool.rules();
  println!("{} ({})", pool.name, pool.pool_type);
  println!(
    "  pulls      {} valid, {} gift records",
    summary.valid_pulls, summary.gift_records
  );
  println!(
    "  6★ {} (featured {})   5★ {}   4★ {}",
    summary.six_star, summary.featured_six, summary.five_star, summary.four_star
  );

  let source = if summary.effective.inherited { " (inherited)" } else { "" };
  println!(
    "  pity       6★ {}/{}   5★ {}/{}{source}",
    summary.effective.six_star_counter,
    rules.six_star_hard_pity,
    summary.effective.five_star_counter,
    rules.five_star_pity,
  );

  let p = &summary.probability;
  if p.in_soft_pity {
    println!("  next pull  {:.1}% (soft pity)", p.probability * 100.0);
  } else if rules.has_soft_pity() {
    println!(
      "  next pull  {:.1}% ({} until soft pity)",
      p.probability * 100.0,
      p.pulls_until_soft_pity
    );
  } else {
    println!("  next pull  {:.1}%", p.probability * 100.0);
  }
  println!(
    "  average    {:.1} pulls per 6★",
    expected_pulls_per_six(rules)
  );

  if let Some(at) = summary.featured_at {
    println!(
      "  featured   guaranteed at pull {at} ({} to go)",
      at - summary.valid_pulls
    );
  }

  println!(
    "  bonuses    +{} featured, +{} non-featured",
    summary.gifts.bonus_featured, summary.gifts.bonus_non_featured
  );
  if let Some(next) = summary.next_gift {
    let kind = match next.kind {
      GiftKind::Featured => "featured",
      GiftKind::NonFeatured => "non-featured",
    };
    println!("  next bonus {kind} at {} pulls", next.at);
  }
}

pub fn print_report(report: &ValidationReport) {
  for error in &report.errors {
    println!("error:   {error}");
  }
  for warning in &report.warnings {
    println!("warning: {warning}");
  }
}

pub fn print_committed(records: &[PullRecord]) {
  for record in records {
    let mut marks = String::new();
    if record.is_featured {
      marks.push_str(" featured");
    }
    match record.special_tag {
      SpecialTag::Guaranteed => marks.push_str(" guaranteed"),
      SpecialTag::Gift => marks.push_str(" gift"),
      SpecialTag::None => {}
    }
    println!("  {} {}{marks}", record.sequence_key, record.rarity);
  }
}

pub fn print_histogram(buckets: &[Bucket]) {
  if buckets.is_empty() {
    println!("no 6★ pulls yet");
    return;
  }
  for b in buckets {
    println!(
      "{:>3}-{:<3} {:<20} {} ({} featured, {} guaranteed)",
      b.range_start,
      b.range_end,
      "#".repeat(b.count.min(20) as usize),
      b.count,
      b.featured_count,
      b.guaranteed_count,
    );
  }
}
