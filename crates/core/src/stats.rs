//! Level and prestige formulas used by the player and guild stat commands.

/// Experience cost of each of the first Bedwars stars, in order.
pub const BEDWARS_STAR_COSTS: [u64; 4] = [500, 1000, 2000, 3500];

/// Experience cost of every star after [`BEDWARS_STAR_COSTS`] is exhausted.
pub const BEDWARS_STAR_COST_AFTER: u64 = 5000;

/// Experience needed for each guild level; the last entry repeats forever.
pub const GUILD_LEVEL_COSTS: [u64; 15] = [
    100_000, 150_000, 250_000, 500_000, 750_000, 1_000_000, 1_250_000, 1_500_000, 2_000_000,
    2_500_000, 2_500_000, 2_500_000, 2_500_000, 2_500_000, 3_000_000,
];

/// Network level shown by the `profile` command: `floor(sqrt(exp) + 1)`.
pub fn network_level(exp: f64) -> u64 {
    (exp.max(0.0).sqrt() + 1.0).floor() as u64
}

/// Level shown by the `matrix` command: `1 + sqrt(exp / 10000)` rounded to two places.
pub fn matrix_level(exp: f64) -> f64 {
    let level = 1.0 + (exp.max(0.0) / 10_000.0).sqrt();
    (level * 100.0).round() / 100.0
}

/// Bedwars star count. A fresh player holds one star.
pub fn bedwars_stars(exp: u64) -> u64 {
    let mut stars = 1;
    let mut remaining = exp;

    for cost in BEDWARS_STAR_COSTS {
        if remaining < cost {
            return stars;
        }
        remaining -= cost;
        stars += 1;
    }

    stars + remaining / BEDWARS_STAR_COST_AFTER
}

/// Whole guild level reached with `exp` guild experience.
pub fn guild_level(exp: u64) -> u64 {
    let mut level = 0;
    let mut remaining = exp;

    loop {
        let index = (level as usize).min(GUILD_LEVEL_COSTS.len() - 1);
        let cost = GUILD_LEVEL_COSTS[index];
        if remaining < cost {
            return level;
        }
        remaining -= cost;
        level += 1;
    }
}
