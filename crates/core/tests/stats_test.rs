use codebrew_core::stats::{bedwars_stars, guild_level, matrix_level, network_level};
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
#[case(0.0, 1)]
#[case(1.0, 2)]
#[case(9800.0, 99)]
#[case(9801.0, 100)]
#[case(-5.0, 1)]
fn test_network_level(#[case] exp: f64, #[case] expected: u64) {
    assert_eq!(network_level(exp), expected);
}

#[rstest]
#[case(0.0, 1.0)]
#[case(250_000.0, 6.0)]
#[case(10_000.0, 2.0)]
#[case(20_000.0, 2.41)]
fn test_matrix_level(#[case] exp: f64, #[case] expected: f64) {
    assert!((matrix_level(exp) - expected).abs() < 1e-9, "exp {} gave {}", exp, matrix_level(exp));
}

#[rstest]
#[case(0, 1)]
#[case(499, 1)]
#[case(500, 2)]
#[case(1499, 2)]
#[case(1999, 3)]
#[case(2000, 3)]
#[case(3499, 3)]
#[case(3500, 4)]
#[case(6999, 4)]
#[case(8500, 5)]
#[case(12_000, 6)]
fn test_bedwars_star_boundaries(#[case] exp: u64, #[case] expected: u64) {
    assert_eq!(bedwars_stars(exp), expected);
}

#[test]
fn test_bedwars_stars_monotonic() {
    let mut previous = bedwars_stars(0);
    for exp in (0..60_000).step_by(50) {
        let stars = bedwars_stars(exp);
        assert!(stars >= previous, "stars dropped at exp {}", exp);
        previous = stars;
    }
}

#[rstest]
#[case(0, 0)]
#[case(99_999, 0)]
#[case(100_000, 1)]
#[case(250_000, 2)]
#[case(500_000, 3)]
#[case(22_999_999, 14)]
#[case(23_000_000, 15)]
#[case(26_000_000, 16)]
#[case(29_000_000, 17)]
fn test_guild_level(#[case] exp: u64, #[case] expected: u64) {
    assert_eq!(guild_level(exp), expected);
}
