use crate::config::DashConfig;
use crate::course::Platform;
use crate::motion::PlayerBody;

/// Outcome of resolving one tick of player movement against the active
/// platform set. Pure data; mutating the player is the caller's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Resolution {
    /// Platform the player landed on this tick, if any.
    pub landed: Option<u32>,
    /// The player left the playfield: past the hazard depth or behind
    /// the trailing edge.
    pub fell: bool,
}

/// Resolve the player against platforms and hazards.
///
/// A landing is accepted while falling or resting (`vy >= 0`) on a
/// horizontally overlapping platform when either the feet sit within the
/// tolerance band above the surface, or the feet crossed the surface
/// during this tick (`prev_bottom` was at or above it). The band absorbs
/// discrete-timestep error; the crossing check stops fast falls from
/// tunneling straight through in a single tick.
///
/// When several platforms qualify, the one closest beneath the feet
/// wins; crossing candidates rank by penetration depth behind every
/// in-band candidate.
pub fn resolve(
    player: &PlayerBody,
    prev_bottom: f32,
    platforms: &[Platform],
    cfg: &DashConfig,
    trailing_bound: Option<f32>,
) -> Resolution {
    let bottom = player.bottom(cfg.player_height);
    let left = player.x;
    let right = player.right(cfg.player_width);

    let mut in_band: Option<(u32, f32)> = None;
    let mut crossing: Option<(u32, f32)> = None;

    if player.vy >= 0.0 {
        for platform in platforms {
            if right <= platform.x || left >= platform.right() {
                continue;
            }
            let gap = platform.y - bottom;
            if (0.0..=cfg.land_tolerance).contains(&gap) {
                if in_band.is_none_or(|(_, best)| gap < best) {
                    in_band = Some((platform.id, gap));
                }
            } else if gap < 0.0 && prev_bottom <= platform.y {
                let depth = -gap;
                if crossing.is_none_or(|(_, best)| depth < best) {
                    crossing = Some((platform.id, depth));
                }
            }
        }
    }

    let landed = in_band.or(crossing).map(|(id, _)| id);
    let fell = landed.is_none()
        && (player.y > cfg.hazard_y || trailing_bound.is_some_and(|bound| right < bound));

    Resolution { landed, fell }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::course::PlatformKind;

    fn cfg() -> DashConfig {
        DashConfig::default()
    }

    fn platform(id: u32, x: f32, y: f32, width: f32) -> Platform {
        Platform {
            id,
            x,
            y,
            width,
            height: 30.0,
            kind: PlatformKind::Normal,
        }
    }

    /// Player whose feet are `gap` above the platform at y=450,
    /// horizontally over it, falling.
    fn falling_player(gap: f32) -> PlayerBody {
        let cfg = cfg();
        let mut body = PlayerBody::spawn(100.0, 450.0 - gap - cfg.player_height);
        body.state = crate::motion::PlayerState::Airborne;
        body.vy = 200.0;
        body
    }

    #[test]
    fn lands_within_tolerance_band() {
        let cfg = cfg();
        let platforms = [platform(1, 50.0, 450.0, 200.0)];
        let player = falling_player(10.0);
        let res = resolve(&player, player.bottom(cfg.player_height), &platforms, &cfg, None);
        assert_eq!(res.landed, Some(1));
        assert!(!res.fell);
    }

    #[test]
    fn gap_beyond_tolerance_is_not_a_landing() {
        let cfg = cfg();
        let platforms = [platform(1, 50.0, 450.0, 200.0)];
        let player = falling_player(cfg.land_tolerance + 1.0);
        let res = resolve(&player, player.bottom(cfg.player_height), &platforms, &cfg, None);
        assert_eq!(res.landed, None);
    }

    #[test]
    fn rising_player_passes_through_from_below() {
        let cfg = cfg();
        let platforms = [platform(1, 50.0, 450.0, 200.0)];
        let mut player = falling_player(5.0);
        player.vy = -300.0;
        let res = resolve(&player, player.bottom(cfg.player_height), &platforms, &cfg, None);
        assert_eq!(res.landed, None, "upward movement never lands");
    }

    #[test]
    fn no_horizontal_overlap_no_landing() {
        let cfg = cfg();
        let platforms = [platform(1, 500.0, 450.0, 200.0)];
        let player = falling_player(5.0);
        let res = resolve(&player, player.bottom(cfg.player_height), &platforms, &cfg, None);
        assert_eq!(res.landed, None);
    }

    #[test]
    fn fast_fall_crossing_is_caught() {
        // Feet moved from above the surface to below it in one tick:
        // outside the band now, but the crossing still counts.
        let cfg = cfg();
        let platforms = [platform(1, 50.0, 450.0, 200.0)];
        let mut player = PlayerBody::spawn(100.0, 450.0 + 15.0 - cfg.player_height);
        player.state = crate::motion::PlayerState::Airborne;
        player.vy = 900.0;
        let prev_bottom = 430.0;
        let res = resolve(&player, prev_bottom, &platforms, &cfg, None);
        assert_eq!(res.landed, Some(1));
    }

    #[test]
    fn already_sunk_without_crossing_is_not_a_landing() {
        // Feet were below the surface last tick too, so nothing was
        // crossed; this is a side approach, not a landing.
        let cfg = cfg();
        let platforms = [platform(1, 50.0, 450.0, 200.0)];
        let mut player = PlayerBody::spawn(100.0, 450.0 + 15.0 - cfg.player_height);
        player.vy = 100.0;
        let prev_bottom = 460.0;
        let res = resolve(&player, prev_bottom, &platforms, &cfg, None);
        assert_eq!(res.landed, None);
    }

    #[test]
    fn closest_platform_beneath_wins_tie_break() {
        let cfg = cfg();
        // Two overlapping platforms, surfaces 8 and 16 units below the feet.
        let platforms = [
            platform(1, 50.0, 450.0 + 8.0, 200.0),
            platform(2, 50.0, 450.0, 200.0),
        ];
        let player = falling_player(0.0);
        let res = resolve(&player, player.bottom(cfg.player_height), &platforms, &cfg, None);
        assert_eq!(res.landed, Some(2), "smallest positive gap wins");
    }

    #[test]
    fn in_band_candidate_beats_crossing_candidate() {
        let cfg = cfg();
        // Platform 1 was crossed this tick, platform 2 is still in band.
        let platforms = [
            platform(1, 50.0, 440.0, 200.0),
            platform(2, 50.0, 455.0, 200.0),
        ];
        let mut player = falling_player(5.0);
        player.vy = 600.0;
        let prev_bottom = 435.0;
        let res = resolve(&player, prev_bottom, &platforms, &cfg, None);
        assert_eq!(res.landed, Some(2));
    }

    #[test]
    fn fall_past_hazard_reported() {
        let cfg = cfg();
        let mut player = falling_player(5.0);
        player.y = cfg.hazard_y + 1.0;
        let res = resolve(&player, player.bottom(cfg.player_height), &[], &cfg, None);
        assert!(res.fell);
        assert_eq!(res.landed, None);
    }

    #[test]
    fn drop_behind_trailing_edge_reported() {
        let cfg = cfg();
        let player = falling_player(200.0);
        let res = resolve(
            &player,
            player.bottom(cfg.player_height),
            &[],
            &cfg,
            Some(player.right(cfg.player_width) + 1.0),
        );
        assert!(res.fell);
    }

    #[test]
    fn landing_suppresses_fall_report() {
        let cfg = cfg();
        // Platform surface deeper than the hazard line: landing wins
        // even though the player is already past the threshold.
        let platforms = [platform(1, 50.0, cfg.hazard_y + 60.0, 200.0)];
        let mut player = falling_player(0.0);
        player.y = cfg.hazard_y + 60.0 - 10.0 - cfg.player_height;
        assert!(player.y > cfg.hazard_y);
        player.vy = 100.0;
        let res = resolve(&player, player.bottom(cfg.player_height), &platforms, &cfg, None);
        assert_eq!(res.landed, Some(1));
        assert!(!res.fell);
    }
}
