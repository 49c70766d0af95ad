//! Domain Services
//!
//! Pure profile aggregation over a mission snapshot.

use crate::domain::entities::{Mission, Profile};
use crate::domain::value_objects::{Achievement, Level};

pub fn total_points(missions: &[Mission]) -> u64 {
    missions.iter().map(|m| u64::from(m.points)).sum()
}

/// Highest tier whose threshold the total meets
pub fn level_for(total: u64) -> Level {
    match total {
        t if t >= 1000 => Level::Expert,
        t if t >= 500 => Level::Advanced,
        t if t >= 200 => Level::Intermediate,
        _ => Level::Beginner,
    }
}

/// Every badge whose threshold the total meets, ascending
pub fn achievements_for(total: u64) -> Vec<Achievement> {
    Achievement::ALL
        .into_iter()
        .filter(|badge| total >= badge.threshold())
        .collect()
}

pub fn build_profile(missions: &[Mission]) -> Profile {
    let total = total_points(missions);
    Profile {
        total_points: total,
        level: level_for(total),
        achievements: achievements_for(total),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::MissionId;

    fn missions(points: &[u32]) -> Vec<Mission> {
        points
            .iter()
            .enumerate()
            .map(|(i, &p)| Mission {
                id: MissionId::new(i as u64 + 1),
                title: format!("m{i}"),
                points: p,
            })
            .collect()
    }

    #[test]
    fn test_expert_collects_every_badge() {
        let profile = build_profile(&missions(&[100, 900]));
        assert_eq!(profile.total_points, 1000);
        assert_eq!(profile.level, Level::Expert);
        assert_eq!(
            profile.achievements,
            vec![
                Achievement::Points200,
                Achievement::Points500,
                Achievement::Points1000
            ]
        );
    }

    #[test]
    fn test_beginner_has_no_badges() {
        let profile = build_profile(&missions(&[50]));
        assert_eq!(profile.total_points, 50);
        assert_eq!(profile.level, Level::Beginner);
        assert!(profile.achievements.is_empty());
    }

    #[test]
    fn test_level_boundaries() {
        assert_eq!(level_for(0), Level::Beginner);
        assert_eq!(level_for(199), Level::Beginner);
        assert_eq!(level_for(200), Level::Intermediate);
        assert_eq!(level_for(499), Level::Intermediate);
        assert_eq!(level_for(500), Level::Advanced);
        assert_eq!(level_for(999), Level::Advanced);
        assert_eq!(level_for(1000), Level::Expert);
    }

    #[test]
    fn test_badges_are_cumulative() {
        assert_eq!(achievements_for(199), vec![]);
        assert_eq!(achievements_for(200), vec![Achievement::Points200]);
        assert_eq!(
            achievements_for(700),
            vec![Achievement::Points200, Achievement::Points500]
        );
    }

    #[test]
    fn test_empty_store() {
        let profile = build_profile(&[]);
        assert_eq!(profile.total_points, 0);
        assert_eq!(profile.level, Level::Beginner);
    }

    #[test]
    fn test_total_does_not_overflow_u32() {
        let profile = build_profile(&missions(&[u32::MAX, u32::MAX]));
        assert_eq!(profile.total_points, 2 * u64::from(u32::MAX));
        assert_eq!(profile.level, Level::Expert);
    }
}
