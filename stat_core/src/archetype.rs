//! Player archetype derived from where the selected skills sit on the board
//!
//! The board is cut into five angular sectors around the origin. A skill belongs to
//! the sector its position falls in, plus a neighbouring sector when it sits close
//! to the boundary.

use build_core::PlayerBuild;
use catalog_core::{Catalog, Position};
use serde::Serialize;
use std::f64::consts::PI;
use std::fmt;

const SECTOR_COUNT: usize = 5;
/// Fraction of a sector near either edge that also counts for the neighbour
const EDGE_BAND: f64 = 0.15;
/// Minimum count ratio against the dominant sector for a hybrid
const HYBRID_THRESHOLD: f64 = 0.35;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    Burglar,
    Hacker,
    Tech,
    Mercenary,
    ConArtist,
}

impl Sector {
    pub const ALL: [Sector; SECTOR_COUNT] = [
        Sector::Burglar,
        Sector::Hacker,
        Sector::Tech,
        Sector::Mercenary,
        Sector::ConArtist,
    ];

    fn index(self) -> usize {
        self as usize
    }

    fn from_index(index: usize) -> Sector {
        Sector::ALL[index % SECTOR_COUNT]
    }

    /// Sectors a board position counts toward, own sector first
    pub fn for_position(position: Position) -> Vec<Sector> {
        let precise = ((position.x.atan2(position.y) / PI) * 2.5 + 5.5).rem_euclid(5.0);
        let floored = precise.floor();
        let index = floored as usize % SECTOR_COUNT;
        let fraction = precise - floored;

        let mut sectors = vec![Sector::from_index(index)];
        if fraction <= EDGE_BAND {
            sectors.push(Sector::from_index(index + SECTOR_COUNT - 1));
        } else if fraction >= 1.0 - EDGE_BAND {
            sectors.push(Sector::from_index(index + 1));
        }
        sectors
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    Freelancer,
    Burglar,
    Hacker,
    Tech,
    Mercenary,
    ConArtist,
    Ghost,
    Saboteur,
    Commando,
    Thief,
    Specialist,
    Breacher,
    Infiltrator,
    Engineer,
    Spy,
    Assassin,
}

impl Archetype {
    fn pure(sector: Sector) -> Self {
        match sector {
            Sector::Burglar => Archetype::Burglar,
            Sector::Hacker => Archetype::Hacker,
            Sector::Tech => Archetype::Tech,
            Sector::Mercenary => Archetype::Mercenary,
            Sector::ConArtist => Archetype::ConArtist,
        }
    }

    /// Hybrid of two distinct sectors, in either order
    fn hybrid(a: Sector, b: Sector) -> Self {
        use Sector::*;
        match (a.min(b), a.max(b)) {
            (Burglar, Hacker) => Archetype::Ghost,
            (Burglar, Tech) => Archetype::Saboteur,
            (Burglar, Mercenary) => Archetype::Commando,
            (Burglar, ConArtist) => Archetype::Thief,
            (Hacker, Tech) => Archetype::Specialist,
            (Hacker, Mercenary) => Archetype::Breacher,
            (Hacker, ConArtist) => Archetype::Infiltrator,
            (Tech, Mercenary) => Archetype::Engineer,
            (Tech, ConArtist) => Archetype::Spy,
            (Mercenary, ConArtist) => Archetype::Assassin,
            (same, _) => Archetype::pure(same),
        }
    }

    /// Classify a build from the sector hits of its selected skills
    pub fn classify(catalog: &Catalog, build: &PlayerBuild) -> Self {
        let mut counts = [0u32; SECTOR_COUNT];
        for skill in build
            .selected_skills()
            .iter()
            .filter_map(|id| catalog.skill(*id))
        {
            for sector in Sector::for_position(skill.position) {
                counts[sector.index()] += 1;
            }
        }
        Archetype::from_counts(counts)
    }

    /// Dominant sector is the first strict maximum; the runner-up must beat a
    /// rising ratio threshold to make a hybrid
    pub fn from_counts(counts: [u32; SECTOR_COUNT]) -> Self {
        let mut highest = 0;
        let mut dominant = None;
        for (index, count) in counts.iter().enumerate() {
            if *count > highest {
                highest = *count;
                dominant = Some(index);
            }
        }
        let Some(dominant) = dominant else {
            return Archetype::Freelancer;
        };

        let mut threshold = HYBRID_THRESHOLD;
        let mut secondary = None;
        for (index, count) in counts.iter().enumerate() {
            if index == dominant {
                continue;
            }
            let ratio = f64::from(*count) / f64::from(highest);
            if ratio > threshold {
                threshold = ratio;
                secondary = Some(index);
            }
        }

        let dominant = Sector::from_index(dominant);
        match secondary {
            Some(index) => Archetype::hybrid(dominant, Sector::from_index(index)),
            None => Archetype::pure(dominant),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Archetype::Freelancer => "Freelancer",
            Archetype::Burglar => "Burglar",
            Archetype::Hacker => "Hacker",
            Archetype::Tech => "Tech",
            Archetype::Mercenary => "Mercenary",
            Archetype::ConArtist => "Con Artist",
            Archetype::Ghost => "Ghost",
            Archetype::Saboteur => "Saboteur",
            Archetype::Commando => "Commando",
            Archetype::Thief => "Thief",
            Archetype::Specialist => "Specialist",
            Archetype::Breacher => "Breacher",
            Archetype::Infiltrator => "Infiltrator",
            Archetype::Engineer => "Engineer",
            Archetype::Spy => "Spy",
            Archetype::Assassin => "Assassin",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{build_with, catalog};
    use proptest::prelude::*;

    fn at(x: f64, y: f64) -> Vec<Sector> {
        Sector::for_position(Position { x, y })
    }

    #[test]
    fn test_sector_centres() {
        assert_eq!(at(0.0, 100.0), vec![Sector::Burglar]);
        assert_eq!(at(95.0, 31.0), vec![Sector::Hacker]);
        assert_eq!(at(59.0, -81.0), vec![Sector::Tech]);
        assert_eq!(at(-59.0, -81.0), vec![Sector::Mercenary]);
        assert_eq!(at(-95.0, 31.0), vec![Sector::ConArtist]);
    }

    #[test]
    fn test_sector_edges() {
        // Straight down is exactly the Tech/Mercenary boundary
        assert_eq!(at(0.0, -100.0), vec![Sector::Mercenary, Sector::Tech]);
        // Just past the Burglar/Hacker boundary
        assert_eq!(at(59.0, 81.0), vec![Sector::Hacker, Sector::Burglar]);
        // Just short of the Hacker/Burglar boundary from the Burglar side
        assert_eq!(at(55.0, 85.0), vec![Sector::Burglar, Sector::Hacker]);
    }

    #[test]
    fn test_from_counts() {
        assert_eq!(Archetype::from_counts([0; 5]), Archetype::Freelancer);
        assert_eq!(Archetype::from_counts([3, 1, 0, 0, 0]), Archetype::Burglar);
        assert_eq!(Archetype::from_counts([3, 2, 0, 0, 0]), Archetype::Ghost);
        // Ties for first go to the earlier sector, the tie partner becomes the hybrid
        assert_eq!(Archetype::from_counts([0, 0, 0, 2, 2]), Archetype::Assassin);
        // Highest runner-up wins
        assert_eq!(Archetype::from_counts([1, 0, 5, 2, 3]), Archetype::Spy);
    }

    #[test]
    fn test_hybrid_is_unordered() {
        for a in Sector::ALL {
            for b in Sector::ALL {
                assert_eq!(Archetype::hybrid(a, b), Archetype::hybrid(b, a));
            }
        }
        assert_eq!(Archetype::hybrid(Sector::Tech, Sector::Tech), Archetype::Tech);
    }

    #[test]
    fn test_classify_build() {
        let catalog = catalog();
        let empty = build_with(&catalog, &[], &[]);
        assert_eq!(Archetype::classify(&catalog, &empty), Archetype::Freelancer);

        let burglar = build_with(&catalog, &[0, 1, 2], &[]);
        assert_eq!(Archetype::classify(&catalog, &burglar), Archetype::Burglar);

        let still_burglar = build_with(&catalog, &[0, 1, 2, 9], &[]);
        assert_eq!(Archetype::classify(&catalog, &still_burglar), Archetype::Burglar);

        // Inside Man straddles the Burglar and Hacker sectors
        let ghost = build_with(&catalog, &[0, 1, 2, 24, 9], &[]);
        assert_eq!(Archetype::classify(&catalog, &ghost), Archetype::Ghost);
    }

    #[test]
    fn test_names() {
        assert_eq!(Archetype::ConArtist.to_string(), "Con Artist");
        assert_eq!(Archetype::Saboteur.name(), "Saboteur");
    }

    proptest! {
        #[test]
        fn prop_position_hits_one_or_two_neighbours(x in -500.0f64..500.0, y in -500.0f64..500.0) {
            let sectors = Sector::for_position(Position { x, y });
            prop_assert!(!sectors.is_empty() && sectors.len() <= 2);
            if let [own, other] = sectors[..] {
                let gap = (own.index() + SECTOR_COUNT - other.index()) % SECTOR_COUNT;
                prop_assert!(gap == 1 || gap == SECTOR_COUNT - 1);
            }
        }

        #[test]
        fn prop_hybrid_survives_reversal(counts in proptest::array::uniform5(0u32..6)) {
            let mut reversed = counts;
            reversed.reverse();
            let is_pure = |archetype: Archetype| {
                Sector::ALL.iter().any(|sector| Archetype::pure(*sector) == archetype)
            };
            // Reversal only changes which sector wins a tie, never whether a hybrid exists
            prop_assert_eq!(
                is_pure(Archetype::from_counts(counts)),
                is_pure(Archetype::from_counts(reversed))
            );
        }
    }
}
