/// Title tier a matchday size belongs to; drives the title counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Challenger,
    Signature,
    Slam,
}

impl Tier {
    pub fn for_size(size: u8) -> Option<Self> {
        match size {
            4 | 5 => Some(Tier::Challenger),
            6 | 7 => Some(Tier::Signature),
            8 => Some(Tier::Slam),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Challenger => "Challenger",
            Tier::Signature => "Signature",
            Tier::Slam => "Slam",
        }
    }
}

/// A single (rank, points) award for a matchday size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Award {
    pub rank: u8,
    pub points: u32,
}

const fn award(rank: u8, points: u32) -> Award {
    Award { rank, points }
}

const FOUR: &[Award] = &[award(1, 250), award(2, 100)];
const FIVE: &[Award] = &[award(1, 300), award(2, 100), award(5, 50)];
const SIX: &[Award] = &[award(1, 600), award(2, 300), award(3, 100)];
const SEVEN: &[Award] = &[award(1, 700), award(2, 400), award(3, 100), award(7, 50)];
const EIGHT: &[Award] = &[award(1, 1000), award(2, 600), award(3, 250), award(4, 100)];

/// Award table for a size, or `None` when the size carries no awards at all.
pub fn awards_for(size: u8) -> Option<&'static [Award]> {
    match size {
        4 => Some(FOUR),
        5 => Some(FIVE),
        6 => Some(SIX),
        7 => Some(SEVEN),
        8 => Some(EIGHT),
        _ => None,
    }
}

pub fn points_for(size: u8, rank: u8) -> Option<u32> {
    awards_for(size)?
        .iter()
        .find(|a| a.rank == rank)
        .map(|a| a.points)
}

pub fn is_awarded_rank(size: u8, rank: u8) -> bool {
    points_for(size, rank).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_award_lookup() {
        assert_eq!(points_for(8, 1), Some(1000));
        assert_eq!(points_for(5, 5), Some(50));
        assert_eq!(points_for(7, 7), Some(50));
        assert_eq!(points_for(4, 3), None);
        assert_eq!(points_for(3, 1), None);
    }

    #[test]
    fn test_tiers() {
        assert_eq!(Tier::for_size(4), Some(Tier::Challenger));
        assert_eq!(Tier::for_size(7), Some(Tier::Signature));
        assert_eq!(Tier::for_size(8), Some(Tier::Slam));
        assert_eq!(Tier::for_size(9), None);
    }
}
