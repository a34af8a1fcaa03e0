use std::{collections::BTreeMap, fmt, str::FromStr};

use thiserror::Error;
use tracing::warn;

/// Face values accepted by the machine. Declaration order is highest first,
/// which is also the order used for deposits and note selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Denomination {
    D5000,
    D2000,
    D1000,
    D500,
    D200,
    D100,
    D50,
    D10,
}

impl Denomination {
    pub const ALL: [Denomination; 8] = [
        Denomination::D5000,
        Denomination::D2000,
        Denomination::D1000,
        Denomination::D500,
        Denomination::D200,
        Denomination::D100,
        Denomination::D50,
        Denomination::D10,
    ];

    /// Smallest note; every withdrawal must be a multiple of it.
    pub const SMALLEST: Denomination = Denomination::D10;

    pub const fn face_value(self) -> u32 {
        match self {
            Denomination::D5000 => 5000,
            Denomination::D2000 => 2000,
            Denomination::D1000 => 1000,
            Denomination::D500 => 500,
            Denomination::D200 => 200,
            Denomination::D100 => 100,
            Denomination::D50 => 50,
            Denomination::D10 => 10,
        }
    }

    pub fn from_face_value(value: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.face_value() == value)
    }

    const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.face_value())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotesParseError {
    #[error("Expected `face:count`, got `{0}`")]
    MissingSeparator(String),
    #[error("Invalid face value `{0}`")]
    InvalidFaceValue(String),
    #[error("Invalid note count `{0}`")]
    InvalidCount(String),
}

/// Notes inserted in a single deposit action, keyed by raw face value.
///
/// Face values outside [`Denomination::ALL`] are kept as given; deposits skip them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteBundle {
    notes: BTreeMap<u32, u32>,
}

impl NoteBundle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `count` notes of `face_value` to the bundle, summing repeated faces.
    pub fn with(mut self, face_value: u32, count: u32) -> Self {
        let entry = self.notes.entry(face_value).or_default();
        *entry = entry.saturating_add(count);
        self
    }

    pub fn count(&self, face_value: u32) -> Option<u32> {
        self.notes.get(&face_value).copied()
    }

    /// Face values that do not match any accepted denomination.
    pub fn unrecognized(&self) -> impl Iterator<Item = u32> + '_ {
        self.notes
            .keys()
            .copied()
            .filter(|face| Denomination::from_face_value(*face).is_none())
    }
}

/// Parses whitespace separated `face:count` pairs, e.g. `100:3 50:2`.
impl FromStr for NoteBundle {
    type Err = NotesParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split_whitespace().try_fold(NoteBundle::new(), |bundle, pair| {
            let Some((face, count)) = pair.split_once(':') else {
                return Err(NotesParseError::MissingSeparator(pair.to_string()));
            };
            let face = face
                .parse::<u32>()
                .map_err(|_| NotesParseError::InvalidFaceValue(face.to_string()))?;
            let count = count
                .parse::<u32>()
                .map_err(|_| NotesParseError::InvalidCount(count.to_string()))?;
            Ok(bundle.with(face, count))
        })
    }
}

/// Notes physically held by a machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoteInventory {
    counts: [u32; Denomination::ALL.len()],
}

impl NoteInventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an inventory from `(face value, count)` pairs.
    /// Unknown face values are dropped.
    pub fn from_counts(counts: impl IntoIterator<Item = (u32, u32)>) -> Self {
        let mut inventory = Self::default();
        for (face, count) in counts {
            match Denomination::from_face_value(face) {
                Some(denomination) => inventory.counts[denomination.index()] = count,
                None => warn!(face, count, "ignoring unknown denomination in inventory"),
            }
        }
        inventory
    }

    pub fn count(&self, denomination: Denomination) -> u32 {
        self.counts[denomination.index()]
    }

    /// Every denomination with its count, highest first.
    pub fn iter(&self) -> impl Iterator<Item = (Denomination, u32)> + '_ {
        Denomination::ALL.into_iter().map(|d| (d, self.count(d)))
    }

    pub fn total_value(&self) -> u64 {
        self.iter()
            .map(|(d, count)| u64::from(d.face_value()) * u64::from(count))
            .sum()
    }

    pub(crate) fn checked_add(&mut self, denomination: Denomination, count: u32) -> Option<()> {
        let slot = &mut self.counts[denomination.index()];
        *slot = slot.checked_add(count)?;
        Some(())
    }

    /// Removes the notes of `plan`. Plans are only ever built against this inventory,
    /// so the subtraction cannot underflow.
    pub(crate) fn take(&mut self, plan: &WithdrawalPlan) {
        for (denomination, count) in plan.iter() {
            let slot = &mut self.counts[denomination.index()];
            *slot = slot.saturating_sub(count);
        }
    }
}

impl From<NoteBundle> for NoteInventory {
    fn from(bundle: NoteBundle) -> Self {
        Self::from_counts(bundle.notes)
    }
}

/// Notes dispensed by one withdrawal. Only denominations actually handed out are present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WithdrawalPlan {
    notes: BTreeMap<Denomination, u32>,
}

impl WithdrawalPlan {
    pub(crate) fn push(&mut self, denomination: Denomination, count: u32) {
        if count > 0 {
            self.notes.insert(denomination, count);
        }
    }

    pub fn count(&self, denomination: Denomination) -> u32 {
        self.notes.get(&denomination).copied().unwrap_or_default()
    }

    /// Dispensed notes, highest denomination first.
    pub fn iter(&self) -> impl Iterator<Item = (Denomination, u32)> + '_ {
        self.notes.iter().map(|(d, count)| (*d, *count))
    }

    #[cfg(test)]
    pub(crate) fn total_value(&self) -> u64 {
        self.iter()
            .map(|(d, count)| u64::from(d.face_value()) * u64::from(count))
            .sum()
    }
}

impl fmt::Display for WithdrawalPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (denomination, count) in self.iter() {
            if !first {
                f.write_str(" ")?;
            }
            write!(f, "{denomination}:{count}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn denominations_are_descending() {
        let faces: Vec<u32> = Denomination::ALL.iter().map(|d| d.face_value()).collect();
        assert_eq!(faces, vec![5000, 2000, 1000, 500, 200, 100, 50, 10]);
        assert!(Denomination::ALL.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(Denomination::from_face_value(200), Some(Denomination::D200));
        assert_eq!(Denomination::from_face_value(20), None);
    }

    #[test]
    fn parse_bundle() {
        let bundle: NoteBundle = "100:3  50:2 100:1 7:4".parse().unwrap();
        assert_eq!(bundle.count(100), Some(4));
        assert_eq!(bundle.count(50), Some(2));
        assert_eq!(bundle.count(10), None);
        assert_eq!(bundle.unrecognized().collect::<Vec<_>>(), vec![7]);

        assert_eq!("".parse::<NoteBundle>().unwrap(), NoteBundle::new());
        assert_eq!(
            "100".parse::<NoteBundle>().unwrap_err(),
            NotesParseError::MissingSeparator("100".to_string())
        );
        assert_eq!(
            "ten:1".parse::<NoteBundle>().unwrap_err(),
            NotesParseError::InvalidFaceValue("ten".to_string())
        );
        assert_eq!(
            "10:-1".parse::<NoteBundle>().unwrap_err(),
            NotesParseError::InvalidCount("-1".to_string())
        );
    }

    #[test]
    fn inventory_from_counts() {
        let inventory = NoteInventory::from_counts([(100, 5), (50, 0), (10, 10), (3, 9)]);
        assert_eq!(inventory.count(Denomination::D100), 5);
        assert_eq!(inventory.count(Denomination::D10), 10);
        assert_eq!(inventory.count(Denomination::D5000), 0);
        assert_eq!(inventory.total_value(), 600);
        assert_eq!(inventory.iter().count(), 8);
    }

    #[test]
    fn inventory_take_plan() {
        let mut inventory = NoteInventory::from_counts([(100, 5), (10, 10)]);
        let mut plan = WithdrawalPlan::default();
        plan.push(Denomination::D100, 1);
        plan.push(Denomination::D50, 0);
        plan.push(Denomination::D10, 5);
        assert_eq!(plan.iter().count(), 2);
        assert_eq!(plan.to_string(), "100:1 10:5");

        inventory.take(&plan);
        assert_eq!(inventory.count(Denomination::D100), 4);
        assert_eq!(inventory.count(Denomination::D10), 5);
    }

    #[test]
    fn inventory_overflow_is_detected() {
        let mut inventory = NoteInventory::from_counts([(10, u32::MAX)]);
        assert!(inventory.checked_add(Denomination::D10, 1).is_none());
        assert!(inventory.checked_add(Denomination::D50, 1).is_some());
    }
}
