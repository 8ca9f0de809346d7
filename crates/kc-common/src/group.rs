//! Bay identity and the fixed bay→group partition.
//!
//! Individual sensors flip noisily between occupied and vacant, so the
//! pipeline predicts at the level of a *group*: a fixed block of consecutive
//! kerbside identifiers. The partition must be a pure function of the bay
//! identifier; the serving side recomputes it and the two must agree.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kerbside bay identifier as reported by the sensor feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BayId(pub u32);

impl fmt::Display for BayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for BayId {
    fn from(id: u32) -> Self {
        BayId(id)
    }
}

/// Group identifier: the lowest bay identifier of the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(pub u32);

impl GroupId {
    /// Map a bay to its group by truncating to the block boundary.
    ///
    /// With `block_size` 20, bays 100..=119 all map to group 100 and bay
    /// 120 starts group 120.
    pub fn for_bay(bay: BayId, block_size: u32) -> GroupId {
        GroupId((bay.0 / block_size) * block_size)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_boundaries() {
        assert_eq!(GroupId::for_bay(BayId(100), 20), GroupId(100));
        assert_eq!(GroupId::for_bay(BayId(119), 20), GroupId(100));
        assert_eq!(GroupId::for_bay(BayId(120), 20), GroupId(120));
        assert_eq!(GroupId::for_bay(BayId(0), 20), GroupId(0));
        assert_eq!(GroupId::for_bay(BayId(19), 20), GroupId(0));
    }

    #[test]
    fn assignment_is_pure() {
        for id in [0u32, 7, 99, 100, 1234, 50_000] {
            let first = GroupId::for_bay(BayId(id), 20);
            let second = GroupId::for_bay(BayId(id), 20);
            assert_eq!(first, second);
        }
    }
}
