//! Recipient selection for broadcasts.
//!
//! Works on the per-slot `connected` flags only, so the exclusion rules can
//! be checked without any sockets.

use super::PlayerId;

/// Who a broadcast is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// Every connected player, including the originator.
    All,
    /// Every connected player except the given one.
    AllExcept(PlayerId),
    /// A single player, if connected.
    Only(PlayerId),
}

/// Connected slot ids matching `audience`, in slot order.
pub fn recipients(connected: &[bool], audience: Audience) -> Vec<PlayerId> {
    connected
        .iter()
        .enumerate()
        .filter(|&(_, &is_connected)| is_connected)
        .map(|(id, _)| id as PlayerId)
        .filter(|&id| match audience {
            Audience::All => true,
            Audience::AllExcept(origin) => id != origin,
            Audience::Only(target) => id == target,
        })
        .collect()
}

/// `(receiver, subject)` pairs for the pairwise spawn broadcast: every
/// connected player learns about every other connected player.
pub fn spawn_pairs(connected: &[bool]) -> Vec<(PlayerId, PlayerId)> {
    let ids = recipients(connected, Audience::All);
    ids.iter()
        .flat_map(|&receiver| {
            ids.iter()
                .filter(move |&&subject| subject != receiver)
                .map(move |&subject| (receiver, subject))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: PlayerId = 0;
    const B: PlayerId = 2;
    const C: PlayerId = 3;

    fn abc() -> [bool; 5] {
        [true, false, true, true, false]
    }

    #[test]
    fn movement_excludes_originator() {
        assert_eq!(recipients(&abc(), Audience::AllExcept(A)), vec![B, C]);
        assert_eq!(recipients(&abc(), Audience::AllExcept(C)), vec![A, B]);
    }

    #[test]
    fn chat_reaches_sender_too() {
        assert_eq!(recipients(&abc(), Audience::All), vec![A, B, C]);
    }

    #[test]
    fn disconnected_slots_are_skipped() {
        assert!(recipients(&abc(), Audience::Only(1)).is_empty());
        assert_eq!(recipients(&abc(), Audience::Only(B)), vec![B]);
        assert!(recipients(&[false; 5], Audience::All).is_empty());
    }

    #[test]
    fn spawn_pairs_cover_every_ordered_pair() {
        let pairs = spawn_pairs(&abc());
        assert_eq!(
            pairs,
            vec![(A, B), (A, C), (B, A), (B, C), (C, A), (C, B)]
        );
        assert!(pairs.iter().all(|(r, s)| r != s));
    }

    #[test]
    fn single_player_has_no_spawn_pairs() {
        assert!(spawn_pairs(&[true, false, false, false, false]).is_empty());
    }
}
