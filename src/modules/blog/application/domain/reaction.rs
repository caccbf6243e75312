use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Reaction {
    Like,
    Dislike,
}

impl Reaction {
    pub fn opposite(self) -> Self {
        match self {
            Reaction::Like => Reaction::Dislike,
            Reaction::Dislike => Reaction::Like,
        }
    }
}

/// Something users can like or dislike. Implemented by marker types so the
/// ledger is written once and instantiated per target.
pub trait InteractionTarget: Send + Sync + 'static {
    /// Used in logs, advisory lock keys and error messages.
    const KIND: &'static str;
}

#[derive(Debug, Clone, Copy)]
pub struct PostTarget;

impl InteractionTarget for PostTarget {
    const KIND: &'static str = "post";
}

#[derive(Debug, Clone, Copy)]
pub struct CommentTarget;

impl InteractionTarget for CommentTarget {
    const KIND: &'static str = "comment";
}

/// Which records exist for one (user, target) pair.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReactionState {
    pub liked: bool,
    pub disliked: bool,
}

impl ReactionState {
    /// Pressing a reaction that is set removes it. Otherwise it is set and
    /// the opposite one is cleared.
    pub fn toggle(self, pressed: Reaction) -> Self {
        match pressed {
            Reaction::Like if self.liked => Self {
                liked: false,
                ..self
            },
            Reaction::Like => Self {
                liked: true,
                disliked: false,
            },
            Reaction::Dislike if self.disliked => Self {
                disliked: false,
                ..self
            },
            Reaction::Dislike => Self {
                liked: false,
                disliked: true,
            },
        }
    }

    pub fn has(&self, reaction: Reaction) -> bool {
        match reaction {
            Reaction::Like => self.liked,
            Reaction::Dislike => self.disliked,
        }
    }

    pub fn current(&self) -> Option<Reaction> {
        match (self.liked, self.disliked) {
            (true, _) => Some(Reaction::Like),
            (false, true) => Some(Reaction::Dislike),
            (false, false) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct ReactionSummary {
    pub likes: u64,
    pub dislikes: u64,
    /// The caller's own reaction; absent for anonymous callers.
    pub viewer: Option<Reaction>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMPTY: ReactionState = ReactionState {
        liked: false,
        disliked: false,
    };

    #[test]
    fn test_like_when_disliked_swaps() {
        let disliked = ReactionState {
            liked: false,
            disliked: true,
        };
        assert_eq!(
            disliked.toggle(Reaction::Like),
            ReactionState {
                liked: true,
                disliked: false
            }
        );
    }

    #[test]
    fn test_double_toggle_restores_state() {
        for pressed in [Reaction::Like, Reaction::Dislike] {
            assert_eq!(EMPTY.toggle(pressed).toggle(pressed), EMPTY);
        }
    }

    #[test]
    fn test_never_both_after_any_sequence() {
        let presses = [
            Reaction::Like,
            Reaction::Dislike,
            Reaction::Dislike,
            Reaction::Like,
            Reaction::Like,
            Reaction::Dislike,
            Reaction::Like,
        ];
        let mut state = EMPTY;
        for pressed in presses {
            state = state.toggle(pressed);
            assert!(!(state.liked && state.disliked));
        }
    }

    #[test]
    fn test_current_and_opposite() {
        assert_eq!(EMPTY.current(), None);
        assert_eq!(EMPTY.toggle(Reaction::Dislike).current(), Some(Reaction::Dislike));
        assert_eq!(Reaction::Like.opposite(), Reaction::Dislike);
        assert!(EMPTY.toggle(Reaction::Like).has(Reaction::Like));
    }

    #[test]
    fn test_summary_serializes_lowercase() {
        let json = serde_json::to_value(ReactionSummary {
            likes: 3,
            dislikes: 1,
            viewer: Some(Reaction::Like),
        })
        .unwrap();
        assert_eq!(json["viewer"], "like");
    }
}
