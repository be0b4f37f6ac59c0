use std::hash::Hash;

/// A two-player, perfect-information, turn-based game.
///
/// Implementations expose their full rules through this trait so that
/// collaborators stay decoupled from the concrete state representation.
/// States are treated as immutable values: applying an action yields a new
/// state and leaves the input untouched.
pub trait Game: Clone + Send + Sync {
    /// The game state (e.g., a chess position)
    type State: Clone + Send;

    /// A game action (e.g., a chess move)
    type Action: Clone + Copy + Send + Eq + Hash;

    /// A participant identifier (e.g., a chess color)
    type Player: Copy + Eq;

    /// The rules-level classification of a state
    type Status: Copy + Eq;

    /// The error returned for rejected actions
    type Error;

    /// Returns the initial game state
    fn initial_state(&self) -> Self::State;

    /// Returns all legal actions from the given state
    fn legal_actions(&self, state: &Self::State) -> Vec<Self::Action>;

    /// Validates and applies an action, returning the successor state.
    ///
    /// Actions arrive from untrusted collaborators, so implementations must
    /// re-check legality and return an error rather than corrupt state. On
    /// error the input state is unchanged (it is never mutated either way).
    fn try_apply(
        &self,
        state: &Self::State,
        action: Self::Action,
    ) -> Result<Self::State, Self::Error>;

    /// Returns the rules-level classification of the state
    fn status(&self, state: &Self::State) -> Self::Status;

    /// Returns the player whose turn it is
    fn to_play(&self, state: &Self::State) -> Self::Player;

    /// Returns true if no further actions are accepted from this state
    fn is_terminal(&self, state: &Self::State) -> bool;
}
