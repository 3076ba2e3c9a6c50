use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{ConfigError, LadderConfig};
use crate::diagram::LadderDiagram;
use crate::error::{LadderError, LadderResult};
use crate::generator::LadderGenerator;
use crate::outcome::{Outcome, Pairing, PrizeBoard, assign};
use crate::permutation::Permutation;
use crate::random::RngBundle;
use crate::resolver::{PathResolver, ResolvedPath};
use crate::roster::{Roster, SetupError};
use crate::seed::{decode_code, encode_code, seed_from_entropy};

/// Errors raised while creating or replaying a session.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Setup(#[from] SetupError),
    #[error(transparent)]
    Ladder(#[from] LadderError),
    #[error("unrecognized session code: {0}")]
    Code(String),
}

/// A player's traced path and what waits at its end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reveal {
    pub player: String,
    pub path: ResolvedPath,
    pub outcome: Outcome,
}

/// One round of the ladder game: players, prizes, and the ladder between them.
#[derive(Debug, Clone)]
pub struct LadderSession {
    generator: LadderGenerator,
    seed: u64,
    rng: RngBundle,
    roster: Roster,
    prizes: Vec<String>,
    diagram: LadderDiagram,
    board: PrizeBoard,
    permutation: Permutation,
}

impl LadderSession {
    /// Deal a fresh round from `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] for an invalid config, more prizes than
    /// players, or a ladder that could not be generated.
    pub fn new(
        config: LadderConfig,
        roster: Roster,
        prizes: Vec<String>,
        seed: u64,
    ) -> Result<Self, SessionError> {
        let generator = LadderGenerator::new(config)?;
        let mut rng = RngBundle::from_user_seed(seed);
        let (diagram, board, permutation) = deal(&generator, &roster, &prizes, &mut rng)?;
        log::debug!(
            "session dealt: seed {seed}, {} players, {} winners",
            roster.len(),
            board.winner_count()
        );
        Ok(Self {
            generator,
            seed,
            rng,
            roster,
            prizes,
            diagram,
            board,
            permutation,
        })
    }

    /// Recreate a round from a session code such as `5-MAPLE42`, with
    /// default-named players.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Code`] for an unrecognized code, otherwise as
    /// [`LadderSession::new`].
    pub fn from_code(
        config: LadderConfig,
        code: &str,
        prizes: Vec<String>,
    ) -> Result<Self, SessionError> {
        let (rail_count, seed) =
            decode_code(code).ok_or_else(|| SessionError::Code(code.to_string()))?;
        let roster = Roster::numbered(rail_count, &config)?;
        Self::new(config, roster, prizes, seed)
    }

    /// Trace one player's path.
    ///
    /// # Errors
    ///
    /// Returns [`LadderError::OutOfRange`] for an unknown player index.
    pub fn reveal(&self, player: usize) -> LadderResult<Reveal> {
        let path = PathResolver::resolve(&self.diagram, player)?;
        let name = self.roster.name(player).unwrap_or_default().to_string();
        let outcome = self
            .board
            .outcome_at(path.terminal())
            .cloned()
            .unwrap_or_else(Outcome::blank);
        Ok(Reveal {
            player: name,
            path,
            outcome,
        })
    }

    /// Every player paired with their outcome.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::SizeMismatch`] if roster and ladder disagree.
    pub fn results(&self) -> Result<Vec<Pairing>, SetupError> {
        assign(&self.permutation, &self.roster, &self.board)
    }

    /// Throw the ladder away and deal again from the next seed in the stream.
    ///
    /// Replayed rounds always have a [`code`](LadderSession::code).
    ///
    /// # Errors
    ///
    /// See [`LadderSession::reseed`].
    pub fn replay(&mut self) -> Result<(), SessionError> {
        let entropy = rand::RngCore::next_u64(self.rng.ladder());
        self.reseed(seed_from_entropy(self.roster.len(), entropy))
    }

    /// Deterministically redeal the round from `seed`.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the new ladder or prize board cannot be
    /// built; the session is left unchanged in that case.
    pub fn reseed(&mut self, seed: u64) -> Result<(), SessionError> {
        let mut rng = RngBundle::from_user_seed(seed);
        let (diagram, board, permutation) =
            deal(&self.generator, &self.roster, &self.prizes, &mut rng)?;
        log::debug!("session reseeded: {} -> {seed}", self.seed);
        self.seed = seed;
        self.rng = rng;
        self.diagram = diagram;
        self.board = board;
        self.permutation = permutation;
        Ok(())
    }

    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Shareable code reproducing this round with default player names.
    ///
    /// `None` when the seed lies outside what a code can express; rounds
    /// started from a code, or from [`seed_from_entropy`], always have one.
    #[must_use]
    pub fn code(&self) -> Option<String> {
        let rail_count = self.roster.len();
        let code = encode_code(rail_count, self.seed);
        (decode_code(&code) == Some((rail_count, self.seed))).then_some(code)
    }

    #[must_use]
    pub const fn diagram(&self) -> &LadderDiagram {
        &self.diagram
    }

    #[must_use]
    pub const fn board(&self) -> &PrizeBoard {
        &self.board
    }

    #[must_use]
    pub const fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    #[must_use]
    pub const fn roster(&self) -> &Roster {
        &self.roster
    }

    #[must_use]
    pub const fn config(&self) -> &LadderConfig {
        self.generator.config()
    }

    /// Random draws consumed since the last deal.
    #[must_use]
    pub const fn draws(&self) -> u64 {
        self.rng.draws()
    }
}

fn deal(
    generator: &LadderGenerator,
    roster: &Roster,
    prizes: &[String],
    rng: &mut RngBundle,
) -> Result<(LadderDiagram, PrizeBoard, Permutation), SessionError> {
    let diagram = generator.generate(roster.len(), rng.ladder())?;
    let board = PrizeBoard::shuffled(roster.len(), prizes, rng.prizes())?;
    let permutation = PathResolver::resolve_all(&diagram)?;
    Ok((diagram, board, permutation))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(seed: u64) -> LadderSession {
        let config = LadderConfig::default();
        let roster = Roster::new(["Ana", "Bo", "Cy", "Dee"], &config).unwrap();
        LadderSession::new(config, roster, vec!["Coffee".to_string()], seed).unwrap()
    }

    #[test]
    fn session_reveals_match_results() {
        let session = session(4242);
        let results = session.results().unwrap();
        assert_eq!(results.len(), 4);
        assert_eq!(
            results.iter().filter(|pairing| pairing.outcome.is_winner).count(),
            1
        );
        for (index, pairing) in results.iter().enumerate() {
            let reveal = session.reveal(index).unwrap();
            assert_eq!(reveal.player, pairing.player);
            assert_eq!(reveal.path.terminal(), pairing.terminal);
            assert_eq!(reveal.outcome, pairing.outcome);
        }
        assert!(matches!(
            session.reveal(4),
            Err(LadderError::OutOfRange { index: 4, .. })
        ));
    }

    #[test]
    fn same_seed_same_round() {
        let first = session(7);
        let second = session(7);
        assert_eq!(first.diagram(), second.diagram());
        assert_eq!(first.board(), second.board());
        assert!(first.draws() > 0);
    }

    #[test]
    fn replay_moves_to_a_new_seed() {
        let mut round = session(7);
        let original = round.seed();
        round.replay().unwrap();
        assert_ne!(round.seed(), original);
        assert_eq!(round.permutation().len(), 4);

        let mut twin = session(7);
        twin.replay().unwrap();
        assert_eq!(round.diagram(), twin.diagram());
    }

    #[test]
    fn codes_rebuild_the_diagram() {
        let config = LadderConfig::default();
        let round = LadderSession::from_code(config.clone(), "5-MAPLE42", Vec::new()).unwrap();
        assert_eq!(round.code().as_deref(), Some("5-MAPLE42"));
        assert_eq!(round.roster().name(0), Some("Player 1"));

        let again = LadderSession::from_code(config.clone(), "5-maple42", Vec::new()).unwrap();
        assert_eq!(round.diagram(), again.diagram());

        assert_eq!(
            LadderSession::from_code(config, "nonsense", Vec::new()).unwrap_err(),
            SessionError::Code("nonsense".to_string())
        );
    }

    fn rebuilt_from_code(round: &LadderSession) -> LadderSession {
        let code = round.code().unwrap();
        LadderSession::from_code(LadderConfig::default(), &code, Vec::new()).unwrap()
    }

    #[test]
    fn code_rebuilds_the_round_it_came_from() {
        let config = LadderConfig::default();
        let roster = Roster::numbered(5, &config).unwrap();
        let seed = seed_from_entropy(5, 7);
        let mut round = LadderSession::new(config, roster, Vec::new(), seed).unwrap();

        let rebuilt = rebuilt_from_code(&round);
        assert_eq!(rebuilt.seed(), round.seed());
        assert_eq!(rebuilt.diagram(), round.diagram());

        for _ in 0..3 {
            round.replay().unwrap();
            let rebuilt = rebuilt_from_code(&round);
            assert_eq!(rebuilt.seed(), round.seed());
            assert_eq!(rebuilt.diagram(), round.diagram());
        }
    }

    #[test]
    fn arbitrary_seeds_have_no_code_until_replayed() {
        let mut round = session(7);
        assert_eq!(round.code(), None);
        round.replay().unwrap();
        assert_eq!(rebuilt_from_code(&round).diagram(), round.diagram());
    }

    #[test]
    fn too_many_prizes_is_a_setup_error() {
        let config = LadderConfig::default();
        let roster = Roster::numbered(2, &config).unwrap();
        let prizes = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(
            LadderSession::new(config, roster, prizes, 1).unwrap_err(),
            SessionError::Setup(SetupError::TooManyWinners {
                winners: 3,
                slots: 2
            })
        );
    }
}
