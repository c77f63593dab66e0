//! Piece catalog - random pieces and player hand-off
//!
//! Shapes and colors are drawn independently and uniformly. The catalog never
//! owns randomness; callers pass the [`RandomSource`] in.

use crate::player::ActivePlayer;
use crate::rng::RandomSource;
use crate::shape::{Shape, ShapeKind};
use crate::types::{Color, Position};

/// A piece: which tetromino, its current matrix, and its paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: ShapeKind,
    pub shape: Shape,
    pub color: Color,
}

impl Piece {
    /// A piece of `kind` in spawn orientation
    pub fn new(kind: ShapeKind, color: Color) -> Self {
        Self {
            kind,
            shape: kind.shape(),
            color,
        }
    }
}

/// Pick one of the 7 shapes and one of the 7 palette colors, uniformly.
pub fn random_piece<R: RandomSource + ?Sized>(rng: &mut R) -> Piece {
    let kind = ShapeKind::ALL[rng.next_range(ShapeKind::ALL.len() as u32) as usize];
    let color = Color::ALL[rng.next_range(Color::ALL.len() as u32) as usize];
    Piece::new(kind, color)
}

/// Build the player for the next spawn.
///
/// With a `previous` player, its preview piece becomes current (shape and color
/// preserved) and only a fresh preview is drawn. Without one, both are drawn.
/// The position is always [`Position::spawn`].
pub fn next_player<R: RandomSource + ?Sized>(
    previous: Option<&ActivePlayer>,
    rng: &mut R,
) -> ActivePlayer {
    let current = match previous {
        Some(prev) => prev.next,
        None => random_piece(rng),
    };
    let next = random_piece(rng);
    ActivePlayer::new(Position::spawn(), current, next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimpleRng;

    #[test]
    fn test_random_piece_is_spawn_oriented() {
        let mut rng = SimpleRng::new(3);
        for _ in 0..50 {
            let piece = random_piece(&mut rng);
            assert_eq!(piece.shape, piece.kind.shape());
        }
    }

    #[test]
    fn test_random_piece_covers_all_kinds_and_colors() {
        let mut rng = SimpleRng::new(42);
        let mut kinds = Vec::new();
        let mut colors = Vec::new();
        for _ in 0..500 {
            let piece = random_piece(&mut rng);
            if !kinds.contains(&piece.kind) {
                kinds.push(piece.kind);
            }
            if !colors.contains(&piece.color) {
                colors.push(piece.color);
            }
        }
        assert_eq!(kinds.len(), 7);
        assert_eq!(colors.len(), 7);
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SimpleRng::new(2024);
        let mut b = SimpleRng::new(2024);
        for _ in 0..20 {
            assert_eq!(random_piece(&mut a), random_piece(&mut b));
        }
    }

    #[test]
    fn test_next_player_without_previous_draws_both() {
        let mut rng = SimpleRng::new(5);
        let player = next_player(None, &mut rng);
        assert_eq!(player.position, Position::spawn());

        let mut replay = SimpleRng::new(5);
        assert_eq!(player.current, random_piece(&mut replay));
        assert_eq!(player.next, random_piece(&mut replay));
    }

    #[test]
    fn test_next_player_promotes_preview() {
        let mut rng = SimpleRng::new(9);
        let mut first = next_player(None, &mut rng);
        // Rotate and move the current piece; the hand-off must not care.
        first.current.shape = first.current.shape.rotated();
        first.position = Position::new(10, 2);

        let second = next_player(Some(&first), &mut rng);
        assert_eq!(second.current, first.next);
        assert_eq!(second.position, Position::spawn());
    }
}
