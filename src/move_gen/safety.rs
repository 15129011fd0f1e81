//! Stages three to five: king safety, pins, check responses
//!
//! All three stages reason over the two-sided move set built by the earlier
//! stages. The attacked-square test is deliberately defined as "appears as a
//! destination among the opponent's pseudo-legal and special moves" rather
//! than by a second, recursively filtered generation pass; computing the
//! opponent's attack range from the raw set is what keeps the mutual
//! recursion between the two kings from ever starting.

use crate::board::Board;
use crate::piece::{Piece, PieceColor, PieceKind};
use crate::types::{Move, Square};

use super::pseudo;

/// Whether `square` appears as a destination among `moves` played by
/// pieces of color `by`.
pub(super) fn is_attacked(board: &Board, moves: &[Move], square: Square, by: PieceColor) -> bool {
    moves.iter().any(|mv| {
        mv.dst() == square
            && board
                .piece_at(mv.src())
                .is_some_and(|piece| piece.color == by)
    })
}

/// Stage three: drop every king move whose destination lies in the enemy
/// attack range. Castle moves are king moves too, which is what makes their
/// destination square safe without a dedicated rule.
pub(super) fn filter_king_safety(board: &Board, moves: &mut Vec<Move>) {
    let raw = moves.clone();
    moves.retain(|mv| {
        let Some(piece) = board.piece_at(mv.src()) else {
            return false;
        };
        if piece.kind != PieceKind::King {
            return true;
        }
        !is_attacked(board, &raw, mv.dst(), piece.color.enemy())
    });
}

/// Stage four: restrict pinned pieces to the pinning ray.
///
/// For each sliding piece, walk each of its uncollided rays outward: if the
/// first occupied square holds an opposing non-king piece and the next
/// occupied square beyond it holds that side's king, the first piece is
/// pinned. Its destinations are cut down to the ray itself, which includes
/// the attacker's own square, so capturing the pinner and moving along the
/// pin line both stay legal.
pub(super) fn restrict_pinned(board: &Board, moves: &mut Vec<Move>) {
    for square in Board::all_squares() {
        let Some(attacker) = board.piece_at(square) else {
            continue;
        };
        if !attacker.kind.is_sliding() {
            continue;
        }
        for &slope in attacker.kind.slopes() {
            let ray = pseudo::ray(square, slope);
            let Some((pinned, allowed)) = pin_on_ray(board, attacker, square, &ray) else {
                continue;
            };
            moves.retain(|mv| mv.src() != pinned || allowed.contains(&mv.dst()));
        }
    }
}

fn pin_on_ray(
    board: &Board,
    attacker: Piece,
    origin: Square,
    ray: &[Square],
) -> Option<(Square, Vec<Square>)> {
    let mut occupied = ray.iter().filter(|&&square| !board.is_empty(square));

    let &shield_square = occupied.next()?;
    let shield = board.piece_at(shield_square)?;
    if shield.color == attacker.color || shield.kind == PieceKind::King {
        return None;
    }

    let &beyond_square = occupied.next()?;
    let beyond = board.piece_at(beyond_square)?;
    if beyond.kind != PieceKind::King || beyond.color != shield.color {
        return None;
    }

    let mut allowed = vec![origin];
    allowed.extend_from_slice(ray);
    Some((shield_square, allowed))
}

/// Moves landing on a king's square. Pseudo-legal generation only ever
/// targets enemy-occupied squares, so every such move is a check attack.
pub(super) fn check_attacks(board: &Board, moves: &[Move]) -> Vec<Move> {
    moves
        .iter()
        .copied()
        .filter(|mv| {
            board
                .piece_at(mv.dst())
                .is_some_and(|piece| piece.kind == PieceKind::King)
        })
        .collect()
}

/// Stage five: narrow the checked side's answers.
///
/// Under a single check the defender keeps captures of the attacker,
/// interpositions on the checking ray, and king moves; under a double check
/// only king moves remain, since no single capture or block resolves both.
/// The checking color's own moves stay in the graph throughout: the graph is
/// two-sided by construction and `check_attacks` itself is answered from
/// them.
pub(super) fn narrow_check_responses(board: &Board, moves: &mut Vec<Move>) {
    let checks = check_attacks(board, moves);
    let Some(&first_check) = checks.first() else {
        return;
    };
    let Some(defender) = board.piece_at(first_check.dst()).map(|king| king.color) else {
        return;
    };

    if checks.len() == 1 {
        let blocking = blocking_squares(board, first_check);
        moves.retain(|mv| {
            let Some(piece) = board.piece_at(mv.src()) else {
                return false;
            };
            if piece.color != defender {
                return true;
            }
            piece.kind == PieceKind::King
                || mv.dst() == first_check.src()
                || blocking.contains(&mv.dst())
        });
    } else {
        moves.retain(|mv| {
            let Some(piece) = board.piece_at(mv.src()) else {
                return false;
            };
            piece.color != defender || piece.kind == PieceKind::King
        });
    }
}

/// Squares strictly between a sliding attacker and the checked king; empty
/// for knight and pawn checks, which cannot be blocked.
fn blocking_squares(board: &Board, check: Move) -> Vec<Square> {
    let Some(attacker) = board.piece_at(check.src()) else {
        return Vec::new();
    };
    if !attacker.kind.is_sliding() {
        return Vec::new();
    }

    let file_step = (check.dst().file() - check.src().file()).signum();
    let rank_step = (check.dst().rank() - check.src().rank()).signum();
    let mut squares = Vec::new();
    let mut square = check.src().offset(file_step, rank_step);
    while square.is_valid() && square != check.dst() {
        squares.push(square);
        square = square.offset(file_step, rank_step);
    }
    squares
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(board: &Board) -> Vec<Move> {
        let mut moves = pseudo::piece_moves(board);
        moves.extend(board.possible_en_passant_moves());
        moves
    }

    #[test]
    fn test_is_attacked_uses_only_the_given_color() {
        let board = Board::new();
        let moves = raw(&board);
        let e3 = Square::parse("e3").unwrap();
        assert!(is_attacked(&board, &moves, e3, PieceColor::White));
        assert!(!is_attacked(&board, &moves, e3, PieceColor::Black));
    }

    #[test]
    fn test_king_cannot_step_into_queen_diagonal() {
        // White king on e2; the black queen on g5 covers e3 through the
        // f4-e3 diagonal but does not give check.
        let board = Board::from_moves(
            &Move::parse_list(&["e2e4", "e7e5", "e1e2", "d8g5"]).unwrap(),
        );
        let mut moves = raw(&board);
        filter_king_safety(&board, &mut moves);

        let king = Square::parse("e2").unwrap();
        let destinations: Vec<Square> = moves
            .iter()
            .filter(|mv| mv.src() == king)
            .map(|mv| mv.dst())
            .collect();
        assert!(destinations.contains(&Square::parse("d3").unwrap()));
        assert!(destinations.contains(&Square::parse("f3").unwrap()));
        assert!(destinations.contains(&Square::parse("e1").unwrap()));
        assert!(
            !destinations.contains(&Square::parse("e3").unwrap()),
            "e3 lies in the queen's attack range"
        );
    }

    #[test]
    fn test_blocking_squares_of_diagonal_check() {
        let board = Board::from_moves(
            &Move::parse_list(&["f2f3", "e7e5", "g2g4", "d8h4"]).unwrap(),
        );
        let check = Move::parse("h4e1").unwrap();
        assert_eq!(
            blocking_squares(&board, check),
            vec![Square::parse("g3").unwrap(), Square::parse("f2").unwrap()]
        );
    }

    #[test]
    fn test_knight_attack_has_no_blocking_squares() {
        // Nothing interposes against a non-sliding attacker.
        let board = Board::from_moves(
            &Move::parse_list(&["e2e4", "g8f6", "d2d4", "f6g4", "h2h3", "g4f2"]).unwrap(),
        );
        assert!(blocking_squares(&board, Move::parse("f2d1").unwrap()).is_empty());
    }
}
