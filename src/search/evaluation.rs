use crate::core::types::{DRAW_SCORE, MATE_SCORE, MATE_THRESHOLD};
use crate::core::Score;
use chess::{BitBoard, Board, BoardStatus, Color, Piece};

// Valores das peças em centipawns
const PAWN_VALUE: Score = 100;
const KNIGHT_VALUE: Score = 320;
const BISHOP_VALUE: Score = 330;
const ROOK_VALUE: Score = 500;
const QUEEN_VALUE: Score = 900;

/// Casas centrais d4/e4/d5/e5.
const CENTER: BitBoard = BitBoard(0x0000_0018_1800_0000);
const CENTER_BONUS: Score = 20;

/// Avaliação estática: material + ocupação do centro, sempre do ponto de
/// vista de quem joga. Posições terminais devolvem as sentinelas da busca.
pub struct Evaluator;

impl Evaluator {
    pub fn new() -> Self {
        Evaluator
    }

    pub fn evaluate(&self, board: &Board) -> Score {
        match board.status() {
            // Quem joga está em mate: o pior resultado possível
            BoardStatus::Checkmate => return -MATE_SCORE,
            BoardStatus::Stalemate => return DRAW_SCORE,
            BoardStatus::Ongoing => {}
        }
        if insufficient_material(board) {
            return DRAW_SCORE;
        }

        let white = self.side_score(board, Color::White);
        let black = self.side_score(board, Color::Black);
        match board.side_to_move() {
            Color::White => white - black,
            Color::Black => black - white,
        }
    }

    fn side_score(&self, board: &Board, color: Color) -> Score {
        let own = board.color_combined(color);
        let mut score = 0;

        for (piece, value) in [
            (Piece::Pawn, PAWN_VALUE),
            (Piece::Knight, KNIGHT_VALUE),
            (Piece::Bishop, BISHOP_VALUE),
            (Piece::Rook, ROOK_VALUE),
            (Piece::Queen, QUEEN_VALUE),
        ] {
            score += (board.pieces(piece) & own).popcnt() as Score * value;
        }

        score += (own & CENTER).popcnt() as Score * CENTER_BONUS;
        score
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// Rei contra rei, rei e cavalo ou rei e bispo: material insuficiente.
fn insufficient_material(board: &Board) -> bool {
    if (board.pieces(Piece::Pawn)
        | board.pieces(Piece::Rook)
        | board.pieces(Piece::Queen))
        .popcnt()
        > 0
    {
        return false;
    }
    (board.pieces(Piece::Knight) | board.pieces(Piece::Bishop)).popcnt() <= 1
}

/// Score com magnitude de mate forçado.
#[inline]
pub fn is_mate_score(score: Score) -> bool {
    score.abs() >= MATE_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn posicao_inicial_e_simetrica() {
        let eval = Evaluator::new();
        assert_eq!(eval.evaluate(&Board::default()), 0);
    }

    #[test]
    fn score_do_ponto_de_vista_de_quem_joga() {
        let eval = Evaluator::new();
        // Brancas com torre a mais
        let white_up =
            Board::from_str("4k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        let black_to_move =
            Board::from_str("4k3/8/8/8/8/8/8/R3K3 b - - 0 1").unwrap();
        assert_eq!(eval.evaluate(&white_up), ROOK_VALUE);
        assert_eq!(eval.evaluate(&black_to_move), -ROOK_VALUE);
    }

    #[test]
    fn bonus_de_centro() {
        let eval = Evaluator::new();
        // Cavalo branco em e4 contra cavalo preto em a8
        let board = Board::from_str("n3k3/8/8/8/4N3/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(eval.evaluate(&board), CENTER_BONUS);
    }

    #[test]
    fn terminais_devolvem_sentinelas() {
        let eval = Evaluator::new();

        // Mate do pastor: pretas em mate, pretas a jogar
        let mate = Board::from_str(
            "r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4",
        )
        .unwrap();
        assert_eq!(eval.evaluate(&mate), -MATE_SCORE);

        // Afogamento clássico
        let stalemate = Board::from_str("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert_eq!(eval.evaluate(&stalemate), DRAW_SCORE);

        // Rei e bispo contra rei
        let dead = Board::from_str("4k3/8/8/8/8/8/8/2B1K3 w - - 0 1").unwrap();
        assert_eq!(eval.evaluate(&dead), DRAW_SCORE);
    }

    #[test]
    fn deteta_scores_de_mate() {
        assert!(is_mate_score(MATE_SCORE));
        assert!(is_mate_score(-MATE_SCORE));
        assert!(!is_mate_score(900));
    }
}
