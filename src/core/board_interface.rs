// Ficheiro: src/core/board_interface.rs
// Descrição: Adaptador fino sobre o motor de regras (crate `chess`).
// A busca conversa com o board apenas por aqui: geração de lances legais,
// aplicação copy-make, lance nulo e classificação do tipo de cada lance.

use crate::core::types::MoveKind;
use chess::{Board, ChessMove, MoveGen, Piece};

/// Lista de lances legais na posição.
pub fn legal_moves(board: &Board) -> Vec<ChessMove> {
    MoveGen::new_legal(board).collect()
}

/// Verifica se o rei de quem joga está em xeque.
#[inline(always)]
pub fn in_check(board: &Board) -> bool {
    board.checkers().popcnt() > 0
}

/// Classifica um lance legal uma única vez.
///
/// Roque é detectado pelo rei andando duas colunas; en passant pelo peão
/// mudando de coluna para uma casa vazia. Para lances legais essas duas
/// condições só ocorrem nos lances especiais correspondentes.
pub fn classify_move(board: &Board, mv: ChessMove) -> MoveKind {
    let src = mv.get_source();
    let dst = mv.get_dest();
    let captures = board.piece_on(dst).is_some();

    if mv.get_promotion().is_some() {
        return MoveKind::Promotion { capture: captures };
    }

    match board.piece_on(src) {
        Some(Piece::King) => {
            let from_file = src.get_file().to_index() as i8;
            let to_file = dst.get_file().to_index() as i8;
            if (from_file - to_file).abs() == 2 {
                return if to_file > from_file {
                    MoveKind::CastleKingside
                } else {
                    MoveKind::CastleQueenside
                };
            }
        }
        Some(Piece::Pawn) => {
            if src.get_file() != dst.get_file() && !captures {
                return MoveKind::EnPassant;
            }
        }
        _ => {}
    }

    if captures {
        MoveKind::Capture
    } else {
        MoveKind::Normal
    }
}

/// Gera apenas lances de captura (incluindo en passant) para a quiescence.
pub fn capture_moves(board: &Board) -> Vec<ChessMove> {
    MoveGen::new_legal(board)
        .filter(|&mv| classify_move(board, mv).is_capture())
        .collect()
}
