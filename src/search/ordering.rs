use crate::core::board_interface::classify_move;
use crate::core::types::{MoveKind, MAX_DEPTH};
use crate::core::Depth;
use chess::{Board, ChessMove, Piece};
use std::cmp::Reverse;

// MVV-LVA (Most Valuable Victim - Least Valuable Attacker).
// Linha = vítima, coluna = atacante; índice 6 = "sem peça", para que lances
// sem captura caiam na tabela sem caso especial. En passant pontua como
// peão captura peão.
const MVV_LVA: [[i32; 7]; 7] = [
    [105, 104, 103, 102, 101, 100, 0], // vítima peão
    [205, 204, 203, 202, 201, 200, 0], // vítima cavalo
    [305, 304, 303, 302, 301, 300, 0], // vítima bispo
    [405, 404, 403, 402, 401, 400, 0], // vítima torre
    [505, 504, 503, 502, 501, 500, 0], // vítima dama
    [605, 604, 603, 602, 601, 600, 0], // vítima rei
    [0, 0, 0, 0, 0, 0, 0],             // sem vítima
];

const NO_PIECE: usize = 6;

// Faixas de prioridade, melhor primeiro: lance da TT, killers, capturas, resto.
const HASH_MOVE_SCORE: i32 = 1_000_000;
const KILLER_FIRST_SCORE: i32 = 900_001;
const KILLER_SECOND_SCORE: i32 = 900_000;
const CAPTURE_BASE_SCORE: i32 = 800_000;

#[inline(always)]
fn piece_index(piece: Option<Piece>) -> usize {
    piece.map_or(NO_PIECE, |p| p.to_index())
}

/// Pontuação MVV-LVA de um lance, vista a partir da posição de origem.
fn mvv_lva_score(board: &Board, mv: ChessMove, kind: MoveKind) -> i32 {
    if kind == MoveKind::EnPassant {
        return MVV_LVA[Piece::Pawn.to_index()][Piece::Pawn.to_index()];
    }
    let victim = piece_index(board.piece_on(mv.get_dest()));
    let attacker = piece_index(board.piece_on(mv.get_source()));
    MVV_LVA[victim][attacker]
}

/// Killer moves: até dois lances quietos por profundidade restante que
/// causaram corte beta em nós irmãos. O mais recente fica à frente.
pub struct KillerTable {
    slots: [[Option<ChessMove>; 2]; MAX_DEPTH],
}

impl KillerTable {
    pub fn new() -> Self {
        Self {
            slots: [[None; 2]; MAX_DEPTH],
        }
    }

    /// Regista um killer; se já estiver presente nada muda, senão entra à
    /// frente e o mais antigo sai.
    pub fn insert(&mut self, depth: Depth, mv: ChessMove) {
        let slot = &mut self.slots[depth as usize % MAX_DEPTH];
        if slot[0] == Some(mv) || slot[1] == Some(mv) {
            return;
        }
        slot[1] = slot[0];
        slot[0] = Some(mv);
    }

    pub fn get(&self, depth: Depth) -> [Option<ChessMove>; 2] {
        self.slots[depth as usize % MAX_DEPTH]
    }

    pub fn clear(&mut self) {
        self.slots = [[None; 2]; MAX_DEPTH];
    }
}

impl Default for KillerTable {
    fn default() -> Self {
        Self::new()
    }
}

fn score_move(
    board: &Board,
    mv: ChessMove,
    hash_move: Option<ChessMove>,
    killers: [Option<ChessMove>; 2],
) -> i32 {
    if Some(mv) == hash_move {
        return HASH_MOVE_SCORE;
    }
    if Some(mv) == killers[0] {
        return KILLER_FIRST_SCORE;
    }
    if Some(mv) == killers[1] {
        return KILLER_SECOND_SCORE;
    }
    let kind = classify_move(board, mv);
    if kind.is_capture() {
        return CAPTURE_BASE_SCORE + mvv_lva_score(board, mv, kind);
    }
    0
}

/// Ordena os lances in-place, melhor primeiro: lance da TT, depois killers,
/// depois capturas por MVV-LVA, depois os quietos na ordem do gerador.
pub fn order_moves(
    board: &Board,
    moves: &mut Vec<ChessMove>,
    hash_move: Option<ChessMove>,
    killers: [Option<ChessMove>; 2],
) {
    moves.sort_by_cached_key(|&mv| Reverse(score_move(board, mv, hash_move, killers)));
}

/// Ordena apenas capturas por MVV-LVA (para a quiescence).
pub fn order_captures(board: &Board, captures: &mut Vec<ChessMove>) {
    captures.sort_by_cached_key(|&mv| {
        Reverse(mvv_lva_score(board, mv, classify_move(board, mv)))
    });
}
